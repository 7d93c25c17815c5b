//! In-memory backend state

use chrono::Utc;
use parking_lot::Mutex;
use shared::client::{
    ActivateCardResponse, LoginRequest, LoginResponse, RegisterRequest, UserInfo,
};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Product, Role, Tab, TabItem, Waiter};
use shared::seed;
use shared::wire::{OpenTabBody, ProductBody, WaiterCreateBody, WaiterUpdateBody};
use std::collections::HashMap;
use uuid::Uuid;

/// Seeded login for each role: (email, password, role)
pub const DEMO_ACCOUNTS: [(&str, &str, Role); 3] = [
    ("cliente@restaurante.com", "cliente123", Role::Customer),
    ("garcom@restaurante.com", "garcom123", Role::Waiter),
    ("admin@restaurante.com", "admin123", Role::Admin),
];

struct Account {
    info: UserInfo,
    password: String,
}

struct Store {
    tabs: Vec<Tab>,
    products: Vec<Product>,
    waiters: Vec<Waiter>,
    accounts: Vec<Account>,
    tokens: HashMap<String, Role>,
    next_id: i64,
}

/// Mock backend state
///
/// One lock over the whole store; handlers never hold it across an await.
pub struct MockState {
    store: Mutex<Store>,
}

impl MockState {
    /// Seeded state with `pool_size` free tabs
    pub fn seeded(pool_size: u32) -> Self {
        let accounts = DEMO_ACCOUNTS
            .iter()
            .enumerate()
            .map(|(i, (email, password, role))| Account {
                info: UserInfo {
                    id: (i + 1).to_string(),
                    name: role.title().to_string(),
                    email: email.to_string(),
                    role: *role,
                },
                password: password.to_string(),
            })
            .collect();
        Self {
            store: Mutex::new(Store {
                tabs: seed::tab_pool(pool_size),
                products: seed::products(),
                waiters: seed::waiters(),
                accounts,
                tokens: HashMap::new(),
                next_id: 100,
            }),
        }
    }

    // ========== Auth ==========

    pub fn login(&self, req: &LoginRequest) -> AppResult<LoginResponse> {
        let mut store = self.store.lock();
        let user = store
            .accounts
            .iter()
            .find(|a| {
                a.info.email.eq_ignore_ascii_case(req.email.trim())
                    && a.password == req.password
                    && a.info.role == req.role
            })
            .map(|a| a.info.clone())
            .ok_or_else(AppError::invalid_credentials)?;

        let token = Uuid::new_v4().to_string();
        store.tokens.insert(token.clone(), user.role);
        tracing::info!(email = %user.email, role = %user.role, "Mock login");
        Ok(LoginResponse { token, user })
    }

    pub fn register(&self, req: &RegisterRequest) -> AppResult<()> {
        if req.name.trim().is_empty() || req.email.trim().is_empty() || req.password.is_empty() {
            return Err(AppError::validation("Name, email and password are required"));
        }
        let mut store = self.store.lock();
        if store
            .accounts
            .iter()
            .any(|a| a.info.email.eq_ignore_ascii_case(req.email.trim()))
        {
            return Err(AppError::conflict("Email already registered"));
        }
        let id = store.accounts.len() + 1;
        store.accounts.push(Account {
            info: UserInfo {
                id: id.to_string(),
                name: req.name.trim().to_string(),
                email: req.email.trim().to_string(),
                role: req.role,
            },
            password: req.password.clone(),
        });
        Ok(())
    }

    /// Issue a token directly, bypassing credentials
    pub fn issue_token(&self, role: Role) -> String {
        let token = Uuid::new_v4().to_string();
        self.store.lock().tokens.insert(token.clone(), role);
        token
    }

    /// Resolve a bearer token and check its role against `allowed`
    pub fn authorize(&self, token: Option<&str>, allowed: &[Role]) -> AppResult<Role> {
        let token = token.ok_or_else(AppError::not_authenticated)?;
        let role = self
            .store
            .lock()
            .tokens
            .get(token)
            .copied()
            .ok_or_else(|| AppError::new(ErrorCode::TokenInvalid))?;
        if !allowed.contains(&role) {
            let code = if allowed == [Role::Admin] {
                ErrorCode::AdminRequired
            } else {
                ErrorCode::PermissionDenied
            };
            return Err(AppError::new(code));
        }
        Ok(role)
    }

    pub fn activate_card(&self, code: &str) -> AppResult<ActivateCardResponse> {
        let code = code.trim();
        if code.is_empty() {
            return Err(AppError::new(ErrorCode::CardActivationFailed));
        }
        let digits: String = code.chars().filter(char::is_ascii_digit).collect();
        Ok(ActivateCardResponse {
            code: code.to_string(),
            table_number: digits.parse().ok().filter(|n| *n > 0),
        })
    }

    // ========== Tabs ==========

    pub fn tabs(&self) -> Vec<Tab> {
        self.store.lock().tabs.clone()
    }

    pub fn open_tab(&self, body: OpenTabBody) -> AppResult<Tab> {
        let customer = body.customer();
        if customer.name.trim().is_empty() {
            return Err(AppError::validation("Customer name is required").with_detail("field", "nomeCliente"));
        }
        self.with_tab(body.numero, |tab| tab.open(customer, body.mesa, Utc::now()))
    }

    pub fn close_tab(&self, number: u32) -> AppResult<Tab> {
        self.with_tab(number, Tab::release)
    }

    pub fn add_item(&self, number: u32, item: TabItem) -> AppResult<Tab> {
        self.with_tab(number, |tab| tab.add_item(item))
    }

    fn with_tab(&self, number: u32, f: impl FnOnce(&mut Tab) -> AppResult<()>) -> AppResult<Tab> {
        let mut store = self.store.lock();
        let tab = store
            .tabs
            .iter_mut()
            .find(|t| t.number == number)
            .ok_or_else(|| AppError::new(ErrorCode::TabNotFound).with_detail("number", number))?;
        f(tab)?;
        Ok(tab.clone())
    }

    // ========== Products ==========

    pub fn products(&self) -> Vec<Product> {
        self.store.lock().products.clone()
    }

    pub fn create_product(&self, body: ProductBody) -> AppResult<Product> {
        check_product(&body)?;
        let mut store = self.store.lock();
        store.next_id += 1;
        let product = body.into_product(store.next_id, 0);
        store.products.push(product.clone());
        Ok(product)
    }

    pub fn update_product(&self, id: i64, body: ProductBody) -> AppResult<Product> {
        check_product(&body)?;
        let mut store = self.store.lock();
        let slot = store
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| AppError::new(ErrorCode::ProductNotFound))?;
        *slot = body.into_product(id, slot.sales);
        Ok(slot.clone())
    }

    pub fn set_product_active(&self, id: i64, active: bool) -> AppResult<Product> {
        let mut store = self.store.lock();
        let slot = store
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| AppError::new(ErrorCode::ProductNotFound))?;
        slot.is_active = active;
        Ok(slot.clone())
    }

    pub fn delete_product(&self, id: i64) -> AppResult<()> {
        let mut store = self.store.lock();
        let before = store.products.len();
        store.products.retain(|p| p.id != id);
        if store.products.len() == before {
            return Err(AppError::new(ErrorCode::ProductNotFound));
        }
        Ok(())
    }

    // ========== Waiters ==========

    pub fn waiters(&self) -> Vec<Waiter> {
        self.store.lock().waiters.clone()
    }

    pub fn create_waiter(&self, body: WaiterCreateBody) -> AppResult<Waiter> {
        if [&body.nome, &body.username, &body.email, &body.senha]
            .iter()
            .any(|f| f.trim().is_empty())
        {
            return Err(AppError::validation("Name, username, email and password are required"));
        }
        let mut store = self.store.lock();
        ensure_unique_username(&store.waiters, &body.username, None)?;
        store.next_id += 1;
        let waiter = Waiter {
            id: store.next_id,
            name: body.nome,
            username: body.username,
            email: body.email,
            phone: body.telefone,
            is_active: true,
            registered_on: Some(Utc::now().date_naive()),
            last_login: None,
        };
        store.waiters.push(waiter.clone());
        Ok(waiter)
    }

    pub fn update_waiter(&self, id: i64, body: WaiterUpdateBody) -> AppResult<Waiter> {
        let mut store = self.store.lock();
        ensure_unique_username(&store.waiters, &body.username, Some(id))?;
        let slot = store
            .waiters
            .iter_mut()
            .find(|w| w.id == id)
            .ok_or_else(|| AppError::new(ErrorCode::WaiterNotFound))?;
        slot.name = body.nome;
        slot.username = body.username;
        slot.email = body.email;
        slot.phone = body.telefone;
        Ok(slot.clone())
    }

    pub fn set_waiter_active(&self, id: i64, active: bool) -> AppResult<Waiter> {
        let mut store = self.store.lock();
        let slot = store
            .waiters
            .iter_mut()
            .find(|w| w.id == id)
            .ok_or_else(|| AppError::new(ErrorCode::WaiterNotFound))?;
        slot.is_active = active;
        Ok(slot.clone())
    }

    pub fn delete_waiter(&self, id: i64) -> AppResult<()> {
        let mut store = self.store.lock();
        let before = store.waiters.len();
        store.waiters.retain(|w| w.id != id);
        if store.waiters.len() == before {
            return Err(AppError::new(ErrorCode::WaiterNotFound));
        }
        Ok(())
    }
}

fn check_product(body: &ProductBody) -> AppResult<()> {
    if body.nome.trim().is_empty() {
        return Err(AppError::validation("Product name is required").with_detail("field", "nome"));
    }
    if body.preco.is_sign_negative() {
        return Err(AppError::new(ErrorCode::ProductInvalidPrice));
    }
    Ok(())
}

fn ensure_unique_username(waiters: &[Waiter], username: &str, except: Option<i64>) -> AppResult<()> {
    let taken = waiters
        .iter()
        .any(|w| Some(w.id) != except && w.username.eq_ignore_ascii_case(username.trim()));
    if taken {
        return Err(AppError::new(ErrorCode::WaiterUsernameExists).with_detail("username", username));
    }
    Ok(())
}
