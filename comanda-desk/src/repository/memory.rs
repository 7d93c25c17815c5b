//! In-memory repositories over seeded data
//!
//! Locks are `parking_lot` and are never held across an await point.

use super::{AuthGateway, CardRepository, CrudRepository, Record, TabRepository};
use crate::error::DeskResult;
use async_trait::async_trait;
use chrono::Utc;
use comanda_client::Session;
use parking_lot::Mutex;
use shared::client::{ActivateCardResponse, LoginRequest, RegisterRequest, UserInfo};
use shared::error::{AppError, ErrorCode};
use shared::models::{Customer, Tab, TabItem};
use shared::seed;
use uuid::Uuid;

// ========== Tabs ==========

pub struct MemoryTabRepository {
    tabs: Mutex<Vec<Tab>>,
}

impl MemoryTabRepository {
    pub fn new(tabs: Vec<Tab>) -> Self {
        Self {
            tabs: Mutex::new(tabs),
        }
    }

    /// `size` free slots with fresh uuid ids
    pub fn seeded(size: u32) -> Self {
        Self::new(seed::tab_pool(size))
    }

    fn write(&self, id: &str, f: impl FnOnce(&mut Tab) -> Result<(), AppError>) -> DeskResult<Tab> {
        let mut tabs = self.tabs.lock();
        let slot = tabs
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| AppError::new(ErrorCode::TabNotFound).with_detail("id", id))?;
        // apply to a copy so a failed transition leaves the stored tab untouched
        let mut updated = slot.clone();
        f(&mut updated)?;
        *slot = updated.clone();
        Ok(updated)
    }
}

#[async_trait]
impl TabRepository for MemoryTabRepository {
    async fn list(&self) -> DeskResult<Vec<Tab>> {
        Ok(self.tabs.lock().clone())
    }

    async fn open(&self, tab: &Tab, customer: &Customer, table_number: u32) -> DeskResult<Tab> {
        let customer = customer.clone();
        self.write(&tab.id, |t| t.open(customer, table_number, Utc::now()))
    }

    async fn close(&self, tab: &Tab) -> DeskResult<Tab> {
        self.write(&tab.id, Tab::release)
    }

    async fn add_item(&self, tab: &Tab, item: &TabItem) -> DeskResult<Tab> {
        let item = item.clone();
        self.write(&tab.id, |t| t.add_item(item))
    }
}

// ========== Admin records ==========

struct Store<T> {
    records: Vec<T>,
    next_id: i64,
}

pub struct MemoryCrudRepository<T> {
    store: Mutex<Store<T>>,
}

impl<T: Record> MemoryCrudRepository<T> {
    pub fn new(records: Vec<T>) -> Self {
        let next_id = records.iter().map(Record::id).max().unwrap_or(0) + 1;
        Self {
            store: Mutex::new(Store { records, next_id }),
        }
    }

    fn modify(&self, id: i64, f: impl FnOnce(&mut T)) -> DeskResult<T> {
        let mut store = self.store.lock();
        let index = store
            .records
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| T::not_found(id))?;
        let mut updated = store.records[index].clone();
        f(&mut updated);
        updated.check_unique(&store.records)?;
        store.records[index] = updated.clone();
        Ok(updated)
    }
}

#[async_trait]
impl<T: Record> CrudRepository<T> for MemoryCrudRepository<T> {
    async fn list(&self) -> DeskResult<Vec<T>> {
        Ok(self.store.lock().records.clone())
    }

    async fn create(&self, data: &T::Create) -> DeskResult<T> {
        T::check_create(data)?;
        let mut store = self.store.lock();
        let record = T::build(store.next_id, data, Utc::now().date_naive());
        record.check_unique(&store.records)?;
        store.next_id += 1;
        store.records.push(record.clone());
        Ok(record)
    }

    async fn update(&self, id: i64, data: &T::Update) -> DeskResult<T> {
        T::check_update(data)?;
        self.modify(id, |r| r.apply(data))
    }

    async fn set_active(&self, id: i64, active: bool) -> DeskResult<T> {
        self.modify(id, |r| r.set_active(active))
    }

    async fn delete(&self, id: i64) -> DeskResult<()> {
        let mut store = self.store.lock();
        let before = store.records.len();
        store.records.retain(|r| r.id() != id);
        if store.records.len() == before {
            return Err(T::not_found(id).into());
        }
        Ok(())
    }
}

// ========== Cards ==========

/// Accepts any non-blank code; digits in the code name the table
pub struct MemoryCardRepository;

#[async_trait]
impl CardRepository for MemoryCardRepository {
    async fn activate(&self, code: &str) -> DeskResult<ActivateCardResponse> {
        let code = code.trim();
        if code.is_empty() {
            return Err(AppError::new(ErrorCode::CardActivationFailed).into());
        }
        let digits: String = code.chars().filter(char::is_ascii_digit).collect();
        Ok(ActivateCardResponse {
            code: code.to_string(),
            table_number: digits.parse().ok().filter(|n| *n > 0),
        })
    }
}

// ========== Auth ==========

/// Offline login: any non-blank credentials open a local session
pub struct MemoryAuthGateway;

#[async_trait]
impl AuthGateway for MemoryAuthGateway {
    async fn login(&self, request: &LoginRequest) -> DeskResult<Session> {
        if request.email.trim().is_empty() || request.password.is_empty() {
            return Err(AppError::invalid_credentials().into());
        }
        let email = request.email.trim().to_string();
        let name = email.split('@').next().unwrap_or_default().to_string();
        Ok(Session {
            token: format!("local-{}", Uuid::new_v4()),
            role: request.role,
            user: UserInfo {
                id: Uuid::new_v4().to_string(),
                name,
                email,
                role: request.role,
            },
        })
    }

    async fn register(&self, request: &RegisterRequest) -> DeskResult<()> {
        tracing::info!(email = %request.email, role = %request.role, "Local registration accepted");
        Ok(())
    }

    async fn forgot_password(&self, email: &str) -> DeskResult<()> {
        tracing::info!(email = %email.trim(), "Local password reset accepted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use shared::models::{
        Product, ProductCategory, ProductCreate, Role, Waiter, WaiterCreate, WaiterUpdate,
    };

    fn maria() -> Customer {
        Customer {
            name: "Maria".into(),
            email: "m@x.com".into(),
            phone: "111".into(),
        }
    }

    #[tokio::test]
    async fn test_failed_transition_leaves_store_untouched() {
        let repo = MemoryTabRepository::seeded(3);
        let tabs = repo.list().await.unwrap();
        let tab = &tabs[0];

        let opened = repo.open(tab, &maria(), 4).await.unwrap();
        assert!(opened.is_open());

        let err = repo.open(tab, &maria(), 9).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::TabNotFree);
        let stored = repo.list().await.unwrap();
        assert_eq!(stored[0].table_number, 4);
    }

    #[tokio::test]
    async fn test_unknown_tab_id() {
        let repo = MemoryTabRepository::seeded(1);
        let ghost = Tab::free("ghost", 99);
        let err = repo.close(&ghost).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::TabNotFound);
    }

    #[tokio::test]
    async fn test_product_create_assigns_next_id() {
        let repo = MemoryCrudRepository::new(seed::products());
        let created: Product = repo
            .create(&ProductCreate {
                name: "Suco Natural".into(),
                description: "Laranja 400ml".into(),
                price: Decimal::new(900, 2),
                category: ProductCategory::Drinks,
            })
            .await
            .unwrap();
        assert_eq!(created.id, 6);
        assert_eq!(created.sales, 0);
        assert!(created.is_active);
        assert_eq!(repo.list().await.unwrap().len(), 6);
    }

    #[tokio::test]
    async fn test_waiter_username_must_be_unique() {
        let repo = MemoryCrudRepository::new(seed::waiters());
        let err = repo
            .create(&WaiterCreate {
                name: "Outro".into(),
                username: "maria.santos".into(),
                email: "outro@restaurante.com".into(),
                phone: String::new(),
                password: "x".into(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::WaiterUsernameExists);

        let err = repo
            .update(
                1,
                &WaiterUpdate {
                    name: "João Silva".into(),
                    username: "pedro.costa".into(),
                    email: "joao@restaurante.com".into(),
                    phone: String::new(),
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::WaiterUsernameExists);
        let stored: Vec<Waiter> = repo.list().await.unwrap();
        assert_eq!(stored[0].username, "joao.silva");
    }

    #[tokio::test]
    async fn test_delete_missing_record() {
        let repo = MemoryCrudRepository::<Product>::new(seed::products());
        repo.delete(1).await.unwrap();
        let err = repo.delete(1).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::ProductNotFound);
    }

    #[tokio::test]
    async fn test_card_activation() {
        let card = MemoryCardRepository.activate(" MESA-12 ").await.unwrap();
        assert_eq!(card.code, "MESA-12");
        assert_eq!(card.table_number, Some(12));
        assert!(MemoryCardRepository.activate("   ").await.is_err());
    }

    #[tokio::test]
    async fn test_local_login() {
        let session = MemoryAuthGateway
            .login(&LoginRequest {
                email: "ana@x.com".into(),
                password: "p".into(),
                role: Role::Admin,
            })
            .await
            .unwrap();
        assert_eq!(session.role, Role::Admin);
        assert_eq!(session.user.name, "ana");
        assert!(session.token.starts_with("local-"));
    }
}
