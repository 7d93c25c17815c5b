//! Seed data
//!
//! Starting records for the in-memory repositories and the mock backend.

use crate::models::{
    DiningTable, Product, ProductCategory, TableStatus, Tab, Waiter,
};
use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use uuid::Uuid;

/// Default number of tab slots
pub const DEFAULT_TAB_POOL_SIZE: u32 = 50;

/// `size` free tabs numbered 1..=size
pub fn tab_pool(size: u32) -> Vec<Tab> {
    (1..=size)
        .map(|number| Tab::free(Uuid::new_v4().to_string(), number))
        .collect()
}

pub fn products() -> Vec<Product> {
    let product = |id, name: &str, description: &str, cents, category, is_active, sales| Product {
        id,
        name: name.to_string(),
        description: description.to_string(),
        price: Decimal::new(cents, 2),
        category,
        is_active,
        sales,
    };
    vec![
        product(
            1,
            "Hambúrguer Artesanal",
            "Hambúrguer de carne angus 180g, queijo cheddar, alface, tomate, cebola caramelizada",
            2890,
            ProductCategory::Mains,
            true,
            45,
        ),
        product(
            2,
            "Refrigerante Lata",
            "Coca-Cola, Guaraná Antarctica, Sprite - 350ml gelado",
            550,
            ProductCategory::Drinks,
            true,
            123,
        ),
        product(
            3,
            "Petit Gateau",
            "Bolinho de chocolate quente com recheio cremoso, acompanha sorvete de baunilha",
            1590,
            ProductCategory::Desserts,
            true,
            28,
        ),
        product(
            4,
            "Cerveja Artesanal",
            "IPA 500ml da cervejaria local, amargor equilibrado",
            1250,
            ProductCategory::Drinks,
            false,
            67,
        ),
        product(
            5,
            "Salada Caesar",
            "Alface romana, croutons, parmesão, molho caesar, peito de frango grelhado",
            2290,
            ProductCategory::Salads,
            true,
            31,
        ),
    ]
}

pub fn waiters() -> Vec<Waiter> {
    let waiter = |id, name: &str, username: &str, phone: &str, is_active, registered: (i32, u32, u32), login: (u32, u32, u32)| {
        let (y, m, d) = registered;
        let (day, h, min) = login;
        Waiter {
            id,
            name: name.to_string(),
            username: username.to_string(),
            email: format!("{}@restaurante.com", username.split('.').next().unwrap_or(username)),
            phone: phone.to_string(),
            is_active,
            registered_on: NaiveDate::from_ymd_opt(y, m, d),
            last_login: NaiveDate::from_ymd_opt(2024, 8, day).and_then(|d| d.and_hms_opt(h, min, 0)),
        }
    };
    vec![
        waiter(1, "João Silva", "joao.silva", "(11) 99999-9999", true, (2024, 1, 15), (30, 14, 30)),
        waiter(2, "Maria Santos", "maria.santos", "(11) 88888-8888", true, (2024, 2, 20), (29, 18, 45)),
        waiter(3, "Pedro Costa", "pedro.costa", "(11) 77777-7777", false, (2024, 3, 10), (25, 10, 15)),
    ]
}

pub fn dining_tables() -> Vec<DiningTable> {
    let table = |id: i64, status, guests, waiter: Option<&str>, start: Option<(u32, u32)>, cents, active_orders| {
        DiningTable {
            id,
            label: format!("Mesa {:02}", id),
            status,
            guests,
            waiter: waiter.map(str::to_string),
            started_at: start.and_then(|(h, m)| NaiveTime::from_hms_opt(h, m, 0)),
            bill: Decimal::new(cents, 2),
            active_orders,
        }
    };
    vec![
        table(1, TableStatus::Occupied, 4, Some("João Silva"), Some((19, 30)), 15680, 2),
        table(2, TableStatus::Free, 0, None, None, 0, 0),
        table(3, TableStatus::Occupied, 2, Some("Maria Santos"), Some((20, 15)), 8950, 1),
        table(4, TableStatus::Reserved, 6, Some("Pedro Costa"), Some((21, 0)), 0, 0),
        table(5, TableStatus::Occupied, 3, Some("Ana Lima"), Some((18, 45)), 20340, 3),
        table(6, TableStatus::Free, 0, None, None, 0, 0),
    ]
}
