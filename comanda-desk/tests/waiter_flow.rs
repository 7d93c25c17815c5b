//! Waiter flow over the seeded in-memory repositories

use comanda_desk::Repositories;
use comanda_desk::admin::{AdminDashboard, AdminList};
use comanda_desk::waiter::{TabManager, WaiterDashboard};
use rust_decimal::Decimal;
use shared::error::ErrorCode;
use shared::models::{OpenTabForm, TabFilter, TabItem, TabStats};

fn form(name: &str, table: &str) -> OpenTabForm {
    OpenTabForm {
        customer_name: name.into(),
        email: "maria@x.com".into(),
        phone: "11999990000".into(),
        table_number: table.into(),
    }
}

async fn manager(repos: &Repositories) -> TabManager {
    TabManager::load(repos.tabs.clone()).await.unwrap()
}

fn id_of(tabs: &TabManager, number: u32) -> String {
    tabs.find_by_number(number).unwrap().id.clone()
}

#[tokio::test]
async fn test_maria_at_table_five() {
    let repos = Repositories::memory(50);
    let mut tabs = manager(&repos).await;
    let id = id_of(&tabs, 2);

    let tab = tabs.open_tab(&id, &form("Maria", "5")).await.unwrap();
    assert!(tab.is_open());
    assert_eq!(tab.number, 2);
    assert_eq!(tab.table_number, 5);
    assert_eq!(tab.customer.as_ref().map(|c| c.name.as_str()), Some("Maria"));

    tabs.add_item(&id, TabItem::new(1, "Picanha", Decimal::new(3200, 2), 1))
        .await
        .unwrap();
    let tab = tabs
        .add_item(&id, TabItem::new(2, "Refrigerante", Decimal::new(600, 2), 2))
        .await
        .unwrap();
    assert_eq!(tab.total(), Decimal::new(4400, 2));

    let tab = tabs.close_tab(&id).await.unwrap();
    assert!(tab.is_free());
    assert!(tab.customer.is_none());
    assert!(tab.items.is_empty());
    assert_eq!(tab.table_number, 0);
    assert_eq!(tab.number, 2);

    // the repository holds the same state as the manager
    let reloaded = manager(&repos).await;
    assert_eq!(reloaded.tabs(), tabs.tabs());
}

#[tokio::test]
async fn test_three_tab_pool_reuses_slot_two() {
    let repos = Repositories::memory(3);
    let mut tabs = manager(&repos).await;
    assert_eq!(tabs.tabs().len(), 3);
    let id = id_of(&tabs, 2);

    let tab = tabs.open_tab(&id, &form("Maria", "5")).await.unwrap();
    assert!(tab.is_open());
    assert_eq!(tab.table_number, 5);
    assert!(tab.opened_at.is_some());

    let tab = tabs.close_tab(&id).await.unwrap();
    assert!(tab.is_free());
    assert!(tab.holds_free_invariant());
    assert_eq!(tab.number, 2);
    assert_eq!(tabs.stats(), TabStats { free: 3, open: 0, revenue: Decimal::ZERO });
}

#[tokio::test]
async fn test_stats_with_two_open_tabs() {
    let repos = Repositories::memory(50);
    let mut tabs = manager(&repos).await;

    let first = id_of(&tabs, 1);
    tabs.open_tab(&first, &form("Maria", "5")).await.unwrap();
    tabs.add_item(&first, TabItem::new(1, "Picanha", Decimal::new(3200, 2), 1))
        .await
        .unwrap();
    tabs.add_item(&first, TabItem::new(2, "Refrigerante", Decimal::new(600, 2), 2))
        .await
        .unwrap();

    let second = id_of(&tabs, 10);
    tabs.open_tab(&second, &form("João", "8")).await.unwrap();
    tabs.add_item(&second, TabItem::new(3, "Hambúrguer", Decimal::new(2800, 2), 1))
        .await
        .unwrap();

    assert_eq!(
        tabs.stats(),
        TabStats {
            free: 48,
            open: 2,
            revenue: Decimal::new(7200, 2),
        }
    );

    let kpi = WaiterDashboard::from_tabs(tabs.tabs());
    assert_eq!(kpi.open_tabs, 2);
    assert_eq!(kpi.pending_orders, 2);

    let products = AdminList::load(repos.products.clone()).await.unwrap();
    let waiters = AdminList::load(repos.waiters.clone()).await.unwrap();
    let admin = AdminDashboard::compose(tabs.tabs(), products.stats(), waiters.stats());
    assert_eq!(admin.active_revenue, Decimal::new(7200, 2));
    assert_eq!(admin.occupied_tables, 2);
    assert_eq!(admin.products.total, 5);
    assert_eq!(admin.waiters.active, 2);
}

#[tokio::test]
async fn test_search_by_digit() {
    let repos = Repositories::memory(50);
    let tabs = manager(&repos).await;

    let hits: Vec<u32> = tabs
        .list_tabs(&TabFilter::search("3"))
        .iter()
        .map(|t| t.number)
        .collect();
    assert_eq!(
        hits,
        vec![3, 13, 23, 30, 31, 32, 33, 34, 35, 36, 37, 38, 39, 43]
    );
    assert_eq!(tabs.list_tabs(&TabFilter::default()).len(), 50);
}

#[tokio::test]
async fn test_rejected_open_keeps_pool_unchanged() {
    let repos = Repositories::memory(10);
    let mut tabs = manager(&repos).await;
    let id = id_of(&tabs, 1);
    let before = tabs.tabs().to_vec();

    for table in ["0", "-3", "mesa", ""] {
        assert!(tabs.open_tab(&id, &form("Maria", table)).await.is_err());
    }
    let err = tabs.open_tab("missing", &form("Maria", "5")).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::TabNotFound);

    assert_eq!(tabs.tabs(), before.as_slice());
    assert_eq!(manager(&repos).await.tabs(), before.as_slice());
}
