//! Waiter dashboard KPIs, derived from the tab pool on every call

use rust_decimal::Decimal;
use serde::Serialize;
use shared::models::Tab;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WaiterDashboard {
    pub open_tabs: usize,
    pub active_revenue: Decimal,
    /// One customer per open tab
    pub active_customers: usize,
    /// Open tabs with at least one item
    pub pending_orders: usize,
}

impl WaiterDashboard {
    pub fn from_tabs(tabs: &[Tab]) -> Self {
        tabs.iter()
            .filter(|t| t.is_open())
            .fold(Self::default(), |mut kpi, tab| {
                kpi.open_tabs += 1;
                kpi.active_revenue += tab.total();
                if tab.customer.is_some() {
                    kpi.active_customers += 1;
                }
                if !tab.items.is_empty() {
                    kpi.pending_orders += 1;
                }
                kpi
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use shared::models::{Customer, TabItem};

    fn open(number: u32, items: Vec<TabItem>) -> Tab {
        let mut tab = Tab::free(format!("t{number}"), number);
        tab.open(
            Customer {
                name: format!("Cliente {number}"),
                email: "c@x.com".into(),
                phone: "1".into(),
            },
            number,
            Utc::now(),
        )
        .unwrap();
        for item in items {
            tab.add_item(item).unwrap();
        }
        tab
    }

    #[test]
    fn test_kpis_count_only_open_tabs() {
        let tabs = vec![
            Tab::free("a", 1),
            open(2, vec![TabItem::new(1, "Picanha", Decimal::new(3200, 2), 1)]),
            open(3, Vec::new()),
            Tab::free("b", 4),
        ];
        let kpi = WaiterDashboard::from_tabs(&tabs);
        assert_eq!(kpi.open_tabs, 2);
        assert_eq!(kpi.active_customers, 2);
        assert_eq!(kpi.pending_orders, 1);
        assert_eq!(kpi.active_revenue, Decimal::new(3200, 2));
    }

    #[test]
    fn test_empty_pool() {
        assert_eq!(WaiterDashboard::from_tabs(&[]), WaiterDashboard::default());
    }
}
