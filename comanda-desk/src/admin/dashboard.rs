//! Admin dashboard KPIs

use super::crud::{ProductStats, WaiterStats};
use crate::waiter::compute_stats;
use rust_decimal::Decimal;
use serde::Serialize;
use shared::models::Tab;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AdminDashboard {
    pub active_revenue: Decimal,
    pub open_tabs: usize,
    /// Distinct tables with an open tab
    pub occupied_tables: usize,
    pub products: ProductStats,
    pub waiters: WaiterStats,
}

impl AdminDashboard {
    pub fn compose(tabs: &[Tab], products: ProductStats, waiters: WaiterStats) -> Self {
        let stats = compute_stats(tabs);
        let occupied_tables = tabs
            .iter()
            .filter(|t| t.is_open() && t.table_number != 0)
            .map(|t| t.table_number)
            .collect::<BTreeSet<_>>()
            .len();
        Self {
            active_revenue: stats.revenue,
            open_tabs: stats.open,
            occupied_tables,
            products,
            waiters,
        }
    }
}
