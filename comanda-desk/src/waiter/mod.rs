//! Waiter surface: tab management, dashboard and table grid

pub mod comanda;
pub mod dashboard;
pub mod tables;

pub use comanda::{TabManager, compute_stats};
pub use dashboard::WaiterDashboard;
pub use tables::{TableGrid, TableSummary};
