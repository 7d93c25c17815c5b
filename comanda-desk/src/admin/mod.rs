//! Admin surface: product and waiter management, dashboard

pub mod crud;
pub mod dashboard;

pub use crud::{AdminList, ProductAdmin, ProductStats, WaiterAdmin, WaiterStats};
pub use dashboard::AdminDashboard;
