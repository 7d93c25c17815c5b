//! Data models
//!
//! Canonical shapes shared by the desk client and the mock backend.
//! Raw backend JSON is converted into these in [`crate::wire`].

pub mod dining_table;
pub mod product;
pub mod role;
pub mod tab;
pub mod waiter;

// Re-exports
pub use dining_table::*;
pub use product::*;
pub use role::*;
pub use tab::*;
pub use waiter::*;
