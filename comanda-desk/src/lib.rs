//! Comanda desk
//!
//! Waiter, admin and customer surfaces of the restaurant tab system, over
//! in-memory or remote repositories.

pub mod admin;
pub mod auth;
pub mod config;
pub mod customer;
pub mod error;
pub mod logger;
pub mod notify;
pub mod repository;
pub mod waiter;

pub use config::{Backend, DeskConfig};
pub use error::{DeskError, DeskResult, ErrorKind};
pub use notify::Notification;
pub use repository::Repositories;
