//! Shared types for the Comanda workspace
//!
//! Domain models, the unified error system, auth DTOs and the wire mapping
//! used by both the desk client and the mock backend.

pub mod client;
pub mod error;
pub mod models;
pub mod seed;
pub mod util;
pub mod wire;

// Re-exports
pub use axum::{Json, body};
pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use http;
pub use serde::{Deserialize, Serialize};
