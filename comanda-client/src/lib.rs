//! Comanda Client - HTTP client for the restaurant REST backend
//!
//! Provides the session context and authenticated network calls used by
//! the desk's remote repositories.

pub mod auth;
pub mod config;
pub mod error;
pub mod http;
pub mod session;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::{HttpClient, NetworkHttpClient};
pub use session::{Session, SessionContext};

// Re-export shared types for convenience
pub use shared::client::{LoginRequest, LoginResponse, UserInfo};
