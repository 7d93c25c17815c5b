//! Session context
//!
//! Holds the bearer token and the logged-in user. Cloning a
//! [`SessionContext`] shares the same underlying session, so the auth
//! surface and every repository see the same login/logout.

use parking_lot::RwLock;
use shared::client::{LoginResponse, UserInfo};
use shared::models::Role;
use std::sync::Arc;

/// An authenticated session
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub role: Role,
    pub user: UserInfo,
}

impl From<LoginResponse> for Session {
    fn from(resp: LoginResponse) -> Self {
        Self {
            token: resp.token,
            role: resp.user.role,
            user: resp.user,
        }
    }
}

/// Shared handle to the current session
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    inner: Arc<RwLock<Option<Session>>>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, session: Session) {
        tracing::debug!(role = %session.role, user = %session.user.email, "Session started");
        *self.inner.write() = Some(session);
    }

    pub fn clear(&self) {
        if self.inner.write().take().is_some() {
            tracing::debug!("Session cleared");
        }
    }

    pub fn current(&self) -> Option<Session> {
        self.inner.read().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.read().is_some()
    }

    pub fn role(&self) -> Option<Role> {
        self.inner.read().as_ref().map(|s| s.role)
    }

    /// `Authorization` header value, if a session exists
    pub fn bearer(&self) -> Option<String> {
        self.inner
            .read()
            .as_ref()
            .map(|s| format!("Bearer {}", s.token))
    }
}
