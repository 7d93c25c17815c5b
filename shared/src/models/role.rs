//! Role Model

use serde::{Deserialize, Serialize};
use std::fmt;

/// User role chosen on the landing page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "cliente")]
    Customer,
    #[serde(rename = "garcom")]
    Waiter,
    #[serde(rename = "admin")]
    Admin,
}

impl Role {
    /// Parse the role selector token; anything unknown falls back to customer
    pub fn from_selector(token: Option<&str>) -> Self {
        match token.map(str::trim) {
            Some("garcom") | Some("waiter") => Self::Waiter,
            Some("admin") => Self::Admin,
            _ => Self::Customer,
        }
    }

    pub fn token(&self) -> &'static str {
        match self {
            Self::Customer => "cliente",
            Self::Waiter => "garcom",
            Self::Admin => "admin",
        }
    }

    /// Surface the role lands on after login
    pub fn home(&self) -> &'static str {
        match self {
            Self::Customer => "/cliente",
            Self::Waiter => "/garcom",
            Self::Admin => "/admin",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Customer => "Cliente",
            Self::Waiter => "Garçom/Atendente",
            Self::Admin => "Administrador",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}
