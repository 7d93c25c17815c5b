//! Waiter Account Model

use crate::util::{contains_ci, not_blank};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Waiter account (without password)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waiter {
    pub id: i64,
    pub name: String,
    pub username: String,
    pub email: String,
    pub phone: String,
    pub is_active: bool,
    pub registered_on: Option<NaiveDate>,
    /// `None` = never logged in
    pub last_login: Option<NaiveDateTime>,
}

impl Waiter {
    pub fn matches(&self, filter: &WaiterFilter) -> bool {
        let term = filter.search_term.trim();
        contains_ci(&self.name, term)
            || contains_ci(&self.username, term)
            || contains_ci(&self.email, term)
    }
}

/// Create waiter payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct WaiterCreate {
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    #[validate(custom(function = "not_blank"))]
    pub username: String,
    #[validate(custom(function = "not_blank"))]
    pub email: String,
    pub phone: String,
    /// Initial password
    #[validate(custom(function = "not_blank"))]
    pub password: String,
}

/// Update waiter payload (full form, password unchanged)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct WaiterUpdate {
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    #[validate(custom(function = "not_blank"))]
    pub username: String,
    #[validate(custom(function = "not_blank"))]
    pub email: String,
    pub phone: String,
}

/// Waiter list filter
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WaiterFilter {
    pub search_term: String,
}
