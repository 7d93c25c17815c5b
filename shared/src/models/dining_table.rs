//! Dining Table Model

use crate::util::contains_ci;
use chrono::NaiveTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Occupancy of a dining table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TableStatus {
    #[serde(rename = "livre")]
    Free,
    #[serde(rename = "ocupada")]
    Occupied,
    #[serde(rename = "reservada")]
    Reserved,
}

impl TableStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Free => "Livre",
            Self::Occupied => "Ocupada",
            Self::Reserved => "Reservada",
        }
    }
}

/// Dining table entity (mesa)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiningTable {
    pub id: i64,
    /// Display label, e.g. "Mesa 01"
    pub label: String,
    pub status: TableStatus,
    pub guests: u32,
    /// Assigned waiter's name
    pub waiter: Option<String>,
    pub started_at: Option<NaiveTime>,
    pub bill: Decimal,
    pub active_orders: u32,
}

impl DiningTable {
    /// Label or assigned waiter contains the term
    pub fn matches(&self, term: &str) -> bool {
        let term = term.trim();
        contains_ci(&self.label, term)
            || self.waiter.as_deref().is_some_and(|w| contains_ci(w, term))
    }
}
