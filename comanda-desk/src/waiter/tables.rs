//! Table Grid
//!
//! Floor view of the dining tables: search by label or waiter and a
//! per-status summary.

use rust_decimal::Decimal;
use serde::Serialize;
use shared::models::{DiningTable, TableStatus};
use shared::seed;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TableSummary {
    pub free: usize,
    pub occupied: usize,
    pub reserved: usize,
    /// Sum of the bills of occupied tables
    pub total_bill: Decimal,
}

#[derive(Debug, Clone, Default)]
pub struct TableGrid {
    tables: Vec<DiningTable>,
}

impl TableGrid {
    pub fn new(mut tables: Vec<DiningTable>) -> Self {
        tables.sort_by_key(|t| t.id);
        Self { tables }
    }

    /// The restaurant's demo floor
    pub fn seeded() -> Self {
        Self::new(seed::dining_tables())
    }

    pub fn tables(&self) -> &[DiningTable] {
        &self.tables
    }

    /// Tables whose label or waiter contains the term
    pub fn filter(&self, term: &str) -> Vec<&DiningTable> {
        self.tables.iter().filter(|t| t.matches(term)).collect()
    }

    pub fn summary(&self) -> TableSummary {
        self.tables
            .iter()
            .fold(TableSummary::default(), |mut sum, table| {
                match table.status {
                    TableStatus::Free => sum.free += 1,
                    TableStatus::Occupied => {
                        sum.occupied += 1;
                        sum.total_bill += table.bill;
                    }
                    TableStatus::Reserved => sum.reserved += 1,
                }
                sum
            })
    }
}
