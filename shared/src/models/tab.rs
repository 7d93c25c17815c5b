//! Tab (comanda) Model
//!
//! A tab is a numbered slot of the restaurant's tab pool. Slots are never
//! destroyed: they cycle between `Free` and `Open` for the life of the pool.

use crate::error::{AppError, AppResult, ErrorCode};
use crate::util::{contains_ci, not_blank};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Lifecycle state of a tab
///
/// `Closed` is accepted from the backend but no local operation moves a tab
/// into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TabState {
    Free,
    Open,
    Closed,
}

/// Customer attached to an open tab
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Consumed item on a tab
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabItem {
    pub product_id: i64,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
}

impl TabItem {
    pub fn new(product_id: i64, name: impl Into<String>, unit_price: Decimal, quantity: u32) -> Self {
        Self {
            product_id,
            name: name.into(),
            unit_price,
            quantity,
        }
    }

    /// quantity × unit price
    pub fn total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Tab entity (comanda)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tab {
    pub id: String,
    /// Physical slot number, immutable once created
    pub number: u32,
    /// 0 when unassigned
    pub table_number: u32,
    pub customer: Option<Customer>,
    pub state: TabState,
    pub items: Vec<TabItem>,
    pub opened_at: Option<DateTime<Utc>>,
}

impl Tab {
    /// A free slot
    pub fn free(id: impl Into<String>, number: u32) -> Self {
        Self {
            id: id.into(),
            number,
            table_number: 0,
            customer: None,
            state: TabState::Free,
            items: Vec::new(),
            opened_at: None,
        }
    }

    pub fn is_free(&self) -> bool {
        self.state == TabState::Free
    }

    pub fn is_open(&self) -> bool {
        self.state == TabState::Open
    }

    /// Running total, always derived from the items
    pub fn total(&self) -> Decimal {
        self.items.iter().map(TabItem::total).sum()
    }

    /// Free ⇒ no customer, no items, table 0, no opening time
    pub fn holds_free_invariant(&self) -> bool {
        !self.is_free()
            || (self.customer.is_none()
                && self.items.is_empty()
                && self.table_number == 0
                && self.opened_at.is_none())
    }

    /// Free → Open
    pub fn open(
        &mut self,
        customer: Customer,
        table_number: u32,
        now: DateTime<Utc>,
    ) -> AppResult<()> {
        if !self.is_free() {
            return Err(AppError::new(ErrorCode::TabNotFree).with_detail("number", self.number));
        }
        if table_number == 0 {
            return Err(AppError::validation("Table number must be a positive integer"));
        }
        self.state = TabState::Open;
        self.customer = Some(customer);
        self.table_number = table_number;
        self.opened_at = Some(now);
        Ok(())
    }

    /// Open/Closed → Free, keeping the slot number
    pub fn release(&mut self) -> AppResult<()> {
        if self.is_free() {
            return Err(AppError::new(ErrorCode::TabNotOpen).with_detail("number", self.number));
        }
        self.state = TabState::Free;
        self.customer = None;
        self.table_number = 0;
        self.items.clear();
        self.opened_at = None;
        Ok(())
    }

    /// Append a consumed item; the same product at the same price is merged
    pub fn add_item(&mut self, item: TabItem) -> AppResult<()> {
        if !self.is_open() {
            return Err(AppError::new(ErrorCode::TabNotOpen).with_detail("number", self.number));
        }
        validate_item(&item)?;
        match self
            .items
            .iter_mut()
            .find(|i| i.product_id == item.product_id && i.unit_price == item.unit_price)
        {
            Some(existing) => {
                existing.quantity = existing.quantity.checked_add(item.quantity).ok_or_else(|| {
                    AppError::new(ErrorCode::TabItemInvalid)
                        .with_detail("field", "quantity")
                        .with_detail("product_id", item.product_id)
                })?;
            }
            None => self.items.push(item),
        }
        Ok(())
    }

    /// Number, assigned table or customer name contains the term
    pub fn matches(&self, term: &str) -> bool {
        let term = term.trim();
        if term.is_empty() {
            return true;
        }
        self.number.to_string().contains(term)
            || (self.table_number != 0 && self.table_number.to_string().contains(term))
            || self
                .customer
                .as_ref()
                .is_some_and(|c| contains_ci(&c.name, term))
    }
}

/// Item preconditions shared by every code path that adds items
pub fn validate_item(item: &TabItem) -> AppResult<()> {
    if item.quantity == 0 {
        return Err(AppError::new(ErrorCode::TabItemInvalid).with_detail("field", "quantity"));
    }
    if item.unit_price.is_sign_negative() {
        return Err(AppError::new(ErrorCode::TabItemInvalid).with_detail("field", "unit_price"));
    }
    if item.name.trim().is_empty() {
        return Err(AppError::new(ErrorCode::TabItemInvalid).with_detail("field", "name"));
    }
    Ok(())
}

/// Search filter for the tab list
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TabFilter {
    pub search_term: String,
}

impl TabFilter {
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search_term: term.into(),
        }
    }
}

/// Open-tab form as typed by the waiter
///
/// The table number arrives as text and must parse as a positive integer.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct OpenTabForm {
    #[validate(custom(function = "not_blank"))]
    pub customer_name: String,
    #[validate(custom(function = "not_blank"))]
    pub email: String,
    #[validate(custom(function = "not_blank"))]
    pub phone: String,
    #[validate(custom(function = "not_blank"))]
    pub table_number: String,
}

impl OpenTabForm {
    /// Validate and split into the customer record and the table number
    pub fn parse(&self) -> AppResult<(Customer, u32)> {
        self.validate()?;
        let table_number = self
            .table_number
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| {
                AppError::validation("Table number must be a positive integer")
                    .with_detail("field", "table_number")
            })?;
        let customer = Customer {
            name: self.customer_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
        };
        Ok((customer, table_number))
    }
}

/// Aggregate over the tab pool
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabStats {
    pub free: usize,
    pub open: usize,
    /// Sum of running totals across open tabs
    pub revenue: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn maria() -> Customer {
        Customer {
            name: "Maria".into(),
            email: "m@x.com".into(),
            phone: "111".into(),
        }
    }

    #[test]
    fn test_total_is_derived_from_items() {
        let mut tab = Tab::free("t1", 1);
        tab.open(maria(), 5, Utc::now()).unwrap();
        tab.add_item(TabItem::new(1, "Picanha", Decimal::new(3200, 2), 1))
            .unwrap();
        tab.add_item(TabItem::new(2, "Refrigerante", Decimal::new(600, 2), 2))
            .unwrap();
        assert_eq!(tab.total(), Decimal::new(4400, 2));
    }

    #[test]
    fn test_merged_quantity_overflow_is_rejected() {
        let mut tab = Tab::free("t1", 1);
        tab.open(maria(), 5, Utc::now()).unwrap();
        tab.add_item(TabItem::new(1, "Água", Decimal::new(400, 2), u32::MAX))
            .unwrap();

        let err = tab
            .add_item(TabItem::new(1, "Água", Decimal::new(400, 2), 1))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::TabItemInvalid);
        assert_eq!(tab.items.len(), 1);
        assert_eq!(tab.items[0].quantity, u32::MAX);
    }

    #[test]
    fn test_open_requires_free() {
        let mut tab = Tab::free("t1", 1);
        tab.open(maria(), 5, Utc::now()).unwrap();
        let before = tab.clone();

        let err = tab.open(maria(), 7, Utc::now()).unwrap_err();
        assert_eq!(err.code, ErrorCode::TabNotFree);
        assert_eq!(tab, before);
    }

    #[test]
    fn test_release_restores_free_invariant() {
        let mut tab = Tab::free("t1", 3);
        tab.open(maria(), 5, Utc::now()).unwrap();
        tab.add_item(TabItem::new(1, "Chopp", Decimal::new(1250, 2), 3))
            .unwrap();
        assert!(tab.holds_free_invariant());

        tab.release().unwrap();
        assert!(tab.is_free());
        assert!(tab.holds_free_invariant());
        assert_eq!(tab.number, 3);
    }

    #[test]
    fn test_release_accepts_closed() {
        let mut tab = Tab::free("t1", 3);
        tab.state = TabState::Closed;
        tab.release().unwrap();
        assert!(tab.is_free());
    }

    #[test]
    fn test_release_free_tab_fails() {
        let mut tab = Tab::free("t1", 3);
        assert_eq!(tab.release().unwrap_err().code, ErrorCode::TabNotOpen);
    }

    #[test]
    fn test_add_item_merges_same_product() {
        let mut tab = Tab::free("t1", 1);
        tab.open(maria(), 2, Utc::now()).unwrap();
        let coke = TabItem::new(2, "Refrigerante", Decimal::new(550, 2), 1);
        tab.add_item(coke.clone()).unwrap();
        tab.add_item(coke).unwrap();
        assert_eq!(tab.items.len(), 1);
        assert_eq!(tab.items[0].quantity, 2);
    }

    #[test]
    fn test_add_item_rejects_zero_quantity_and_free_tab() {
        let mut tab = Tab::free("t1", 1);
        let item = TabItem::new(2, "Refrigerante", Decimal::new(550, 2), 1);
        assert_eq!(
            tab.add_item(item.clone()).unwrap_err().code,
            ErrorCode::TabNotOpen
        );

        tab.open(maria(), 2, Utc::now()).unwrap();
        let zero = TabItem { quantity: 0, ..item };
        assert_eq!(
            tab.add_item(zero).unwrap_err().code,
            ErrorCode::TabItemInvalid
        );
    }

    #[test]
    fn test_matches_number_table_and_name() {
        let mut tab = Tab::free("t1", 13);
        assert!(tab.matches("3"));
        assert!(!tab.matches("0"));

        let mut other = Tab::free("t2", 4);
        other.open(maria(), 30, Utc::now()).unwrap();
        assert!(other.matches("3"));
        assert!(other.matches("MAR"));
        assert!(!other.matches("joão"));

        tab.open(maria(), 1, Utc::now()).unwrap();
        assert!(tab.matches(""));
    }

    #[test]
    fn test_open_form_requires_every_field() {
        let form = OpenTabForm {
            customer_name: "Maria".into(),
            email: "m@x.com".into(),
            phone: " ".into(),
            table_number: "5".into(),
        };
        let err = form.parse().unwrap_err();
        assert_eq!(err.code, ErrorCode::RequiredField);
    }

    #[test]
    fn test_open_form_table_must_be_positive_integer() {
        let mut form = OpenTabForm {
            customer_name: "Maria".into(),
            email: "m@x.com".into(),
            phone: "111".into(),
            table_number: "cinco".into(),
        };
        assert_eq!(form.parse().unwrap_err().code, ErrorCode::ValidationFailed);

        form.table_number = "0".into();
        assert!(form.parse().is_err());

        form.table_number = " 5 ".into();
        let (customer, table) = form.parse().unwrap();
        assert_eq!(table, 5);
        assert_eq!(customer.name, "Maria");
    }
}
