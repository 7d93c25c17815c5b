//! Customer surface: table activation, menu catalog and cart

use crate::error::DeskResult;
use crate::repository::{CardRepository, CrudRepository};
use rust_decimal::Decimal;
use serde::Serialize;
use shared::client::ActivateCardResponse;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Product, ProductCategory, ProductFilter, TabItem};
use std::sync::Arc;

// ========== Activation ==========

/// Activate the customer's table from a card or QR code
pub async fn activate_table(
    cards: &dyn CardRepository,
    code: &str,
) -> DeskResult<ActivateCardResponse> {
    let code = code.trim();
    if code.is_empty() {
        return Err(AppError::new(ErrorCode::RequiredField)
            .with_detail("field", "code")
            .into());
    }
    let card = cards.activate(code).await?;
    tracing::info!(code = %card.code, table = ?card.table_number, "Table activated");
    Ok(card)
}

// ========== Catalog ==========

/// Active products only
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: impl IntoIterator<Item = Product>) -> Self {
        let products = products.into_iter().filter(|p| p.is_active).collect();
        Self { products }
    }

    pub async fn load(repo: Arc<dyn CrudRepository<Product>>) -> DeskResult<Self> {
        Ok(Self::new(repo.list().await?))
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// `None` category shows every category
    pub fn browse(&self, category: Option<ProductCategory>, search: &str) -> Vec<&Product> {
        let filter = ProductFilter {
            search_term: search.to_string(),
            category,
        };
        self.products.iter().filter(|p| p.matches(&filter)).collect()
    }

    pub fn get(&self, product_id: i64) -> Option<&Product> {
        self.products.iter().find(|p| p.id == product_id)
    }
}

// ========== Cart ==========

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartLine {
    pub product_id: i64,
    pub name: String,
    pub price: Decimal,
    pub quantity: u32,
}

impl CartLine {
    pub fn total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

impl From<&CartLine> for TabItem {
    fn from(line: &CartLine) -> Self {
        TabItem::new(line.product_id, line.name.clone(), line.price, line.quantity)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// One more unit of the product
    pub fn add(&mut self, product: &Product) -> AppResult<()> {
        match self.lines.iter_mut().find(|l| l.product_id == product.id) {
            Some(line) => {
                line.quantity = line.quantity.checked_add(1).ok_or_else(|| {
                    AppError::new(ErrorCode::TabItemInvalid).with_detail("product_id", product.id)
                })?;
            }
            None => self.lines.push(CartLine {
                product_id: product.id,
                name: product.name.clone(),
                price: product.price,
                quantity: 1,
            }),
        }
        Ok(())
    }

    /// One unit less; the line is dropped at zero
    pub fn remove(&mut self, product_id: i64) {
        if let Some(index) = self.lines.iter().position(|l| l.product_id == product_id) {
            if self.lines[index].quantity > 1 {
                self.lines[index].quantity -= 1;
            } else {
                self.lines.remove(index);
            }
        }
    }

    pub fn total(&self) -> Decimal {
        self.lines.iter().map(CartLine::total).sum()
    }

    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Lines as tab items, ready to be added to the customer's tab
    pub fn to_items(&self) -> Vec<TabItem> {
        self.lines.iter().map(TabItem::from).collect()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MemoryCardRepository;
    use shared::seed;

    #[test]
    fn test_catalog_hides_inactive_products() {
        let catalog = Catalog::new(seed::products());
        assert_eq!(catalog.products().len(), 4);
        assert!(catalog.get(4).is_none());

        let drinks = catalog.browse(Some(ProductCategory::Drinks), "");
        assert_eq!(drinks.len(), 1);
        assert_eq!(catalog.browse(None, "salada").len(), 1);
        assert!(catalog.browse(Some(ProductCategory::Desserts), "salada").is_empty());
    }

    #[test]
    fn test_cart_add_remove_totals() {
        let catalog = Catalog::new(seed::products());
        let burger = catalog.get(1).unwrap();
        let soda = catalog.get(2).unwrap();

        let mut cart = Cart::new();
        cart.add(burger).unwrap();
        cart.add(soda).unwrap();
        cart.add(soda).unwrap();
        assert_eq!(cart.item_count(), 3);
        assert_eq!(cart.total(), Decimal::new(3990, 2));

        cart.remove(2);
        assert_eq!(cart.item_count(), 2);
        cart.remove(1);
        assert_eq!(cart.lines().len(), 1);
        cart.remove(99);
        assert_eq!(cart.total(), Decimal::new(550, 2));

        let items = cart.to_items();
        assert_eq!(items[0].quantity, 1);
        assert_eq!(items[0].name, "Refrigerante Lata");
    }

    #[test]
    fn test_cart_quantity_cannot_overflow() {
        let catalog = Catalog::new(seed::products());
        let soda = catalog.get(2).unwrap();
        let mut cart = Cart {
            lines: vec![CartLine {
                product_id: soda.id,
                name: soda.name.clone(),
                price: soda.price,
                quantity: u32::MAX,
            }],
        };

        let err = cart.add(soda).unwrap_err();
        assert_eq!(err.code, ErrorCode::TabItemInvalid);
        assert_eq!(cart.lines()[0].quantity, u32::MAX);
    }

    #[tokio::test]
    async fn test_blank_code_rejected_before_repository() {
        let err = activate_table(&MemoryCardRepository, "  ").await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::RequiredField);

        let card = activate_table(&MemoryCardRepository, "MESA-03").await.unwrap();
        assert_eq!(card.table_number, Some(3));
    }
}
