//! Product Model

use crate::error::{AppError, AppResult, ErrorCode};
use crate::util::{contains_ci, not_blank};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

/// Menu category
///
/// Serialized with the slugs the backend uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductCategory {
    #[serde(rename = "bebidas")]
    Drinks,
    #[serde(rename = "pratos")]
    Mains,
    #[serde(rename = "sobremesas")]
    Desserts,
    #[serde(rename = "aperitivos")]
    Starters,
    #[serde(rename = "saladas")]
    Salads,
}

impl ProductCategory {
    pub const ALL: [ProductCategory; 5] = [
        Self::Drinks,
        Self::Mains,
        Self::Desserts,
        Self::Starters,
        Self::Salads,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            Self::Drinks => "bebidas",
            Self::Mains => "pratos",
            Self::Desserts => "sobremesas",
            Self::Starters => "aperitivos",
            Self::Salads => "saladas",
        }
    }

    /// Display name shown on the menu
    pub fn label(&self) -> &'static str {
        match self {
            Self::Drinks => "Bebidas",
            Self::Mains => "Pratos Principais",
            Self::Desserts => "Sobremesas",
            Self::Starters => "Aperitivos",
            Self::Salads => "Saladas",
        }
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for ProductCategory {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.slug().eq_ignore_ascii_case(s) || format!("{:?}", c).eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                AppError::new(ErrorCode::ProductCategoryInvalid).with_detail("category", s)
            })
    }
}

/// Product entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category: ProductCategory,
    pub is_active: bool,
    /// Units sold
    pub sales: u32,
}

impl Product {
    pub fn matches(&self, filter: &ProductFilter) -> bool {
        filter.category.is_none_or(|c| c == self.category)
            && contains_ci(&self.name, filter.search_term.trim())
    }
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProductCreate {
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category: ProductCategory,
}

impl ProductCreate {
    pub fn check(&self) -> AppResult<()> {
        self.validate()?;
        check_price(self.price)
    }
}

/// Update product payload (full form)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProductUpdate {
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category: ProductCategory,
    pub is_active: bool,
}

impl ProductUpdate {
    pub fn check(&self) -> AppResult<()> {
        self.validate()?;
        check_price(self.price)
    }
}

fn check_price(price: Decimal) -> AppResult<()> {
    if price.is_sign_negative() {
        return Err(AppError::new(ErrorCode::ProductInvalidPrice).with_detail("price", price.to_string()));
    }
    Ok(())
}

/// Product list filter
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductFilter {
    pub search_term: String,
    /// `None` means all categories
    pub category: Option<ProductCategory>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn burger() -> Product {
        Product {
            id: 1,
            name: "Hambúrguer Artesanal".into(),
            description: "Angus 180g".into(),
            price: Decimal::new(2890, 2),
            category: ProductCategory::Mains,
            is_active: true,
            sales: 45,
        }
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!("bebidas".parse::<ProductCategory>().unwrap(), ProductCategory::Drinks);
        assert_eq!("Salads".parse::<ProductCategory>().unwrap(), ProductCategory::Salads);
        let err = "pizzas".parse::<ProductCategory>().unwrap_err();
        assert_eq!(err.code, ErrorCode::ProductCategoryInvalid);
    }

    #[test]
    fn test_category_serializes_as_slug() {
        let json = serde_json::to_string(&ProductCategory::Desserts).unwrap();
        assert_eq!(json, "\"sobremesas\"");
    }

    #[test]
    fn test_filter_by_name_and_category() {
        let p = burger();
        assert!(p.matches(&ProductFilter::default()));
        assert!(p.matches(&ProductFilter {
            search_term: "hambúrguer".into(),
            category: Some(ProductCategory::Mains),
        }));
        assert!(!p.matches(&ProductFilter {
            search_term: String::new(),
            category: Some(ProductCategory::Drinks),
        }));
        assert!(!p.matches(&ProductFilter {
            search_term: "pizza".into(),
            category: None,
        }));
    }

    #[test]
    fn test_create_rejects_negative_price_and_blank_name() {
        let mut create = ProductCreate {
            name: "Suco".into(),
            description: String::new(),
            price: Decimal::new(-100, 2),
            category: ProductCategory::Drinks,
        };
        assert_eq!(create.check().unwrap_err().code, ErrorCode::ProductInvalidPrice);

        create.price = Decimal::ZERO;
        assert!(create.check().is_ok());

        create.name = "  ".into();
        assert_eq!(create.check().unwrap_err().code, ErrorCode::RequiredField);
    }
}
