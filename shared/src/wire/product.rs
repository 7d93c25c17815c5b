//! Product wire shapes

use super::{RawCount, RawId, WireError, non_blank};
use crate::models::{Product, ProductCategory, ProductCreate, ProductUpdate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Incoming product record
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProduct {
    pub id: Option<RawId>,
    #[serde(alias = "nome")]
    pub name: Option<String>,
    #[serde(alias = "descricao")]
    pub description: Option<String>,
    #[serde(alias = "preco")]
    pub price: Option<Decimal>,
    #[serde(alias = "categoria")]
    pub category: Option<String>,
    #[serde(alias = "ativo", alias = "is_active")]
    pub is_active: Option<bool>,
    #[serde(alias = "vendas")]
    pub sales: Option<RawCount>,
}

impl TryFrom<RawProduct> for Product {
    type Error = WireError;

    fn try_from(raw: RawProduct) -> Result<Self, Self::Error> {
        let id = raw.id.ok_or(WireError::MissingField("id"))?.as_i64("id")?;
        let name = non_blank(raw.name).ok_or(WireError::MissingField("name"))?;
        let price = raw.price.ok_or(WireError::MissingField("price"))?;
        if price.is_sign_negative() {
            return Err(WireError::invalid("price", price));
        }
        let category = raw.category.ok_or(WireError::MissingField("category"))?;
        let category = category
            .parse::<ProductCategory>()
            .map_err(|_| WireError::invalid("category", &category))?;
        let sales = match raw.sales {
            Some(s) => s.value("sales")?,
            None => 0,
        };
        Ok(Product {
            id,
            name,
            description: raw.description.unwrap_or_default(),
            price,
            category,
            is_active: raw.is_active.unwrap_or(true),
            sales,
        })
    }
}

/// Outgoing product record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireProduct {
    pub id: i64,
    pub nome: String,
    pub descricao: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub preco: Decimal,
    pub categoria: ProductCategory,
    pub ativo: bool,
    pub vendas: u32,
}

impl From<&Product> for WireProduct {
    fn from(p: &Product) -> Self {
        Self {
            id: p.id,
            nome: p.name.clone(),
            descricao: p.description.clone(),
            preco: p.price,
            categoria: p.category,
            ativo: p.is_active,
            vendas: p.sales,
        }
    }
}

/// `POST`/`PUT /admin/produtos` body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductBody {
    pub nome: String,
    pub descricao: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub preco: Decimal,
    pub categoria: ProductCategory,
    pub ativo: bool,
}

impl From<&ProductCreate> for ProductBody {
    fn from(c: &ProductCreate) -> Self {
        Self {
            nome: c.name.trim().to_string(),
            descricao: c.description.trim().to_string(),
            preco: c.price,
            categoria: c.category,
            ativo: true,
        }
    }
}

impl From<&ProductUpdate> for ProductBody {
    fn from(u: &ProductUpdate) -> Self {
        Self {
            nome: u.name.trim().to_string(),
            descricao: u.description.trim().to_string(),
            preco: u.price,
            categoria: u.category,
            ativo: u.is_active,
        }
    }
}

impl ProductBody {
    pub fn into_product(self, id: i64, sales: u32) -> Product {
        Product {
            id,
            name: self.nome,
            description: self.descricao,
            price: self.preco,
            category: self.categoria,
            is_active: self.ativo,
            sales,
        }
    }
}
