//! Tab wire shapes

use super::{RawCount, RawId, WireError, non_blank, parse_timestamp};
use crate::models::{Customer, Tab, TabItem, TabState};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Tab status as sent by the backend
///
/// The live API encodes "free" as `status: true`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawTabState {
    Flag(bool),
    Text(String),
}

impl RawTabState {
    fn resolve(&self) -> Result<TabState, WireError> {
        match self {
            Self::Flag(true) => Ok(TabState::Free),
            Self::Flag(false) => Ok(TabState::Open),
            Self::Text(s) => match s.trim().to_lowercase().as_str() {
                "free" | "livre" => Ok(TabState::Free),
                "open" | "aberta" | "ocupada" => Ok(TabState::Open),
                "closed" | "fechada" => Ok(TabState::Closed),
                _ => Err(WireError::invalid("state", s)),
            },
        }
    }
}

/// Incoming tab record in any known spelling
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTab {
    pub id: Option<RawId>,
    #[serde(alias = "numero")]
    pub number: Option<RawCount>,
    #[serde(alias = "mesa", alias = "table_number")]
    pub table_number: Option<RawCount>,
    #[serde(alias = "nomeCliente", alias = "customer_name")]
    pub customer_name: Option<String>,
    pub email: Option<String>,
    #[serde(alias = "telefone")]
    pub phone: Option<String>,
    pub customer: Option<Customer>,
    #[serde(alias = "dataAbertura", alias = "opened_at")]
    pub opened_at: Option<String>,
    #[serde(alias = "status")]
    pub state: Option<RawTabState>,
    #[serde(alias = "itens", default)]
    pub items: Vec<RawTabItem>,
}

/// Incoming tab item; any `total` field is ignored and recomputed
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTabItem {
    #[serde(alias = "id", alias = "produtoId", alias = "product_id")]
    pub product_id: Option<RawId>,
    #[serde(alias = "nome")]
    pub name: Option<String>,
    #[serde(alias = "preco", alias = "price", alias = "unit_price")]
    pub unit_price: Option<Decimal>,
    #[serde(alias = "quantidade")]
    pub quantity: Option<RawCount>,
}

impl TryFrom<RawTabItem> for TabItem {
    type Error = WireError;

    fn try_from(raw: RawTabItem) -> Result<Self, Self::Error> {
        let product_id = raw
            .product_id
            .ok_or(WireError::MissingField("product_id"))?
            .as_i64("product_id")?;
        let name = non_blank(raw.name).ok_or(WireError::MissingField("name"))?;
        let unit_price = raw.unit_price.ok_or(WireError::MissingField("unit_price"))?;
        if unit_price.is_sign_negative() {
            return Err(WireError::invalid("unit_price", unit_price));
        }
        let quantity = raw
            .quantity
            .ok_or(WireError::MissingField("quantity"))?
            .value("quantity")?;
        if quantity == 0 {
            return Err(WireError::invalid("quantity", quantity));
        }
        Ok(TabItem {
            product_id,
            name,
            unit_price,
            quantity,
        })
    }
}

impl TryFrom<RawTab> for Tab {
    type Error = WireError;

    fn try_from(raw: RawTab) -> Result<Self, Self::Error> {
        let number = raw
            .number
            .ok_or(WireError::MissingField("number"))?
            .value("number")?;
        if number == 0 {
            return Err(WireError::invalid("number", number));
        }
        let id = match raw.id {
            Some(id) => id.into_string(),
            None => {
                tracing::warn!(number, "Tab record without id, deriving one from its number");
                format!("tab-{}", number)
            }
        };

        let email = raw.email;
        let phone = raw.phone;
        let customer = raw.customer.or_else(|| {
            non_blank(raw.customer_name).map(|name| Customer {
                name,
                email: email.unwrap_or_default(),
                phone: phone.unwrap_or_default(),
            })
        });
        let table_number = match raw.table_number {
            Some(t) => t.value("table_number")?,
            None => 0,
        };
        let items = raw
            .items
            .into_iter()
            .map(TabItem::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        let opened_at = match non_blank(raw.opened_at) {
            Some(s) => Some(parse_timestamp(&s).ok_or_else(|| WireError::invalid("opened_at", &s))?),
            None => None,
        };
        let state = match raw.state {
            Some(s) => s.resolve()?,
            None if customer.is_some() => TabState::Open,
            None => TabState::Free,
        };

        if state == TabState::Free {
            if customer.is_some() || !items.is_empty() || table_number != 0 || opened_at.is_some() {
                tracing::warn!(number, "Free tab carried occupancy data, dropping it");
            }
            return Ok(Tab::free(id, number));
        }

        if state == TabState::Open {
            if customer.is_none() {
                return Err(WireError::Inconsistent(format!(
                    "open tab {} has no customer",
                    number
                )));
            }
            if table_number == 0 {
                return Err(WireError::Inconsistent(format!(
                    "open tab {} has no table",
                    number
                )));
            }
        }

        Ok(Tab {
            id,
            number,
            table_number,
            customer,
            state,
            items,
            opened_at,
        })
    }
}

/// Outgoing tab record, in the live backend's spelling
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireTab {
    pub id: String,
    pub numero: u32,
    pub mesa: u32,
    pub nome_cliente: String,
    pub email: String,
    pub telefone: String,
    pub data_abertura: Option<DateTime<Utc>>,
    pub data_fechamento: Option<DateTime<Utc>>,
    /// `true` = free
    pub status: bool,
    pub itens: Vec<WireTabItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireTabItem {
    pub id: i64,
    pub nome: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub preco: Decimal,
    pub quantidade: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

impl From<&Tab> for WireTab {
    fn from(tab: &Tab) -> Self {
        let customer = tab.customer.clone().unwrap_or(Customer {
            name: String::new(),
            email: String::new(),
            phone: String::new(),
        });
        Self {
            id: tab.id.clone(),
            numero: tab.number,
            mesa: tab.table_number,
            nome_cliente: customer.name,
            email: customer.email,
            telefone: customer.phone,
            data_abertura: tab.opened_at,
            data_fechamento: None,
            status: tab.is_free(),
            itens: tab
                .items
                .iter()
                .map(|item| WireTabItem {
                    id: item.product_id,
                    nome: item.name.clone(),
                    preco: item.unit_price,
                    quantidade: item.quantity,
                    total: item.total(),
                })
                .collect(),
        }
    }
}

/// `POST /Waiter/abrir-comanda` body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenTabBody {
    pub numero: u32,
    pub mesa: u32,
    pub nome_cliente: String,
    pub email: String,
    pub telefone: String,
}

impl OpenTabBody {
    pub fn new(number: u32, table_number: u32, customer: &Customer) -> Self {
        Self {
            numero: number,
            mesa: table_number,
            nome_cliente: customer.name.clone(),
            email: customer.email.clone(),
            telefone: customer.phone.clone(),
        }
    }

    pub fn customer(&self) -> Customer {
        Customer {
            name: self.nome_cliente.clone(),
            email: self.email.clone(),
            phone: self.telefone.clone(),
        }
    }
}

/// `POST /Waiter/fechar-comanda` body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CloseTabBody {
    pub numero: u32,
}

/// `POST /Waiter/comandas/{numero}/itens` body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabItemBody {
    pub produto_id: i64,
    pub nome: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub preco: Decimal,
    pub quantidade: u32,
}

impl From<&TabItem> for TabItemBody {
    fn from(item: &TabItem) -> Self {
        Self {
            produto_id: item.product_id,
            nome: item.name.clone(),
            preco: item.unit_price,
            quantidade: item.quantity,
        }
    }
}

impl From<TabItemBody> for TabItem {
    fn from(body: TabItemBody) -> Self {
        TabItem::new(body.produto_id, body.nome, body.preco, body.quantidade)
    }
}
