//! Waiter account wire shapes

use super::{
    DATE_FORMAT, DATE_TIME_FORMAT, NEVER, RawId, WireError, non_blank, parse_date,
    parse_last_login,
};
use crate::models::{Waiter, WaiterCreate, WaiterUpdate};
use serde::{Deserialize, Serialize};

/// Active flag as `true`/`false` or `"ativo"`/`"inativo"`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawActive {
    Flag(bool),
    Text(String),
}

impl RawActive {
    fn resolve(&self) -> Result<bool, WireError> {
        match self {
            Self::Flag(b) => Ok(*b),
            Self::Text(s) => match s.trim().to_lowercase().as_str() {
                "ativo" | "active" => Ok(true),
                "inativo" | "inactive" => Ok(false),
                _ => Err(WireError::invalid("status", s)),
            },
        }
    }
}

/// Incoming waiter record
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawWaiter {
    pub id: Option<RawId>,
    #[serde(alias = "nome")]
    pub name: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    #[serde(alias = "telefone")]
    pub phone: Option<String>,
    #[serde(alias = "status", alias = "ativo", alias = "is_active")]
    pub is_active: Option<RawActive>,
    #[serde(alias = "dataCadastro", alias = "registered_on")]
    pub registered_on: Option<String>,
    #[serde(alias = "ultimoLogin", alias = "last_login")]
    pub last_login: Option<String>,
}

impl TryFrom<RawWaiter> for Waiter {
    type Error = WireError;

    fn try_from(raw: RawWaiter) -> Result<Self, Self::Error> {
        let id = raw.id.ok_or(WireError::MissingField("id"))?.as_i64("id")?;
        let name = non_blank(raw.name).ok_or(WireError::MissingField("name"))?;
        let username = non_blank(raw.username).ok_or(WireError::MissingField("username"))?;
        let is_active = match raw.is_active {
            Some(a) => a.resolve()?,
            None => true,
        };
        let registered_on = match non_blank(raw.registered_on) {
            Some(s) => Some(parse_date(&s).ok_or_else(|| WireError::invalid("registered_on", &s))?),
            None => None,
        };
        let last_login = match raw.last_login {
            Some(s) => parse_last_login(&s)?,
            None => None,
        };
        Ok(Waiter {
            id,
            name,
            username,
            email: raw.email.unwrap_or_default(),
            phone: raw.phone.unwrap_or_default(),
            is_active,
            registered_on,
            last_login,
        })
    }
}

/// Outgoing waiter record, dates in display format
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireWaiter {
    pub id: i64,
    pub nome: String,
    pub username: String,
    pub email: String,
    pub telefone: String,
    pub status: String,
    pub data_cadastro: String,
    pub ultimo_login: String,
}

impl From<&Waiter> for WireWaiter {
    fn from(w: &Waiter) -> Self {
        Self {
            id: w.id,
            nome: w.name.clone(),
            username: w.username.clone(),
            email: w.email.clone(),
            telefone: w.phone.clone(),
            status: if w.is_active { "ativo" } else { "inativo" }.to_string(),
            data_cadastro: w
                .registered_on
                .map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_default(),
            ultimo_login: w
                .last_login
                .map(|d| d.format(DATE_TIME_FORMAT).to_string())
                .unwrap_or_else(|| NEVER.to_string()),
        }
    }
}

/// `POST /admin/garcons` body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaiterCreateBody {
    pub nome: String,
    pub username: String,
    pub email: String,
    pub telefone: String,
    pub senha: String,
}

impl From<&WaiterCreate> for WaiterCreateBody {
    fn from(c: &WaiterCreate) -> Self {
        Self {
            nome: c.name.trim().to_string(),
            username: c.username.trim().to_string(),
            email: c.email.trim().to_string(),
            telefone: c.phone.trim().to_string(),
            senha: c.password.clone(),
        }
    }
}

/// `PUT /admin/garcons/{id}` body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaiterUpdateBody {
    pub nome: String,
    pub username: String,
    pub email: String,
    pub telefone: String,
}

impl From<&WaiterUpdate> for WaiterUpdateBody {
    fn from(u: &WaiterUpdate) -> Self {
        Self {
            nome: u.name.trim().to_string(),
            username: u.username.trim().to_string(),
            email: u.email.trim().to_string(),
            telefone: u.phone.trim().to_string(),
        }
    }
}

/// `PATCH /admin/{resource}/{id}/status` body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusBody {
    pub ativo: bool,
}
