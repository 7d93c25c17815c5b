//! User notifications (toasts)

use crate::error::{DeskError, ErrorKind};
use serde::Serialize;
use shared::error::ErrorCode;
use shared::models::Tab;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Default,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub variant: Variant,
}

impl Notification {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: Variant::Default,
        }
    }

    pub fn error(description: impl Into<String>) -> Self {
        Self {
            title: "Erro".into(),
            description: description.into(),
            variant: Variant::Destructive,
        }
    }

    pub fn from_error(err: &DeskError) -> Self {
        let description = match (err.kind(), err.code()) {
            (_, ErrorCode::RequiredField) => "Preencha todos os campos".to_string(),
            (_, ErrorCode::PasswordMismatch) => "As senhas não coincidem".to_string(),
            (_, ErrorCode::InvalidCredentials) => "Email ou senha inválidos".to_string(),
            (_, ErrorCode::TabNotFree) => "Esta comanda já está aberta".to_string(),
            (_, ErrorCode::TabNotOpen) => "Esta comanda não está aberta".to_string(),
            (ErrorKind::Auth, _) => "Sessão expirada ou sem permissão. Faça login novamente".to_string(),
            (ErrorKind::Network, _) => format!("Falha na comunicação com o servidor: {}", err),
            (ErrorKind::Validation, _) => err.to_string(),
        };
        Self::error(description)
    }

    pub fn tab_opened(tab: &Tab) -> Self {
        let customer = tab.customer.as_ref().map(|c| c.name.as_str()).unwrap_or_default();
        Self::success(
            "Comanda aberta!",
            format!("Comanda #{} aberta para {} na mesa {}", tab.number, customer, tab.table_number),
        )
    }

    pub fn tab_closed(number: u32) -> Self {
        Self::success("Comanda fechada!", format!("Comanda #{} foi liberada", number))
    }

    pub fn logged_in(home: &str) -> Self {
        Self::success("Login realizado!", format!("Redirecionando para {}", home))
    }

    pub fn table_activated(table_number: Option<u32>) -> Self {
        let description = match table_number {
            Some(n) => format!("Mesa {} ativada com sucesso", n),
            None => "Mesa ativada com sucesso".to_string(),
        };
        Self::success("Mesa ativada!", description)
    }
}

impl From<&DeskError> for Notification {
    fn from(err: &DeskError) -> Self {
        Self::from_error(err)
    }
}
