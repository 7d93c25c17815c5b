//! Desk error type

use comanda_client::ClientError;
use shared::error::{AppError, ErrorCategory, ErrorCode};
use shared::wire::WireError;
use thiserror::Error;

/// Coarse error taxonomy shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad input or an unmet precondition; nothing was sent
    Validation,
    /// Missing, rejected or insufficient session
    Auth,
    /// Transport failure or an error answered by the backend
    Network,
}

#[derive(Debug, Error)]
pub enum DeskError {
    /// Local validation or domain precondition
    #[error("{0}")]
    App(#[from] AppError),

    /// Remote call failed
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl DeskError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::App(err) => err.code,
            Self::Client(err) => err.code(),
            Self::Config(_) => ErrorCode::ConfigError,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        let category = self.code().category();
        match self {
            Self::Client(_) if matches!(category, ErrorCategory::Auth | ErrorCategory::Permission) => {
                ErrorKind::Auth
            }
            Self::Client(_) => ErrorKind::Network,
            Self::App(err) if err.code == ErrorCode::NotAuthenticated => ErrorKind::Auth,
            Self::App(_) if category == ErrorCategory::Permission => ErrorKind::Auth,
            Self::App(_) | Self::Config(_) => ErrorKind::Validation,
        }
    }
}

impl From<WireError> for DeskError {
    fn from(err: WireError) -> Self {
        Self::App(err.into())
    }
}

pub type DeskResult<T> = Result<T, DeskError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        let err = DeskError::from(AppError::validation("Table number must be a positive integer"));
        assert_eq!(err.kind(), ErrorKind::Validation);

        let err = DeskError::from(ClientError::Unauthorized);
        assert_eq!(err.kind(), ErrorKind::Auth);

        let err = DeskError::from(ClientError::Api(AppError::new(ErrorCode::TabNotFree)));
        assert_eq!(err.kind(), ErrorKind::Network);
        assert_eq!(err.code(), ErrorCode::TabNotFree);

        let err = DeskError::from(AppError::new(ErrorCode::PasswordMismatch));
        assert_eq!(err.kind(), ErrorKind::Validation);

        let err = DeskError::from(ClientError::Api(AppError::invalid_credentials()));
        assert_eq!(err.kind(), ErrorKind::Auth);
    }
}
