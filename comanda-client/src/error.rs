//! Client error types

use shared::error::{AppError, ErrorCode};
use shared::wire::WireError;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Structured error returned by the backend
    #[error("{0}")]
    Api(AppError),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// No session, or the backend rejected the token
    #[error("Authentication required")]
    Unauthorized,

    /// Permission denied
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Response did not map onto the canonical model
    #[error("Unexpected record: {0}")]
    Wire(#[from] WireError),
}

impl ClientError {
    /// Unified error code for this failure
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Api(err) => err.code,
            Self::Http(err) if err.is_timeout() => ErrorCode::TimeoutError,
            Self::Http(_) => ErrorCode::NetworkError,
            Self::Unauthorized => ErrorCode::NotAuthenticated,
            Self::Forbidden(_) => ErrorCode::PermissionDenied,
            Self::NotFound(_) => ErrorCode::NotFound,
            Self::Validation(_) => ErrorCode::ValidationFailed,
            Self::Internal(_) => ErrorCode::InternalError,
            Self::InvalidResponse(_) | Self::Serialization(_) | Self::Wire(_) => {
                ErrorCode::InvalidFormat
            }
        }
    }

    /// The session is missing or no longer accepted
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self.code(),
            ErrorCode::NotAuthenticated | ErrorCode::TokenExpired | ErrorCode::TokenInvalid
        )
    }
}

impl From<AppError> for ClientError {
    fn from(err: AppError) -> Self {
        Self::Api(err)
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(ClientError::Unauthorized.code(), ErrorCode::NotAuthenticated);
        assert!(ClientError::Unauthorized.is_unauthorized());

        let api = ClientError::Api(AppError::new(ErrorCode::TabNotFree));
        assert_eq!(api.code(), ErrorCode::TabNotFree);
        assert!(!api.is_unauthorized());

        let wire = ClientError::from(WireError::MissingField("number"));
        assert_eq!(wire.code(), ErrorCode::InvalidFormat);
    }
}
