//! Error types and API response structures

use super::codes::ErrorCode;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Application error with structured error code and details
///
/// Carried by every layer that needs to describe a failure to a user:
/// the mock backend serializes it, the client parses it back, and the
/// desk layer turns it into a notification.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details (field-level errors, context, etc.)
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Add a detail entry to this error
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Get the HTTP status code for this error
    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    // ==================== Convenience constructors ====================

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    /// Create a not authenticated error
    pub fn not_authenticated() -> Self {
        Self::new(ErrorCode::NotAuthenticated)
    }

    /// Create an invalid credentials error
    pub fn invalid_credentials() -> Self {
        Self::new(ErrorCode::InvalidCredentials)
    }

    /// Create a conflict error
    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::AlreadyExists, msg)
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let field_errors = errors.field_errors();
        let mut fields: Vec<&str> = field_errors.keys().map(|k| k.as_ref()).collect();
        fields.sort_unstable();
        let message = format!("Missing or invalid fields: {}", fields.join(", "));
        Self::with_message(ErrorCode::RequiredField, message).with_detail("fields", fields)
    }
}

/// Unified API response structure
///
/// - `code`: Error code (0 for success)
/// - `message`: Human-readable message
/// - `data`: Response payload (on success)
/// - `details`: Additional error details (on failure)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Error code (0 for success, non-zero for errors)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
    /// Human-readable message
    pub message: String,
    /// Response data (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Additional error details (present on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl<T> ApiResponse<T> {
    /// Create a success response with data
    pub fn success(data: T) -> Self {
        Self {
            code: Some(0),
            message: "OK".to_string(),
            data: Some(data),
            details: None,
        }
    }
}

impl ApiResponse<()> {
    /// Create a success response without data
    pub fn ok() -> Self {
        Self {
            code: Some(0),
            message: "OK".to_string(),
            data: None,
            details: None,
        }
    }

    /// Create an error response from an AppError
    pub fn error(err: &AppError) -> Self {
        Self {
            code: Some(err.code.code()),
            message: err.message.clone(),
            data: None,
            details: err.details.clone(),
        }
    }
}

impl<T> ApiResponse<T> {
    /// Convert an error envelope back into an [`AppError`]
    ///
    /// Unknown codes degrade to [`ErrorCode::Unknown`].
    pub fn into_error(self) -> Option<AppError> {
        let code = self.code.filter(|c| *c != 0)?;
        let code = ErrorCode::try_from(code).unwrap_or(ErrorCode::Unknown);
        Some(AppError {
            code,
            message: self.message,
            details: self.details,
        })
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

// ===== Axum Integration =====

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;

        let status = self.http_status();
        let body = ApiResponse::<()>::error(&self);

        if matches!(self.code.category(), super::category::ErrorCategory::System) {
            tracing::error!(
                code = %self.code,
                message = %self.message,
                "System error occurred"
            );
        }

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_app_error_new() {
        let err = AppError::new(ErrorCode::TabNotFound);
        assert_eq!(err.code, ErrorCode::TabNotFound);
        assert_eq!(err.message, "Tab not found");
        assert!(err.details.is_none());
    }

    #[test]
    fn test_app_error_with_detail() {
        let err = AppError::validation("Missing required fields")
            .with_detail("field", "email")
            .with_detail("reason", "required");

        assert_eq!(err.code, ErrorCode::ValidationFailed);
        let details = err.details.unwrap();
        assert_eq!(details.get("field").unwrap(), "email");
        assert_eq!(details.get("reason").unwrap(), "required");
    }

    #[test]
    fn test_app_error_http_status() {
        assert_eq!(
            AppError::new(ErrorCode::TabNotFound).http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::not_authenticated().http_status(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn test_from_validation_errors_lists_fields() {
        #[derive(Validate)]
        struct Form {
            #[validate(length(min = 1))]
            name: String,
            #[validate(length(min = 1))]
            email: String,
        }

        let form = Form {
            name: String::new(),
            email: String::new(),
        };
        let err: AppError = form.validate().unwrap_err().into();
        assert_eq!(err.code, ErrorCode::RequiredField);
        assert_eq!(err.message, "Missing or invalid fields: email, name");
    }

    #[test]
    fn test_api_response_error_roundtrip() {
        let err = AppError::new(ErrorCode::TabNotFree).with_detail("number", 2);
        let json = serde_json::to_string(&ApiResponse::<()>::error(&err)).unwrap();

        let parsed: ApiResponse<()> = serde_json::from_str(&json).unwrap();
        let back = parsed.into_error().unwrap();
        assert_eq!(back.code, ErrorCode::TabNotFree);
        assert_eq!(back.message, "Tab is already open");
    }

    #[test]
    fn test_success_envelope_is_not_an_error() {
        let response = ApiResponse::success(42);
        assert_eq!(response.code, Some(0));
        assert!(response.into_error().is_none());
    }
}
