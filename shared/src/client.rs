//! Client-related types shared between the backend and the desk client
//!
//! Auth request/response bodies and the login/registration forms.

use crate::error::{AppError, AppResult, ErrorCode};
use crate::models::Role;
use crate::util::not_blank;
use serde::{Deserialize, Serialize};
use validator::Validate;

// =============================================================================
// Auth API DTOs
// =============================================================================

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Login response data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
}

/// User information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// Registration request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub role: Role,
}

/// Password reset request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

/// Card / QR code activation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivateCardRequest {
    pub code: String,
}

/// Card activation result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivateCardResponse {
    pub code: String,
    /// Table bound to the card, when the backend knows it
    #[serde(default)]
    pub table_number: Option<u32>,
}

// =============================================================================
// Forms
// =============================================================================

/// Login form
#[derive(Debug, Clone, Default, Validate)]
pub struct LoginForm {
    #[validate(custom(function = "not_blank"))]
    pub email: String,
    #[validate(custom(function = "not_blank"))]
    pub password: String,
}

impl LoginForm {
    pub fn into_request(self, role: Role) -> AppResult<LoginRequest> {
        self.validate()?;
        Ok(LoginRequest {
            email: self.email.trim().to_string(),
            password: self.password,
            role,
        })
    }
}

/// Registration form
#[derive(Debug, Clone, Default, Validate)]
pub struct RegisterForm {
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    #[validate(custom(function = "not_blank"))]
    pub email: String,
    #[validate(custom(function = "not_blank"))]
    pub phone: String,
    #[validate(custom(function = "not_blank"))]
    pub password: String,
    pub confirm_password: String,
}

impl RegisterForm {
    pub fn into_request(self, role: Role) -> AppResult<RegisterRequest> {
        self.validate()?;
        if self.password != self.confirm_password {
            return Err(AppError::new(ErrorCode::PasswordMismatch));
        }
        Ok(RegisterRequest {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            password: self.password,
            role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_form_requires_both_fields() {
        let form = LoginForm {
            email: "garcom@restaurante.com".into(),
            password: String::new(),
        };
        assert_eq!(
            form.into_request(Role::Waiter).unwrap_err().code,
            ErrorCode::RequiredField
        );
    }

    #[test]
    fn test_register_form_password_mismatch() {
        let form = RegisterForm {
            name: "Ana".into(),
            email: "ana@x.com".into(),
            phone: "111".into(),
            password: "secret".into(),
            confirm_password: "secreto".into(),
        };
        assert_eq!(
            form.into_request(Role::Customer).unwrap_err().code,
            ErrorCode::PasswordMismatch
        );
    }

    #[test]
    fn test_register_form_ok() {
        let form = RegisterForm {
            name: " Ana ".into(),
            email: "ana@x.com".into(),
            phone: "111".into(),
            password: "secret".into(),
            confirm_password: "secret".into(),
        };
        let req = form.into_request(Role::Customer).unwrap();
        assert_eq!(req.name, "Ana");
        assert_eq!(req.role, Role::Customer);
    }
}
