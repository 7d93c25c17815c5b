//! Login / registration flow
//!
//! The role comes from the landing page selector. A successful login
//! fills the shared [`SessionContext`]; every remote repository built from
//! the same [`Repositories`](crate::repository::Repositories) sees it.

use crate::error::DeskResult;
use crate::repository::{AuthGateway, Repositories};
use comanda_client::{Session, SessionContext};
use shared::client::{LoginForm, RegisterForm};
use shared::error::{AppError, ErrorCode};
use shared::models::Role;
use std::sync::Arc;

pub struct AuthFlow {
    role: Role,
    session: SessionContext,
    gateway: Arc<dyn AuthGateway>,
}

impl AuthFlow {
    pub fn new(role: Role, session: SessionContext, gateway: Arc<dyn AuthGateway>) -> Self {
        Self {
            role,
            session,
            gateway,
        }
    }

    /// Flow for the selector token (`cliente`, `garcom`, `admin`)
    pub fn for_selector(selector: Option<&str>, repos: &Repositories) -> Self {
        Self::new(
            Role::from_selector(selector),
            repos.session.clone(),
            repos.auth.clone(),
        )
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Landing surface for the role after login
    pub fn home(&self) -> &'static str {
        self.role.home()
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub async fn login(&self, form: LoginForm) -> DeskResult<Session> {
        let request = form.into_request(self.role)?;
        let session = self.gateway.login(&request).await.inspect_err(|e| {
            tracing::warn!(email = %request.email, role = %self.role, error = %e, "Login failed");
        })?;
        tracing::info!(user = %session.user.email, role = %session.role, "Logged in");
        self.session.set(session.clone());
        Ok(session)
    }

    pub async fn register(&self, form: RegisterForm) -> DeskResult<()> {
        let request = form.into_request(self.role)?;
        self.gateway.register(&request).await?;
        tracing::info!(email = %request.email, role = %self.role, "Account registered");
        Ok(())
    }

    pub async fn forgot_password(&self, email: &str) -> DeskResult<()> {
        let email = email.trim();
        if email.is_empty() {
            return Err(AppError::new(ErrorCode::RequiredField)
                .with_detail("field", "email")
                .into());
        }
        self.gateway.forgot_password(email).await
    }

    pub fn logout(&self) {
        self.session.clear();
        tracing::info!(role = %self.role, "Logged out");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flow(selector: &str) -> AuthFlow {
        AuthFlow::for_selector(Some(selector), &Repositories::memory(3))
    }

    #[tokio::test]
    async fn test_login_sets_and_logout_clears_session() {
        let auth = flow("garcom");
        assert_eq!(auth.home(), "/garcom");

        let session = auth
            .login(LoginForm {
                email: "garcom@restaurante.com".into(),
                password: "garcom123".into(),
            })
            .await
            .unwrap();
        assert_eq!(session.role, Role::Waiter);
        assert!(auth.session().is_authenticated());

        auth.logout();
        assert!(!auth.session().is_authenticated());
    }

    #[tokio::test]
    async fn test_blank_login_leaves_session_empty() {
        let auth = flow("admin");
        let err = auth
            .login(LoginForm {
                email: " ".into(),
                password: "x".into(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::RequiredField);
        assert!(!auth.session().is_authenticated());
    }

    #[tokio::test]
    async fn test_register_password_mismatch() {
        let auth = flow("cliente");
        let err = auth
            .register(RegisterForm {
                name: "Ana".into(),
                email: "ana@x.com".into(),
                phone: "1".into(),
                password: "abc".into(),
                confirm_password: "abd".into(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::PasswordMismatch);
        assert!(auth.forgot_password("").await.is_err());
        auth.forgot_password("ana@x.com").await.unwrap();
    }
}
