//! Auth API
//!
//! Login, registration and password reset are the only calls made without
//! a session. A successful login fills the shared [`SessionContext`].

use crate::http::HttpClient;
use crate::{ClientError, ClientResult, NetworkHttpClient, Session};
use serde_json::Value;
use shared::client::{
    ActivateCardRequest, ActivateCardResponse, ForgotPasswordRequest, LoginRequest, LoginResponse,
    RegisterRequest,
};
use shared::wire::unwrap_envelope;

impl NetworkHttpClient {
    /// `POST /login`, then start the session
    pub async fn login(&self, request: &LoginRequest) -> ClientResult<Session> {
        let req = self.raw().post(self.url("login")).json(request);
        let value: Value = self.send(req).await?;
        let resp: LoginResponse = serde_json::from_value(unwrap_envelope(value))
            .map_err(|e| ClientError::InvalidResponse(format!("login: {}", e)))?;
        if resp.token.trim().is_empty() {
            return Err(ClientError::InvalidResponse("login: empty token".into()));
        }

        let session = Session::from(resp);
        tracing::info!(role = %session.role, user = %session.user.email, "Logged in");
        self.session().set(session.clone());
        Ok(session)
    }

    /// `POST /register`
    pub async fn register(&self, request: &RegisterRequest) -> ClientResult<()> {
        let req = self.raw().post(self.url("register")).json(request);
        let _: Value = self.send(req).await?;
        tracing::info!(email = %request.email, role = %request.role, "Account registered");
        Ok(())
    }

    /// `POST /forgot-password`
    pub async fn forgot_password(&self, email: &str) -> ClientResult<()> {
        let body = ForgotPasswordRequest {
            email: email.trim().to_string(),
        };
        let req = self.raw().post(self.url("forgot-password")).json(&body);
        let _: Value = self.send(req).await?;
        Ok(())
    }

    /// `POST /cliente/ativar-cartao`
    pub async fn activate_card(&self, code: &str) -> ClientResult<ActivateCardResponse> {
        let body = ActivateCardRequest {
            code: code.trim().to_string(),
        };
        let value: Value = self.post("cliente/ativar-cartao", &body).await?;
        serde_json::from_value(unwrap_envelope(value))
            .map_err(|e| ClientError::InvalidResponse(format!("card activation: {}", e)))
    }

    /// Drop the local session; the backend keeps no logout state
    pub fn logout(&self) {
        self.session().clear();
        tracing::info!("Logged out");
    }
}
