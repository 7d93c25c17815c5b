//! HTTP client for network-based API calls

use crate::{ClientConfig, ClientError, ClientResult, SessionContext};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::error::ApiResponse;

/// HTTP client trait
///
/// Every method attaches the session's bearer token and fails with
/// [`ClientError::Unauthorized`] without touching the network when there
/// is no session.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T>;
    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;
    async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;
    async fn patch<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;
    async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T>;
    fn session(&self) -> &SessionContext;
}

/// Network HTTP client backed by reqwest
#[derive(Debug, Clone)]
pub struct NetworkHttpClient {
    client: Client,
    config: ClientConfig,
    session: SessionContext,
}

impl NetworkHttpClient {
    pub fn new(config: ClientConfig, session: SessionContext) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()?;
        Ok(Self {
            client,
            config,
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    pub(crate) fn url(&self, path: &str) -> String {
        self.config.url(path)
    }

    pub(crate) fn raw(&self) -> &Client {
        &self.client
    }

    fn authorized(&self, req: RequestBuilder) -> ClientResult<RequestBuilder> {
        let bearer = self.session.bearer().ok_or(ClientError::Unauthorized)?;
        Ok(req.header(reqwest::header::AUTHORIZATION, bearer))
    }

    pub(crate) async fn send<T: DeserializeOwned>(&self, req: RequestBuilder) -> ClientResult<T> {
        let response = req.send().await?;
        handle_response(response).await
    }
}

/// Map a response onto `T` or a [`ClientError`]
///
/// Error bodies in the `{code, message, details}` shape become
/// [`ClientError::Api`]; anything else falls back to the status code.
pub(crate) async fn handle_response<T: DeserializeOwned>(
    response: reqwest::Response,
) -> ClientResult<T> {
    let status = response.status();
    let text = response.text().await?;

    if !status.is_success() {
        if let Some(err) = serde_json::from_str::<ApiResponse<Value>>(&text)
            .ok()
            .and_then(ApiResponse::into_error)
        {
            tracing::debug!(status = %status, code = %err.code, "Backend returned an error");
            return Err(ClientError::Api(err));
        }
        return match status {
            StatusCode::UNAUTHORIZED => Err(ClientError::Unauthorized),
            StatusCode::FORBIDDEN => Err(ClientError::Forbidden(text)),
            StatusCode::NOT_FOUND => Err(ClientError::NotFound(text)),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                Err(ClientError::Validation(text))
            }
            _ => Err(ClientError::Internal(text)),
        };
    }

    if text.trim().is_empty() {
        return Ok(serde_json::from_value(Value::Null)?);
    }
    Ok(serde_json::from_str(&text)?)
}

#[async_trait]
impl HttpClient for NetworkHttpClient {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let req = self.authorized(self.client.get(self.url(path)))?;
        self.send(req).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let req = self.authorized(self.client.post(self.url(path)).json(body))?;
        self.send(req).await
    }

    async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let req = self.authorized(self.client.put(self.url(path)).json(body))?;
        self.send(req).await
    }

    async fn patch<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let req = self.authorized(self.client.patch(self.url(path)).json(body))?;
        self.send(req).await
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let req = self.authorized(self.client.delete(self.url(path)))?;
        self.send(req).await
    }

    fn session(&self) -> &SessionContext {
        &self.session
    }
}
