//! Comanda Mock - in-memory stand-in for the restaurant REST backend
//!
//! Serves the tab, catalog, staff and auth endpoints from [`MockState`]
//! under `/api`. Integration tests start it on an ephemeral port with
//! [`spawn`].

pub mod api;
pub mod error;
pub mod state;

pub use error::MockError;
pub use state::{DEMO_ACCOUNTS, MockState};

use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Full application: API routes nested under `/api`
pub fn app(state: Arc<MockState>) -> Router {
    Router::new()
        .nest("/api", api::router(state))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// A running mock server; aborted on drop
pub struct MockServer {
    pub addr: SocketAddr,
    pub state: Arc<MockState>,
    handle: JoinHandle<()>,
}

impl MockServer {
    /// Base URL to hand to the client, including the `/api` prefix
    pub fn base_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Bind `addr` and serve in a background task
pub async fn spawn_on(addr: SocketAddr, state: Arc<MockState>) -> Result<MockServer, MockError> {
    let listener = TcpListener::bind(addr).await?;
    let addr = listener.local_addr()?;
    let router = app(state.clone());
    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router).await {
            tracing::error!(error = %e, "Mock server stopped");
        }
    });
    tracing::debug!(%addr, "Mock server listening");
    Ok(MockServer {
        addr,
        state,
        handle,
    })
}

/// Serve on an ephemeral localhost port
pub async fn spawn(state: Arc<MockState>) -> Result<MockServer, MockError> {
    spawn_on(SocketAddr::from(([127, 0, 0, 1], 0)), state).await
}
