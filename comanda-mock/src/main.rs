use comanda_mock::{MockError, MockState};
use shared::seed::DEFAULT_TAB_POOL_SIZE;
use std::net::SocketAddr;
use std::sync::Arc;

fn env_port() -> Result<u16, MockError> {
    match std::env::var("MOCK_PORT") {
        Ok(value) => value.parse().map_err(|_| MockError::Config {
            name: "MOCK_PORT",
            value,
        }),
        Err(_) => Ok(7097),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .init();

    let addr = SocketAddr::from(([127, 0, 0, 1], env_port()?));
    let server = comanda_mock::spawn_on(addr, Arc::new(MockState::seeded(DEFAULT_TAB_POOL_SIZE))).await?;
    tracing::info!("Mock backend at {}", server.base_url());
    for (email, password, role) in comanda_mock::DEMO_ACCOUNTS {
        tracing::info!(%role, email, password, "Demo account");
    }

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutting down");
    Ok(())
}
