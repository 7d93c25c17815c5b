//! Repository Module
//!
//! Data access for the desk surfaces. Each trait has an in-memory
//! implementation over seeded data and a remote one over the REST backend;
//! the pair is chosen once at composition time ([`Repositories::from_config`]).

pub mod memory;
pub mod record;
pub mod remote;

pub use memory::{MemoryAuthGateway, MemoryCardRepository, MemoryCrudRepository, MemoryTabRepository};
pub use record::Record;
pub use remote::{RemoteCardRepository, RemoteCrudRepository, RemoteTabRepository};

use crate::config::{Backend, DeskConfig};
use crate::error::DeskResult;
use async_trait::async_trait;
use comanda_client::{NetworkHttpClient, Session, SessionContext};
use shared::client::{ActivateCardResponse, LoginRequest, RegisterRequest};
use shared::models::{Customer, Product, Tab, TabItem, Waiter};
use shared::seed;
use std::sync::Arc;

/// Tab pool storage
///
/// Implementations return the tab as stored after the write. Callers are
/// expected to have checked preconditions already; implementations still
/// refuse invalid transitions.
#[async_trait]
pub trait TabRepository: Send + Sync {
    async fn list(&self) -> DeskResult<Vec<Tab>>;
    async fn open(&self, tab: &Tab, customer: &Customer, table_number: u32) -> DeskResult<Tab>;
    async fn close(&self, tab: &Tab) -> DeskResult<Tab>;
    async fn add_item(&self, tab: &Tab, item: &TabItem) -> DeskResult<Tab>;
}

/// Admin list storage for products and waiter accounts
#[async_trait]
pub trait CrudRepository<T: Record>: Send + Sync {
    async fn list(&self) -> DeskResult<Vec<T>>;
    async fn create(&self, data: &T::Create) -> DeskResult<T>;
    async fn update(&self, id: i64, data: &T::Update) -> DeskResult<T>;
    async fn set_active(&self, id: i64, active: bool) -> DeskResult<T>;
    async fn delete(&self, id: i64) -> DeskResult<()>;
}

/// Card / QR code activation
#[async_trait]
pub trait CardRepository: Send + Sync {
    async fn activate(&self, code: &str) -> DeskResult<ActivateCardResponse>;
}

/// Credential checks behind the login surface
#[async_trait]
pub trait AuthGateway: Send + Sync {
    async fn login(&self, request: &LoginRequest) -> DeskResult<Session>;
    async fn register(&self, request: &RegisterRequest) -> DeskResult<()>;
    async fn forgot_password(&self, email: &str) -> DeskResult<()>;
}

/// Every repository the desk needs, sharing one session
#[derive(Clone)]
pub struct Repositories {
    pub session: SessionContext,
    pub tabs: Arc<dyn TabRepository>,
    pub products: Arc<dyn CrudRepository<Product>>,
    pub waiters: Arc<dyn CrudRepository<Waiter>>,
    pub cards: Arc<dyn CardRepository>,
    pub auth: Arc<dyn AuthGateway>,
}

impl Repositories {
    /// Seeded in-memory repositories
    pub fn memory(tab_pool_size: u32) -> Self {
        Self {
            session: SessionContext::new(),
            tabs: Arc::new(MemoryTabRepository::seeded(tab_pool_size)),
            products: Arc::new(MemoryCrudRepository::new(seed::products())),
            waiters: Arc::new(MemoryCrudRepository::new(seed::waiters())),
            cards: Arc::new(MemoryCardRepository),
            auth: Arc::new(MemoryAuthGateway),
        }
    }

    /// Remote repositories over one HTTP client
    pub fn remote(client: NetworkHttpClient) -> Self {
        let client = Arc::new(client);
        Self {
            session: comanda_client::HttpClient::session(client.as_ref()).clone(),
            tabs: Arc::new(RemoteTabRepository::new(client.clone())),
            products: Arc::new(RemoteCrudRepository::<Product>::new(client.clone())),
            waiters: Arc::new(RemoteCrudRepository::<Waiter>::new(client.clone())),
            cards: Arc::new(RemoteCardRepository::new(client.clone())),
            auth: client,
        }
    }

    pub fn from_config(config: &DeskConfig) -> DeskResult<Self> {
        match config.backend {
            Backend::Memory => {
                tracing::info!(pool = config.tab_pool_size, "Using in-memory repositories");
                Ok(Self::memory(config.tab_pool_size))
            }
            Backend::Remote => {
                tracing::info!(url = %config.api_base_url, "Using remote repositories");
                let client = NetworkHttpClient::new(config.client_config(), SessionContext::new())?;
                Ok(Self::remote(client))
            }
        }
    }
}
