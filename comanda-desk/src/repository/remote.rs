//! Remote repositories over the REST backend

use super::{AuthGateway, CardRepository, CrudRepository, Record, TabRepository};
use crate::error::{DeskError, DeskResult};
use async_trait::async_trait;
use chrono::Utc;
use comanda_client::{HttpClient, NetworkHttpClient, Session};
use serde_json::Value;
use shared::client::{ActivateCardResponse, LoginRequest, RegisterRequest};
use shared::models::{Customer, Tab, TabItem, TabState};
use shared::wire::{
    self, CloseTabBody, OpenTabBody, RawTab, StatusBody, TabItemBody, WireError,
};
use std::marker::PhantomData;
use std::sync::Arc;

const TABS: &str = "Waiter/comandas";
const OPEN_TAB: &str = "Waiter/abrir-comanda";
const CLOSE_TAB: &str = "Waiter/fechar-comanda";

// ========== Tabs ==========

pub struct RemoteTabRepository {
    client: Arc<NetworkHttpClient>,
}

impl RemoteTabRepository {
    pub fn new(client: Arc<NetworkHttpClient>) -> Self {
        Self { client }
    }

    /// Decode the tab echoed by a write
    ///
    /// An empty body means the write succeeded without an echo; the
    /// transition is then applied to a local copy. An echo must carry the
    /// same number and the state the write moves the tab into.
    fn settle(
        value: Value,
        tab: &Tab,
        expected: TabState,
        local: impl FnOnce(&mut Tab) -> shared::AppResult<()>,
    ) -> DeskResult<Tab> {
        if value.is_null() {
            let mut copy = tab.clone();
            local(&mut copy)?;
            return Ok(copy);
        }
        let mut updated: Tab = wire::decode::<RawTab, Tab>(value)?;
        if updated.number != tab.number {
            return Err(DeskError::from(WireError::Inconsistent(format!(
                "asked for tab {}, backend answered tab {}",
                tab.number, updated.number
            ))));
        }
        if updated.state != expected {
            return Err(DeskError::from(WireError::Inconsistent(format!(
                "tab {} should be {:?} after the write, backend answered {:?}",
                tab.number, expected, updated.state
            ))));
        }
        // the slot keeps its local identity
        updated.id = tab.id.clone();
        Ok(updated)
    }
}

#[async_trait]
impl TabRepository for RemoteTabRepository {
    async fn list(&self) -> DeskResult<Vec<Tab>> {
        let value: Value = self.client.get(TABS).await?;
        let tabs = wire::decode_list::<RawTab, Tab>(value)?;
        tracing::debug!(count = tabs.len(), "Fetched tabs");
        Ok(tabs)
    }

    async fn open(&self, tab: &Tab, customer: &Customer, table_number: u32) -> DeskResult<Tab> {
        let body = OpenTabBody::new(tab.number, table_number, customer);
        let value: Value = self.client.post(OPEN_TAB, &body).await?;
        let customer = customer.clone();
        Self::settle(value, tab, TabState::Open, |t| t.open(customer, table_number, Utc::now()))
    }

    async fn close(&self, tab: &Tab) -> DeskResult<Tab> {
        let body = CloseTabBody { numero: tab.number };
        let value: Value = self.client.post(CLOSE_TAB, &body).await?;
        Self::settle(value, tab, TabState::Free, Tab::release)
    }

    async fn add_item(&self, tab: &Tab, item: &TabItem) -> DeskResult<Tab> {
        let path = format!("{}/{}/itens", TABS, tab.number);
        let value: Value = self.client.post(&path, &TabItemBody::from(item)).await?;
        let item = item.clone();
        Self::settle(value, tab, TabState::Open, |t| t.add_item(item))
    }
}

// ========== Admin records ==========

pub struct RemoteCrudRepository<T> {
    client: Arc<NetworkHttpClient>,
    _record: PhantomData<fn() -> T>,
}

impl<T: Record> RemoteCrudRepository<T> {
    pub fn new(client: Arc<NetworkHttpClient>) -> Self {
        Self {
            client,
            _record: PhantomData,
        }
    }

    fn collection() -> String {
        format!("admin/{}", T::RESOURCE)
    }

    fn item(id: i64) -> String {
        format!("admin/{}/{}", T::RESOURCE, id)
    }

    fn decode_one(value: Value) -> DeskResult<T> {
        let raw: T::Raw = serde_json::from_value(wire::unwrap_envelope(value))
            .map_err(|e| WireError::Malformed(e.to_string()))?;
        Ok(T::from_raw(raw)?)
    }
}

#[async_trait]
impl<T: Record> CrudRepository<T> for RemoteCrudRepository<T> {
    async fn list(&self) -> DeskResult<Vec<T>> {
        let value: Value = self.client.get(&Self::collection()).await?;
        match wire::unwrap_envelope(value) {
            Value::Array(items) => items.into_iter().map(Self::decode_one).collect(),
            _ => Err(DeskError::from(WireError::Malformed(format!(
                "expected a list of {}",
                T::RESOURCE
            )))),
        }
    }

    async fn create(&self, data: &T::Create) -> DeskResult<T> {
        T::check_create(data)?;
        let body = T::create_body(data);
        let value: Value = self.client.post(&Self::collection(), &body).await?;
        Self::decode_one(value)
    }

    async fn update(&self, id: i64, data: &T::Update) -> DeskResult<T> {
        T::check_update(data)?;
        let body = T::update_body(data);
        let value: Value = self.client.put(&Self::item(id), &body).await?;
        Self::decode_one(value)
    }

    async fn set_active(&self, id: i64, active: bool) -> DeskResult<T> {
        let path = format!("{}/status", Self::item(id));
        let value: Value = self.client.patch(&path, &StatusBody { ativo: active }).await?;
        Self::decode_one(value)
    }

    async fn delete(&self, id: i64) -> DeskResult<()> {
        let _: Value = self.client.delete(&Self::item(id)).await?;
        Ok(())
    }
}

// ========== Cards ==========

pub struct RemoteCardRepository {
    client: Arc<NetworkHttpClient>,
}

impl RemoteCardRepository {
    pub fn new(client: Arc<NetworkHttpClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CardRepository for RemoteCardRepository {
    async fn activate(&self, code: &str) -> DeskResult<ActivateCardResponse> {
        Ok(self.client.activate_card(code).await?)
    }
}

// ========== Auth ==========

#[async_trait]
impl AuthGateway for NetworkHttpClient {
    async fn login(&self, request: &LoginRequest) -> DeskResult<Session> {
        Ok(NetworkHttpClient::login(self, request).await?)
    }

    async fn register(&self, request: &RegisterRequest) -> DeskResult<()> {
        Ok(NetworkHttpClient::register(self, request).await?)
    }

    async fn forgot_password(&self, email: &str) -> DeskResult<()> {
        Ok(NetworkHttpClient::forgot_password(self, email).await?)
    }
}
