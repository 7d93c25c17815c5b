//! Admin-managed record types
//!
//! [`Record`] describes what the generic CRUD repositories and the admin
//! list need to know about an entity: its payloads, validation, filter and
//! wire shapes.

use chrono::NaiveDate;
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{
    Product, ProductCreate, ProductFilter, ProductUpdate, Waiter, WaiterCreate, WaiterFilter,
    WaiterUpdate,
};
use shared::wire::{
    ProductBody, RawProduct, RawWaiter, WaiterCreateBody, WaiterUpdateBody, WireError,
};
use validator::Validate;

pub trait Record: Clone + Send + Sync + 'static {
    type Create: Send + Sync;
    type Update: Send + Sync;
    type Filter;
    type Raw: DeserializeOwned + Send;
    type CreateBody: Serialize + Send + Sync;
    type UpdateBody: Serialize + Send + Sync;

    /// Path segment under `/admin`
    const RESOURCE: &'static str;
    const NOT_FOUND: ErrorCode;

    fn id(&self) -> i64;
    fn display_name(&self) -> &str;
    fn is_active(&self) -> bool;
    fn set_active(&mut self, active: bool);
    fn matches(&self, filter: &Self::Filter) -> bool;

    fn check_create(data: &Self::Create) -> AppResult<()>;
    fn check_update(data: &Self::Update) -> AppResult<()>;

    /// New record as created locally
    fn build(id: i64, data: &Self::Create, today: NaiveDate) -> Self;
    fn apply(&mut self, data: &Self::Update);

    /// Uniqueness rules against the other stored records
    fn check_unique(&self, _others: &[Self]) -> AppResult<()> {
        Ok(())
    }

    fn from_raw(raw: Self::Raw) -> Result<Self, WireError>;
    fn create_body(data: &Self::Create) -> Self::CreateBody;
    fn update_body(data: &Self::Update) -> Self::UpdateBody;

    fn not_found(id: i64) -> AppError {
        AppError::new(Self::NOT_FOUND).with_detail("id", id)
    }
}

impl Record for Product {
    type Create = ProductCreate;
    type Update = ProductUpdate;
    type Filter = ProductFilter;
    type Raw = RawProduct;
    type CreateBody = ProductBody;
    type UpdateBody = ProductBody;

    const RESOURCE: &'static str = "produtos";
    const NOT_FOUND: ErrorCode = ErrorCode::ProductNotFound;

    fn id(&self) -> i64 {
        self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn is_active(&self) -> bool {
        self.is_active
    }

    fn set_active(&mut self, active: bool) {
        self.is_active = active;
    }

    fn matches(&self, filter: &ProductFilter) -> bool {
        Product::matches(self, filter)
    }

    fn check_create(data: &ProductCreate) -> AppResult<()> {
        data.check()
    }

    fn check_update(data: &ProductUpdate) -> AppResult<()> {
        data.check()
    }

    fn build(id: i64, data: &ProductCreate, _today: NaiveDate) -> Self {
        ProductBody::from(data).into_product(id, 0)
    }

    fn apply(&mut self, data: &ProductUpdate) {
        *self = ProductBody::from(data).into_product(self.id, self.sales);
    }

    fn from_raw(raw: RawProduct) -> Result<Self, WireError> {
        Product::try_from(raw)
    }

    fn create_body(data: &ProductCreate) -> ProductBody {
        ProductBody::from(data)
    }

    fn update_body(data: &ProductUpdate) -> ProductBody {
        ProductBody::from(data)
    }
}

impl Record for Waiter {
    type Create = WaiterCreate;
    type Update = WaiterUpdate;
    type Filter = WaiterFilter;
    type Raw = RawWaiter;
    type CreateBody = WaiterCreateBody;
    type UpdateBody = WaiterUpdateBody;

    const RESOURCE: &'static str = "garcons";
    const NOT_FOUND: ErrorCode = ErrorCode::WaiterNotFound;

    fn id(&self) -> i64 {
        self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn is_active(&self) -> bool {
        self.is_active
    }

    fn set_active(&mut self, active: bool) {
        self.is_active = active;
    }

    fn matches(&self, filter: &WaiterFilter) -> bool {
        Waiter::matches(self, filter)
    }

    fn check_create(data: &WaiterCreate) -> AppResult<()> {
        Ok(data.validate()?)
    }

    fn check_update(data: &WaiterUpdate) -> AppResult<()> {
        Ok(data.validate()?)
    }

    fn build(id: i64, data: &WaiterCreate, today: NaiveDate) -> Self {
        Waiter {
            id,
            name: data.name.trim().to_string(),
            username: data.username.trim().to_string(),
            email: data.email.trim().to_string(),
            phone: data.phone.trim().to_string(),
            is_active: true,
            registered_on: Some(today),
            last_login: None,
        }
    }

    fn apply(&mut self, data: &WaiterUpdate) {
        self.name = data.name.trim().to_string();
        self.username = data.username.trim().to_string();
        self.email = data.email.trim().to_string();
        self.phone = data.phone.trim().to_string();
    }

    fn check_unique(&self, others: &[Self]) -> AppResult<()> {
        let taken = others
            .iter()
            .any(|w| w.id != self.id && w.username.eq_ignore_ascii_case(&self.username));
        if taken {
            return Err(AppError::new(ErrorCode::WaiterUsernameExists)
                .with_detail("username", self.username.clone()));
        }
        Ok(())
    }

    fn from_raw(raw: RawWaiter) -> Result<Self, WireError> {
        Waiter::try_from(raw)
    }

    fn create_body(data: &WaiterCreate) -> WaiterCreateBody {
        WaiterCreateBody::from(data)
    }

    fn update_body(data: &WaiterUpdate) -> WaiterUpdateBody {
        WaiterUpdateBody::from(data)
    }
}
