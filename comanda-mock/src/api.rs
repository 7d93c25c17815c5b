use crate::state::MockState;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::HeaderMap,
    routing::{get, patch, post, put},
};
use serde_json::{Value, json};
use shared::client::{ActivateCardRequest, ForgotPasswordRequest, LoginRequest, RegisterRequest};
use shared::error::{ApiResponse, AppError, AppResult};
use shared::models::Role;
use shared::wire::{
    CloseTabBody, OpenTabBody, ProductBody, StatusBody, TabItemBody, WaiterCreateBody,
    WaiterUpdateBody, WireProduct, WireTab, WireWaiter,
};
use std::sync::Arc;

type Shared = State<Arc<MockState>>;

const STAFF: &[Role] = &[Role::Waiter, Role::Admin];
const ADMIN: &[Role] = &[Role::Admin];
const ANYONE: &[Role] = &[Role::Customer, Role::Waiter, Role::Admin];

fn bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
}

fn ok() -> Json<ApiResponse<()>> {
    Json(ApiResponse::ok())
}

// ========== Auth ==========

async fn login(State(state): Shared, Json(req): Json<LoginRequest>) -> AppResult<Json<Value>> {
    let resp = state.login(&req)?;
    Ok(Json(json!(resp)))
}

async fn register(
    State(state): Shared,
    Json(req): Json<RegisterRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    state.register(&req)?;
    Ok(ok())
}

async fn forgot_password(Json(req): Json<ForgotPasswordRequest>) -> AppResult<Json<ApiResponse<()>>> {
    if req.email.trim().is_empty() {
        return Err(AppError::validation("Email is required"));
    }
    tracing::info!(email = %req.email, "Password reset requested");
    Ok(ok())
}

async fn activate_card(
    State(state): Shared,
    headers: HeaderMap,
    Json(req): Json<ActivateCardRequest>,
) -> AppResult<Json<Value>> {
    state.authorize(bearer(&headers), ANYONE)?;
    Ok(Json(json!(state.activate_card(&req.code)?)))
}

// ========== Tabs ==========

async fn list_tabs(State(state): Shared, headers: HeaderMap) -> AppResult<Json<Vec<WireTab>>> {
    state.authorize(bearer(&headers), STAFF)?;
    Ok(Json(state.tabs().iter().map(WireTab::from).collect()))
}

async fn open_tab(
    State(state): Shared,
    headers: HeaderMap,
    Json(body): Json<OpenTabBody>,
) -> AppResult<Json<WireTab>> {
    state.authorize(bearer(&headers), STAFF)?;
    let tab = state.open_tab(body)?;
    Ok(Json(WireTab::from(&tab)))
}

async fn close_tab(
    State(state): Shared,
    headers: HeaderMap,
    Json(body): Json<CloseTabBody>,
) -> AppResult<Json<WireTab>> {
    state.authorize(bearer(&headers), STAFF)?;
    let tab = state.close_tab(body.numero)?;
    Ok(Json(WireTab::from(&tab)))
}

async fn add_tab_item(
    State(state): Shared,
    headers: HeaderMap,
    Path(numero): Path<u32>,
    Json(body): Json<TabItemBody>,
) -> AppResult<Json<WireTab>> {
    state.authorize(bearer(&headers), STAFF)?;
    let tab = state.add_item(numero, body.into())?;
    Ok(Json(WireTab::from(&tab)))
}

// ========== Products ==========

async fn list_products(
    State(state): Shared,
    headers: HeaderMap,
) -> AppResult<Json<Vec<WireProduct>>> {
    state.authorize(bearer(&headers), ANYONE)?;
    Ok(Json(state.products().iter().map(WireProduct::from).collect()))
}

async fn create_product(
    State(state): Shared,
    headers: HeaderMap,
    Json(body): Json<ProductBody>,
) -> AppResult<Json<WireProduct>> {
    state.authorize(bearer(&headers), ADMIN)?;
    Ok(Json(WireProduct::from(&state.create_product(body)?)))
}

async fn update_product(
    State(state): Shared,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<ProductBody>,
) -> AppResult<Json<WireProduct>> {
    state.authorize(bearer(&headers), ADMIN)?;
    Ok(Json(WireProduct::from(&state.update_product(id, body)?)))
}

async fn delete_product(
    State(state): Shared,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<()>>> {
    state.authorize(bearer(&headers), ADMIN)?;
    state.delete_product(id)?;
    Ok(ok())
}

async fn product_status(
    State(state): Shared,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<StatusBody>,
) -> AppResult<Json<WireProduct>> {
    state.authorize(bearer(&headers), ADMIN)?;
    Ok(Json(WireProduct::from(&state.set_product_active(id, body.ativo)?)))
}

// ========== Waiters ==========

async fn list_waiters(
    State(state): Shared,
    headers: HeaderMap,
) -> AppResult<Json<Vec<WireWaiter>>> {
    state.authorize(bearer(&headers), ADMIN)?;
    Ok(Json(state.waiters().iter().map(WireWaiter::from).collect()))
}

async fn create_waiter(
    State(state): Shared,
    headers: HeaderMap,
    Json(body): Json<WaiterCreateBody>,
) -> AppResult<Json<WireWaiter>> {
    state.authorize(bearer(&headers), ADMIN)?;
    Ok(Json(WireWaiter::from(&state.create_waiter(body)?)))
}

async fn update_waiter(
    State(state): Shared,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<WaiterUpdateBody>,
) -> AppResult<Json<WireWaiter>> {
    state.authorize(bearer(&headers), ADMIN)?;
    Ok(Json(WireWaiter::from(&state.update_waiter(id, body)?)))
}

async fn delete_waiter(
    State(state): Shared,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<()>>> {
    state.authorize(bearer(&headers), ADMIN)?;
    state.delete_waiter(id)?;
    Ok(ok())
}

async fn waiter_status(
    State(state): Shared,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<StatusBody>,
) -> AppResult<Json<WireWaiter>> {
    state.authorize(bearer(&headers), ADMIN)?;
    Ok(Json(WireWaiter::from(&state.set_waiter_active(id, body.ativo)?)))
}

pub fn router(state: Arc<MockState>) -> Router {
    Router::new()
        .route("/login", post(login))
        .route("/register", post(register))
        .route("/forgot-password", post(forgot_password))
        .route("/cliente/ativar-cartao", post(activate_card))
        .route("/Waiter/comandas", get(list_tabs))
        .route("/Waiter/abrir-comanda", post(open_tab))
        .route("/Waiter/fechar-comanda", post(close_tab))
        .route("/Waiter/comandas/{numero}/itens", post(add_tab_item))
        .route("/admin/produtos", get(list_products).post(create_product))
        .route("/admin/produtos/{id}", put(update_product).delete(delete_product))
        .route("/admin/produtos/{id}/status", patch(product_status))
        .route("/admin/garcons", get(list_waiters).post(create_waiter))
        .route("/admin/garcons/{id}", put(update_waiter).delete(delete_waiter))
        .route("/admin/garcons/{id}/status", patch(waiter_status))
        .with_state(state)
}
