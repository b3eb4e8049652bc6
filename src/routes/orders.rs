use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    routing::get,
};

use crate::{
    dto::orders::{CreatedOrder, OrderList, OrderRequest, OrderUpdate, UpdatedOrder},
    error::AppResult,
    models::ProxyOrder,
    response::ApiResponse,
    services::order_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_orders).post(create_order))
        .route("/{id}", get(get_order).put(update_order))
}

#[utoipa::path(
    get,
    path = "/api/orders",
    responses(
        (status = 200, description = "All captured proxy orders", body = ApiResponse<OrderList>)
    ),
    tag = "Orders"
)]
pub async fn list_orders(State(state): State<AppState>) -> AppResult<Json<ApiResponse<OrderList>>> {
    let resp = order_service::list_orders(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/orders",
    request_body = OrderRequest,
    responses(
        (status = 201, description = "Order captured", body = ApiResponse<CreatedOrder>),
        (status = 400, description = "Validation failed"),
        (status = 415, description = "Body is not JSON"),
    ),
    tag = "Orders"
)]
pub async fn create_order(
    State(state): State<AppState>,
    payload: Result<Json<OrderRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<ApiResponse<CreatedOrder>>)> {
    let Json(payload) = payload?;
    let resp = order_service::create_order(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    params(
        ("id" = String, Path, description = "Proxy order id, e.g. PX01")
    ),
    responses(
        (status = 200, description = "Single order", body = ApiResponse<ProxyOrder>),
        (status = 404, description = "Order not found"),
    ),
    tag = "Orders"
)]
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<ProxyOrder>>> {
    let resp = order_service::get_order(&state, &id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/orders/{id}",
    params(
        ("id" = String, Path, description = "Proxy order id, e.g. PX01")
    ),
    request_body = OrderUpdate,
    responses(
        (status = 200, description = "Changed fields", body = ApiResponse<UpdatedOrder>),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Order not found"),
        (status = 415, description = "Body is not JSON"),
    ),
    tag = "Orders"
)]
pub async fn update_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<OrderUpdate>, JsonRejection>,
) -> AppResult<Json<ApiResponse<UpdatedOrder>>> {
    let Json(payload) = payload?;
    let resp = order_service::update_order(&state, &id, payload).await?;
    Ok(Json(resp))
}
