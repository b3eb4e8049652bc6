use axum::{Json, extract::State};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    response::{ApiResponse, Meta},
    services::order_service,
    state::AppState,
};

#[derive(Serialize, ToSchema)]
pub struct HealthData {
    pub status: String,
    pub orders_cached: usize,
}

#[derive(Serialize, ToSchema)]
pub struct ServiceIndex {
    pub status: String,
    pub endpoints: Vec<String>,
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "OK", body = ApiResponse<HealthData>),
    ),
        tag = "Health"
)]
pub async fn health_check(State(state): State<AppState>) -> Json<ApiResponse<HealthData>> {
    let data = HealthData {
        status: "ok".to_string(),
        orders_cached: order_service::orders_cached(&state).await,
    };

    Json(ApiResponse::ok(
        "Health check",
        data,
        Some(Meta::empty()),
    ))
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service index", body = ApiResponse<ServiceIndex>),
    ),
        tag = "Health"
)]
pub async fn service_index() -> Json<ApiResponse<ServiceIndex>> {
    let endpoints = ["/api/orders", "/api/orders/{id}", "/api/kpis", "/api/products"]
        .into_iter()
        .map(String::from)
        .collect();

    Json(ApiResponse::ok(
        "Proxy API running",
        ServiceIndex {
            status: "ok".to_string(),
            endpoints,
        },
        None,
    ))
}
