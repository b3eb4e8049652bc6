use axum::{Json, Router, extract::State, routing::get};

use crate::{
    dto::orders::Kpis, error::AppResult, response::ApiResponse, services::order_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_kpis))
}

#[utoipa::path(
    get,
    path = "/api/kpis",
    responses(
        (status = 200, description = "Derived order metrics", body = ApiResponse<Kpis>)
    ),
    tag = "Orders"
)]
pub async fn get_kpis(State(state): State<AppState>) -> AppResult<Json<ApiResponse<Kpis>>> {
    let resp = order_service::kpis(&state).await?;
    Ok(Json(resp))
}
