use axum::{Json, Router, extract::Query, routing::get};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    catalog::{self, CatalogProduct},
    response::{ApiResponse, Meta},
    routes::params::ProductQuery,
    state::AppState,
};

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct ProductList {
    #[schema(value_type = Vec<CatalogProduct>)]
    pub items: Vec<CatalogProduct>,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_products))
}

#[utoipa::path(
    get,
    path = "/api/products",
    params(ProductQuery),
    responses(
        (status = 200, description = "Product catalogue", body = ApiResponse<ProductList>)
    ),
    tag = "Products"
)]
pub async fn list_products(Query(query): Query<ProductQuery>) -> Json<ApiResponse<ProductList>> {
    let items: Vec<CatalogProduct> = catalog::products()
        .into_iter()
        .filter(|p| {
            query
                .product_code
                .as_deref()
                .is_none_or(|code| p.product_code == code)
        })
        .collect();

    let count = items.len();
    Json(ApiResponse::ok(
        "Products",
        ProductList { items },
        Some(Meta::count(count)),
    ))
}
