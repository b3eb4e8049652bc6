use utoipa::{OpenApi, openapi::OpenApi as OpenApiSpec};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    catalog::CatalogProduct,
    dto::orders::{CreatedOrder, Kpis, OrderList, OrderRequest, OrderUpdate, UpdatedOrder},
    models::ProxyOrder,
    response::{ApiResponse, Meta, ResponseStatus},
    routes::{health, kpis, orders, params, products},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        health::service_index,
        orders::list_orders,
        orders::create_order,
        orders::get_order,
        orders::update_order,
        kpis::get_kpis,
        products::list_products
    ),
    components(
        schemas(
            ProxyOrder,
            CatalogProduct,
            OrderRequest,
            OrderUpdate,
            OrderList,
            CreatedOrder,
            UpdatedOrder,
            Kpis,
            health::HealthData,
            health::ServiceIndex,
            params::ProductQuery,
            products::ProductList,
            Meta,
            ResponseStatus,
            ApiResponse<ProxyOrder>,
            ApiResponse<OrderList>,
            ApiResponse<CreatedOrder>,
            ApiResponse<UpdatedOrder>,
            ApiResponse<Kpis>,
            ApiResponse<products::ProductList>
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Orders", description = "Proxy order endpoints"),
        (name = "Products", description = "Product catalogue"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
