use crate::{
    abstract_trait::sale::DynSaleService,
    domain::{
        requests::sale::CreateSaleRequest,
        response::{
            api::ApiResponse,
            sale::{CreateSaleResponse, SaleWithProductResponse, SalesAnalyticsResponse},
        },
    },
    middleware::validate::SimpleValidatedJson,
    state::AppState,
};
use axum::{
    Json,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use shared::errors::HttpError;
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    post,
    path = "/api/products/createsale",
    tag = "Sale",
    request_body = CreateSaleRequest,
    responses(
        (status = 201, description = "Sale recorded and stock decremented", body = CreateSaleResponse),
        (status = 400, description = "Validation failed or not enough stock"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_sale(
    Extension(service): Extension<DynSaleService>,
    SimpleValidatedJson(body): SimpleValidatedJson<CreateSaleRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.create_sale(&body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/products/getsales",
    tag = "Sale",
    responses(
        (status = 200, description = "All sales with product details", body = ApiResponse<Vec<SaleWithProductResponse>>),
        (status = 404, description = "No sales recorded"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_sales(
    Extension(service): Extension<DynSaleService>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.get_sales().await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/products/getsales/{id}",
    tag = "Sale",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Sales of one product", body = ApiResponse<Vec<SaleWithProductResponse>>),
        (status = 404, description = "No sales for this product"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_sales_by_product(
    Extension(service): Extension<DynSaleService>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.get_sales_by_product(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/products/salesanalytics",
    tag = "Sale",
    responses(
        (status = 200, description = "Per-product, per-category and top-seller aggregates", body = SalesAnalyticsResponse),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn sales_analytics(
    Extension(service): Extension<DynSaleService>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.sales_analytics().await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn sale_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/products/createsale", post(create_sale))
        .route("/api/products/getsales", get(get_sales))
        .route("/api/products/getsales/{id}", get(get_sales_by_product))
        .route("/api/products/salesanalytics", get(sales_analytics))
        .layer(Extension(app_state.di_container.sale_service.clone()))
}
