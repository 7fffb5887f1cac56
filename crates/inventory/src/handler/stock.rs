use crate::{
    abstract_trait::stock::DynStockService,
    domain::{
        requests::stock::{AddStockRequest, UpdateProductAndStockRequest, UpdateStockRequest},
        response::{
            api::ApiResponse,
            product::{
                AddStockResponse, ProductAndStockResponse, StockHistoryResponse, StockResponse,
            },
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
    routing::{get, post, put},
};
use shared::errors::HttpError;
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    post,
    path = "/api/products/addstock",
    tag = "Stock",
    request_body = AddStockRequest,
    responses(
        (status = 200, description = "Stock added to every listed product", body = AddStockResponse),
        (status = 400, description = "Validation failed or unknown product"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn add_stock(
    Extension(service): Extension<DynStockService>,
    SimpleValidatedJson(body): SimpleValidatedJson<AddStockRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.add_stock(&body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/products/updatestock/{id}",
    tag = "Stock",
    params(("id" = i32, Path, description = "Product ID")),
    request_body = UpdateStockRequest,
    responses(
        (status = 200, description = "Stock incremented", body = ApiResponse<StockResponse>),
        (status = 400, description = "No stock record for this product"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn update_stock(
    Extension(service): Extension<DynStockService>,
    Path(id): Path<i32>,
    SimpleValidatedJson(body): SimpleValidatedJson<UpdateStockRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.update_stock(id, &body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/products/updateProductAndStock/{id}",
    tag = "Stock",
    params(("id" = i32, Path, description = "Product ID")),
    request_body = UpdateProductAndStockRequest,
    responses(
        (status = 200, description = "Product and stock replaced", body = ApiResponse<ProductAndStockResponse>),
        (status = 400, description = "Unknown product or invalid body"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn update_product_and_stock(
    Extension(service): Extension<DynStockService>,
    Path(id): Path<i32>,
    SimpleValidatedJson(body): SimpleValidatedJson<UpdateProductAndStockRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.update_product_and_stock(id, &body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/products/getstockhistory/{id}",
    tag = "Stock",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Restock journal, newest first", body = ApiResponse<Vec<StockHistoryResponse>>),
        (status = 404, description = "No stock history for this product"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_stock_history(
    Extension(service): Extension<DynStockService>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.get_stock_history(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn stock_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/products/addstock", post(add_stock))
        .route("/api/products/updatestock/{id}", put(update_stock))
        .route(
            "/api/products/updateProductAndStock/{id}",
            put(update_product_and_stock),
        )
        .route("/api/products/getstockhistory/{id}", get(get_stock_history))
        .layer(Extension(app_state.di_container.stock_service.clone()))
}
