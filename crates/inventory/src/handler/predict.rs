use crate::{
    abstract_trait::predict::DynPredictService,
    domain::{
        requests::predict::{PredictStockV2Request, PredictStockV3Request},
        response::api::ApiResponse,
    },
    forecast::ForecastPoint,
    middleware::validate::SimpleValidatedJson,
    state::AppState,
};
use axum::{
    Json,
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};
use serde_json::Value;
use shared::errors::HttpError;
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    post,
    path = "/api/predict/train-stock-model",
    tag = "Predict",
    responses(
        (status = 200, description = "Sales history forwarded to the ML service for training", body = ApiResponse<Object>),
        (status = 502, description = "Prediction service unavailable")
    )
)]
pub async fn train_stock_model(
    Extension(service): Extension<DynPredictService>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.train_stock_model().await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/predict/predict-stock",
    tag = "Predict",
    request_body = Object,
    responses(
        (status = 200, description = "Prediction from the ML service", body = ApiResponse<Object>),
        (status = 502, description = "Prediction service unavailable")
    )
)]
pub async fn predict_stock(
    Extension(service): Extension<DynPredictService>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.predict_stock(&body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/predict/train-stock-model-v2",
    tag = "Predict",
    responses(
        (status = 200, description = "Sales history forwarded to the v2 trainer", body = ApiResponse<Object>),
        (status = 502, description = "Prediction service unavailable")
    )
)]
pub async fn train_stock_model_v2(
    Extension(service): Extension<DynPredictService>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.train_stock_model_v2().await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/predict/predict-stock-v2",
    tag = "Predict",
    request_body = PredictStockV2Request,
    responses(
        (status = 200, description = "Prediction from the v2 model", body = ApiResponse<Object>),
        (status = 400, description = "Validation failed"),
        (status = 502, description = "Prediction service unavailable")
    )
)]
pub async fn predict_stock_v2(
    Extension(service): Extension<DynPredictService>,
    SimpleValidatedJson(body): SimpleValidatedJson<PredictStockV2Request>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.predict_stock_v2(&body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/predict/predict-stock-v3",
    tag = "Predict",
    request_body = PredictStockV3Request,
    responses(
        (status = 200, description = "Local SMA or exponential smoothing forecast", body = ApiResponse<Vec<ForecastPoint>>),
        (status = 400, description = "Unknown period type"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn predict_stock_v3(
    Extension(service): Extension<DynPredictService>,
    SimpleValidatedJson(body): SimpleValidatedJson<PredictStockV3Request>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.predict_stock_v3(&body).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn predict_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/predict/train-stock-model", post(train_stock_model))
        .route("/api/predict/predict-stock", post(predict_stock))
        .route(
            "/api/predict/train-stock-model-v2",
            post(train_stock_model_v2),
        )
        .route("/api/predict/predict-stock-v2", post(predict_stock_v2))
        .route("/api/predict/predict-stock-v3", post(predict_stock_v3))
        .layer(Extension(app_state.di_container.predict_service.clone()))
}
