use crate::{
    domain::{
        requests::predict::{PredictStockV2Request, PredictStockV3Request},
        response::api::ApiResponse,
    },
    forecast::ForecastPoint,
};
use async_trait::async_trait;
use serde_json::Value;
use shared::errors::ServiceError;
use std::sync::Arc;

pub type DynPredictService = Arc<dyn PredictServiceTrait + Send + Sync>;

#[async_trait]
pub trait PredictServiceTrait {
    async fn train_stock_model(&self) -> Result<ApiResponse<Value>, ServiceError>;
    async fn predict_stock(&self, body: &Value) -> Result<ApiResponse<Value>, ServiceError>;
    async fn train_stock_model_v2(&self) -> Result<ApiResponse<Value>, ServiceError>;
    async fn predict_stock_v2(
        &self,
        req: &PredictStockV2Request,
    ) -> Result<ApiResponse<Value>, ServiceError>;
    async fn predict_stock_v3(
        &self,
        req: &PredictStockV3Request,
    ) -> Result<ApiResponse<Vec<ForecastPoint>>, ServiceError>;
}
