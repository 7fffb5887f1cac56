use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PredictStockV2Request {
    pub product_id: i32,

    #[validate(range(min = 0.0, message = "Prediction length cannot be negative"))]
    pub prediction_length: f64,

    /// `weeks`, `months`, anything else is taken as days
    pub unit: Option<String>,

    #[schema(value_type = Object)]
    pub sales_data: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PredictStockV3Request {
    pub product_id: i32,

    /// Forecast method: `SMA` or `ES`
    #[schema(example = "SMA")]
    pub prediction_length: String,

    /// `week` or `month`
    #[schema(example = "week")]
    pub period_type: String,
}
