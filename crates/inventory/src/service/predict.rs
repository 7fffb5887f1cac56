use crate::{
    abstract_trait::{
        ml_client::DynMlClient,
        predict::PredictServiceTrait,
        sale::DynSaleRepository,
    },
    domain::{
        requests::predict::{PredictStockV2Request, PredictStockV3Request},
        response::api::ApiResponse,
    },
    forecast::{self, ForecastMethod, ForecastPoint, PeriodType},
};
use async_trait::async_trait;
use chrono::SecondsFormat;
use opentelemetry::KeyValue;
use serde_json::{Value, json};
use shared::{
    errors::ServiceError,
    utils::{Method, Metrics, TracingRecorder},
};
use tracing::info;

/// Converts a prediction horizon to days: weeks are 7 days, months 30, any
/// other unit is already days.
pub fn prediction_length_in_days(length: f64, unit: Option<&str>) -> f64 {
    match unit {
        Some("weeks") => length * 7.0,
        Some("months") => length * 30.0,
        _ => length,
    }
}

#[derive(Clone)]
pub struct PredictService {
    ml: DynMlClient,
    sales: DynSaleRepository,
    tracing: TracingRecorder,
}

impl PredictService {
    pub fn new(ml: DynMlClient, sales: DynSaleRepository, metrics: Metrics) -> Self {
        Self {
            ml,
            sales,
            tracing: TracingRecorder::new("predict-service", metrics),
        }
    }

    async fn train_inner(&self) -> Result<ApiResponse<Value>, ServiceError> {
        let sales = self.sales.find_all().await?;
        info!("🧠 Sending {} sales to stock model training", sales.len());

        let sales_data: Vec<Value> = sales
            .iter()
            .map(|sale| {
                json!({
                    "productId": sale.product_id,
                    "quantitySold": sale.quantity_sold,
                    "saleDate": sale.sale_date.to_rfc3339_opts(SecondsFormat::Millis, true),
                    "salePrice": sale.sale_price,
                    "buyerDetails": {
                        "gender": sale.buyer_gender,
                        "age": sale.buyer_age,
                    },
                })
            })
            .collect();

        let reply = self
            .ml
            .post_json("/train-stock-model", &json!({ "salesData": sales_data }))
            .await?;

        Ok(ApiResponse::new("Stock model training initiated", reply))
    }

    async fn train_v2_inner(&self) -> Result<ApiResponse<Value>, ServiceError> {
        let sales = self.sales.find_all().await?;
        info!("🧠 Sending {} sales to v2 model training", sales.len());

        let sales_data: Vec<Value> = sales
            .iter()
            .map(|sale| {
                json!({
                    "productId": sale.product_id,
                    "quantitySold": sale.quantity_sold,
                    "saleDate": sale.sale_date.to_rfc3339_opts(SecondsFormat::Millis, true),
                    "totalSaleAmount": sale.total_sale_amount,
                })
            })
            .collect();

        let reply = self
            .ml
            .post_json("/train-stock-model-v2", &json!({ "salesData": sales_data }))
            .await?;

        Ok(ApiResponse::new(
            "Stock model v2 training initiated successfully",
            reply,
        ))
    }

    async fn predict_v3_inner(
        &self,
        req: &PredictStockV3Request,
    ) -> Result<ApiResponse<Vec<ForecastPoint>>, ServiceError> {
        let period_type: PeriodType = req
            .period_type
            .parse()
            .map_err(ServiceError::InvalidInput)?;

        let sales = self.sales.find_by_product(req.product_id).await?;
        let buckets = forecast::aggregate_sales(
            sales.iter().map(|sale| (sale.sale_date, sale.quantity_sold)),
            period_type,
        );

        let points = forecast::forecast(&buckets, ForecastMethod::parse(&req.prediction_length));

        Ok(ApiResponse::new("Stock prediction for v3 successful", points))
    }
}

#[async_trait]
impl PredictServiceTrait for PredictService {
    async fn train_stock_model(&self) -> Result<ApiResponse<Value>, ServiceError> {
        let tracing_ctx = self.tracing.start_tracing(
            "train_stock_model",
            vec![KeyValue::new("component", "predict")],
        );

        let result = self.train_inner().await;
        self.tracing
            .finish(&tracing_ctx, Method::Post, result, "Training initiated")
    }

    async fn predict_stock(&self, body: &Value) -> Result<ApiResponse<Value>, ServiceError> {
        let tracing_ctx = self.tracing.start_tracing(
            "predict_stock",
            vec![KeyValue::new("component", "predict")],
        );

        let result = self
            .ml
            .post_json("/predict-stock", body)
            .await
            .map(|reply| ApiResponse::new("Stock prediction successful", reply));

        self.tracing
            .finish(&tracing_ctx, Method::Post, result, "Stock predicted")
    }

    async fn train_stock_model_v2(&self) -> Result<ApiResponse<Value>, ServiceError> {
        let tracing_ctx = self.tracing.start_tracing(
            "train_stock_model_v2",
            vec![KeyValue::new("component", "predict")],
        );

        let result = self.train_v2_inner().await;
        self.tracing
            .finish(&tracing_ctx, Method::Post, result, "Training v2 initiated")
    }

    async fn predict_stock_v2(
        &self,
        req: &PredictStockV2Request,
    ) -> Result<ApiResponse<Value>, ServiceError> {
        let tracing_ctx = self.tracing.start_tracing(
            "predict_stock_v2",
            vec![
                KeyValue::new("component", "predict"),
                KeyValue::new("product.id", req.product_id.to_string()),
            ],
        );

        let body = json!({
            "productId": req.product_id,
            "predictionLength": prediction_length_in_days(req.prediction_length, req.unit.as_deref()),
            "salesData": req.sales_data,
        });

        let result = self
            .ml
            .post_json("/predict-stock-v2", &body)
            .await
            .map(|reply| ApiResponse::new("Stock prediction for v2 successful", reply));

        self.tracing
            .finish(&tracing_ctx, Method::Post, result, "Stock predicted with v2")
    }

    async fn predict_stock_v3(
        &self,
        req: &PredictStockV3Request,
    ) -> Result<ApiResponse<Vec<ForecastPoint>>, ServiceError> {
        let tracing_ctx = self.tracing.start_tracing(
            "predict_stock_v3",
            vec![
                KeyValue::new("component", "predict"),
                KeyValue::new("product.id", req.product_id.to_string()),
                KeyValue::new("method", req.prediction_length.clone()),
                KeyValue::new("period_type", req.period_type.clone()),
            ],
        );

        let result = self.predict_v3_inner(req).await;
        self.tracing
            .finish(&tracing_ctx, Method::Post, result, "Stock predicted locally")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizon_converts_to_days() {
        assert_eq!(prediction_length_in_days(2.0, Some("weeks")), 14.0);
        assert_eq!(prediction_length_in_days(3.0, Some("months")), 90.0);
        assert_eq!(prediction_length_in_days(10.0, Some("days")), 10.0);
        assert_eq!(prediction_length_in_days(10.0, None), 10.0);
    }
}
