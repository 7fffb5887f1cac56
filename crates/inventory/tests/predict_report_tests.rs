mod common;

use chrono::{DateTime, Duration, TimeZone, Utc};
use common::{FakeMlClient, InMemoryStore, services, services_with_ml};
use inventory::{
    abstract_trait::{
        predict::PredictServiceTrait, report::ReportServiceTrait, sale::SaleRepositoryTrait,
    },
    domain::requests::{
        predict::{PredictStockV2Request, PredictStockV3Request},
        report::{DateRangeQuery, SalesReportQuery},
    },
    forecast::ForecastPoint,
    model::sale::NewSale,
};
use serde_json::json;
use shared::errors::ServiceError;
use std::sync::Arc;

fn jan(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, day, 10, 0, 0).unwrap()
}

async fn record_sale(store: &InMemoryStore, product_id: i32, quantity: i32, price: f64, at: DateTime<Utc>) {
    SaleRepositoryTrait::create(
        store,
        &NewSale {
            product_id,
            quantity_sold: quantity,
            sale_price: price,
            sale_date: at,
            buyer_gender: Some("male".into()),
            buyer_age: Some(40),
            total_sale_amount: price * f64::from(quantity),
        },
    )
    .await
    .unwrap();
}

fn values(points: &[ForecastPoint]) -> Vec<f64> {
    points
        .iter()
        .map(|p| match p {
            ForecastPoint::Predicted(p) => p.predicted_sales,
            ForecastPoint::Smoothed(s) => s.smoothed_value,
        })
        .collect()
}

fn v3(method: &str, period_type: &str) -> PredictStockV3Request {
    PredictStockV3Request {
        product_id: 1,
        prediction_length: method.to_string(),
        period_type: period_type.to_string(),
    }
}

#[tokio::test]
async fn weekly_moving_average_forecasts_the_fifth_week() {
    let svc = services();
    for (week, quantity) in [(1, 10), (8, 20), (15, 30), (22, 40), (29, 50)] {
        record_sale(&svc.store, 1, quantity, 1.0, jan(week)).await;
    }

    let result = svc.predict.predict_stock_v3(&v3("SMA", "week")).await.unwrap();

    assert_eq!(result.message, "Stock prediction for v3 successful");
    assert_eq!(values(&result.data), vec![25.0]);
    assert!(matches!(&result.data[0], ForecastPoint::Predicted(p) if p.period == "2025-W5"));
    assert!(svc.ml.calls().is_empty());
}

#[tokio::test]
async fn exponential_smoothing_covers_every_bucket() {
    let svc = services();
    record_sale(&svc.store, 1, 10, 1.0, jan(2)).await;
    record_sale(&svc.store, 1, 20, 1.0, jan(9)).await;
    record_sale(&svc.store, 2, 99, 1.0, jan(9)).await;

    let result = svc.predict.predict_stock_v3(&v3("ES", "week")).await.unwrap();
    let smoothed = values(&result.data);

    assert_eq!(smoothed.len(), 2);
    assert!((smoothed[0] - 10.0).abs() < 1e-9);
    assert!((smoothed[1] - 13.0).abs() < 1e-9);
}

#[tokio::test]
async fn unknown_method_returns_no_points() {
    let svc = services();
    record_sale(&svc.store, 1, 10, 1.0, jan(2)).await;

    let result = svc.predict.predict_stock_v3(&v3("ARIMA", "month")).await.unwrap();

    assert!(result.data.is_empty());
}

#[tokio::test]
async fn bad_period_type_is_rejected() {
    let svc = services();

    let err = svc
        .predict
        .predict_stock_v3(&v3("SMA", "year"))
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::InvalidInput(_)));
}

#[tokio::test]
async fn training_forwards_every_sale() {
    let svc = services();
    record_sale(&svc.store, 1, 3, 2.5, jan(2)).await;
    record_sale(&svc.store, 2, 1, 4.0, jan(3)).await;

    let reply = svc.predict.train_stock_model().await.unwrap();

    assert_eq!(reply.message, "Stock model training initiated");
    let calls = svc.ml.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "/train-stock-model");

    let sales = calls[0].1["salesData"].as_array().unwrap();
    assert_eq!(sales.len(), 2);
    assert_eq!(sales[0]["productId"], json!(1));
    assert_eq!(sales[0]["quantitySold"], json!(3));
    assert_eq!(sales[0]["saleDate"], json!("2025-01-02T10:00:00.000Z"));
    assert_eq!(sales[0]["buyerDetails"]["gender"], json!("male"));
}

#[tokio::test]
async fn v2_training_sends_sale_totals() {
    let svc = services();
    record_sale(&svc.store, 1, 3, 2.5, jan(2)).await;

    svc.predict.train_stock_model_v2().await.unwrap();

    let calls = svc.ml.calls();
    assert_eq!(calls[0].0, "/train-stock-model-v2");
    assert_eq!(calls[0].1["salesData"][0]["totalSaleAmount"], json!(7.5));
}

#[tokio::test]
async fn prediction_body_is_passed_through() {
    let svc = services();
    let body = json!({ "productId": 7, "predictionLength": 14 });

    let reply = svc.predict.predict_stock(&body).await.unwrap();

    assert_eq!(reply.data["path"], json!("/predict-stock"));
    assert_eq!(svc.ml.calls()[0].1, body);
}

#[tokio::test]
async fn v2_prediction_converts_the_horizon_to_days() {
    let svc = services();

    svc.predict
        .predict_stock_v2(&PredictStockV2Request {
            product_id: 7,
            prediction_length: 2.0,
            unit: Some("weeks".into()),
            sales_data: None,
        })
        .await
        .unwrap();

    let (path, body) = svc.ml.calls().remove(0);
    assert_eq!(path, "/predict-stock-v2");
    assert_eq!(body["predictionLength"], json!(14.0));
    assert_eq!(body["productId"], json!(7));
}

#[tokio::test]
async fn ml_outage_surfaces_as_upstream_error() {
    let svc = services_with_ml(Arc::new(FakeMlClient::failing()));

    let err = svc
        .predict
        .predict_stock(&json!({ "productId": 1 }))
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::Upstream(_)));
}

#[tokio::test]
async fn dashboard_splits_current_and_previous_periods() {
    let svc = services();
    let now = Utc.with_ymd_and_hms(2025, 6, 30, 12, 0, 0).unwrap();

    let milk = svc.store.seed_product("Milk", "Dairy");
    let rice = svc.store.seed_product("Rice", "Grains");
    svc.store.seed_stock(milk.product_id, 4, 1.5, None);
    svc.store
        .seed_stock(rice.product_id, 50, 2.0, Some(now + Duration::days(60)));

    record_sale(&svc.store, milk.product_id, 2, 1.5, now - Duration::days(1)).await;
    record_sale(&svc.store, rice.product_id, 5, 2.0, now - Duration::days(2)).await;
    record_sale(&svc.store, rice.product_id, 1, 2.0, now - Duration::days(45)).await;

    let dashboard = svc
        .report
        .dashboard_at(&DateRangeQuery::default(), now)
        .await
        .unwrap()
        .data;

    assert_eq!(dashboard.kpis.current.total_sales, 3);
    assert!((dashboard.kpis.current.total_revenue - 15.0).abs() < 1e-9);
    assert_eq!(dashboard.kpis.previous_period.total_sales, 1);
    assert_eq!(dashboard.sales_trend.len(), 2);
    assert_eq!(dashboard.top_products[0].product_name, "Rice");
    assert_eq!(dashboard.stock_alerts.len(), 1);
    assert_eq!(dashboard.stock_alerts[0].product_name, "Milk");
}

#[tokio::test]
async fn dashboard_rejects_malformed_dates() {
    let svc = services();

    let err = svc
        .report
        .dashboard(&DateRangeQuery {
            start_date: Some("last week".into()),
            end_date: Some("2025-06-30".into()),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::Validation(_)));
}

#[tokio::test]
async fn sales_report_filters_by_category_and_range() {
    let svc = services();
    let milk = svc.store.seed_product("Milk", "Dairy");
    let rice = svc.store.seed_product("Rice", "Grains");

    record_sale(&svc.store, milk.product_id, 2, 1.5, jan(5)).await;
    record_sale(&svc.store, milk.product_id, 1, 1.5, jan(20)).await;
    record_sale(&svc.store, rice.product_id, 4, 2.0, jan(6)).await;

    let dairy = svc
        .report
        .sales_report(&SalesReportQuery {
            category: Some("Dairy".into()),
            ..Default::default()
        })
        .await
        .unwrap()
        .data;
    assert_eq!(dairy.total_quantity, 3);

    let early = svc
        .report
        .sales_report(&SalesReportQuery {
            start_date: Some("2025-01-01".into()),
            end_date: Some("2025-01-10".into()),
            ..Default::default()
        })
        .await
        .unwrap()
        .data;
    assert_eq!(early.total_quantity, 6);
    assert!((early.total_sales - 11.0).abs() < 1e-9);
}

#[tokio::test]
async fn inventory_report_pairs_stock_with_units_sold() {
    let svc = services();
    let milk = svc.store.seed_product("Milk", "Dairy");
    svc.store.seed_stock(milk.product_id, 8, 1.5, None);
    record_sale(&svc.store, milk.product_id, 2, 1.5, jan(5)).await;
    record_sale(&svc.store, milk.product_id, 3, 1.5, jan(6)).await;

    let rows = svc.report.inventory_report().await.unwrap().data;

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].stock, 8);
    assert_eq!(rows[0].total_sales, 5);
}
