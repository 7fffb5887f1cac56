use crate::{
    abstract_trait::{
        notification::{DynExpiryAlertRepository, NotificationServiceTrait},
        product::DynProductRepository,
        stock::DynStockRepository,
    },
    domain::{
        requests::notification::NotificationQuery,
        response::{
            api::{ApiResponse, MessageResponse},
            notification::{
                AlertResponse, AlertWithProductResponse, PriorityAlertsResponse,
                ScanAlertsResponse,
            },
            product::ProductResponse,
        },
    },
    model::expiry_alert::{AlertLevel, ExpiryAlert, NewExpiryAlert, NotificationStatus},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use opentelemetry::KeyValue;
use shared::{
    errors::ServiceError,
    utils::{Method, Metrics, TracingRecorder},
};
use std::{collections::HashMap, str::FromStr};
use tracing::{debug, info};

const PRIORITY_LIMIT: usize = 6;

/// Expiry alert engine plus the notification read side.
#[derive(Clone)]
pub struct NotificationService {
    alerts: DynExpiryAlertRepository,
    stocks: DynStockRepository,
    products: DynProductRepository,
    tracing: TracingRecorder,
}

impl NotificationService {
    pub fn new(
        alerts: DynExpiryAlertRepository,
        stocks: DynStockRepository,
        products: DynProductRepository,
        metrics: Metrics,
    ) -> Self {
        Self {
            alerts,
            stocks,
            products,
            tracing: TracingRecorder::new("notification-service", metrics),
        }
    }

    /// Walks every stock row with an expiry date and brings its live alert in
    /// line with the level for `now`. An existing pending or acknowledged
    /// alert is updated in place; a new one is only created when none exists.
    /// The first failing read or write aborts the scan.
    pub async fn scan_at(&self, now: DateTime<Utc>) -> Result<ScanAlertsResponse, ServiceError> {
        let stocks = self.stocks.find_all().await?;

        let mut alerts = Vec::new();
        let mut new_alerts = Vec::new();

        for stock in stocks {
            let Some(expiry_date) = stock.expiry_date else {
                continue;
            };

            let level = AlertLevel::for_expiry(expiry_date, now);

            match self.alerts.find_active_by_stock(stock.stock_id).await? {
                Some(existing)
                    if existing.alert_level != level || existing.expiry_date != expiry_date =>
                {
                    debug!(
                        "Stock {} alert refreshed: {} -> {}, expiry {}",
                        stock.stock_id, existing.alert_level, level, expiry_date
                    );
                    let updated = self
                        .alerts
                        .refresh(existing.alert_id, level, expiry_date)
                        .await?;
                    alerts.push(AlertResponse::from(updated));
                }
                Some(existing) => alerts.push(AlertResponse::from(existing)),
                None => {
                    let created = self
                        .alerts
                        .create(&NewExpiryAlert {
                            stock_id: stock.stock_id,
                            product_id: stock.product_id,
                            alert_level: level,
                            expiry_date,
                            alert_generated_on: now,
                        })
                        .await?;
                    let created = AlertResponse::from(created);
                    alerts.push(created.clone());
                    new_alerts.push(created);
                }
            }
        }

        info!(
            "🔔 Expiry scan done: {} alerts, {} new",
            alerts.len(),
            new_alerts.len()
        );

        Ok(ScanAlertsResponse {
            message: "Expiry alerts generated successfully".into(),
            data: alerts,
            new_alerts_count: new_alerts.len(),
            new_alerts,
        })
    }

    /// Joins each alert with its product, looking every product up once.
    async fn with_products(
        &self,
        alerts: Vec<ExpiryAlert>,
    ) -> Result<Vec<AlertWithProductResponse>, ServiceError> {
        let mut products: HashMap<i32, Option<ProductResponse>> = HashMap::new();
        let mut joined = Vec::with_capacity(alerts.len());

        for alert in alerts {
            let product = match products.get(&alert.product_id) {
                Some(cached) => cached.clone(),
                None => {
                    let found = self
                        .products
                        .find_by_id(alert.product_id)
                        .await?
                        .map(ProductResponse::from);
                    products.insert(alert.product_id, found.clone());
                    found
                }
            };

            joined.push(AlertWithProductResponse {
                alert: AlertResponse::from(alert),
                product,
            });
        }

        Ok(joined)
    }

    async fn list_inner(
        &self,
        query: &NotificationQuery,
    ) -> Result<ApiResponse<Vec<AlertWithProductResponse>>, ServiceError> {
        let level = parse_filter::<AlertLevel>("alertLevel", query.alert_level.as_deref())?;
        let status = parse_filter::<NotificationStatus>(
            "notificationStatus",
            query.notification_status.as_deref(),
        )?;

        let alerts = self.alerts.find_filtered(level, status).await?;

        Ok(ApiResponse::new(
            "Notifications fetched successfully",
            self.with_products(alerts).await?,
        ))
    }

    async fn priority_inner(&self) -> Result<PriorityAlertsResponse, ServiceError> {
        let mut selected = self
            .alerts
            .find_pending_by_levels(&[AlertLevel::Red], PRIORITY_LIMIT as i64)
            .await?;

        if selected.len() < PRIORITY_LIMIT {
            let remaining = (PRIORITY_LIMIT - selected.len()) as i64;
            let fill = self
                .alerts
                .find_pending_by_levels(&[AlertLevel::Yellow, AlertLevel::Green], remaining)
                .await?;
            selected.extend(fill);
        }

        selected.truncate(PRIORITY_LIMIT);

        let urgent_count = selected
            .iter()
            .filter(|alert| alert.alert_level == AlertLevel::Red)
            .count();

        Ok(PriorityAlertsResponse {
            message: "Priority alerts fetched successfully".into(),
            data: self.with_products(selected).await?,
            urgent_count,
        })
    }
}

/// Empty values count as absent; anything else must name a variant.
fn parse_filter<T>(field: &str, value: Option<&str>) -> Result<Option<T>, ServiceError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(raw) => raw
            .parse::<T>()
            .map(Some)
            .map_err(|e| ServiceError::Validation(vec![format!("{field}: {e}")])),
    }
}

#[async_trait]
impl NotificationServiceTrait for NotificationService {
    async fn scan_and_generate_alerts(&self) -> Result<ScanAlertsResponse, ServiceError> {
        info!("🔎 Scanning stock for expiry");

        let tracing_ctx = self.tracing.start_tracing(
            "scan_and_generate_alerts",
            vec![KeyValue::new("component", "notification")],
        );

        let result = self.scan_at(Utc::now()).await;
        self.tracing
            .finish(&tracing_ctx, Method::Get, result, "Expiry alerts generated")
    }

    async fn list_notifications(
        &self,
        query: &NotificationQuery,
    ) -> Result<ApiResponse<Vec<AlertWithProductResponse>>, ServiceError> {
        let tracing_ctx = self.tracing.start_tracing(
            "list_notifications",
            vec![
                KeyValue::new("component", "notification"),
                KeyValue::new("alert_level", query.alert_level.clone().unwrap_or_default()),
                KeyValue::new(
                    "notification_status",
                    query.notification_status.clone().unwrap_or_default(),
                ),
            ],
        );

        let result = self.list_inner(query).await;
        self.tracing
            .finish(&tracing_ctx, Method::Get, result, "Notifications fetched")
    }

    async fn list_by_product(
        &self,
        product_id: i32,
    ) -> Result<ApiResponse<Vec<AlertWithProductResponse>>, ServiceError> {
        let tracing_ctx = self.tracing.start_tracing(
            "list_notifications_by_product",
            vec![
                KeyValue::new("component", "notification"),
                KeyValue::new("product.id", product_id.to_string()),
            ],
        );

        let result = match self.alerts.find_by_product(product_id).await {
            Ok(alerts) => self.with_products(alerts).await.map(|data| {
                ApiResponse::new("Notifications fetched successfully for the product", data)
            }),
            Err(e) => Err(e.into()),
        };

        self.tracing
            .finish(&tracing_ctx, Method::Get, result, "Product notifications fetched")
    }

    async fn acknowledge(
        &self,
        alert_id: i32,
    ) -> Result<ApiResponse<AlertResponse>, ServiceError> {
        info!("👍 Acknowledging alert {}", alert_id);

        let tracing_ctx = self.tracing.start_tracing(
            "acknowledge_notification",
            vec![
                KeyValue::new("component", "notification"),
                KeyValue::new("alert.id", alert_id.to_string()),
            ],
        );

        let result = match self.alerts.acknowledge(alert_id).await {
            Ok(Some(alert)) => Ok(ApiResponse::new(
                "Notification acknowledged successfully",
                AlertResponse::from(alert),
            )),
            Ok(None) => Err(ServiceError::NotFound("Notification not found".into())),
            Err(e) => Err(e.into()),
        };

        self.tracing
            .finish(&tracing_ctx, Method::Put, result, "Notification acknowledged")
    }

    async fn delete(&self, alert_id: i32) -> Result<MessageResponse, ServiceError> {
        info!("🗑️ Deleting alert {}", alert_id);

        let tracing_ctx = self.tracing.start_tracing(
            "delete_notification",
            vec![
                KeyValue::new("component", "notification"),
                KeyValue::new("alert.id", alert_id.to_string()),
            ],
        );

        let result = match self.alerts.delete(alert_id).await {
            Ok(true) => Ok(MessageResponse::new("Notification deleted successfully")),
            Ok(false) => Err(ServiceError::NotFound("Notification not found".into())),
            Err(e) => Err(e.into()),
        };

        self.tracing
            .finish(&tracing_ctx, Method::Delete, result, "Notification deleted")
    }

    async fn priority_alerts(&self) -> Result<PriorityAlertsResponse, ServiceError> {
        let tracing_ctx = self.tracing.start_tracing(
            "priority_alerts",
            vec![KeyValue::new("component", "notification")],
        );

        let result = self.priority_inner().await;
        self.tracing
            .finish(&tracing_ctx, Method::Get, result, "Priority alerts fetched")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_filters_are_ignored() {
        assert_eq!(parse_filter::<AlertLevel>("alertLevel", None).unwrap(), None);
        assert_eq!(parse_filter::<AlertLevel>("alertLevel", Some("  ")).unwrap(), None);
    }

    #[test]
    fn known_filters_parse() {
        assert_eq!(
            parse_filter::<AlertLevel>("alertLevel", Some("yellow")).unwrap(),
            Some(AlertLevel::Yellow)
        );
        assert_eq!(
            parse_filter::<NotificationStatus>("notificationStatus", Some("pending")).unwrap(),
            Some(NotificationStatus::Pending)
        );
    }

    #[test]
    fn unknown_filter_is_a_validation_error() {
        match parse_filter::<AlertLevel>("alertLevel", Some("purple")) {
            Err(ServiceError::Validation(errors)) => {
                assert_eq!(errors.len(), 1);
                assert!(errors[0].starts_with("alertLevel:"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
