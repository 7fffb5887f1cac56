use crate::{
    domain::response::product::ProductResponse,
    model::expiry_alert::{AlertLevel, ExpiryAlert, NotificationStatus},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AlertResponse {
    pub alert_id: i32,
    pub stock_id: i32,
    pub product_id: i32,
    pub alert_level: AlertLevel,
    pub expiry_date: DateTime<Utc>,
    pub alert_generated_on: DateTime<Utc>,
    pub notification_status: NotificationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ExpiryAlert> for AlertResponse {
    fn from(value: ExpiryAlert) -> Self {
        AlertResponse {
            alert_id: value.alert_id,
            stock_id: value.stock_id,
            product_id: value.product_id,
            alert_level: value.alert_level,
            expiry_date: value.expiry_date,
            alert_generated_on: value.alert_generated_on,
            notification_status: value.notification_status,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

/// An alert plus the product it refers to; `product` is `null` when the
/// product row no longer exists.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AlertWithProductResponse {
    #[serde(flatten)]
    pub alert: AlertResponse,
    pub product: Option<ProductResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScanAlertsResponse {
    pub message: String,
    pub data: Vec<AlertResponse>,
    pub new_alerts_count: usize,
    pub new_alerts: Vec<AlertResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PriorityAlertsResponse {
    pub message: String,
    pub data: Vec<AlertWithProductResponse>,
    pub urgent_count: usize,
}
