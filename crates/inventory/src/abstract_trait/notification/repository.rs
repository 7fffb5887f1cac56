use crate::model::expiry_alert::{AlertLevel, ExpiryAlert, NewExpiryAlert, NotificationStatus};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynExpiryAlertRepository = Arc<dyn ExpiryAlertRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait ExpiryAlertRepositoryTrait {
    /// The pending or acknowledged alert for a stock row, if any.
    async fn find_active_by_stock(
        &self,
        stock_id: i32,
    ) -> Result<Option<ExpiryAlert>, RepositoryError>;
    async fn create(&self, alert: &NewExpiryAlert) -> Result<ExpiryAlert, RepositoryError>;
    /// Rewrites level and expiry in place; status and generation time stay.
    async fn refresh(
        &self,
        alert_id: i32,
        level: AlertLevel,
        expiry_date: DateTime<Utc>,
    ) -> Result<ExpiryAlert, RepositoryError>;
    async fn find_filtered(
        &self,
        level: Option<AlertLevel>,
        status: Option<NotificationStatus>,
    ) -> Result<Vec<ExpiryAlert>, RepositoryError>;
    async fn find_by_product(&self, product_id: i32) -> Result<Vec<ExpiryAlert>, RepositoryError>;
    async fn acknowledge(&self, alert_id: i32) -> Result<Option<ExpiryAlert>, RepositoryError>;
    async fn delete(&self, alert_id: i32) -> Result<bool, RepositoryError>;
    /// Pending alerts of the given levels, most severe first, then newest
    /// generated first.
    async fn find_pending_by_levels(
        &self,
        levels: &[AlertLevel],
        limit: i64,
    ) -> Result<Vec<ExpiryAlert>, RepositoryError>;
}
