use crate::domain::{
    requests::notification::NotificationQuery,
    response::{
        api::{ApiResponse, MessageResponse},
        notification::{
            AlertResponse, AlertWithProductResponse, PriorityAlertsResponse, ScanAlertsResponse,
        },
    },
};
use async_trait::async_trait;
use shared::errors::ServiceError;
use std::sync::Arc;

pub type DynNotificationService = Arc<dyn NotificationServiceTrait + Send + Sync>;

#[async_trait]
pub trait NotificationServiceTrait {
    async fn scan_and_generate_alerts(&self) -> Result<ScanAlertsResponse, ServiceError>;
    async fn list_notifications(
        &self,
        query: &NotificationQuery,
    ) -> Result<ApiResponse<Vec<AlertWithProductResponse>>, ServiceError>;
    async fn list_by_product(
        &self,
        product_id: i32,
    ) -> Result<ApiResponse<Vec<AlertWithProductResponse>>, ServiceError>;
    async fn acknowledge(&self, alert_id: i32) -> Result<ApiResponse<AlertResponse>, ServiceError>;
    async fn delete(&self, alert_id: i32) -> Result<MessageResponse, ServiceError>;
    async fn priority_alerts(&self) -> Result<PriorityAlertsResponse, ServiceError>;
}
