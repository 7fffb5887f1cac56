use crate::domain::{
    requests::report::{DateRangeQuery, SalesReportQuery},
    response::{
        api::ApiResponse,
        report::{DashboardResponse, InventoryReportRow, SalesReportTotals},
    },
};
use async_trait::async_trait;
use shared::errors::ServiceError;
use std::sync::Arc;

pub type DynReportService = Arc<dyn ReportServiceTrait + Send + Sync>;

#[async_trait]
pub trait ReportServiceTrait {
    async fn dashboard(
        &self,
        query: &DateRangeQuery,
    ) -> Result<ApiResponse<DashboardResponse>, ServiceError>;
    async fn sales_report(
        &self,
        query: &SalesReportQuery,
    ) -> Result<ApiResponse<SalesReportTotals>, ServiceError>;
    async fn inventory_report(&self)
    -> Result<ApiResponse<Vec<InventoryReportRow>>, ServiceError>;
}
