use crate::domain::response::report::{
    CategorySalesSummary, DailySales, InventoryReportRow, PeriodTotals, ProductSalesSummary,
    SalesReportTotals, SalesTotals, StockAlertItem, TopProductRevenue, TopSellingProduct,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynReportRepository = Arc<dyn ReportRepositoryTrait + Send + Sync>;

#[derive(Debug, Clone, Default)]
pub struct SalesFilter {
    pub range: Option<(DateTime<Utc>, DateTime<Utc>)>,
    pub product_id: Option<i32>,
    pub category: Option<String>,
}

#[async_trait]
pub trait ReportRepositoryTrait {
    async fn sales_per_product(&self) -> Result<Vec<ProductSalesSummary>, RepositoryError>;
    async fn sales_per_category(&self) -> Result<Vec<CategorySalesSummary>, RepositoryError>;
    async fn top_selling_products(
        &self,
        limit: i64,
    ) -> Result<Vec<TopSellingProduct>, RepositoryError>;

    async fn sales_totals(
        &self,
        range: Option<(DateTime<Utc>, DateTime<Utc>)>,
    ) -> Result<SalesTotals, RepositoryError>;
    /// Revenue and count for `from <= sale_date < to`.
    async fn period_totals(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<PeriodTotals, RepositoryError>;
    async fn daily_sales_since(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<DailySales>, RepositoryError>;
    async fn top_products_by_revenue(
        &self,
        range: Option<(DateTime<Utc>, DateTime<Utc>)>,
        limit: i64,
    ) -> Result<Vec<TopProductRevenue>, RepositoryError>;
    /// Stock rows under `low_stock` units or expiring before `expiring_before`.
    async fn stock_alerts(
        &self,
        low_stock: i32,
        expiring_before: DateTime<Utc>,
        limit: i64,
    ) -> Result<Vec<StockAlertItem>, RepositoryError>;

    async fn sales_report(&self, filter: &SalesFilter)
    -> Result<SalesReportTotals, RepositoryError>;
    async fn inventory_report(&self) -> Result<Vec<InventoryReportRow>, RepositoryError>;
}
