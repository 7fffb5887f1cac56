use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ProductSalesSummary {
    pub product_id: i32,
    pub product_name: String,
    pub total_revenue: f64,
    pub total_quantity_sold: i64,
    pub average_sale_price: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CategorySalesSummary {
    pub category: String,
    pub total_revenue: f64,
    pub total_quantity_sold: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TopSellingProduct {
    pub product_id: i32,
    pub product_name: String,
    pub total_quantity_sold: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SalesTotals {
    pub total_revenue: f64,
    pub total_sales: i64,
    pub avg_order_value: f64,
    pub total_quantity_sold: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PeriodTotals {
    pub total_revenue: f64,
    pub total_sales: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardKpis {
    #[serde(flatten)]
    pub current: SalesTotals,
    pub previous_period: PeriodTotals,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, FromRow)]
pub struct DailySales {
    /// `YYYY-MM-DD`
    pub date: String,
    pub sales: f64,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TopProductRevenue {
    pub product_id: i32,
    pub product_name: String,
    pub category: String,
    pub total_revenue: f64,
    pub total_sales: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct StockAlertItem {
    pub stock_id: i32,
    pub product_id: i32,
    pub product_name: String,
    pub stock: i32,
    pub expiry_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub kpis: DashboardKpis,
    pub sales_trend: Vec<DailySales>,
    pub top_products: Vec<TopProductRevenue>,
    pub stock_alerts: Vec<StockAlertItem>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SalesReportTotals {
    pub total_sales: f64,
    pub total_quantity: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct InventoryReportRow {
    pub stock_id: i32,
    pub product_id: i32,
    pub stock: i32,
    pub total_sales: i64,
}
