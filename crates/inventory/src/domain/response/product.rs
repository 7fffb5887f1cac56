use crate::model::{
    product::{Product, ProductWithStock},
    stock::Stock,
    stock_history::StockHistory,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub product_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub sub_category: Option<String>,
    pub unit_of_measure: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductResponse {
    fn from(value: Product) -> Self {
        ProductResponse {
            product_id: value.product_id,
            name: value.name,
            description: value.description,
            category: value.category,
            sub_category: value.sub_category,
            unit_of_measure: value.unit_of_measure,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductStockResponse {
    pub product_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub sub_category: Option<String>,
    pub unit_of_measure: String,
    pub price: Option<f64>,
    pub stock: i32,
    pub expiry_date: Option<DateTime<Utc>>,
}

impl From<ProductWithStock> for ProductStockResponse {
    fn from(value: ProductWithStock) -> Self {
        ProductStockResponse {
            product_id: value.product_id,
            name: value.name,
            description: value.description,
            category: value.category,
            sub_category: value.sub_category,
            unit_of_measure: value.unit_of_measure,
            price: value.price,
            stock: value.stock,
            expiry_date: value.expiry_date,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StockResponse {
    pub stock_id: i32,
    pub product_id: i32,
    pub stock: i32,
    pub price: f64,
    pub expiry_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Stock> for StockResponse {
    fn from(value: Stock) -> Self {
        StockResponse {
            stock_id: value.stock_id,
            product_id: value.product_id,
            stock: value.stock,
            price: value.price,
            expiry_date: value.expiry_date,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StockHistoryResponse {
    pub history_id: i32,
    pub product_id: i32,
    pub stock_added: i32,
    pub price: f64,
    pub expiry_date: Option<DateTime<Utc>>,
    pub added_at: DateTime<Utc>,
}

impl From<StockHistory> for StockHistoryResponse {
    fn from(value: StockHistory) -> Self {
        StockHistoryResponse {
            history_id: value.history_id,
            product_id: value.product_id,
            stock_added: value.stock_added,
            price: value.price,
            expiry_date: value.expiry_date,
            added_at: value.added_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductAndStockResponse {
    pub product: ProductResponse,
    pub stock: StockResponse,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteProductResponse {
    pub status: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_stock: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddStockResponse {
    pub message: String,
    pub total_stock_added: i64,
}
