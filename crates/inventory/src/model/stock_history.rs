use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StockHistory {
    pub history_id: i32,
    pub product_id: i32,
    pub stock_added: i32,
    pub price: f64,
    pub expiry_date: Option<DateTime<Utc>>,
    pub added_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewStockHistory {
    pub product_id: i32,
    pub stock_added: i32,
    pub price: f64,
    pub expiry_date: Option<DateTime<Utc>>,
}
