use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Stock {
    pub stock_id: i32,
    pub product_id: i32,
    pub stock: i32,
    pub price: f64,
    pub expiry_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewStock {
    pub product_id: i32,
    pub stock: i32,
    pub price: f64,
    pub expiry_date: Option<DateTime<Utc>>,
}
