use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Sale {
    pub sale_id: i32,
    pub product_id: i32,
    pub quantity_sold: i32,
    pub sale_price: f64,
    pub sale_date: DateTime<Utc>,
    pub buyer_gender: Option<String>,
    pub buyer_age: Option<i32>,
    pub total_sale_amount: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SaleWithProduct {
    pub sale_id: i32,
    pub product_id: i32,
    pub product_name: Option<String>,
    pub product_description: Option<String>,
    pub quantity_sold: i32,
    pub sale_price: f64,
    pub sale_date: DateTime<Utc>,
    pub buyer_gender: Option<String>,
    pub buyer_age: Option<i32>,
    pub total_sale_amount: f64,
}

#[derive(Debug, Clone)]
pub struct NewSale {
    pub product_id: i32,
    pub quantity_sold: i32,
    pub sale_price: f64,
    pub sale_date: DateTime<Utc>,
    pub buyer_gender: Option<String>,
    pub buyer_age: Option<i32>,
    pub total_sale_amount: f64,
}
