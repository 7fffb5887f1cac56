use crate::model::{
    stock::{NewStock, Stock},
    stock_history::{NewStockHistory, StockHistory},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynStockRepository = Arc<dyn StockRepositoryTrait + Send + Sync>;
pub type DynStockHistoryRepository = Arc<dyn StockHistoryRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait StockRepositoryTrait {
    async fn find_all(&self) -> Result<Vec<Stock>, RepositoryError>;
    async fn find_by_product(&self, product_id: i32) -> Result<Option<Stock>, RepositoryError>;
    async fn create(&self, stock: &NewStock) -> Result<Stock, RepositoryError>;

    /// Adds `quantity` to the product's row; `price` and `expiry_date`
    /// replace the stored values when given. `None` when no row exists.
    async fn increment(
        &self,
        product_id: i32,
        quantity: i32,
        price: Option<f64>,
        expiry_date: Option<DateTime<Utc>>,
    ) -> Result<Option<Stock>, RepositoryError>;

    /// Overwrites quantity, price and expiry. `None` when no row exists.
    async fn replace(
        &self,
        product_id: i32,
        quantity: i32,
        price: f64,
        expiry_date: Option<DateTime<Utc>>,
    ) -> Result<Option<Stock>, RepositoryError>;

    /// Conditional decrement; `None` when the row is missing or holds less
    /// than `quantity`, in which case nothing changes.
    async fn decrement(
        &self,
        product_id: i32,
        quantity: i32,
    ) -> Result<Option<Stock>, RepositoryError>;
}

#[async_trait]
pub trait StockHistoryRepositoryTrait {
    async fn append(&self, entry: &NewStockHistory) -> Result<StockHistory, RepositoryError>;
    async fn find_by_product(&self, product_id: i32) -> Result<Vec<StockHistory>, RepositoryError>;
}
