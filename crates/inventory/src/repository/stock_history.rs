use crate::{
    abstract_trait::stock::StockHistoryRepositoryTrait,
    model::stock_history::{NewStockHistory, StockHistory},
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::error;

#[derive(Clone)]
pub struct StockHistoryRepository {
    db: ConnectionPool,
}

impl StockHistoryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl StockHistoryRepositoryTrait for StockHistoryRepository {
    async fn append(&self, entry: &NewStockHistory) -> Result<StockHistory, RepositoryError> {
        sqlx::query_as::<_, StockHistory>(
            r#"
            INSERT INTO stock_history (product_id, stock_added, price, expiry_date)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(entry.product_id)
        .bind(entry.stock_added)
        .bind(entry.price)
        .bind(entry.expiry_date)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to append stock history for product {}: {:?}", entry.product_id, e);
            RepositoryError::from(e)
        })
    }

    async fn find_by_product(&self, product_id: i32) -> Result<Vec<StockHistory>, RepositoryError> {
        sqlx::query_as::<_, StockHistory>(
            r#"
            SELECT * FROM stock_history
            WHERE product_id = $1
            ORDER BY added_at DESC, history_id DESC
            "#,
        )
        .bind(product_id)
        .fetch_all(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch stock history for product {}: {:?}", product_id, e);
            RepositoryError::from(e)
        })
    }
}
