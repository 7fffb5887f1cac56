use crate::{
    abstract_trait::stock::StockRepositoryTrait,
    model::stock::{NewStock, Stock},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{debug, error};

#[derive(Clone)]
pub struct StockRepository {
    db: ConnectionPool,
}

impl StockRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl StockRepositoryTrait for StockRepository {
    async fn find_all(&self) -> Result<Vec<Stock>, RepositoryError> {
        sqlx::query_as::<_, Stock>("SELECT * FROM stocks ORDER BY stock_id")
            .fetch_all(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch stock rows: {:?}", e);
                RepositoryError::from(e)
            })
    }

    async fn find_by_product(&self, product_id: i32) -> Result<Option<Stock>, RepositoryError> {
        sqlx::query_as::<_, Stock>(
            "SELECT * FROM stocks WHERE product_id = $1 ORDER BY stock_id LIMIT 1",
        )
        .bind(product_id)
        .fetch_optional(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch stock for product {}: {:?}", product_id, e);
            RepositoryError::from(e)
        })
    }

    async fn create(&self, stock: &NewStock) -> Result<Stock, RepositoryError> {
        sqlx::query_as::<_, Stock>(
            r#"
            INSERT INTO stocks (product_id, stock, price, expiry_date)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(stock.product_id)
        .bind(stock.stock)
        .bind(stock.price)
        .bind(stock.expiry_date)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to insert stock for product {}: {:?}", stock.product_id, e);
            RepositoryError::from(e)
        })
    }

    async fn increment(
        &self,
        product_id: i32,
        quantity: i32,
        price: Option<f64>,
        expiry_date: Option<DateTime<Utc>>,
    ) -> Result<Option<Stock>, RepositoryError> {
        debug!("➕ Adding {} units to product {}", quantity, product_id);

        sqlx::query_as::<_, Stock>(
            r#"
            UPDATE stocks
            SET stock = stock + $2,
                price = COALESCE($3, price),
                expiry_date = COALESCE($4, expiry_date),
                updated_at = NOW()
            WHERE product_id = $1
            RETURNING *
            "#,
        )
        .bind(product_id)
        .bind(quantity)
        .bind(price)
        .bind(expiry_date)
        .fetch_optional(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to add stock for product {}: {:?}", product_id, e);
            RepositoryError::from(e)
        })
    }

    async fn replace(
        &self,
        product_id: i32,
        quantity: i32,
        price: f64,
        expiry_date: Option<DateTime<Utc>>,
    ) -> Result<Option<Stock>, RepositoryError> {
        sqlx::query_as::<_, Stock>(
            r#"
            UPDATE stocks
            SET stock = $2,
                price = $3,
                expiry_date = $4,
                updated_at = NOW()
            WHERE product_id = $1
            RETURNING *
            "#,
        )
        .bind(product_id)
        .bind(quantity)
        .bind(price)
        .bind(expiry_date)
        .fetch_optional(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to replace stock for product {}: {:?}", product_id, e);
            RepositoryError::from(e)
        })
    }

    async fn decrement(
        &self,
        product_id: i32,
        quantity: i32,
    ) -> Result<Option<Stock>, RepositoryError> {
        debug!("➖ Removing {} units from product {}", quantity, product_id);

        sqlx::query_as::<_, Stock>(
            r#"
            UPDATE stocks
            SET stock = stock - $2,
                updated_at = NOW()
            WHERE product_id = $1 AND stock >= $2
            RETURNING *
            "#,
        )
        .bind(product_id)
        .bind(quantity)
        .fetch_optional(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to decrement stock for product {}: {:?}", product_id, e);
            RepositoryError::from(e)
        })
    }
}
