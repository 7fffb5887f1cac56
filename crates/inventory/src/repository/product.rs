use crate::{
    abstract_trait::product::ProductRepositoryTrait,
    model::product::{NewProduct, Product, ProductWithStock},
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{error, info};

#[derive(Clone)]
pub struct ProductRepository {
    db: ConnectionPool,
}

impl ProductRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductRepositoryTrait for ProductRepository {
    async fn find_all_with_stock(&self) -> Result<Vec<ProductWithStock>, RepositoryError> {
        sqlx::query_as::<_, ProductWithStock>(
            r#"
            SELECT
                p.product_id,
                p.name,
                p.description,
                p.category,
                p.sub_category,
                p.unit_of_measure,
                s.price,
                COALESCE(s.stock, 0) AS stock,
                s.expiry_date
            FROM products p
            LEFT JOIN stocks s ON s.product_id = p.product_id
            ORDER BY p.product_id
            "#,
        )
        .fetch_all(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch products with stock: {:?}", e);
            RepositoryError::from(e)
        })
    }

    async fn find_by_id(&self, product_id: i32) -> Result<Option<Product>, RepositoryError> {
        sqlx::query_as::<_, Product>("SELECT * FROM products WHERE product_id = $1")
            .bind(product_id)
            .fetch_optional(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch product {}: {:?}", product_id, e);
                RepositoryError::from(e)
            })
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Product>, RepositoryError> {
        sqlx::query_as::<_, Product>("SELECT * FROM products WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch product by name '{}': {:?}", name, e);
                RepositoryError::from(e)
            })
    }

    async fn create(&self, product: &NewProduct) -> Result<Product, RepositoryError> {
        info!("🆕 Inserting product '{}' ({})", product.name, product.product_id);

        sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products
                (product_id, name, description, category, sub_category, unit_of_measure)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(product.product_id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(&product.category)
        .bind(&product.sub_category)
        .bind(&product.unit_of_measure)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to insert product '{}': {:?}", product.name, e);
            RepositoryError::from(e)
        })
    }

    async fn update(&self, product: &Product) -> Result<Product, RepositoryError> {
        sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET name = $2,
                description = $3,
                category = $4,
                sub_category = $5,
                unit_of_measure = $6,
                updated_at = NOW()
            WHERE product_id = $1
            RETURNING *
            "#,
        )
        .bind(product.product_id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(&product.category)
        .bind(&product.sub_category)
        .bind(&product.unit_of_measure)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to update product {}: {:?}", product.product_id, e);
            RepositoryError::from(e)
        })
    }

    async fn delete(&self, product_id: i32) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM products WHERE product_id = $1")
            .bind(product_id)
            .execute(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to delete product {}: {:?}", product_id, e);
                RepositoryError::from(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        info!("🗑️ Deleted product {}", product_id);
        Ok(())
    }
}
