use crate::{abstract_trait::category::CategoryRepositoryTrait, model::category::Category};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::error;

#[derive(Clone)]
pub struct CategoryRepository {
    db: ConnectionPool,
}

impl CategoryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CategoryRepositoryTrait for CategoryRepository {
    async fn find_all(&self) -> Result<Vec<Category>, RepositoryError> {
        sqlx::query_as::<_, Category>("SELECT * FROM categories ORDER BY category_id")
            .fetch_all(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch categories: {:?}", e);
                RepositoryError::from(e)
            })
    }

    async fn find_by_id(&self, category_id: i32) -> Result<Option<Category>, RepositoryError> {
        sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE category_id = $1")
            .bind(category_id)
            .fetch_optional(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch category {}: {:?}", category_id, e);
                RepositoryError::from(e)
            })
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, RepositoryError> {
        sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch category '{}': {:?}", name, e);
                RepositoryError::from(e)
            })
    }

    async fn create(
        &self,
        category_id: i32,
        name: &str,
        description: Option<&str>,
    ) -> Result<Category, RepositoryError> {
        sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (category_id, name, description)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(category_id)
        .bind(name)
        .bind(description)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to create category '{}': {:?}", name, e);
            RepositoryError::from(e)
        })
    }

    async fn update(&self, category: &Category) -> Result<Category, RepositoryError> {
        sqlx::query_as::<_, Category>(
            r#"
            UPDATE categories
            SET name = $2, description = $3, updated_at = NOW()
            WHERE category_id = $1
            RETURNING *
            "#,
        )
        .bind(category.category_id)
        .bind(&category.name)
        .bind(&category.description)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to update category {}: {:?}", category.category_id, e);
            RepositoryError::from(e)
        })
    }

    async fn delete(&self, category_id: i32) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM categories WHERE category_id = $1")
            .bind(category_id)
            .execute(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to delete category {}: {:?}", category_id, e);
                RepositoryError::from(e)
            })?;

        Ok(result.rows_affected() > 0)
    }
}
