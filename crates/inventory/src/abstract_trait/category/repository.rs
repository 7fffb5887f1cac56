use crate::model::category::Category;
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynCategoryRepository = Arc<dyn CategoryRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait CategoryRepositoryTrait {
    async fn find_all(&self) -> Result<Vec<Category>, RepositoryError>;
    async fn find_by_id(&self, category_id: i32) -> Result<Option<Category>, RepositoryError>;
    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, RepositoryError>;
    async fn create(
        &self,
        category_id: i32,
        name: &str,
        description: Option<&str>,
    ) -> Result<Category, RepositoryError>;
    async fn update(&self, category: &Category) -> Result<Category, RepositoryError>;
    async fn delete(&self, category_id: i32) -> Result<bool, RepositoryError>;
}
