use crate::domain::{
    requests::category::{CreateCategoryRequest, UpdateCategoryRequest},
    response::{
        api::{ApiResponse, MessageResponse},
        category::CategoryResponse,
    },
};
use async_trait::async_trait;
use shared::errors::ServiceError;
use std::sync::Arc;

pub type DynCategoryService = Arc<dyn CategoryServiceTrait + Send + Sync>;

#[async_trait]
pub trait CategoryServiceTrait {
    async fn create(
        &self,
        req: &CreateCategoryRequest,
    ) -> Result<ApiResponse<CategoryResponse>, ServiceError>;
    async fn find_all(&self) -> Result<ApiResponse<Vec<CategoryResponse>>, ServiceError>;
    async fn find_by_id(&self, category_id: i32)
    -> Result<ApiResponse<CategoryResponse>, ServiceError>;
    async fn update(
        &self,
        category_id: i32,
        req: &UpdateCategoryRequest,
    ) -> Result<ApiResponse<CategoryResponse>, ServiceError>;
    async fn delete(&self, category_id: i32) -> Result<MessageResponse, ServiceError>;
}
