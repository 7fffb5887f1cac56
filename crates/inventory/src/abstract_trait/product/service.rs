use crate::domain::{
    requests::product::{CreateProductRequest, UpdateProductRequest},
    response::{
        api::ApiResponse,
        product::{DeleteProductResponse, ProductResponse, ProductStockResponse},
    },
};
use async_trait::async_trait;
use shared::errors::ServiceError;
use std::sync::Arc;

pub type DynProductService = Arc<dyn ProductServiceTrait + Send + Sync>;

#[async_trait]
pub trait ProductServiceTrait {
    async fn create_product(
        &self,
        req: &CreateProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError>;
    async fn update_product(
        &self,
        product_id: i32,
        req: &UpdateProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError>;
    async fn get_products(&self) -> Result<ApiResponse<Vec<ProductStockResponse>>, ServiceError>;
    async fn get_product(&self, product_id: i32)
    -> Result<ApiResponse<ProductResponse>, ServiceError>;
    async fn delete_product(&self, product_id: i32)
    -> Result<DeleteProductResponse, ServiceError>;
}
