use crate::domain::{
    requests::stock::{AddStockRequest, UpdateProductAndStockRequest, UpdateStockRequest},
    response::{
        api::ApiResponse,
        product::{AddStockResponse, ProductAndStockResponse, StockHistoryResponse, StockResponse},
    },
};
use async_trait::async_trait;
use shared::errors::ServiceError;
use std::sync::Arc;

pub type DynStockService = Arc<dyn StockServiceTrait + Send + Sync>;

#[async_trait]
pub trait StockServiceTrait {
    async fn add_stock(&self, req: &AddStockRequest) -> Result<AddStockResponse, ServiceError>;
    async fn update_stock(
        &self,
        product_id: i32,
        req: &UpdateStockRequest,
    ) -> Result<ApiResponse<StockResponse>, ServiceError>;
    async fn update_product_and_stock(
        &self,
        product_id: i32,
        req: &UpdateProductAndStockRequest,
    ) -> Result<ApiResponse<ProductAndStockResponse>, ServiceError>;
    async fn get_stock_history(
        &self,
        product_id: i32,
    ) -> Result<ApiResponse<Vec<StockHistoryResponse>>, ServiceError>;
}
