use crate::domain::{
    requests::sale::CreateSaleRequest,
    response::{
        api::ApiResponse,
        sale::{CreateSaleResponse, SaleWithProductResponse, SalesAnalyticsResponse},
    },
};
use async_trait::async_trait;
use shared::errors::ServiceError;
use std::sync::Arc;

pub type DynSaleService = Arc<dyn SaleServiceTrait + Send + Sync>;

#[async_trait]
pub trait SaleServiceTrait {
    async fn create_sale(&self, req: &CreateSaleRequest) -> Result<CreateSaleResponse, ServiceError>;
    async fn get_sales(&self) -> Result<ApiResponse<Vec<SaleWithProductResponse>>, ServiceError>;
    async fn get_sales_by_product(
        &self,
        product_id: i32,
    ) -> Result<ApiResponse<Vec<SaleWithProductResponse>>, ServiceError>;
    async fn sales_analytics(&self) -> Result<SalesAnalyticsResponse, ServiceError>;
}
