use crate::model::sale::{NewSale, Sale, SaleWithProduct};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynSaleRepository = Arc<dyn SaleRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait SaleRepositoryTrait {
    async fn create(&self, sale: &NewSale) -> Result<Sale, RepositoryError>;
    /// Every sale in insertion order.
    async fn find_all(&self) -> Result<Vec<Sale>, RepositoryError>;
    /// The product's sales in insertion order.
    async fn find_by_product(&self, product_id: i32) -> Result<Vec<Sale>, RepositoryError>;
    /// Newest first, joined with product name and description.
    async fn find_all_with_product(&self) -> Result<Vec<SaleWithProduct>, RepositoryError>;
    async fn find_by_product_with_product(
        &self,
        product_id: i32,
    ) -> Result<Vec<SaleWithProduct>, RepositoryError>;
    async fn exists_for_product(&self, product_id: i32) -> Result<bool, RepositoryError>;
}
