mod repository;
mod service;

pub use self::repository::{DynSaleRepository, SaleRepositoryTrait};
pub use self::service::{DynSaleService, SaleServiceTrait};
