mod repository;
mod service;

pub use self::repository::{
    DynStockHistoryRepository, DynStockRepository, StockHistoryRepositoryTrait,
    StockRepositoryTrait,
};
pub use self::service::{DynStockService, StockServiceTrait};
