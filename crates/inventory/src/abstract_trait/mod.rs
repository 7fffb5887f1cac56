pub mod category;
pub mod membership;
pub mod ml_client;
pub mod notification;
pub mod predict;
pub mod product;
pub mod report;
pub mod sale;
pub mod sequence;
pub mod stock;
