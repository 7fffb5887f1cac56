pub mod category;
pub mod expiry_alert;
pub mod membership;
pub mod product;
pub mod sale;
pub mod stock;
pub mod stock_history;
