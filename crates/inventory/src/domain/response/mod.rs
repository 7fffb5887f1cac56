pub mod api;
pub mod category;
pub mod membership;
pub mod notification;
pub mod product;
pub mod report;
pub mod sale;
