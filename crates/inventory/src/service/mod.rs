mod category;
mod membership;
mod notification;
mod predict;
mod product;
mod report;
mod sale;
mod stock;

pub use self::category::CategoryService;
pub use self::membership::MembershipService;
pub use self::notification::NotificationService;
pub use self::predict::PredictService;
pub use self::product::{PRODUCTS_CACHE_KEY, ProductService};
pub use self::report::ReportService;
pub use self::sale::SaleService;
pub use self::stock::StockService;
