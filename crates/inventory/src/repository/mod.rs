mod category;
mod expiry_alert;
mod member;
mod plan;
mod product;
mod report;
mod sale;
mod sequence;
mod stock;
mod stock_history;

pub use self::category::CategoryRepository;
pub use self::expiry_alert::ExpiryAlertRepository;
pub use self::member::MemberRepository;
pub use self::plan::PlanRepository;
pub use self::product::ProductRepository;
pub use self::report::ReportRepository;
pub use self::sale::SaleRepository;
pub use self::sequence::SequenceRepository;
pub use self::stock::StockRepository;
pub use self::stock_history::StockHistoryRepository;
