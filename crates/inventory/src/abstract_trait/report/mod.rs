mod repository;
mod service;

pub use self::repository::{DynReportRepository, ReportRepositoryTrait, SalesFilter};
pub use self::service::{DynReportService, ReportServiceTrait};
