mod gracefullshutdown;
mod logs;
mod metrics;
mod otel;
mod parse_datetime;

pub use self::gracefullshutdown::shutdown_signal;
pub use self::logs::init_logger;
pub use self::metrics::{Method, Metrics, Status, SystemMetrics, run_metrics_collector};
pub use self::otel::{Telemetry, TracingContext, TracingRecorder};
pub use self::parse_datetime::{parse_datetime, parse_optional_datetime};
