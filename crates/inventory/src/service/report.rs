use crate::{
    abstract_trait::report::{DynReportRepository, ReportServiceTrait, SalesFilter},
    domain::{
        requests::{
            non_blank,
            report::{DateRangeQuery, SalesReportQuery},
        },
        response::{
            api::ApiResponse,
            report::{DashboardKpis, DashboardResponse, InventoryReportRow, SalesReportTotals},
        },
    },
};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use opentelemetry::KeyValue;
use shared::{
    errors::ServiceError,
    utils::{Method, Metrics, TracingRecorder, parse_optional_datetime},
};

const DASHBOARD_LIMIT: i64 = 5;
const LOW_STOCK_THRESHOLD: i32 = 10;

type DateRange = Option<(DateTime<Utc>, DateTime<Utc>)>;

/// A range only applies when both ends are given; one end alone is ignored.
fn date_range(start: Option<&str>, end: Option<&str>) -> Result<DateRange, ServiceError> {
    let start = parse_optional_datetime(start)
        .map_err(|e| ServiceError::Validation(vec![format!("startDate: {e}")]))?;
    let end = parse_optional_datetime(end)
        .map_err(|e| ServiceError::Validation(vec![format!("endDate: {e}")]))?;

    Ok(start.zip(end))
}

#[derive(Clone)]
pub struct ReportService {
    reports: DynReportRepository,
    tracing: TracingRecorder,
}

impl ReportService {
    pub fn new(reports: DynReportRepository, metrics: Metrics) -> Self {
        Self {
            reports,
            tracing: TracingRecorder::new("report-service", metrics),
        }
    }

    pub async fn dashboard_at(
        &self,
        query: &DateRangeQuery,
        now: DateTime<Utc>,
    ) -> Result<ApiResponse<DashboardResponse>, ServiceError> {
        let range = date_range(query.start_date.as_deref(), query.end_date.as_deref())?;

        let current = self.reports.sales_totals(range).await?;
        let previous_period = self
            .reports
            .period_totals(now - Duration::days(60), now - Duration::days(30))
            .await?;
        let sales_trend = self
            .reports
            .daily_sales_since(now - Duration::days(7))
            .await?;
        let top_products = self
            .reports
            .top_products_by_revenue(range, DASHBOARD_LIMIT)
            .await?;
        let stock_alerts = self
            .reports
            .stock_alerts(LOW_STOCK_THRESHOLD, now + Duration::days(7), DASHBOARD_LIMIT)
            .await?;

        Ok(ApiResponse::new(
            "Dashboard data fetched successfully",
            DashboardResponse {
                kpis: DashboardKpis {
                    current,
                    previous_period,
                },
                sales_trend,
                top_products,
                stock_alerts,
            },
        ))
    }

    async fn sales_report_inner(
        &self,
        query: &SalesReportQuery,
    ) -> Result<ApiResponse<SalesReportTotals>, ServiceError> {
        let filter = SalesFilter {
            range: date_range(query.start_date.as_deref(), query.end_date.as_deref())?,
            product_id: query.product_id,
            category: non_blank(&query.category),
        };

        let totals = self.reports.sales_report(&filter).await?;
        Ok(ApiResponse::new("Sales report generated successfully", totals))
    }
}

#[async_trait]
impl ReportServiceTrait for ReportService {
    async fn dashboard(
        &self,
        query: &DateRangeQuery,
    ) -> Result<ApiResponse<DashboardResponse>, ServiceError> {
        let tracing_ctx = self.tracing.start_tracing(
            "dashboard",
            vec![KeyValue::new("component", "report")],
        );

        let result = self.dashboard_at(query, Utc::now()).await;
        self.tracing
            .finish(&tracing_ctx, Method::Get, result, "Dashboard computed")
    }

    async fn sales_report(
        &self,
        query: &SalesReportQuery,
    ) -> Result<ApiResponse<SalesReportTotals>, ServiceError> {
        let tracing_ctx = self.tracing.start_tracing(
            "sales_report",
            vec![KeyValue::new("component", "report")],
        );

        let result = self.sales_report_inner(query).await;
        self.tracing
            .finish(&tracing_ctx, Method::Get, result, "Sales report generated")
    }

    async fn inventory_report(
        &self,
    ) -> Result<ApiResponse<Vec<InventoryReportRow>>, ServiceError> {
        let tracing_ctx = self.tracing.start_tracing(
            "inventory_report",
            vec![KeyValue::new("component", "report")],
        );

        let result = self
            .reports
            .inventory_report()
            .await
            .map_err(ServiceError::from)
            .map(|rows| ApiResponse::new("Inventory report generated successfully", rows));

        self.tracing
            .finish(&tracing_ctx, Method::Get, result, "Inventory report generated")
    }
}
