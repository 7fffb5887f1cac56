use crate::{
    abstract_trait::report::DynReportService,
    domain::{
        requests::report::{DateRangeQuery, SalesReportQuery},
        response::{
            api::ApiResponse,
            report::{DashboardResponse, InventoryReportRow, SalesReportTotals},
        },
    },
    state::AppState,
};
use axum::{
    Json,
    extract::{Extension, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use shared::errors::HttpError;
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/api/dashboard",
    tag = "Report",
    params(DateRangeQuery),
    responses(
        (status = 200, description = "KPIs, seven day trend, top products and stock alerts", body = ApiResponse<DashboardResponse>),
        (status = 400, description = "Invalid date"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_dashboard(
    Extension(service): Extension<DynReportService>,
    Query(params): Query<DateRangeQuery>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.dashboard(&params).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/salesReport/salesreport",
    tag = "Report",
    params(SalesReportQuery),
    responses(
        (status = 200, description = "Sales totals for the filter", body = ApiResponse<SalesReportTotals>),
        (status = 400, description = "Invalid date"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_sales_report(
    Extension(service): Extension<DynReportService>,
    Query(params): Query<SalesReportQuery>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.sales_report(&params).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/salesReport/inventoryreport",
    tag = "Report",
    responses(
        (status = 200, description = "Stock, sold quantity and stock value per product", body = ApiResponse<Vec<InventoryReportRow>>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_inventory_report(
    Extension(service): Extension<DynReportService>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.inventory_report().await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn report_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/dashboard", get(get_dashboard))
        .route("/api/salesReport/salesreport", get(get_sales_report))
        .route(
            "/api/salesReport/inventoryreport",
            get(get_inventory_report),
        )
        .layer(Extension(app_state.di_container.report_service.clone()))
}
