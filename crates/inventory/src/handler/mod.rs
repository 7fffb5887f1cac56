mod category;
mod membership;
mod notification;
mod predict;
mod product;
mod report;
mod sale;
mod stock;

use crate::state::AppState;
use anyhow::{Context, Result};
use axum::Router;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;
use axum::routing::get;
use prometheus_client::encoding::text::encode;
use shared::utils::shutdown_signal;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use utoipa::{Modify, OpenApi, openapi::security::SecurityScheme};
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

pub use self::category::category_routes;
pub use self::membership::membership_routes;
pub use self::notification::notification_routes;
pub use self::predict::predict_routes;
pub use self::product::product_routes;
pub use self::report::report_routes;
pub use self::sale::sale_routes;
pub use self::stock::stock_routes;

const BODY_LIMIT_BYTES: usize = 10 * 1024 * 1024;

#[derive(OpenApi)]
#[openapi(
    paths(
        notification::check_all_stocks_for_expiry,
        notification::fetch_notifications,
        notification::fetch_notifications_by_product,
        notification::acknowledge_notification,
        notification::delete_notification,
        notification::priority_alerts,
        product::create_product,
        product::update_product,
        product::get_products,
        product::get_product,
        product::delete_product,
        stock::add_stock,
        stock::update_stock,
        stock::update_product_and_stock,
        stock::get_stock_history,
        sale::create_sale,
        sale::get_sales,
        sale::get_sales_by_product,
        sale::sales_analytics,
        category::create_category,
        category::get_categories,
        category::get_category,
        category::update_category,
        category::delete_category,
        predict::train_stock_model,
        predict::predict_stock,
        predict::train_stock_model_v2,
        predict::predict_stock_v2,
        predict::predict_stock_v3,
        membership::get_stats,
        membership::create_plan,
        membership::get_plans,
        membership::create_member,
        membership::get_members,
        membership::update_member_status,
        membership::delete_member,
        report::get_dashboard,
        report::get_sales_report,
        report::get_inventory_report,
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Notification", description = "Expiry alerts and priority notifications"),
        (name = "Product", description = "Product catalogue endpoints"),
        (name = "Stock", description = "Stock ledger endpoints"),
        (name = "Sale", description = "Sales endpoints"),
        (name = "Category", description = "Category endpoints"),
        (name = "Predict", description = "Stock forecasting endpoints"),
        (name = "Membership", description = "Membership plans and members"),
        (name = "Report", description = "Dashboard and report endpoints"),
    )
)]
struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(utoipa::openapi::security::Http::new(
                    utoipa::openapi::security::HttpAuthScheme::Bearer,
                )),
            );
        }
    }
}

pub async fn metrics_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut buffer = String::new();
    let registry = state.registry.lock().await;

    if let Err(e) = encode(&mut buffer, &registry) {
        error!("📉 Failed to encode metrics: {e}");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            [(CONTENT_TYPE, "text/plain; charset=utf-8")],
            format!("Failed to encode metrics: {e}"),
        );
    }

    (
        StatusCode::OK,
        [(
            CONTENT_TYPE,
            "application/openmetrics-text; version=1.0.0; charset=utf-8",
        )],
        buffer,
    )
}

pub struct AppRouter;

impl AppRouter {
    /// Every route, the metrics endpoint and Swagger UI, without binding a
    /// socket.
    pub fn build(app_state: Arc<AppState>) -> Router {
        let api_router = OpenApiRouter::with_openapi(ApiDoc::openapi())
            .route("/metrics", get(metrics_handler))
            .with_state(app_state.clone())
            .merge(notification_routes(app_state.clone()))
            .merge(product_routes(app_state.clone()))
            .merge(stock_routes(app_state.clone()))
            .merge(sale_routes(app_state.clone()))
            .merge(category_routes(app_state.clone()))
            .merge(predict_routes(app_state.clone()))
            .merge(membership_routes(app_state.clone()))
            .merge(report_routes(app_state.clone()));

        let router_with_layers = api_router
            .layer(DefaultBodyLimit::disable())
            .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http());

        let (app_router, api) = router_with_layers.split_for_parts();

        app_router.merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api))
    }

    pub async fn serve(port: u16, app_state: AppState) -> Result<()> {
        let app = Self::build(Arc::new(app_state));

        let addr = format!("0.0.0.0:{port}");
        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind {addr}"))?;

        info!("🚀 Server running on http://{}", listener.local_addr()?);
        info!("📖 Swagger UI: http://localhost:{port}/swagger-ui");
        info!("📊 Metrics: http://localhost:{port}/metrics");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("Server error")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_document_lists_every_route_group() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        for expected in [
            "/api/notifications/priorityAlerts",
            "/api/products/createsale",
            "/api/products/updateProductAndStock/{id}",
            "/api/category/createcategory",
            "/api/predict/predict-stock-v3",
            "/api/membership/members/{memberId}/status",
            "/api/dashboard",
            "/api/salesReport/inventoryreport",
        ] {
            assert!(
                paths.iter().any(|p| p.as_str() == expected),
                "missing {expected}"
            );
        }
    }

    #[test]
    fn bearer_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
