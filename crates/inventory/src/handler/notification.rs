use crate::{
    abstract_trait::notification::DynNotificationService,
    domain::{
        requests::notification::NotificationQuery,
        response::{
            api::{ApiResponse, MessageResponse},
            notification::{
                AlertResponse, AlertWithProductResponse, PriorityAlertsResponse,
                ScanAlertsResponse,
            },
        },
    },
    state::AppState,
};
use axum::{
    Json,
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, put},
};
use shared::errors::HttpError;
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/api/notifications/checkallstocksforexpiry",
    tag = "Notification",
    responses(
        (status = 200, description = "Alerts after scanning every stock record", body = ScanAlertsResponse),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn check_all_stocks_for_expiry(
    Extension(service): Extension<DynNotificationService>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.scan_and_generate_alerts().await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/notifications/fetchnotifications",
    tag = "Notification",
    params(NotificationQuery),
    responses(
        (status = 200, description = "Alerts joined with their product, newest first", body = ApiResponse<Vec<AlertWithProductResponse>>),
        (status = 400, description = "Unknown alert level or status"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn fetch_notifications(
    Extension(service): Extension<DynNotificationService>,
    Query(params): Query<NotificationQuery>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.list_notifications(&params).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/notifications/fetchnotificationsByProduct/{productId}",
    tag = "Notification",
    params(("productId" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Alerts of one product", body = ApiResponse<Vec<AlertWithProductResponse>>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn fetch_notifications_by_product(
    Extension(service): Extension<DynNotificationService>,
    Path(product_id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.list_by_product(product_id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/notifications/acknowledgeNotification/{id}",
    tag = "Notification",
    params(("id" = i32, Path, description = "Alert ID")),
    responses(
        (status = 200, description = "Alert acknowledged", body = ApiResponse<AlertResponse>),
        (status = 404, description = "Notification not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn acknowledge_notification(
    Extension(service): Extension<DynNotificationService>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.acknowledge(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/api/notifications/deleteNotification/{id}",
    tag = "Notification",
    params(("id" = i32, Path, description = "Alert ID")),
    responses(
        (status = 200, description = "Alert deleted", body = MessageResponse),
        (status = 404, description = "Notification not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn delete_notification(
    Extension(service): Extension<DynNotificationService>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.delete(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/notifications/priorityAlerts",
    tag = "Notification",
    responses(
        (status = 200, description = "Up to six pending alerts, red first", body = PriorityAlertsResponse),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn priority_alerts(
    Extension(service): Extension<DynNotificationService>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.priority_alerts().await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn notification_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route(
            "/api/notifications/checkallstocksforexpiry",
            get(check_all_stocks_for_expiry),
        )
        .route(
            "/api/notifications/fetchnotifications",
            get(fetch_notifications),
        )
        .route(
            "/api/notifications/fetchnotificationsByProduct/{productId}",
            get(fetch_notifications_by_product),
        )
        .route(
            "/api/notifications/acknowledgeNotification/{id}",
            put(acknowledge_notification),
        )
        .route(
            "/api/notifications/deleteNotification/{id}",
            delete(delete_notification),
        )
        .route("/api/notifications/priorityAlerts", get(priority_alerts))
        .layer(Extension(
            app_state.di_container.notification_service.clone(),
        ))
}
