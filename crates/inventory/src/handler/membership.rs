use crate::{
    abstract_trait::membership::DynMembershipService,
    domain::{
        requests::membership::{
            CreateMemberRequest, CreatePlanRequest, MemberQuery, UpdateMemberStatusRequest,
        },
        response::{
            api::{ApiResponse, MessageResponse},
            membership::{MemberResponse, MembershipStatsResponse, PlanResponse},
        },
    },
    middleware::validate::SimpleValidatedJson,
    state::AppState,
};
use axum::{
    Json,
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, patch},
};
use shared::errors::HttpError;
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/api/membership/stats",
    tag = "Membership",
    responses(
        (status = 200, description = "Member, plan, revenue and renewal figures", body = ApiResponse<MembershipStatsResponse>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_stats(
    Extension(service): Extension<DynMembershipService>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.stats().await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/membership/plans",
    tag = "Membership",
    request_body = CreatePlanRequest,
    responses(
        (status = 201, description = "Plan created", body = ApiResponse<PlanResponse>),
        (status = 400, description = "Validation failed or plan name already exists"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_plan(
    Extension(service): Extension<DynMembershipService>,
    SimpleValidatedJson(body): SimpleValidatedJson<CreatePlanRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.create_plan(&body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/membership/plans",
    tag = "Membership",
    responses(
        (status = 200, description = "Plans ordered by price", body = ApiResponse<Vec<PlanResponse>>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_plans(
    Extension(service): Extension<DynMembershipService>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.list_plans().await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/membership/members",
    tag = "Membership",
    request_body = CreateMemberRequest,
    responses(
        (status = 201, description = "Member created", body = ApiResponse<MemberResponse>),
        (status = 400, description = "Validation failed, invalid plan or email already exists"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_member(
    Extension(service): Extension<DynMembershipService>,
    SimpleValidatedJson(body): SimpleValidatedJson<CreateMemberRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.create_member(&body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/membership/members",
    tag = "Membership",
    params(MemberQuery),
    responses(
        (status = 200, description = "Members, newest first", body = ApiResponse<Vec<MemberResponse>>),
        (status = 400, description = "Unknown status filter"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_members(
    Extension(service): Extension<DynMembershipService>,
    Query(params): Query<MemberQuery>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.list_members(&params).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    patch,
    path = "/api/membership/members/{memberId}/status",
    tag = "Membership",
    params(("memberId" = i32, Path, description = "Member ID")),
    request_body = UpdateMemberStatusRequest,
    responses(
        (status = 200, description = "Status changed", body = ApiResponse<MemberResponse>),
        (status = 400, description = "Invalid status"),
        (status = 404, description = "Member not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn update_member_status(
    Extension(service): Extension<DynMembershipService>,
    Path(member_id): Path<i32>,
    SimpleValidatedJson(body): SimpleValidatedJson<UpdateMemberStatusRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.update_member_status(member_id, &body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/api/membership/members/{memberId}",
    tag = "Membership",
    params(("memberId" = i32, Path, description = "Member ID")),
    responses(
        (status = 200, description = "Member deleted", body = MessageResponse),
        (status = 404, description = "Member not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn delete_member(
    Extension(service): Extension<DynMembershipService>,
    Path(member_id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.delete_member(member_id).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn membership_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/membership/stats", get(get_stats))
        .route("/api/membership/plans", get(get_plans).post(create_plan))
        .route(
            "/api/membership/members",
            get(get_members).post(create_member),
        )
        .route(
            "/api/membership/members/{memberId}/status",
            patch(update_member_status),
        )
        .route("/api/membership/members/{memberId}", delete(delete_member))
        .layer(Extension(app_state.di_container.membership_service.clone()))
}
