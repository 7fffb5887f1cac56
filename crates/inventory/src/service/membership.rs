use crate::{
    abstract_trait::{
        membership::{DynMemberRepository, DynPlanRepository, MembershipServiceTrait},
        sequence::DynSequenceRepository,
    },
    domain::{
        requests::{
            membership::{
                CreateMemberRequest, CreatePlanRequest, MemberQuery, UpdateMemberStatusRequest,
            },
            non_blank,
        },
        response::{
            api::{ApiResponse, MessageResponse},
            membership::{MemberResponse, MembershipStatsResponse, PlanResponse},
        },
    },
    model::membership::{MemberFilter, MemberStatus, NewMember, NewPlan},
};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use opentelemetry::KeyValue;
use shared::{
    cache::CacheStore,
    errors::{RepositoryError, ServiceError},
    utils::{Method, Metrics, TracingRecorder, parse_datetime},
};
use std::sync::Arc;
use tracing::info;

const STATS_CACHE_KEY: &str = "membership:stats";

#[derive(Clone)]
pub struct MembershipService {
    plans: DynPlanRepository,
    members: DynMemberRepository,
    sequences: DynSequenceRepository,
    cache_store: Arc<CacheStore>,
    tracing: TracingRecorder,
}

impl MembershipService {
    pub fn new(
        plans: DynPlanRepository,
        members: DynMemberRepository,
        sequences: DynSequenceRepository,
        cache_store: Arc<CacheStore>,
        metrics: Metrics,
    ) -> Self {
        Self {
            plans,
            members,
            sequences,
            cache_store,
            tracing: TracingRecorder::new("membership-service", metrics),
        }
    }

    async fn stats_inner(&self) -> Result<ApiResponse<MembershipStatsResponse>, ServiceError> {
        if let Some(cached) = self
            .cache_store
            .get_from_cache::<MembershipStatsResponse>(STATS_CACHE_KEY)
            .await
        {
            return Ok(ApiResponse::new("Membership stats fetched successfully", cached));
        }

        let now = Utc::now();
        let stats = MembershipStatsResponse {
            active_plans: self.plans.count().await?,
            total_members: self.members.count_active().await?,
            revenue: self.members.active_revenue().await?,
            upcoming_renewals: self
                .members
                .count_renewals_between(now, now + Duration::days(7))
                .await?,
            last_updated: now,
        };

        self.cache_store
            .set_to_cache(STATS_CACHE_KEY, &stats, Duration::hours(1))
            .await;

        Ok(ApiResponse::new("Membership stats fetched successfully", stats))
    }

    async fn create_plan_inner(
        &self,
        req: &CreatePlanRequest,
    ) -> Result<ApiResponse<PlanResponse>, ServiceError> {
        let plan_id = self.sequences.next_sequence("planId").await?;

        let plan = self
            .plans
            .create(&NewPlan {
                plan_id,
                name: req.name.trim().to_string(),
                price: req.price,
                features: req.features.clone(),
            })
            .await
            .map_err(|e| match e {
                RepositoryError::AlreadyExists(_) => {
                    ServiceError::InvalidInput("Plan name already exists".into())
                }
                other => ServiceError::Repo(other),
            })?;

        self.cache_store.delete_from_cache(STATS_CACHE_KEY).await;

        Ok(ApiResponse::new(
            "Plan created successfully",
            PlanResponse::from(plan),
        ))
    }

    async fn create_member_inner(
        &self,
        req: &CreateMemberRequest,
    ) -> Result<ApiResponse<MemberResponse>, ServiceError> {
        if self.plans.find_by_id(req.plan_id).await?.is_none() {
            return Err(ServiceError::InvalidInput("Invalid plan ID".into()));
        }

        let renewal_date = parse_datetime(&req.renewal_date).ok_or_else(|| {
            ServiceError::InvalidInput("Valid renewal date is required".into())
        })?;

        let member_id = self.sequences.next_sequence("memberId").await?;

        let member = self
            .members
            .create(&NewMember {
                member_id,
                name: req.name.trim().to_string(),
                email: req.email.trim().to_lowercase(),
                plan_id: req.plan_id,
                renewal_date,
            })
            .await
            .map_err(|e| match e {
                RepositoryError::AlreadyExists(_) => {
                    ServiceError::InvalidInput("Email already exists".into())
                }
                other => ServiceError::Repo(other),
            })?;

        self.plans.adjust_subscribers(req.plan_id, 1).await?;
        self.cache_store.delete_from_cache(STATS_CACHE_KEY).await;

        Ok(ApiResponse::new(
            "Member created successfully",
            MemberResponse::from(member),
        ))
    }

    async fn list_members_inner(
        &self,
        query: &MemberQuery,
    ) -> Result<ApiResponse<Vec<MemberResponse>>, ServiceError> {
        let status = match non_blank(&query.status) {
            Some(raw) => Some(
                raw.parse::<MemberStatus>()
                    .map_err(|e| ServiceError::Validation(vec![format!("status: {e}")]))?,
            ),
            None => None,
        };

        let filter = MemberFilter {
            search: non_blank(&query.search),
            status,
            plan_id: query.plan,
        };

        let members = self.members.find_filtered(&filter).await?;

        Ok(ApiResponse::new(
            "Members fetched successfully",
            members.into_iter().map(MemberResponse::from).collect(),
        ))
    }

    async fn update_status_inner(
        &self,
        member_id: i32,
        req: &UpdateMemberStatusRequest,
    ) -> Result<ApiResponse<MemberResponse>, ServiceError> {
        let status = req
            .status
            .parse::<MemberStatus>()
            .map_err(|e| ServiceError::Validation(vec![format!("status: {e}")]))?;

        let member = self
            .members
            .update_status(member_id, status)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Member not found".into()))?;

        self.cache_store.delete_from_cache(STATS_CACHE_KEY).await;

        Ok(ApiResponse::new(
            "Member status updated successfully",
            MemberResponse::from(member),
        ))
    }

    async fn delete_member_inner(&self, member_id: i32) -> Result<MessageResponse, ServiceError> {
        let member = self
            .members
            .find_by_id(member_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Member not found".into()))?;

        if !self.members.delete(member_id).await? {
            return Err(ServiceError::NotFound("Member not found".into()));
        }

        self.plans.adjust_subscribers(member.plan_id, -1).await?;
        self.cache_store.delete_from_cache(STATS_CACHE_KEY).await;

        Ok(MessageResponse::new("Member deleted successfully"))
    }
}

#[async_trait]
impl MembershipServiceTrait for MembershipService {
    async fn stats(&self) -> Result<ApiResponse<MembershipStatsResponse>, ServiceError> {
        let tracing_ctx = self.tracing.start_tracing(
            "membership_stats",
            vec![KeyValue::new("component", "membership")],
        );

        let result = self.stats_inner().await;
        self.tracing
            .finish(&tracing_ctx, Method::Get, result, "Membership stats fetched")
    }

    async fn create_plan(
        &self,
        req: &CreatePlanRequest,
    ) -> Result<ApiResponse<PlanResponse>, ServiceError> {
        info!("📋 Creating plan '{}'", req.name);

        let tracing_ctx = self.tracing.start_tracing(
            "create_plan",
            vec![
                KeyValue::new("component", "membership"),
                KeyValue::new("plan.name", req.name.clone()),
            ],
        );

        let result = self.create_plan_inner(req).await;
        self.tracing
            .finish(&tracing_ctx, Method::Post, result, "Plan created")
    }

    async fn list_plans(&self) -> Result<ApiResponse<Vec<PlanResponse>>, ServiceError> {
        let tracing_ctx = self.tracing.start_tracing(
            "list_plans",
            vec![KeyValue::new("component", "membership")],
        );

        let result = self.plans.find_all().await.map_err(ServiceError::from).map(|plans| {
            ApiResponse::new(
                "Plans fetched successfully",
                plans.into_iter().map(PlanResponse::from).collect(),
            )
        });

        self.tracing
            .finish(&tracing_ctx, Method::Get, result, "Plans fetched")
    }

    async fn create_member(
        &self,
        req: &CreateMemberRequest,
    ) -> Result<ApiResponse<MemberResponse>, ServiceError> {
        info!("👤 Creating member for plan {}", req.plan_id);

        let tracing_ctx = self.tracing.start_tracing(
            "create_member",
            vec![
                KeyValue::new("component", "membership"),
                KeyValue::new("plan.id", req.plan_id.to_string()),
            ],
        );

        let result = self.create_member_inner(req).await;
        self.tracing
            .finish(&tracing_ctx, Method::Post, result, "Member created")
    }

    async fn list_members(
        &self,
        query: &MemberQuery,
    ) -> Result<ApiResponse<Vec<MemberResponse>>, ServiceError> {
        let tracing_ctx = self.tracing.start_tracing(
            "list_members",
            vec![
                KeyValue::new("component", "membership"),
                KeyValue::new("search", query.search.clone().unwrap_or_default()),
            ],
        );

        let result = self.list_members_inner(query).await;
        self.tracing
            .finish(&tracing_ctx, Method::Get, result, "Members fetched")
    }

    async fn update_member_status(
        &self,
        member_id: i32,
        req: &UpdateMemberStatusRequest,
    ) -> Result<ApiResponse<MemberResponse>, ServiceError> {
        info!("🔄 Member {} -> {}", member_id, req.status);

        let tracing_ctx = self.tracing.start_tracing(
            "update_member_status",
            vec![
                KeyValue::new("component", "membership"),
                KeyValue::new("member.id", member_id.to_string()),
            ],
        );

        let result = self.update_status_inner(member_id, req).await;
        self.tracing
            .finish(&tracing_ctx, Method::Patch, result, "Member status updated")
    }

    async fn delete_member(&self, member_id: i32) -> Result<MessageResponse, ServiceError> {
        info!("🗑️ Deleting member {}", member_id);

        let tracing_ctx = self.tracing.start_tracing(
            "delete_member",
            vec![
                KeyValue::new("component", "membership"),
                KeyValue::new("member.id", member_id.to_string()),
            ],
        );

        let result = self.delete_member_inner(member_id).await;
        self.tracing
            .finish(&tracing_ctx, Method::Delete, result, "Member deleted")
    }
}
