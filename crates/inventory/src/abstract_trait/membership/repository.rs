use crate::model::membership::{Member, MemberFilter, MemberStatus, NewMember, NewPlan, Plan};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynPlanRepository = Arc<dyn PlanRepositoryTrait + Send + Sync>;
pub type DynMemberRepository = Arc<dyn MemberRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait PlanRepositoryTrait {
    async fn create(&self, plan: &NewPlan) -> Result<Plan, RepositoryError>;
    /// Sorted by price ascending.
    async fn find_all(&self) -> Result<Vec<Plan>, RepositoryError>;
    async fn find_by_id(&self, plan_id: i32) -> Result<Option<Plan>, RepositoryError>;
    async fn count(&self) -> Result<i64, RepositoryError>;
    async fn adjust_subscribers(&self, plan_id: i32, delta: i32) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait MemberRepositoryTrait {
    async fn create(&self, member: &NewMember) -> Result<Member, RepositoryError>;
    /// Newest first.
    async fn find_filtered(&self, filter: &MemberFilter) -> Result<Vec<Member>, RepositoryError>;
    async fn find_by_id(&self, member_id: i32) -> Result<Option<Member>, RepositoryError>;
    async fn update_status(
        &self,
        member_id: i32,
        status: MemberStatus,
    ) -> Result<Option<Member>, RepositoryError>;
    async fn delete(&self, member_id: i32) -> Result<bool, RepositoryError>;
    async fn count_active(&self) -> Result<i64, RepositoryError>;
    /// Sum of plan prices over active members.
    async fn active_revenue(&self) -> Result<f64, RepositoryError>;
    async fn count_renewals_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<i64, RepositoryError>;
}
