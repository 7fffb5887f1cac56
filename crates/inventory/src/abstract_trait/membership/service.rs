use crate::domain::{
    requests::membership::{
        CreateMemberRequest, CreatePlanRequest, MemberQuery, UpdateMemberStatusRequest,
    },
    response::{
        api::{ApiResponse, MessageResponse},
        membership::{MemberResponse, MembershipStatsResponse, PlanResponse},
    },
};
use async_trait::async_trait;
use shared::errors::ServiceError;
use std::sync::Arc;

pub type DynMembershipService = Arc<dyn MembershipServiceTrait + Send + Sync>;

#[async_trait]
pub trait MembershipServiceTrait {
    async fn stats(&self) -> Result<ApiResponse<MembershipStatsResponse>, ServiceError>;
    async fn create_plan(
        &self,
        req: &CreatePlanRequest,
    ) -> Result<ApiResponse<PlanResponse>, ServiceError>;
    async fn list_plans(&self) -> Result<ApiResponse<Vec<PlanResponse>>, ServiceError>;
    async fn create_member(
        &self,
        req: &CreateMemberRequest,
    ) -> Result<ApiResponse<MemberResponse>, ServiceError>;
    async fn list_members(
        &self,
        query: &MemberQuery,
    ) -> Result<ApiResponse<Vec<MemberResponse>>, ServiceError>;
    async fn update_member_status(
        &self,
        member_id: i32,
        req: &UpdateMemberStatusRequest,
    ) -> Result<ApiResponse<MemberResponse>, ServiceError>;
    async fn delete_member(&self, member_id: i32) -> Result<MessageResponse, ServiceError>;
}
