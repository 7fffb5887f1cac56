use crate::model::membership::{Member, MemberStatus, Plan};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlanResponse {
    pub plan_id: i32,
    pub name: String,
    pub price: f64,
    pub features: Vec<String>,
    pub subscribers: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Plan> for PlanResponse {
    fn from(value: Plan) -> Self {
        PlanResponse {
            plan_id: value.plan_id,
            name: value.name,
            price: value.price,
            features: value.features,
            subscribers: value.subscribers,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemberResponse {
    pub member_id: i32,
    pub name: String,
    pub email: String,
    pub plan_id: i32,
    pub status: MemberStatus,
    pub renewal_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Member> for MemberResponse {
    fn from(value: Member) -> Self {
        MemberResponse {
            member_id: value.member_id,
            name: value.name,
            email: value.email,
            plan_id: value.plan_id,
            status: value.status,
            renewal_date: value.renewal_date,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MembershipStatsResponse {
    pub active_plans: i64,
    pub total_members: i64,
    pub revenue: f64,
    pub upcoming_renewals: i64,
    pub last_updated: DateTime<Utc>,
}
