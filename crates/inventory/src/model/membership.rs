use crate::model::expiry_alert::UnknownVariant;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum MemberStatus {
    Active,
    Suspended,
    Cancelled,
}

impl MemberStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberStatus::Active => "Active",
            MemberStatus::Suspended => "Suspended",
            MemberStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for MemberStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MemberStatus {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Active" => Ok(MemberStatus::Active),
            "Suspended" => Ok(MemberStatus::Suspended),
            "Cancelled" => Ok(MemberStatus::Cancelled),
            other => Err(UnknownVariant::new("member status", other)),
        }
    }
}

impl TryFrom<String> for MemberStatus {
    type Error = UnknownVariant;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Plan {
    pub plan_id: i32,
    pub name: String,
    pub price: f64,
    pub features: Vec<String>,
    pub subscribers: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewPlan {
    pub plan_id: i32,
    pub name: String,
    pub price: f64,
    pub features: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Member {
    pub member_id: i32,
    pub name: String,
    pub email: String,
    pub plan_id: i32,
    #[sqlx(try_from = "String")]
    pub status: MemberStatus,
    pub renewal_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewMember {
    pub member_id: i32,
    pub name: String,
    pub email: String,
    pub plan_id: i32,
    pub renewal_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct MemberFilter {
    pub search: Option<String>,
    pub status: Option<MemberStatus>,
    pub plan_id: Option<i32>,
}
