use super::{validate_datetime, validate_not_blank};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

fn validate_member_status(value: &str) -> Result<(), ValidationError> {
    match value {
        "Active" | "Suspended" | "Cancelled" => Ok(()),
        _ => Err(ValidationError::new("status")),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreatePlanRequest {
    #[validate(custom(function = "validate_not_blank", message = "Plan name is required"))]
    #[schema(example = "Gold")]
    pub name: String,

    #[validate(range(min = 0.0, message = "Valid price is required"))]
    #[schema(example = 29.99)]
    pub price: f64,

    pub features: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMemberRequest {
    #[validate(custom(function = "validate_not_blank", message = "Name is required"))]
    pub name: String,

    #[validate(email(message = "Valid email is required"))]
    pub email: String,

    pub plan_id: i32,

    #[validate(custom(function = "validate_datetime", message = "Valid renewal date is required"))]
    #[schema(example = "2025-08-01")]
    pub renewal_date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateMemberStatusRequest {
    #[validate(custom(function = "validate_member_status", message = "Invalid status"))]
    #[schema(example = "Suspended")]
    pub status: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MemberQuery {
    /// Case-insensitive match on name or email
    pub search: Option<String>,
    pub status: Option<String>,
    pub plan: Option<i32>,
}
