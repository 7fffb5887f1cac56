use super::{validate_datetime, validate_not_blank};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    #[validate(custom(function = "validate_not_blank", message = "Product name is required"))]
    #[schema(example = "Whole Milk 1L")]
    pub name: String,

    pub description: Option<String>,

    #[validate(custom(function = "validate_not_blank", message = "Category is required"))]
    #[schema(example = "Dairy")]
    pub category: String,

    pub sub_category: Option<String>,

    #[validate(custom(function = "validate_not_blank", message = "Unit of measure is required"))]
    #[schema(example = "bottle")]
    pub unit_of_measure: String,

    #[validate(range(min = 0, message = "Initial stock is required"))]
    #[schema(example = 40)]
    pub initial_stock: i32,

    #[validate(range(min = 0.0, message = "Price is required"))]
    #[schema(example = 1.99)]
    pub price: f64,

    #[validate(custom(function = "validate_datetime", message = "Expiry date is required"))]
    #[schema(example = "2025-07-15T00:00:00Z")]
    pub expiry_date: Option<String>,
}

/// Partial update; absent or blank fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub sub_category: Option<String>,
    pub unit_of_measure: Option<String>,
}
