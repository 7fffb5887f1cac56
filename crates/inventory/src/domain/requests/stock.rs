use super::validate_datetime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddStockItem {
    pub product_id: i32,

    #[validate(range(min = 0, message = "Stock quantity should be a valid number"))]
    pub stock: i32,

    #[validate(range(min = 0.0, message = "Price should be a valid number"))]
    pub price: f64,

    #[validate(custom(function = "validate_datetime", message = "Expiry date should be a valid date"))]
    #[schema(example = "2025-07-15")]
    pub expiry_date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct AddStockRequest {
    #[validate(length(min = 1, message = "Products array is required"), nested)]
    pub products: Vec<AddStockItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStockRequest {
    #[validate(range(min = 0, message = "Stock quantity should be a valid number"))]
    pub stock: i32,

    pub price: Option<f64>,

    #[validate(custom(function = "validate_datetime", message = "Expiry date should be a valid date"))]
    pub expiry_date: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductAndStockRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub sub_category: Option<String>,
    pub unit_of_measure: Option<String>,

    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    pub stock: i32,

    pub price: Option<f64>,

    #[validate(custom(function = "validate_datetime", message = "Expiry date should be a valid date"))]
    pub expiry_date: Option<String>,
}
