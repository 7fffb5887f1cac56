use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

fn validate_gender(value: &str) -> Result<(), ValidationError> {
    match value {
        "male" | "female" | "other" => Ok(()),
        _ => Err(ValidationError::new("gender")),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaleItem {
    pub product_id: i32,

    #[validate(range(min = 1, message = "Quantity sold must be at least 1"))]
    pub quantity_sold: i32,

    #[validate(range(min = 0.0, message = "Sale price cannot be negative"))]
    pub sale_price: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct BuyerDetails {
    #[validate(custom(function = "validate_gender", message = "Gender should be valid"))]
    #[schema(example = "female")]
    pub gender: Option<String>,

    #[validate(range(min = 0, max = 150, message = "Age should be a number"))]
    pub age: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSaleRequest {
    #[validate(length(min = 1, message = "Products array is required"), nested)]
    pub products: Vec<SaleItem>,

    #[validate(nested)]
    pub buyer_details: BuyerDetails,
}
