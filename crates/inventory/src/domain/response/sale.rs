use crate::domain::response::report::{
    CategorySalesSummary, ProductSalesSummary, TopSellingProduct,
};
use crate::model::sale::{Sale, SaleWithProduct};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BuyerDetailsResponse {
    pub gender: Option<String>,
    pub age: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaleResponse {
    pub sale_id: i32,
    pub product_id: i32,
    pub quantity_sold: i32,
    pub sale_price: f64,
    pub sale_date: DateTime<Utc>,
    pub buyer_details: BuyerDetailsResponse,
    pub total_sale_amount: f64,
}

impl From<Sale> for SaleResponse {
    fn from(value: Sale) -> Self {
        SaleResponse {
            sale_id: value.sale_id,
            product_id: value.product_id,
            quantity_sold: value.quantity_sold,
            sale_price: value.sale_price,
            sale_date: value.sale_date,
            buyer_details: BuyerDetailsResponse {
                gender: value.buyer_gender,
                age: value.buyer_age,
            },
            total_sale_amount: value.total_sale_amount,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SaleProductInfo {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaleWithProductResponse {
    pub sale_id: i32,
    pub product_id: i32,
    pub product: SaleProductInfo,
    pub quantity_sold: i32,
    pub sale_price: f64,
    pub sale_date: DateTime<Utc>,
    pub buyer_details: BuyerDetailsResponse,
    pub total_sale_amount: f64,
}

impl From<SaleWithProduct> for SaleWithProductResponse {
    fn from(value: SaleWithProduct) -> Self {
        SaleWithProductResponse {
            sale_id: value.sale_id,
            product_id: value.product_id,
            product: SaleProductInfo {
                name: value.product_name,
                description: value.product_description,
            },
            quantity_sold: value.quantity_sold,
            sale_price: value.sale_price,
            sale_date: value.sale_date,
            buyer_details: BuyerDetailsResponse {
                gender: value.buyer_gender,
                age: value.buyer_age,
            },
            total_sale_amount: value.total_sale_amount,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSaleResponse {
    pub status: bool,
    pub message: String,
    pub total_amount: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SalesAnalyticsResponse {
    pub total_sales_per_product: Vec<ProductSalesSummary>,
    pub total_sales_per_category: Vec<CategorySalesSummary>,
    pub top_selling_products: Vec<TopSellingProduct>,
}
