use crate::{
    abstract_trait::{
        product::DynProductRepository,
        report::DynReportRepository,
        sale::{DynSaleRepository, SaleServiceTrait},
        stock::DynStockRepository,
    },
    domain::{
        requests::sale::{CreateSaleRequest, SaleItem},
        response::{
            api::ApiResponse,
            sale::{CreateSaleResponse, SaleWithProductResponse, SalesAnalyticsResponse},
        },
    },
    model::sale::NewSale,
    service::PRODUCTS_CACHE_KEY,
};
use async_trait::async_trait;
use chrono::Utc;
use opentelemetry::KeyValue;
use shared::{
    cache::CacheStore,
    errors::ServiceError,
    utils::{Method, Metrics, TracingRecorder},
};
use std::sync::Arc;
use tracing::{info, warn};

const TOP_SELLING_LIMIT: i64 = 5;

#[derive(Clone)]
pub struct SaleService {
    products: DynProductRepository,
    stocks: DynStockRepository,
    sales: DynSaleRepository,
    reports: DynReportRepository,
    cache_store: Arc<CacheStore>,
    tracing: TracingRecorder,
}

impl SaleService {
    pub fn new(
        products: DynProductRepository,
        stocks: DynStockRepository,
        sales: DynSaleRepository,
        reports: DynReportRepository,
        cache_store: Arc<CacheStore>,
        metrics: Metrics,
    ) -> Self {
        Self {
            products,
            stocks,
            sales,
            reports,
            cache_store,
            tracing: TracingRecorder::new("sale-service", metrics),
        }
    }

    /// Decrements stock and records one sale row. The decrement is
    /// conditional, so a concurrent sale can never push stock below zero.
    async fn sell(&self, item: &SaleItem, req: &CreateSaleRequest) -> Result<f64, ServiceError> {
        let product_id = item.product_id;

        if self.products.find_by_id(product_id).await?.is_none() {
            return Err(ServiceError::InvalidInput(format!(
                "Product with ID {product_id} not found"
            )));
        }

        if self
            .stocks
            .decrement(product_id, item.quantity_sold)
            .await?
            .is_none()
        {
            warn!(
                "⚠️ Not enough stock for product {} (wanted {})",
                product_id, item.quantity_sold
            );
            return Err(ServiceError::InvalidInput(format!(
                "Not enough stock available for product ID {product_id}"
            )));
        }

        let total_sale_amount = item.sale_price * f64::from(item.quantity_sold);

        self.sales
            .create(&NewSale {
                product_id,
                quantity_sold: item.quantity_sold,
                sale_price: item.sale_price,
                sale_date: Utc::now(),
                buyer_gender: req.buyer_details.gender.clone(),
                buyer_age: req.buyer_details.age,
                total_sale_amount,
            })
            .await?;

        Ok(total_sale_amount)
    }

    async fn create_sale_inner(
        &self,
        req: &CreateSaleRequest,
    ) -> Result<CreateSaleResponse, ServiceError> {
        let mut total_amount = 0.0;
        let mut outcome = Ok(());

        for item in &req.products {
            match self.sell(item, req).await {
                Ok(amount) => total_amount += amount,
                Err(e) => {
                    outcome = Err(e);
                    break;
                }
            }
        }

        self.cache_store.delete_from_cache(PRODUCTS_CACHE_KEY).await;
        outcome?;

        Ok(CreateSaleResponse {
            status: true,
            message: "Sale recorded successfully".into(),
            total_amount,
        })
    }

    async fn analytics_inner(&self) -> Result<SalesAnalyticsResponse, ServiceError> {
        Ok(SalesAnalyticsResponse {
            total_sales_per_product: self.reports.sales_per_product().await?,
            total_sales_per_category: self.reports.sales_per_category().await?,
            top_selling_products: self.reports.top_selling_products(TOP_SELLING_LIMIT).await?,
        })
    }
}

#[async_trait]
impl SaleServiceTrait for SaleService {
    async fn create_sale(
        &self,
        req: &CreateSaleRequest,
    ) -> Result<CreateSaleResponse, ServiceError> {
        info!("🧾 Recording sale of {} products", req.products.len());

        let method = Method::Post;
        let tracing_ctx = self.tracing.start_tracing(
            "create_sale",
            vec![
                KeyValue::new("component", "sale"),
                KeyValue::new("items", req.products.len() as i64),
            ],
        );

        match self.create_sale_inner(req).await {
            Ok(response) => {
                self.tracing
                    .complete_tracing_success(&tracing_ctx, method, "Sale recorded");
                Ok(response)
            }
            Err(e) => {
                self.tracing
                    .complete_tracing_error(&tracing_ctx, method, &e.to_string());
                Err(e)
            }
        }
    }

    async fn get_sales(&self) -> Result<ApiResponse<Vec<SaleWithProductResponse>>, ServiceError> {
        let method = Method::Get;
        let tracing_ctx = self
            .tracing
            .start_tracing("get_sales", vec![KeyValue::new("component", "sale")]);

        let sales = match self.sales.find_all_with_product().await {
            Ok(sales) => sales,
            Err(e) => {
                self.tracing
                    .complete_tracing_error(&tracing_ctx, method, &e.to_string());
                return Err(e.into());
            }
        };

        if sales.is_empty() {
            self.tracing
                .complete_tracing_error(&tracing_ctx, method, "No sales found");
            return Err(ServiceError::NotFound("No sales found".into()));
        }

        self.tracing
            .complete_tracing_success(&tracing_ctx, method, "Sales fetched");

        Ok(ApiResponse::new(
            "Sales fetched successfully",
            sales.into_iter().map(SaleWithProductResponse::from).collect(),
        ))
    }

    async fn get_sales_by_product(
        &self,
        product_id: i32,
    ) -> Result<ApiResponse<Vec<SaleWithProductResponse>>, ServiceError> {
        let method = Method::Get;
        let tracing_ctx = self.tracing.start_tracing(
            "get_sales_by_product",
            vec![
                KeyValue::new("component", "sale"),
                KeyValue::new("product.id", product_id.to_string()),
            ],
        );

        let sales = match self.sales.find_by_product_with_product(product_id).await {
            Ok(sales) => sales,
            Err(e) => {
                self.tracing
                    .complete_tracing_error(&tracing_ctx, method, &e.to_string());
                return Err(e.into());
            }
        };

        if sales.is_empty() {
            self.tracing
                .complete_tracing_error(&tracing_ctx, method, "No sales found");
            return Err(ServiceError::NotFound(format!(
                "No sales found for product ID {product_id}"
            )));
        }

        self.tracing
            .complete_tracing_success(&tracing_ctx, method, "Sales fetched");

        Ok(ApiResponse::new(
            format!("Sales fetched successfully for product ID {product_id}"),
            sales.into_iter().map(SaleWithProductResponse::from).collect(),
        ))
    }

    async fn sales_analytics(&self) -> Result<SalesAnalyticsResponse, ServiceError> {
        let method = Method::Get;
        let tracing_ctx = self
            .tracing
            .start_tracing("sales_analytics", vec![KeyValue::new("component", "sale")]);

        match self.analytics_inner().await {
            Ok(response) => {
                self.tracing
                    .complete_tracing_success(&tracing_ctx, method, "Sales analytics computed");
                Ok(response)
            }
            Err(e) => {
                self.tracing
                    .complete_tracing_error(&tracing_ctx, method, &e.to_string());
                Err(e)
            }
        }
    }
}
