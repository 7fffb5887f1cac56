use crate::{
    abstract_trait::{
        product::{DynProductRepository, ProductServiceTrait},
        sale::DynSaleRepository,
        sequence::DynSequenceRepository,
        stock::DynStockRepository,
    },
    domain::{
        requests::{
            non_blank,
            product::{CreateProductRequest, UpdateProductRequest},
        },
        response::{
            api::ApiResponse,
            product::{DeleteProductResponse, ProductResponse, ProductStockResponse},
        },
    },
    model::{product::NewProduct, stock::NewStock},
};
use async_trait::async_trait;
use chrono::Duration;
use opentelemetry::KeyValue;
use shared::{
    cache::CacheStore,
    errors::ServiceError,
    utils::{Method, Metrics, TracingRecorder, parse_optional_datetime},
};
use std::sync::Arc;
use tracing::{info, warn};

/// Cache key of the product listing; every product, stock or sale mutation
/// deletes it.
pub const PRODUCTS_CACHE_KEY: &str = "products:all";

#[derive(Clone)]
pub struct ProductService {
    products: DynProductRepository,
    stocks: DynStockRepository,
    sales: DynSaleRepository,
    sequences: DynSequenceRepository,
    cache_store: Arc<CacheStore>,
    tracing: TracingRecorder,
}

impl ProductService {
    pub fn new(
        products: DynProductRepository,
        stocks: DynStockRepository,
        sales: DynSaleRepository,
        sequences: DynSequenceRepository,
        cache_store: Arc<CacheStore>,
        metrics: Metrics,
    ) -> Self {
        Self {
            products,
            stocks,
            sales,
            sequences,
            cache_store,
            tracing: TracingRecorder::new("product-service", metrics),
        }
    }

    async fn create_inner(
        &self,
        req: &CreateProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        let expiry_date = parse_optional_datetime(req.expiry_date.as_deref())
            .map_err(ServiceError::InvalidInput)?;

        if self.products.find_by_name(&req.name).await?.is_some() {
            return Err(ServiceError::InvalidInput(
                "Product name already exists".into(),
            ));
        }

        let product_id = self.sequences.next_sequence("productId").await?;

        let product = self
            .products
            .create(&NewProduct {
                product_id,
                name: req.name.trim().to_string(),
                description: req.description.clone(),
                category: req.category.trim().to_string(),
                sub_category: req.sub_category.clone(),
                unit_of_measure: req.unit_of_measure.trim().to_string(),
            })
            .await?;

        self.stocks
            .create(&NewStock {
                product_id,
                stock: req.initial_stock,
                price: req.price,
                expiry_date,
            })
            .await?;

        self.cache_store.delete_from_cache(PRODUCTS_CACHE_KEY).await;

        Ok(ApiResponse::new(
            "Product created and stock added successfully",
            ProductResponse::from(product),
        ))
    }

    async fn update_inner(
        &self,
        product_id: i32,
        req: &UpdateProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        let mut product = self
            .products
            .find_by_id(product_id)
            .await?
            .ok_or_else(|| ServiceError::InvalidInput("Product not found".into()))?;

        if let Some(name) = non_blank(&req.name) {
            product.name = name;
        }
        if let Some(description) = non_blank(&req.description) {
            product.description = Some(description);
        }
        if let Some(category) = non_blank(&req.category) {
            product.category = category;
        }
        if let Some(sub_category) = non_blank(&req.sub_category) {
            product.sub_category = Some(sub_category);
        }
        if let Some(unit) = non_blank(&req.unit_of_measure) {
            product.unit_of_measure = unit;
        }

        let updated = self.products.update(&product).await?;
        self.cache_store.delete_from_cache(PRODUCTS_CACHE_KEY).await;

        Ok(ApiResponse::new(
            "Product updated successfully",
            ProductResponse::from(updated),
        ))
    }

    async fn delete_inner(&self, product_id: i32) -> Result<DeleteProductResponse, ServiceError> {
        if self.products.find_by_id(product_id).await?.is_none() {
            return Err(ServiceError::InvalidInput("Product not found".into()));
        }

        if let Some(stock) = self.stocks.find_by_product(product_id).await? {
            warn!(
                "⚠️ Refusing to delete product {} with {} units in stock",
                product_id, stock.stock
            );
            return Ok(DeleteProductResponse {
                status: false,
                message: "Cannot delete product with associated sales or stock".into(),
                remaining_stock: Some(stock.stock),
            });
        }

        if self.sales.exists_for_product(product_id).await? {
            return Err(ServiceError::InvalidInput(
                "Cannot delete product with associated sales".into(),
            ));
        }

        self.products.delete(product_id).await?;
        self.cache_store.delete_from_cache(PRODUCTS_CACHE_KEY).await;

        Ok(DeleteProductResponse {
            status: true,
            message: "Product deleted successfully".into(),
            remaining_stock: None,
        })
    }
}

#[async_trait]
impl ProductServiceTrait for ProductService {
    async fn create_product(
        &self,
        req: &CreateProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        info!("🆕 Creating product '{}'", req.name);

        let method = Method::Post;
        let tracing_ctx = self.tracing.start_tracing(
            "create_product",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("product.name", req.name.clone()),
            ],
        );

        match self.create_inner(req).await {
            Ok(response) => {
                self.tracing
                    .complete_tracing_success(&tracing_ctx, method, "Product created");
                Ok(response)
            }
            Err(e) => {
                self.tracing
                    .complete_tracing_error(&tracing_ctx, method, &e.to_string());
                Err(e)
            }
        }
    }

    async fn update_product(
        &self,
        product_id: i32,
        req: &UpdateProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        info!("✏️ Updating product {}", product_id);

        let method = Method::Put;
        let tracing_ctx = self.tracing.start_tracing(
            "update_product",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("product.id", product_id.to_string()),
            ],
        );

        match self.update_inner(product_id, req).await {
            Ok(response) => {
                self.tracing
                    .complete_tracing_success(&tracing_ctx, method, "Product updated");
                Ok(response)
            }
            Err(e) => {
                self.tracing
                    .complete_tracing_error(&tracing_ctx, method, &e.to_string());
                Err(e)
            }
        }
    }

    async fn get_products(&self) -> Result<ApiResponse<Vec<ProductStockResponse>>, ServiceError> {
        let method = Method::Get;
        let tracing_ctx = self.tracing.start_tracing(
            "get_products",
            vec![KeyValue::new("component", "product")],
        );

        if let Some(cached) = self
            .cache_store
            .get_from_cache::<ApiResponse<Vec<ProductStockResponse>>>(PRODUCTS_CACHE_KEY)
            .await
        {
            info!("✅ Found {} products in cache", cached.data.len());
            self.tracing.complete_tracing_success(
                &tracing_ctx,
                method,
                "Products retrieved from cache",
            );
            return Ok(cached);
        }

        let rows = match self.products.find_all_with_stock().await {
            Ok(rows) => rows,
            Err(e) => {
                self.tracing
                    .complete_tracing_error(&tracing_ctx, method, &e.to_string());
                return Err(e.into());
            }
        };

        let response = ApiResponse::new(
            "Products fetched successfully",
            rows.into_iter().map(ProductStockResponse::from).collect::<Vec<_>>(),
        );

        self.cache_store
            .set_to_cache(PRODUCTS_CACHE_KEY, &response, Duration::minutes(5))
            .await;

        self.tracing
            .complete_tracing_success(&tracing_ctx, method, "Products retrieved from DB");

        Ok(response)
    }

    async fn get_product(
        &self,
        product_id: i32,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        let method = Method::Get;
        let tracing_ctx = self.tracing.start_tracing(
            "get_product",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("product.id", product_id.to_string()),
            ],
        );

        let result = self
            .products
            .find_by_id(product_id)
            .await
            .map_err(ServiceError::from)
            .and_then(|found| {
                found.ok_or_else(|| ServiceError::InvalidInput("Product not found".into()))
            });

        match result {
            Ok(product) => {
                self.tracing
                    .complete_tracing_success(&tracing_ctx, method, "Product fetched");
                Ok(ApiResponse::new(
                    "Product fetched successfully",
                    ProductResponse::from(product),
                ))
            }
            Err(e) => {
                self.tracing
                    .complete_tracing_error(&tracing_ctx, method, &e.to_string());
                Err(e)
            }
        }
    }

    async fn delete_product(
        &self,
        product_id: i32,
    ) -> Result<DeleteProductResponse, ServiceError> {
        info!("🗑️ Deleting product {}", product_id);

        let method = Method::Delete;
        let tracing_ctx = self.tracing.start_tracing(
            "delete_product",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("product.id", product_id.to_string()),
            ],
        );

        match self.delete_inner(product_id).await {
            Ok(response) => {
                self.tracing
                    .complete_tracing_success(&tracing_ctx, method, &response.message);
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
