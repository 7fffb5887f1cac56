use crate::{
    abstract_trait::{
        product::DynProductRepository,
        stock::{DynStockHistoryRepository, DynStockRepository, StockServiceTrait},
    },
    domain::{
        requests::{
            non_blank,
            stock::{AddStockRequest, UpdateProductAndStockRequest, UpdateStockRequest},
        },
        response::{
            api::ApiResponse,
            product::{
                AddStockResponse, ProductAndStockResponse, ProductResponse, StockHistoryResponse,
                StockResponse,
            },
        },
    },
    model::{stock::NewStock, stock_history::NewStockHistory},
    service::PRODUCTS_CACHE_KEY,
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use shared::{
    cache::CacheStore,
    errors::ServiceError,
    utils::{Method, Metrics, TracingRecorder, parse_datetime, parse_optional_datetime},
};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct StockService {
    products: DynProductRepository,
    stocks: DynStockRepository,
    history: DynStockHistoryRepository,
    cache_store: Arc<CacheStore>,
    tracing: TracingRecorder,
}

impl StockService {
    pub fn new(
        products: DynProductRepository,
        stocks: DynStockRepository,
        history: DynStockHistoryRepository,
        cache_store: Arc<CacheStore>,
        metrics: Metrics,
    ) -> Self {
        Self {
            products,
            stocks,
            history,
            cache_store,
            tracing: TracingRecorder::new("stock-service", metrics),
        }
    }

    async fn ensure_product(&self, product_id: i32, message: String) -> Result<(), ServiceError> {
        match self.products.find_by_id(product_id).await? {
            Some(_) => Ok(()),
            None => Err(ServiceError::InvalidInput(message)),
        }
    }

    /// Items are applied one by one; a missing product stops the batch but
    /// leaves earlier items in place.
    async fn add_stock_inner(&self, req: &AddStockRequest) -> Result<AddStockResponse, ServiceError> {
        let mut total_stock_added: i64 = 0;
        let mut outcome = Ok(());

        for item in &req.products {
            let applied = self
                .apply_stock_item(item.product_id, item.stock, item.price, &item.expiry_date)
                .await;

            if let Err(e) = applied {
                outcome = Err(e);
                break;
            }

            total_stock_added += i64::from(item.stock);
        }

        self.cache_store.delete_from_cache(PRODUCTS_CACHE_KEY).await;
        outcome?;

        Ok(AddStockResponse {
            message: "Stock updated successfully for products".into(),
            total_stock_added,
        })
    }

    async fn apply_stock_item(
        &self,
        product_id: i32,
        quantity: i32,
        price: f64,
        expiry_date: &str,
    ) -> Result<(), ServiceError> {
        self.ensure_product(product_id, format!("Product with ID {product_id} not found"))
            .await?;

        let expiry_date = parse_datetime(expiry_date).ok_or_else(|| {
            ServiceError::InvalidInput("Expiry date should be a valid date".into())
        })?;

        let updated = self
            .stocks
            .increment(product_id, quantity, Some(price), Some(expiry_date))
            .await?;

        if updated.is_none() {
            self.stocks
                .create(&NewStock {
                    product_id,
                    stock: quantity,
                    price,
                    expiry_date: Some(expiry_date),
                })
                .await?;
        }

        self.history
            .append(&NewStockHistory {
                product_id,
                stock_added: quantity,
                price,
                expiry_date: Some(expiry_date),
            })
            .await?;

        Ok(())
    }

    async fn update_stock_inner(
        &self,
        product_id: i32,
        req: &UpdateStockRequest,
    ) -> Result<ApiResponse<StockResponse>, ServiceError> {
        self.ensure_product(product_id, "Product not found".into())
            .await?;

        let expiry_date = parse_optional_datetime(req.expiry_date.as_deref())
            .map_err(ServiceError::InvalidInput)?;

        let stock = self
            .stocks
            .increment(product_id, req.stock, req.price, expiry_date)
            .await?
            .ok_or_else(|| {
                ServiceError::InvalidInput("No stock record found for this product".into())
            })?;

        self.history
            .append(&NewStockHistory {
                product_id,
                stock_added: req.stock,
                price: stock.price,
                expiry_date: stock.expiry_date,
            })
            .await?;

        self.cache_store.delete_from_cache(PRODUCTS_CACHE_KEY).await;

        Ok(ApiResponse::new(
            "Stock updated successfully",
            StockResponse::from(stock),
        ))
    }

    async fn update_product_and_stock_inner(
        &self,
        product_id: i32,
        req: &UpdateProductAndStockRequest,
    ) -> Result<ApiResponse<ProductAndStockResponse>, ServiceError> {
        let mut product = self
            .products
            .find_by_id(product_id)
            .await?
            .ok_or_else(|| ServiceError::InvalidInput("Product not found".into()))?;

        let expiry_date = parse_optional_datetime(req.expiry_date.as_deref())
            .map_err(ServiceError::InvalidInput)?;

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

        let product = self.products.update(&product).await?;

        let stock = match self.stocks.find_by_product(product_id).await? {
            Some(existing) => {
                let price = req.price.unwrap_or(existing.price);
                let expiry_date = expiry_date.or(existing.expiry_date);
                self.stocks
                    .replace(product_id, req.stock, price, expiry_date)
                    .await?
                    .ok_or_else(|| {
                        ServiceError::Internal(format!(
                            "stock row of product {product_id} vanished during update"
                        ))
                    })?
            }
            None => {
                self.stocks
                    .create(&NewStock {
                        product_id,
                        stock: req.stock,
                        price: req.price.unwrap_or(0.0),
                        expiry_date,
                    })
                    .await?
            }
        };

        if req.stock > 0 {
            self.history
                .append(&NewStockHistory {
                    product_id,
                    stock_added: req.stock,
                    price: stock.price,
                    expiry_date: stock.expiry_date,
                })
                .await?;
        }

        self.cache_store.delete_from_cache(PRODUCTS_CACHE_KEY).await;

        Ok(ApiResponse::new(
            "Product and stock updated successfully",
            ProductAndStockResponse {
                product: ProductResponse::from(product),
                stock: StockResponse::from(stock),
            },
        ))
    }
}

#[async_trait]
impl StockServiceTrait for StockService {
    async fn add_stock(&self, req: &AddStockRequest) -> Result<AddStockResponse, ServiceError> {
        info!("📦 Adding stock for {} products", req.products.len());

        let method = Method::Post;
        let tracing_ctx = self.tracing.start_tracing(
            "add_stock",
            vec![
                KeyValue::new("component", "stock"),
                KeyValue::new("items", req.products.len() as i64),
            ],
        );

        match self.add_stock_inner(req).await {
            Ok(response) => {
                self.tracing
                    .complete_tracing_success(&tracing_ctx, method, "Stock added");
                Ok(response)
            }
            Err(e) => {
                self.tracing
                    .complete_tracing_error(&tracing_ctx, method, &e.to_string());
                Err(e)
            }
        }
    }

    async fn update_stock(
        &self,
        product_id: i32,
        req: &UpdateStockRequest,
    ) -> Result<ApiResponse<StockResponse>, ServiceError> {
        info!("📦 Updating stock of product {}", product_id);

        let method = Method::Put;
        let tracing_ctx = self.tracing.start_tracing(
            "update_stock",
            vec![
                KeyValue::new("component", "stock"),
                KeyValue::new("product.id", product_id.to_string()),
            ],
        );

        match self.update_stock_inner(product_id, req).await {
            Ok(response) => {
                self.tracing
                    .complete_tracing_success(&tracing_ctx, method, "Stock updated");
                Ok(response)
            }
            Err(e) => {
                self.tracing
                    .complete_tracing_error(&tracing_ctx, method, &e.to_string());
                Err(e)
            }
        }
    }

    async fn update_product_and_stock(
        &self,
        product_id: i32,
        req: &UpdateProductAndStockRequest,
    ) -> Result<ApiResponse<ProductAndStockResponse>, ServiceError> {
        info!("✏️ Updating product {} and its stock", product_id);

        let method = Method::Put;
        let tracing_ctx = self.tracing.start_tracing(
            "update_product_and_stock",
            vec![
                KeyValue::new("component", "stock"),
                KeyValue::new("product.id", product_id.to_string()),
            ],
        );

        match self.update_product_and_stock_inner(product_id, req).await {
            Ok(response) => {
                self.tracing.complete_tracing_success(
                    &tracing_ctx,
                    method,
                    "Product and stock updated",
                );
                Ok(response)
            }
            Err(e) => {
                self.tracing
                    .complete_tracing_error(&tracing_ctx, method, &e.to_string());
                Err(e)
            }
        }
    }

    async fn get_stock_history(
        &self,
        product_id: i32,
    ) -> Result<ApiResponse<Vec<StockHistoryResponse>>, ServiceError> {
        let method = Method::Get;
        let tracing_ctx = self.tracing.start_tracing(
            "get_stock_history",
            vec![
                KeyValue::new("component", "stock"),
                KeyValue::new("product.id", product_id.to_string()),
            ],
        );

        let entries = match self.history.find_by_product(product_id).await {
            Ok(entries) => entries,
            Err(e) => {
                self.tracing
                    .complete_tracing_error(&tracing_ctx, method, &e.to_string());
                return Err(e.into());
            }
        };

        if entries.is_empty() {
            self.tracing
                .complete_tracing_error(&tracing_ctx, method, "No stock history");
            return Err(ServiceError::NotFound(
                "No stock history found for this product".into(),
            ));
        }

        self.tracing
            .complete_tracing_success(&tracing_ctx, method, "Stock history fetched");

        Ok(ApiResponse::new(
            "Stock history fetched successfully",
            entries.into_iter().map(StockHistoryResponse::from).collect(),
        ))
    }
}
