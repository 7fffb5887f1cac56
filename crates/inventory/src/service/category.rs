use crate::{
    abstract_trait::{
        category::{CategoryServiceTrait, DynCategoryRepository},
        sequence::DynSequenceRepository,
    },
    domain::{
        requests::{
            category::{CreateCategoryRequest, UpdateCategoryRequest},
            non_blank,
        },
        response::{
            api::{ApiResponse, MessageResponse},
            category::CategoryResponse,
        },
    },
};
use async_trait::async_trait;
use chrono::Duration;
use opentelemetry::KeyValue;
use shared::{
    cache::CacheStore,
    errors::ServiceError,
    utils::{Method, Metrics, TracingRecorder},
};
use std::sync::Arc;
use tracing::info;

const CATEGORIES_CACHE_KEY: &str = "categories:all";

#[derive(Clone)]
pub struct CategoryService {
    categories: DynCategoryRepository,
    sequences: DynSequenceRepository,
    cache_store: Arc<CacheStore>,
    tracing: TracingRecorder,
}

impl CategoryService {
    pub fn new(
        categories: DynCategoryRepository,
        sequences: DynSequenceRepository,
        cache_store: Arc<CacheStore>,
        metrics: Metrics,
    ) -> Self {
        Self {
            categories,
            sequences,
            cache_store,
            tracing: TracingRecorder::new("category-service", metrics),
        }
    }

    fn not_found() -> ServiceError {
        ServiceError::InvalidInput("Category not found".into())
    }

    async fn create_inner(
        &self,
        req: &CreateCategoryRequest,
    ) -> Result<ApiResponse<CategoryResponse>, ServiceError> {
        let name = req.name.trim();

        if self.categories.find_by_name(name).await?.is_some() {
            return Err(ServiceError::InvalidInput(
                "Category name already exists".into(),
            ));
        }

        let category_id = self.sequences.next_sequence("categoryId").await?;
        let category = self
            .categories
            .create(category_id, name, req.description.as_deref())
            .await?;

        self.cache_store.delete_from_cache(CATEGORIES_CACHE_KEY).await;

        Ok(ApiResponse::new(
            "Category created successfully",
            CategoryResponse::from(category),
        ))
    }

    async fn update_inner(
        &self,
        category_id: i32,
        req: &UpdateCategoryRequest,
    ) -> Result<ApiResponse<CategoryResponse>, ServiceError> {
        let mut category = self
            .categories
            .find_by_id(category_id)
            .await?
            .ok_or_else(Self::not_found)?;

        if let Some(name) = non_blank(&req.name) {
            if name != category.name {
                let taken = self.categories.find_by_name(&name).await?;
                if taken.is_some_and(|other| other.category_id != category_id) {
                    return Err(ServiceError::InvalidInput(
                        "Category name already exists".into(),
                    ));
                }
            }
            category.name = name;
        }

        if let Some(description) = non_blank(&req.description) {
            category.description = Some(description);
        }

        let updated = self.categories.update(&category).await?;
        self.cache_store.delete_from_cache(CATEGORIES_CACHE_KEY).await;

        Ok(ApiResponse::new(
            "Category updated successfully",
            CategoryResponse::from(updated),
        ))
    }
}

#[async_trait]
impl CategoryServiceTrait for CategoryService {
    async fn create(
        &self,
        req: &CreateCategoryRequest,
    ) -> Result<ApiResponse<CategoryResponse>, ServiceError> {
        info!("🏷️ Creating category '{}'", req.name);

        let tracing_ctx = self.tracing.start_tracing(
            "create_category",
            vec![
                KeyValue::new("component", "category"),
                KeyValue::new("category.name", req.name.clone()),
            ],
        );

        let result = self.create_inner(req).await;
        self.tracing.finish(&tracing_ctx, Method::Post, result, "Category created")
    }

    async fn find_all(&self) -> Result<ApiResponse<Vec<CategoryResponse>>, ServiceError> {
        let tracing_ctx = self
            .tracing
            .start_tracing("find_all_categories", vec![KeyValue::new("component", "category")]);

        if let Some(cached) = self
            .cache_store
            .get_from_cache::<ApiResponse<Vec<CategoryResponse>>>(CATEGORIES_CACHE_KEY)
            .await
        {
            info!("✅ Found {} categories in cache", cached.data.len());
            return self
                .tracing
                .finish(&tracing_ctx, Method::Get, Ok(cached), "Categories from cache");
        }

        let result = self
            .categories
            .find_all()
            .await
            .map_err(ServiceError::from)
            .map(|rows| {
                ApiResponse::new(
                    "Categories fetched successfully",
                    rows.into_iter().map(CategoryResponse::from).collect::<Vec<_>>(),
                )
            });

        if let Ok(response) = &result {
            self.cache_store
                .set_to_cache(CATEGORIES_CACHE_KEY, response, Duration::minutes(10))
                .await;
        }

        self.tracing.finish(&tracing_ctx, Method::Get, result, "Categories fetched")
    }

    async fn find_by_id(
        &self,
        category_id: i32,
    ) -> Result<ApiResponse<CategoryResponse>, ServiceError> {
        let tracing_ctx = self.tracing.start_tracing(
            "find_category",
            vec![
                KeyValue::new("component", "category"),
                KeyValue::new("category.id", category_id.to_string()),
            ],
        );

        let result = match self.categories.find_by_id(category_id).await {
            Ok(Some(category)) => Ok(ApiResponse::new(
                "Category fetched successfully",
                CategoryResponse::from(category),
            )),
            Ok(None) => Err(Self::not_found()),
            Err(e) => Err(e.into()),
        };

        self.tracing.finish(&tracing_ctx, Method::Get, result, "Category fetched")
    }

    async fn update(
        &self,
        category_id: i32,
        req: &UpdateCategoryRequest,
    ) -> Result<ApiResponse<CategoryResponse>, ServiceError> {
        info!("✏️ Updating category {}", category_id);

        let tracing_ctx = self.tracing.start_tracing(
            "update_category",
            vec![
                KeyValue::new("component", "category"),
                KeyValue::new("category.id", category_id.to_string()),
            ],
        );

        let result = self.update_inner(category_id, req).await;
        self.tracing.finish(&tracing_ctx, Method::Put, result, "Category updated")
    }

    async fn delete(&self, category_id: i32) -> Result<MessageResponse, ServiceError> {
        info!("🗑️ Deleting category {}", category_id);

        let tracing_ctx = self.tracing.start_tracing(
            "delete_category",
            vec![
                KeyValue::new("component", "category"),
                KeyValue::new("category.id", category_id.to_string()),
            ],
        );

        let result = match self.categories.delete(category_id).await {
            Ok(true) => {
                self.cache_store.delete_from_cache(CATEGORIES_CACHE_KEY).await;
                Ok(MessageResponse::new("Category deleted successfully"))
            }
            Ok(false) => Err(Self::not_found()),
            Err(e) => Err(e.into()),
        };

        self.tracing.finish(&tracing_ctx, Method::Delete, result, "Category deleted")
    }
}
