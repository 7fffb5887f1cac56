use async_trait::async_trait;
use serde_json::Value;
use shared::errors::ServiceError;
use std::sync::Arc;

pub type DynMlClient = Arc<dyn MlClientTrait + Send + Sync>;

#[async_trait]
pub trait MlClientTrait {
    /// POSTs `body` to `path` on the prediction service and returns the JSON
    /// reply. Single attempt.
    async fn post_json(&self, path: &str, body: &Value) -> Result<Value, ServiceError>;
}
