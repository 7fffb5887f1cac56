use crate::abstract_trait::ml_client::MlClientTrait;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use shared::errors::ServiceError;
use std::time::Duration;
use tracing::{debug, error};

/// JSON-over-HTTP client for the external forecasting service.
#[derive(Clone)]
pub struct MlHttpClient {
    client: reqwest::Client,
    base_url: String,
}

impl MlHttpClient {
    pub fn new(base_url: impl Into<String>, timeout_secs: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to build ML service HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl MlClientTrait for MlHttpClient {
    async fn post_json(&self, path: &str, body: &Value) -> Result<Value, ServiceError> {
        let url = self.url(path);
        debug!("📡 POST {}", url);

        let response = self.client.post(&url).json(body).send().await.map_err(|e| {
            error!("❌ ML service unreachable at {}: {}", url, e);
            ServiceError::from(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            error!("❌ ML service answered {} for {}: {}", status, url, detail);
            return Err(ServiceError::Upstream(format!("{url} returned {status}")));
        }

        Ok(response.json::<Value>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_paths_without_double_slashes() {
        let client = MlHttpClient::new("http://localhost:8000/", 5).unwrap();
        assert_eq!(
            client.url("/predict-stock"),
            "http://localhost:8000/predict-stock"
        );
        assert_eq!(
            client.url("train-stock-model"),
            "http://localhost:8000/train-stock-model"
        );
    }

    #[tokio::test]
    async fn unreachable_service_is_an_upstream_error() {
        let client = MlHttpClient::new("http://127.0.0.1:1", 2).unwrap();
        let err = client
            .post_json("/predict-stock", &serde_json::json!({ "productId": 1 }))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Upstream(_)));
    }
}
