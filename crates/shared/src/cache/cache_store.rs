use chrono::Duration;
use deadpool_redis::{Connection, Pool};
use serde::{Serialize, de::DeserializeOwned};
use std::sync::Arc;
use tracing::{debug, error, warn};

/// JSON values in Redis with a TTL. Every failure path degrades to a cache
/// miss so callers always fall back to the database.
#[derive(Clone)]
pub struct CacheStore {
    redis_pool: Arc<Pool>,
}

impl CacheStore {
    pub fn new(redis_pool: Pool) -> Self {
        Self {
            redis_pool: Arc::new(redis_pool),
        }
    }

    async fn get_conn(&self) -> Option<Connection> {
        match self.redis_pool.get().await {
            Ok(conn) => Some(conn),
            Err(e) => {
                warn!("🧊 Redis unavailable, skipping cache: {e}");
                None
            }
        }
    }

    pub async fn get_from_cache<T>(&self, key: &str) -> Option<T>
    where
        T: DeserializeOwned,
    {
        let mut conn = self.get_conn().await?;
        let result: redis::RedisResult<Option<String>> =
            redis::cmd("GET").arg(key).query_async(&mut conn).await;

        match result {
            Ok(Some(data)) => match serde_json::from_str::<T>(&data) {
                Ok(parsed) => Some(parsed),
                Err(e) => {
                    error!("Failed to deserialize cached value for key '{key}': {e}");
                    None
                }
            },
            Ok(None) => {
                debug!("Cache miss for key: {key}");
                None
            }
            Err(e) => {
                error!("Redis GET failed for key '{key}': {e}");
                None
            }
        }
    }

    pub async fn set_to_cache<T>(&self, key: &str, data: &T, expiration: Duration)
    where
        T: Serialize,
    {
        let json_data = match serde_json::to_string(data) {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize data for key '{key}': {e}");
                return;
            }
        };

        let Some(mut conn) = self.get_conn().await else {
            return;
        };

        let result: redis::RedisResult<()> = redis::cmd("SET")
            .arg(key)
            .arg(&json_data)
            .arg("EX")
            .arg(expiration.num_seconds().max(1))
            .query_async(&mut conn)
            .await;

        match result {
            Ok(()) => debug!("Cached key '{key}' for {}s", expiration.num_seconds()),
            Err(e) => error!("Failed to set cache key '{key}': {e}"),
        }
    }

    pub async fn delete_from_cache(&self, key: &str) {
        if let Some(mut conn) = self.get_conn().await
            && let Err(e) = redis::cmd("DEL")
                .arg(key)
                .query_async::<()>(&mut conn)
                .await
        {
            error!("Failed to delete key '{key}': {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RedisConfig;

    fn unreachable_store() -> CacheStore {
        let pool = RedisConfig::new("127.0.0.1".into(), 1, 0, None)
            .create_pool()
            .unwrap();
        CacheStore::new(pool)
    }

    #[tokio::test]
    async fn unreachable_redis_reads_as_miss() {
        let store = unreachable_store();
        let value: Option<Vec<i32>> = store.get_from_cache("products:all").await;
        assert!(value.is_none());
    }

    #[tokio::test]
    async fn writes_to_unreachable_redis_do_not_fail() {
        let store = unreachable_store();
        store
            .set_to_cache("products:all", &vec![1, 2, 3], Duration::minutes(5))
            .await;
        store.delete_from_cache("products:all").await;
    }
}
