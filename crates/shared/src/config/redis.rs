use anyhow::{Context, Result};
use deadpool_redis::{Config, Pool, Runtime};
use tracing::info;

#[derive(Debug, Clone)]
pub struct RedisConfig {
    pub host: String,
    pub port: u16,
    pub db: u8,
    pub password: Option<String>,
}

impl RedisConfig {
    pub fn new(host: String, port: u16, db: u8, password: Option<String>) -> Self {
        Self {
            host,
            port,
            db,
            password,
        }
    }

    pub fn url(&self) -> String {
        match &self.password {
            Some(pw) => format!("redis://:{}@{}:{}/{}", pw, self.host, self.port, self.db),
            None => format!("redis://{}:{}/{}", self.host, self.port, self.db),
        }
    }

    /// Builds the connection pool. No connection is opened until the first
    /// checkout, so a missing Redis only shows up as cache misses.
    pub fn create_pool(&self) -> Result<Pool> {
        info!("Creating redis pool for {}:{}/{}", self.host, self.port, self.db);

        Config::from_url(self.url())
            .create_pool(Some(Runtime::Tokio1))
            .context("Failed to create redis pool")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_without_password() {
        let cfg = RedisConfig::new("localhost".into(), 6379, 2, None);
        assert_eq!(cfg.url(), "redis://localhost:6379/2");
    }

    #[test]
    fn url_with_password() {
        let cfg = RedisConfig::new("cache".into(), 6380, 0, Some("secret".into()));
        assert_eq!(cfg.url(), "redis://:secret@cache:6380/0");
    }
}
