use crate::{
    abstract_trait::ml_client::DynMlClient,
    config::Config,
    di::{DependenciesInject, DependenciesInjectDeps},
    ml_client::MlHttpClient,
};
use anyhow::{Context, Result};
use prometheus_client::registry::Registry;
use shared::{
    abstract_trait::DynJwtService,
    cache::CacheStore,
    config::{ConnectionPool, JwtConfig, RedisConfig},
    utils::{SystemMetrics, run_metrics_collector},
};
use std::{fmt, sync::Arc};
use tokio::sync::Mutex;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub jwt_config: DynJwtService,
    pub di_container: DependenciesInject,
    pub registry: Arc<Mutex<Registry>>,
    pub system_metrics: Arc<SystemMetrics>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("di_container", &self.di_container)
            .field("system_metrics", &self.system_metrics)
            .finish()
    }
}

impl AppState {
    pub async fn new(pool: ConnectionPool, config: &Config) -> Result<Self> {
        let jwt_config = Arc::new(JwtConfig::new(&config.jwt_secret)) as DynJwtService;
        let mut registry = Registry::default();
        let system_metrics = Arc::new(SystemMetrics::new());

        info!("🧊 Initializing Redis cache for inventory service");
        let redis_config = RedisConfig::new(
            config.redis.host.clone(),
            config.redis.port,
            config.redis.db,
            config.redis.password.clone(),
        );
        let redis_pool = redis_config
            .create_pool()
            .context("Failed to create Redis pool")?;
        let cache = Arc::new(CacheStore::new(redis_pool));

        let ml_client = Arc::new(
            MlHttpClient::new(config.ml_service_url.clone(), config.ml_timeout_secs)
                .context("Failed to build ML service client")?,
        ) as DynMlClient;

        let deps = DependenciesInjectDeps {
            pool,
            cache,
            ml_client,
        };

        let di_container = DependenciesInject::new(deps, &mut registry);

        registry.register_metrics(&system_metrics);

        tokio::spawn(run_metrics_collector(system_metrics.clone()));

        Ok(Self {
            jwt_config,
            di_container,
            registry: Arc::new(Mutex::new(registry)),
            system_metrics,
        })
    }
}

trait MetricsRegister {
    fn register_metrics(&mut self, metrics: &SystemMetrics);
}

impl MetricsRegister for Registry {
    fn register_metrics(&mut self, metrics: &SystemMetrics) {
        metrics.register(self);
    }
}
