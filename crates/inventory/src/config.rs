use anyhow::{Context, Result, anyhow};

#[derive(Debug, Clone)]
pub struct RedisSettings {
    pub host: String,
    pub port: u16,
    pub db: u8,
    pub password: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub run_migrations: bool,
    pub port: u16,
    pub db_min_conn: u32,
    pub db_max_conn: u32,
    pub redis: RedisSettings,
    pub ml_service_url: String,
    pub ml_timeout_secs: u64,
    pub otel_endpoint: String,
    pub is_dev: bool,
    pub enable_file_log: bool,
}

impl Config {
    pub fn init() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup, `std::env` in
    /// production and a map in tests.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |key: &str| -> Result<String> {
            lookup(key).with_context(|| format!("Missing environment variable: {key}"))
        };

        let database_url = required("DATABASE_URL")?;
        let jwt_secret = required("JWT_SECRET")?;

        let run_migrations = match required("RUN_MIGRATIONS")?.as_str() {
            "true" => true,
            "false" => false,
            other => {
                return Err(anyhow!(
                    "RUN_MIGRATIONS must be 'true' or 'false', got '{}'",
                    other
                ));
            }
        };

        let port = required("PORT")?
            .parse::<u16>()
            .context("PORT must be a valid u16 integer")?;

        let db_min_conn = parse_or(&lookup, "DB_MIN_CONN", 1u32)?;
        let db_max_conn = parse_or(&lookup, "DB_MAX_CONN", 10u32)?;
        if db_min_conn > db_max_conn {
            return Err(anyhow!(
                "DB_MIN_CONN ({db_min_conn}) must not exceed DB_MAX_CONN ({db_max_conn})"
            ));
        }

        let redis = RedisSettings {
            host: lookup("REDIS_HOST").unwrap_or_else(|| "redis".to_string()),
            port: parse_or(&lookup, "REDIS_PORT", 6379u16)?,
            db: parse_or(&lookup, "REDIS_DB", 0u8)?,
            password: lookup("REDIS_PASSWORD").filter(|p| !p.is_empty()),
        };

        let ml_service_url =
            lookup("ML_SERVICE_URL").unwrap_or_else(|| "http://localhost:8000".to_string());
        let ml_timeout_secs = parse_or(&lookup, "ML_TIMEOUT_SECS", 30u64)?;

        let otel_endpoint =
            lookup("OTEL_ENDPOINT").unwrap_or_else(|| "http://otel-collector:4317".to_string());

        let is_dev = lookup("DEV_MODE")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);
        let enable_file_log = lookup("ENABLE_FILE_LOG")
            .map(|v| v == "true")
            .unwrap_or(false);

        Ok(Self {
            database_url,
            jwt_secret,
            run_migrations,
            port,
            db_min_conn,
            db_max_conn,
            redis,
            ml_service_url,
            ml_timeout_secs,
            otel_endpoint,
            is_dev,
            enable_file_log,
        })
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value: {raw}")),
        None => Ok(default),
    }
}
