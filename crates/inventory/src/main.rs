use anyhow::{Context, Result};
use dotenv::dotenv;
use inventory::{config::Config, handler::AppRouter, state::AppState};
use shared::{
    config::{ConnectionManager, ConnectionPool},
    utils::{Telemetry, init_logger},
};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let config = Config::init().context("Failed to load configuration")?;

    let mut telemetry = Telemetry::new("inventory-service", config.otel_endpoint.clone());
    let logger_provider = telemetry
        .init_logger()
        .context("Failed to initialize log exporter")?;
    telemetry
        .init_meter()
        .context("Failed to initialize metric exporter")?;
    telemetry
        .init_tracer()
        .context("Failed to initialize span exporter")?;

    init_logger(
        &logger_provider,
        "inventory-service",
        config.is_dev,
        config.enable_file_log,
    );

    info!("🚀 Starting inventory service initialization...");

    let db_pool = ConnectionManager::new_pool(
        &config.database_url,
        config.db_min_conn,
        config.db_max_conn,
    )
    .await
    .context("Failed to initialize database pool")?;

    if config.run_migrations {
        run_migrations(&db_pool)
            .await
            .context("Failed to run database migrations")?;
    }

    let state = AppState::new(db_pool, &config)
        .await
        .context("Failed to create AppState")?;

    info!("✅ Application setup completed successfully.");

    AppRouter::serve(config.port, state)
        .await
        .context("Failed to start server")?;

    info!("🛑 Shutting down inventory service...");

    if let Err(e) = telemetry.shutdown() {
        error!("❌ Telemetry shutdown failed: {e}");
    }

    Ok(())
}

async fn run_migrations(pool: &ConnectionPool) -> Result<()> {
    info!("🗃️ Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("Migration failed")?;
    info!("✅ Migrations applied");
    Ok(())
}
