use crate::{
    abstract_trait::notification::ExpiryAlertRepositoryTrait,
    model::expiry_alert::{AlertLevel, ExpiryAlert, NewExpiryAlert, NotificationStatus},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{error, info};

#[derive(Clone)]
pub struct ExpiryAlertRepository {
    db: ConnectionPool,
}

impl ExpiryAlertRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ExpiryAlertRepositoryTrait for ExpiryAlertRepository {
    async fn find_active_by_stock(
        &self,
        stock_id: i32,
    ) -> Result<Option<ExpiryAlert>, RepositoryError> {
        sqlx::query_as::<_, ExpiryAlert>(
            r#"
            SELECT * FROM expiry_alerts
            WHERE stock_id = $1
              AND notification_status IN ('pending', 'acknowledged')
            "#,
        )
        .bind(stock_id)
        .fetch_optional(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to look up alert for stock {}: {:?}", stock_id, e);
            RepositoryError::from(e)
        })
    }

    async fn create(&self, alert: &NewExpiryAlert) -> Result<ExpiryAlert, RepositoryError> {
        sqlx::query_as::<_, ExpiryAlert>(
            r#"
            INSERT INTO expiry_alerts
                (stock_id, product_id, alert_level, expiry_date, alert_generated_on, notification_status)
            VALUES ($1, $2, $3, $4, $5, 'pending')
            RETURNING *
            "#,
        )
        .bind(alert.stock_id)
        .bind(alert.product_id)
        .bind(alert.alert_level.as_str())
        .bind(alert.expiry_date)
        .bind(alert.alert_generated_on)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to create alert for stock {}: {:?}", alert.stock_id, e);
            RepositoryError::from(e)
        })
    }

    async fn refresh(
        &self,
        alert_id: i32,
        level: AlertLevel,
        expiry_date: DateTime<Utc>,
    ) -> Result<ExpiryAlert, RepositoryError> {
        info!("🔁 Alert {} refreshed at level {}", alert_id, level);

        sqlx::query_as::<_, ExpiryAlert>(
            r#"
            UPDATE expiry_alerts
            SET alert_level = $2,
                expiry_date = $3,
                updated_at = NOW()
            WHERE alert_id = $1
            RETURNING *
            "#,
        )
        .bind(alert_id)
        .bind(level.as_str())
        .bind(expiry_date)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to update alert {}: {:?}", alert_id, e);
            RepositoryError::from(e)
        })
    }

    async fn find_filtered(
        &self,
        level: Option<AlertLevel>,
        status: Option<NotificationStatus>,
    ) -> Result<Vec<ExpiryAlert>, RepositoryError> {
        sqlx::query_as::<_, ExpiryAlert>(
            r#"
            SELECT * FROM expiry_alerts
            WHERE ($1::TEXT IS NULL OR alert_level = $1)
              AND ($2::TEXT IS NULL OR notification_status = $2)
            ORDER BY alert_generated_on DESC, alert_id DESC
            "#,
        )
        .bind(level.map(|l| l.as_str()))
        .bind(status.map(|s| s.as_str()))
        .fetch_all(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch alerts: {:?}", e);
            RepositoryError::from(e)
        })
    }

    async fn find_by_product(&self, product_id: i32) -> Result<Vec<ExpiryAlert>, RepositoryError> {
        sqlx::query_as::<_, ExpiryAlert>(
            r#"
            SELECT * FROM expiry_alerts
            WHERE product_id = $1
            ORDER BY alert_generated_on DESC, alert_id DESC
            "#,
        )
        .bind(product_id)
        .fetch_all(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch alerts for product {}: {:?}", product_id, e);
            RepositoryError::from(e)
        })
    }

    async fn acknowledge(&self, alert_id: i32) -> Result<Option<ExpiryAlert>, RepositoryError> {
        sqlx::query_as::<_, ExpiryAlert>(
            r#"
            UPDATE expiry_alerts
            SET notification_status = 'acknowledged',
                updated_at = NOW()
            WHERE alert_id = $1
            RETURNING *
            "#,
        )
        .bind(alert_id)
        .fetch_optional(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to acknowledge alert {}: {:?}", alert_id, e);
            RepositoryError::from(e)
        })
    }

    async fn delete(&self, alert_id: i32) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM expiry_alerts WHERE alert_id = $1")
            .bind(alert_id)
            .execute(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to delete alert {}: {:?}", alert_id, e);
                RepositoryError::from(e)
            })?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_pending_by_levels(
        &self,
        levels: &[AlertLevel],
        limit: i64,
    ) -> Result<Vec<ExpiryAlert>, RepositoryError> {
        let levels: Vec<String> = levels.iter().map(|l| l.as_str().to_string()).collect();

        sqlx::query_as::<_, ExpiryAlert>(
            r#"
            SELECT * FROM expiry_alerts
            WHERE notification_status = 'pending'
              AND alert_level = ANY($1)
            ORDER BY
                CASE alert_level WHEN 'red' THEN 2 WHEN 'yellow' THEN 1 ELSE 0 END DESC,
                alert_generated_on DESC,
                alert_id DESC
            LIMIT $2
            "#,
        )
        .bind(levels)
        .bind(limit)
        .fetch_all(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch pending alerts: {:?}", e);
            RepositoryError::from(e)
        })
    }
}
