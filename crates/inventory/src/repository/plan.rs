use crate::{
    abstract_trait::membership::PlanRepositoryTrait,
    model::membership::{NewPlan, Plan},
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::error;

#[derive(Clone)]
pub struct PlanRepository {
    db: ConnectionPool,
}

impl PlanRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PlanRepositoryTrait for PlanRepository {
    async fn create(&self, plan: &NewPlan) -> Result<Plan, RepositoryError> {
        sqlx::query_as::<_, Plan>(
            r#"
            INSERT INTO plans (plan_id, name, price, features)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(plan.plan_id)
        .bind(&plan.name)
        .bind(plan.price)
        .bind(&plan.features)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to create plan '{}': {:?}", plan.name, e);
            RepositoryError::from(e)
        })
    }

    async fn find_all(&self) -> Result<Vec<Plan>, RepositoryError> {
        sqlx::query_as::<_, Plan>("SELECT * FROM plans ORDER BY price ASC, plan_id ASC")
            .fetch_all(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch plans: {:?}", e);
                RepositoryError::from(e)
            })
    }

    async fn find_by_id(&self, plan_id: i32) -> Result<Option<Plan>, RepositoryError> {
        sqlx::query_as::<_, Plan>("SELECT * FROM plans WHERE plan_id = $1")
            .bind(plan_id)
            .fetch_optional(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch plan {}: {:?}", plan_id, e);
                RepositoryError::from(e)
            })
    }

    async fn count(&self) -> Result<i64, RepositoryError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM plans")
            .fetch_one(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to count plans: {:?}", e);
                RepositoryError::from(e)
            })
    }

    async fn adjust_subscribers(&self, plan_id: i32, delta: i32) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            UPDATE plans
            SET subscribers = GREATEST(subscribers + $2, 0), updated_at = NOW()
            WHERE plan_id = $1
            "#,
        )
        .bind(plan_id)
        .bind(delta)
        .execute(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to adjust subscribers of plan {}: {:?}", plan_id, e);
            RepositoryError::from(e)
        })?;

        Ok(())
    }
}
