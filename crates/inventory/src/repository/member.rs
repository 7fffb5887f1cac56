use crate::{
    abstract_trait::membership::MemberRepositoryTrait,
    model::membership::{Member, MemberFilter, MemberStatus, NewMember},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::error;

#[derive(Clone)]
pub struct MemberRepository {
    db: ConnectionPool,
}

impl MemberRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MemberRepositoryTrait for MemberRepository {
    async fn create(&self, member: &NewMember) -> Result<Member, RepositoryError> {
        sqlx::query_as::<_, Member>(
            r#"
            INSERT INTO members (member_id, name, email, plan_id, status, renewal_date)
            VALUES ($1, $2, $3, $4, 'Active', $5)
            RETURNING *
            "#,
        )
        .bind(member.member_id)
        .bind(&member.name)
        .bind(&member.email)
        .bind(member.plan_id)
        .bind(member.renewal_date)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to create member '{}': {:?}", member.email, e);
            RepositoryError::from(e)
        })
    }

    async fn find_filtered(&self, filter: &MemberFilter) -> Result<Vec<Member>, RepositoryError> {
        sqlx::query_as::<_, Member>(
            r#"
            SELECT * FROM members
            WHERE ($1::TEXT IS NULL OR name ILIKE '%' || $1 || '%' OR email ILIKE '%' || $1 || '%')
              AND ($2::TEXT IS NULL OR status = $2)
              AND ($3::INTEGER IS NULL OR plan_id = $3)
            ORDER BY created_at DESC, member_id DESC
            "#,
        )
        .bind(filter.search.as_deref())
        .bind(filter.status.map(|s| s.as_str()))
        .bind(filter.plan_id)
        .fetch_all(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch members: {:?}", e);
            RepositoryError::from(e)
        })
    }

    async fn find_by_id(&self, member_id: i32) -> Result<Option<Member>, RepositoryError> {
        sqlx::query_as::<_, Member>("SELECT * FROM members WHERE member_id = $1")
            .bind(member_id)
            .fetch_optional(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch member {}: {:?}", member_id, e);
                RepositoryError::from(e)
            })
    }

    async fn update_status(
        &self,
        member_id: i32,
        status: MemberStatus,
    ) -> Result<Option<Member>, RepositoryError> {
        sqlx::query_as::<_, Member>(
            r#"
            UPDATE members
            SET status = $2, updated_at = NOW()
            WHERE member_id = $1
            RETURNING *
            "#,
        )
        .bind(member_id)
        .bind(status.as_str())
        .fetch_optional(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to update member {}: {:?}", member_id, e);
            RepositoryError::from(e)
        })
    }

    async fn delete(&self, member_id: i32) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM members WHERE member_id = $1")
            .bind(member_id)
            .execute(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to delete member {}: {:?}", member_id, e);
                RepositoryError::from(e)
            })?;

        Ok(result.rows_affected() > 0)
    }

    async fn count_active(&self) -> Result<i64, RepositoryError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM members WHERE status = 'Active'")
            .fetch_one(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to count members: {:?}", e);
                RepositoryError::from(e)
            })
    }

    async fn active_revenue(&self) -> Result<f64, RepositoryError> {
        sqlx::query_scalar::<_, f64>(
            r#"
            SELECT COALESCE(SUM(p.price), 0)::DOUBLE PRECISION
            FROM members m
            JOIN plans p ON p.plan_id = m.plan_id
            WHERE m.status = 'Active'
            "#,
        )
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to sum membership revenue: {:?}", e);
            RepositoryError::from(e)
        })
    }

    async fn count_renewals_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<i64, RepositoryError> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM members WHERE renewal_date >= $1 AND renewal_date <= $2",
        )
        .bind(from)
        .bind(to)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to count renewals: {:?}", e);
            RepositoryError::from(e)
        })
    }
}
