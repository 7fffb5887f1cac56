use crate::abstract_trait::sequence::SequenceRepositoryTrait;
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::error;

#[derive(Clone)]
pub struct SequenceRepository {
    db: ConnectionPool,
}

impl SequenceRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SequenceRepositoryTrait for SequenceRepository {
    async fn next_sequence(&self, name: &str) -> Result<i32, RepositoryError> {
        sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO counters (name, seq)
            VALUES ($1, 1)
            ON CONFLICT (name) DO UPDATE SET seq = counters.seq + 1
            RETURNING seq
            "#,
        )
        .bind(name)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to increment counter '{}': {:?}", name, e);
            RepositoryError::from(e)
        })
    }
}
