use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynSequenceRepository = Arc<dyn SequenceRepositoryTrait + Send + Sync>;

/// Named, monotonically increasing integer ids. The first value for a new
/// name is 1.
#[async_trait]
pub trait SequenceRepositoryTrait {
    async fn next_sequence(&self, name: &str) -> Result<i32, RepositoryError>;
}
