use crate::errors::ServiceError;
use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub type DynJwtService = Arc<dyn JwtServiceTrait + Send + Sync>;

/// Kind of token carried in the `token_type` claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    pub fn lifetime(self) -> Duration {
        match self {
            TokenKind::Access => Duration::minutes(60),
            TokenKind::Refresh => Duration::days(7),
        }
    }
}

/// Signs and checks the tokens guarding the `/api` routes.
///
/// The inventory service only verifies; issuing is kept for operators
/// minting tokens and for tests.
pub trait JwtServiceTrait: Send + Sync + std::fmt::Debug {
    fn issue(&self, user_id: i64, kind: TokenKind) -> Result<String, ServiceError>;
    fn verify(&self, token: &str, expected: TokenKind) -> Result<i64, ServiceError>;
}
