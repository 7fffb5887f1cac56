use crate::{
    abstract_trait::{JwtServiceTrait, TokenKind},
    errors::ServiceError,
};
use chrono::Utc;
use jsonwebtoken::{
    DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: i64,
    pub exp: usize,
    pub iat: usize,
    pub token_type: TokenKind,
}

/// HS256 keys derived from `JWT_SECRET`.
#[derive(Clone)]
pub struct JwtConfig {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig").finish_non_exhaustive()
    }
}

impl JwtConfig {
    pub fn new(jwt_secret: &str) -> Self {
        JwtConfig {
            encoding: EncodingKey::from_secret(jwt_secret.as_bytes()),
            decoding: DecodingKey::from_secret(jwt_secret.as_bytes()),
        }
    }
}

impl JwtServiceTrait for JwtConfig {
    fn issue(&self, user_id: i64, kind: TokenKind) -> Result<String, ServiceError> {
        let now = Utc::now();
        let claims = Claims {
            user_id,
            exp: (now + kind.lifetime()).timestamp() as usize,
            iat: now.timestamp() as usize,
            token_type: kind,
        };

        encode(&Header::default(), &claims, &self.encoding).map_err(ServiceError::Jwt)
    }

    fn verify(&self, token: &str, expected: TokenKind) -> Result<i64, ServiceError> {
        let token_data = decode::<Claims>(token, &self.decoding, &Validation::default())
            .map_err(|err| match err.kind() {
                ErrorKind::ExpiredSignature => ServiceError::TokenExpired,
                // a token_type outside the enum fails claim decoding
                ErrorKind::Json(_) => ServiceError::InvalidTokenType,
                _ => ServiceError::Jwt(err),
            })?;

        if token_data.claims.token_type != expected {
            return Err(ServiceError::InvalidTokenType);
        }

        Ok(token_data.claims.user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_token_carries_user_id() {
        let jwt = JwtConfig::new("test-secret");
        let token = jwt.issue(42, TokenKind::Access).unwrap();
        assert_eq!(jwt.verify(&token, TokenKind::Access).unwrap(), 42);
    }

    #[test]
    fn refresh_token_is_rejected_where_access_is_expected() {
        let jwt = JwtConfig::new("test-secret");
        let token = jwt.issue(7, TokenKind::Refresh).unwrap();
        assert!(matches!(
            jwt.verify(&token, TokenKind::Access),
            Err(ServiceError::InvalidTokenType)
        ));
    }

    #[test]
    fn token_signed_with_other_secret_fails() {
        let token = JwtConfig::new("one").issue(1, TokenKind::Access).unwrap();
        assert!(matches!(
            JwtConfig::new("two").verify(&token, TokenKind::Access),
            Err(ServiceError::Jwt(_))
        ));
    }

    #[test]
    fn refresh_outlives_access() {
        assert!(TokenKind::Refresh.lifetime() > TokenKind::Access.lifetime());
    }
}
