mod jwt;

pub use self::jwt::{DynJwtService, JwtServiceTrait, TokenKind};
