use axum::{
    Extension, Json,
    body::Body,
    http::{Request, StatusCode, header},
    middleware::Next,
    response::IntoResponse,
};
use axum_extra::extract::cookie::CookieJar;
use shared::{
    abstract_trait::{DynJwtService, TokenKind},
    errors::ErrorResponse,
};
use tracing::warn;

/// Token from the `token` cookie, falling back to `Authorization: Bearer`.
fn extract_token(cookie_jar: &CookieJar, req: &Request<Body>) -> Option<String> {
    cookie_jar
        .get("token")
        .map(|cookie| cookie.value().to_string())
        .or_else(|| {
            req.headers()
                .get(header::AUTHORIZATION)
                .and_then(|auth_header| auth_header.to_str().ok())
                .and_then(|auth_value| auth_value.strip_prefix("Bearer ").map(str::to_owned))
        })
}

/// Verifies an access token minted by the auth service and stores the
/// caller's user id in the request extensions.
pub async fn auth_middleware(
    cookie_jar: CookieJar,
    Extension(jwt): Extension<DynJwtService>,
    mut req: Request<Body>,
    next: Next,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorResponse>)> {
    let Some(token) = extract_token(&cookie_jar, &req) else {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::new(
                "fail",
                "You are not logged in, please provide token",
            )),
        ));
    };

    let user_id = match jwt.verify(&token, TokenKind::Access) {
        Ok(id) => id,
        Err(e) => {
            warn!("🔒 Rejected token: {e}");
            return Err((
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse::new("fail", "Invalid token")),
            ));
        }
    };

    req.extensions_mut().insert(user_id);

    Ok(next.run(req).await)
}
