//! Authentication middleware for bearer token validation

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use tracing::warn;

use crate::{error::ApiError, jwt::TokenType, state::AppState};

const INVALID_TOKEN: &str = "Missing or invalid bearer token";

/// Authenticated user information
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub email: String,
}

/// Authentication middleware
///
/// Rejects the request with 401 unless it carries a valid access token, then
/// hands the caller's identity to the handler as an `AuthUser` extension.
pub async fn auth_middleware(
    State(state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let TypedHeader(Authorization(bearer)) = bearer.ok_or_else(|| {
        warn!("Rejected {} {}: no bearer token", req.method(), req.uri());
        ApiError::Unauthorized(INVALID_TOKEN.to_string())
    })?;

    let claims = state
        .jwt_service
        .validate_token(bearer.token(), TokenType::Access)
        .map_err(|e| {
            warn!("Failed to validate token: {}", e);
            ApiError::Unauthorized(INVALID_TOKEN.to_string())
        })?;

    req.extensions_mut().insert(AuthUser { email: claims.sub });

    Ok(next.run(req).await)
}
