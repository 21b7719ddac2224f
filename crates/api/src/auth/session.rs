use axum::{extract::FromRequestParts, http::request::Parts};

use crate::auth::Claims;
use crate::error::AppError;

/// Extractor for the authenticated session. The JWT middleware stores
/// verified claims in request extensions; a request without them is
/// rejected with 401 before the handler body runs.
pub struct AuthSession(pub Claims);

impl<S> FromRequestParts<S> for AuthSession
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(AuthSession)
            .ok_or_else(|| AppError::Unauthenticated("login required".to_string()))
    }
}
