use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::auth::{self, JwtError};
use crate::core::ArcContext;

/// Identity resolved from a valid bearer token.
///
/// Extracted only once a handler has matched, so unknown paths and methods never reach the
/// token check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthenticatedUser(pub String);

impl FromRequestParts<ArcContext> for AuthenticatedUser {
    type Rejection = JwtError;

    async fn from_request_parts(parts: &mut Parts, context: &ArcContext) -> Result<Self, Self::Rejection> {
        let claims = auth::decode_session_token_from_headers(&context.jwt, &parts.headers)?;
        tracing::debug!(user_id = %claims.sub, "Authenticated user accessing protected route");
        Ok(Self(claims.sub))
    }
}
