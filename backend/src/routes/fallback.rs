use axum::http::Uri;

use crate::core::ApiError;

/// The one place a 404 is produced, for unknown paths and unknown ids alike.
#[must_use]
pub fn not_found(uri: &Uri) -> ApiError {
    ApiError::NotFound(uri.path().to_string())
}

#[allow(clippy::unused_async)]
pub async fn handler(uri: Uri) -> ApiError {
    tracing::debug!(path = uri.path(), "No route matched");
    not_found(&uri)
}
