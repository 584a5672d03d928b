use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;
use thiserror::Error;

use crate::auth::JwtError;
use crate::db::StoreError;

/// Errors a request handler can end in. Rendered as `{"error": "..."}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request body is not a valid {0} object.")]
    InvalidBody(&'static str),

    #[error("Invalid credentials.")]
    InvalidCredentials,

    #[error("Session error: {0}")]
    Session(#[from] JwtError),

    #[error("{0}")]
    Forbidden(String),

    #[error("Requested resource {0} does not exist")]
    NotFound(String),

    #[error("Database error: {0}")]
    Store(#[from] StoreError),

    #[error("Password hashing error: {0}")]
    PasswordHashing(#[from] bcrypt::BcryptError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_message) = match self {
            Self::Session(e) => return e.into_response(),
            Self::InvalidBody(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            Self::InvalidCredentials => (StatusCode::UNAUTHORIZED, self.to_string()),
            Self::Forbidden(_) => (StatusCode::FORBIDDEN, self.to_string()),
            Self::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            Self::Store(_) | Self::PasswordHashing(_) => {
                tracing::error!(
                    error_type = %std::any::type_name::<Self>(),
                    error_message = %self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred.  Please try again later.".to_string(),
                )
            }
        };

        if !status.is_server_error() {
            tracing::debug!(status = status.as_u16(), error_message = %error_message, "Request rejected");
        }

        (status, Json(json!({ "error": error_message }))).into_response()
    }
}
