use std::fs;

use axum::Json;
use axum::http;
use axum::response::IntoResponse;
use chrono::Utc;
use jsonwebtoken as jwt;
use rand::TryRngCore;
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

use crate::cfg;

type TryRngError = <rand::rngs::OsRng as rand::TryRngCore>::Error;

#[rustfmt::skip]
#[derive(Debug, Error)]
pub enum JwtError {
    #[error("Failed to encode session token")]
    EncodingFailed(jwt::errors::Error),

    #[error("Failed to decode session token")]
    DecodingFailed(jwt::errors::Error),

    #[error("File system operation failed")]
    FileSystemOperationFailed { #[from] source: std::io::Error },

    #[error("Random number generation operation failed")]
    RngOperationFailed { source: TryRngError },

    #[error("Token has expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Invalid authorization header")]
    InvalidAuthorizationHeader,
}

impl IntoResponse for JwtError {
    fn into_response(self) -> axum::response::Response {
        #[rustfmt::skip]
        #[allow(clippy::match_same_arms)]
        let (status, error_message) = match self {
            Self::RngOperationFailed { source: _ } => (http::StatusCode::INTERNAL_SERVER_ERROR, "Unable to issue a session token.  Please try again later."),
            Self::FileSystemOperationFailed { source: _ } => (http::StatusCode::INTERNAL_SERVER_ERROR, "Unable to issue a session token.  Please try again later."),
            Self::EncodingFailed(_) => (http::StatusCode::INTERNAL_SERVER_ERROR, "Unable to issue a session token.  Please try again later."),
            Self::DecodingFailed(_) => (http::StatusCode::UNAUTHORIZED, "Invalid or missing authentication token"),
            Self::TokenExpired => (http::StatusCode::UNAUTHORIZED, "Authentication token has expired"),
            Self::InvalidToken => (http::StatusCode::UNAUTHORIZED, "Invalid authentication token"),
            Self::InvalidAuthorizationHeader => (http::StatusCode::UNAUTHORIZED, "Invalid or missing authorization header"),
        };

        if status.is_server_error() {
            tracing::error!(
                error_type = %std::any::type_name::<Self>(),
                error_message = %self);
        } else {
            tracing::warn!(error_message = %self, "Rejected session token");
        }

        (status, Json(json!({ "error": error_message }))).into_response()
    }
}

/// Claims of a session token; `sub` is the external user id.
#[derive(Debug, Deserialize, Serialize)]
pub struct SessionClaims {
    pub sub: String, // Subject (user ID)
    pub exp: i64,    // Expiration time
    pub iat: i64,    // Issued at
    pub jti: String, // JWT ID (unique identifier)
}

#[derive(Clone)]
pub struct JwtContext {
    pub encoding_key: jwt::EncodingKey,
    pub decoding_key: jwt::DecodingKey,
    pub validation: jwt::Validation,
    pub token_expiry: i64,
}

impl JwtContext {
    #[must_use]
    pub fn new(settings: &cfg::AuthSettings, secret: &str) -> Self {
        let encoding_key = jwt::EncodingKey::from_secret(secret.as_ref());
        let decoding_key = jwt::DecodingKey::from_secret(secret.as_ref());
        let mut validation = jwt::Validation::new(jwt::Algorithm::HS256);
        validation.leeway = 0;

        Self {
            encoding_key,
            decoding_key,
            validation,
            token_expiry: settings.token_expiry,
        }
    }
}

/// Mint a session token bound to `user_id`
pub fn generate_session_token(ctx: &JwtContext, user_id: &str) -> Result<String, JwtError> {
    let now = Utc::now().timestamp();
    let header = jwt::Header::new(jwt::Algorithm::HS256);
    let claims = SessionClaims {
        sub: user_id.to_string(),
        exp: now + ctx.token_expiry,
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };
    jwt::encode(&header, &claims, &ctx.encoding_key).map_err(JwtError::EncodingFailed)
}

pub fn decode_session_token_from_headers(ctx: &JwtContext, headers: &http::HeaderMap) -> Result<SessionClaims, JwtError> {
    // Extract the Authorization header
    let auth_header = headers
        .get(http::header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .ok_or(JwtError::InvalidAuthorizationHeader)?;

    // Extract Bearer token
    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(JwtError::InvalidAuthorizationHeader)?;

    decode_session_token(ctx, token)
}

/// Validate and decode a session token
pub fn decode_session_token(ctx: &JwtContext, token: &str) -> Result<SessionClaims, JwtError> {
    let token_data = jwt::decode::<SessionClaims>(token, &ctx.decoding_key, &ctx.validation)?;
    Ok(token_data.claims)
}

/// Returns the configured secret, or loads (creating if needed) the persisted one
pub fn resolve_jwt_secret(settings: &cfg::AuthSettings) -> Result<String, JwtError> {
    if settings.secret.len() >= 32 {
        return Ok(settings.secret.clone());
    }
    get_jwt_secret()
}

/// Loads or creates a JWT secret
pub fn get_jwt_secret() -> Result<String, JwtError> {
    // check persisted secret file
    let secret_file_path = cfg::AppSettings::get_config_path().join(".jwt_secret");
    if let Ok(file_secret) = fs::read_to_string(&secret_file_path) {
        let trimmed_secret = file_secret.trim();
        if trimmed_secret.len() >= 32 {
            return Ok(trimmed_secret.to_string());
        }
    }

    // Create config directory if it doesn't exist
    if let Some(parent) = &secret_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    // Write the secret to file with restricted permissions
    let new_secret = generate_secure_secret()?;
    fs::write(&secret_file_path, &new_secret)?;

    // Set file permissions to be readable only by owner (Unix-like systems)
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs::metadata(&secret_file_path)?.permissions();
        perms.set_mode(0o600); // rw-------
        fs::set_permissions(&secret_file_path, perms)?;
    }

    tracing::info!("Generated new JWT secret in {}", secret_file_path.to_string_lossy());
    Ok(new_secret)
}

/// Generates a cryptographically secure random secret
fn generate_secure_secret() -> Result<String, JwtError> {
    let mut bytes = [0u8; 32];
    rand::rngs::OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| JwtError::RngOperationFailed { source: e })?;
    Ok(hex::encode(bytes))
}

/// Maps jsonwebtoken errors to our custom `JwtError` type
#[allow(clippy::match_same_arms)]
impl From<jwt::errors::Error> for JwtError {
    fn from(e: jwt::errors::Error) -> Self {
        match e.kind() {
            jwt::errors::ErrorKind::ExpiredSignature => Self::TokenExpired,
            jwt::errors::ErrorKind::InvalidToken => Self::InvalidToken,
            jwt::errors::ErrorKind::Json(_) => Self::InvalidToken,
            _ => Self::DecodingFailed(e),
        }
    }
}
