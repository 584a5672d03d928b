use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::core::ArcContext;

/// 200 "OK" when both stores answer a trivial query.
pub async fn health_check(State(context): State<ArcContext>) -> impl IntoResponse {
    for (store, pool) in [("catalog", context.catalog.pool()), ("accounts", context.accounts.pool())] {
        if let Err(e) = sqlx::query("SELECT 1").execute(pool).await {
            tracing::error!(store, "Health check failed: {}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error");
        }
    }

    (StatusCode::OK, "OK")
}
