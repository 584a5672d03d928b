use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use serde_json::Value;

use crate::core::{ApiError, ArcContext, Resource};
use crate::db::{self, Review};
use crate::routes::crud;

const DUPLICATE_REVIEW: &str = "User has already posted a review of this beer";

pub fn router() -> Router<ArcContext> {
    Router::new()
        .route(Review::ROUTE, get(crud::list::<Review>).post(create))
        .route(
            &crud::item_path::<Review>(),
            get(crud::read::<Review>)
                .put(crud::update::<Review>)
                .delete(crud::delete::<Review>),
        )
}

/// Creates a review unless the user already reviewed that beer.
pub async fn create(
    State(context): State<ArcContext>,
    body: crud::JsonBody,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let fields = crud::validated_fields::<Review>(body)?;
    if db::has_user_reviewed_beer(&context.catalog, &fields).await? {
        return Err(ApiError::Forbidden(DUPLICATE_REVIEW.to_string()));
    }

    // A concurrent insert of the same pair can still hit the unique index.
    crud::insert_record::<Review>(&context.catalog, fields)
        .await
        .map_err(duplicate_as_forbidden)
}

/// Reports a unique-index violation on insert as the same 403 as the pre-check.
#[must_use]
pub fn duplicate_as_forbidden(error: ApiError) -> ApiError {
    match error {
        ApiError::Store(e) if e.is_unique_violation() => ApiError::Forbidden(DUPLICATE_REVIEW.to_string()),
        other => other,
    }
}
