use axum::Json;
use axum::Router;
use axum::extract::{Path, State};
use axum::http::Uri;
use axum::routing::get;

use crate::core::{ApiError, ArcContext, Resource};
use crate::db::{self, Beer, BeerDetail};
use crate::routes::crud;
use crate::routes::fallback::not_found;

pub fn router() -> Router<ArcContext> {
    Router::new()
        .route(Beer::ROUTE, get(crud::list::<Beer>).post(crud::create::<Beer>))
        .route(
            &crud::item_path::<Beer>(),
            get(read_detail).put(crud::update::<Beer>).delete(crud::delete::<Beer>),
        )
}

/// A beer with its reviews, photos and manufacturer.
pub async fn read_detail(
    State(context): State<ArcContext>,
    Path(id): Path<String>,
    uri: Uri,
) -> Result<Json<BeerDetail>, ApiError> {
    let id = crud::parse_id(&id, &uri)?;
    db::get_beer_detail(&context.catalog, id)
        .await?
        .map(Json)
        .ok_or_else(|| not_found(&uri))
}
