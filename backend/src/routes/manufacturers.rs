use axum::Json;
use axum::Router;
use axum::extract::{Path, State};
use axum::http::Uri;
use axum::routing::get;
use serde_json::{Value, json};

use crate::core::{ApiError, ArcContext, Resource};
use crate::db::{self, Manufacturer};
use crate::routes::crud;
use crate::routes::fallback::not_found;

pub fn router() -> Router<ArcContext> {
    crud::router::<Manufacturer>().route("/manufacturers/{id}/beers", get(list_beers))
}

/// `{beers: [...]}` for one manufacturer, ordered by id.
pub async fn list_beers(
    State(context): State<ArcContext>,
    Path(id): Path<String>,
    uri: Uri,
) -> Result<Json<Value>, ApiError> {
    let id = crud::parse_id(&id, &uri)?;
    let gateway = &context.catalog;
    if gateway
        .select_by_id::<Manufacturer>(Manufacturer::TABLE, id)
        .await?
        .is_none()
    {
        return Err(not_found(&uri));
    }

    let beers = db::get_beers_by_manufacturer_id(gateway, id).await?;
    Ok(Json(json!({ "beers": beers })))
}
