//! The CRUD algorithm shared by every catalog resource.
//!
//! Resource modules mount these handlers directly, or call the building blocks
//! (`validated_fields`, `insert_record`, ...) when they need an extra step.

use axum::Json;
use axum::Router;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, Uri};
use axum::routing::get;
use serde::Deserialize;
use serde_json::{Map, Value, json};

use crate::core::{ApiError, ArcContext, Resource};
use crate::db::Gateway;
use crate::pagination::{self, PageResponse};
use crate::routes::fallback::not_found;
use crate::validation::value_as_id;

pub type JsonBody = Result<Json<Map<String, Value>>, JsonRejection>;

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

/// `GET /{resource}` and `POST /{resource}`, `GET|PUT|DELETE /{resource}/{id}`.
pub fn router<R: Resource>() -> Router<ArcContext> {
    Router::new()
        .route(R::ROUTE, get(list::<R>).post(create::<R>))
        .route(&item_path::<R>(), get(read::<R>).put(update::<R>).delete(delete::<R>))
}

#[must_use]
pub fn item_path<R: Resource>() -> String {
    format!("{}/{{id}}", R::ROUTE)
}

/// Path ids that do not parse can never match a row, so they are reported as not found.
pub fn parse_id(raw: &str, uri: &Uri) -> Result<i64, ApiError> {
    raw.trim().parse::<i64>().map_err(|_| not_found(uri))
}

/// Checks the body against the resource schema and keeps only the declared fields.
pub fn validated_fields<R: Resource>(body: JsonBody) -> Result<Map<String, Value>, ApiError> {
    let Json(record) = body.map_err(|rejection| {
        tracing::debug!(resource = R::NAME, %rejection, "Unreadable request body");
        ApiError::InvalidBody(R::NAME)
    })?;
    if !R::SCHEMA.validate(&record) {
        return Err(ApiError::InvalidBody(R::NAME));
    }
    Ok(R::SCHEMA.extract_fields(&record))
}

/// Rejects an update that would move a record to another owner.
pub fn check_ownership<R: Resource>(existing: &R, fields: &Map<String, Value>) -> Result<(), ApiError> {
    let owner_keys = existing.owner_keys();
    let unchanged = owner_keys
        .iter()
        .all(|(column, stored)| fields.get(*column).and_then(value_as_id) == Some(*stored));
    if unchanged {
        return Ok(());
    }

    let columns = owner_keys.iter().map(|(column, _)| *column).collect::<Vec<_>>().join(" and ");
    Err(ApiError::Forbidden(format!("Updated {} must have the same {columns}", R::NAME)))
}

pub async fn insert_record<R: Resource>(
    gateway: &Gateway,
    fields: Map<String, Value>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let id = gateway.insert(R::TABLE, &fields).await?;
    tracing::info!(resource = R::NAME, id, "Created");
    Ok((StatusCode::CREATED, Json(json!({ "id": id, "links": R::links(id, &fields) }))))
}

pub async fn list<R: Resource>(
    State(context): State<ArcContext>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<PageResponse<R>>, ApiError> {
    // An unreadable query string falls back to the first page like any other bad `page`.
    let requested = match &query {
        Ok(Query(query)) => pagination::requested_page(query.page.as_deref()),
        Err(rejection) => {
            tracing::debug!(resource = R::NAME, %rejection, "Unreadable query string");
            1
        }
    };

    let gateway = &context.catalog;
    let total_count = gateway.count(R::TABLE).await?;
    let page = pagination::paginate(
        requested,
        total_count,
        context.settings.server.page_size,
    );
    let items = gateway.select_page::<R>(R::TABLE, page.offset, page.size).await?;
    Ok(Json(PageResponse::new(R::COLLECTION, R::ROUTE, items, page, total_count)))
}

pub async fn create<R: Resource>(
    State(context): State<ArcContext>,
    body: JsonBody,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let fields = validated_fields::<R>(body)?;
    insert_record::<R>(&context.catalog, fields).await
}

pub async fn read<R: Resource>(
    State(context): State<ArcContext>,
    Path(id): Path<String>,
    uri: Uri,
) -> Result<Json<R>, ApiError> {
    let id = parse_id(&id, &uri)?;
    context
        .catalog
        .select_by_id::<R>(R::TABLE, id)
        .await?
        .map(Json)
        .ok_or_else(|| not_found(&uri))
}

pub async fn update<R: Resource>(
    State(context): State<ArcContext>,
    Path(id): Path<String>,
    uri: Uri,
    body: JsonBody,
) -> Result<Json<Value>, ApiError> {
    let fields = validated_fields::<R>(body)?;
    let id = parse_id(&id, &uri)?;

    let Some(existing) = context.catalog.select_by_id::<R>(R::TABLE, id).await? else {
        return Err(not_found(&uri));
    };
    check_ownership(&existing, &fields)?;

    // The row may have been deleted since it was fetched.
    if !context.catalog.update(R::TABLE, id, &fields).await? {
        return Err(not_found(&uri));
    }

    tracing::info!(resource = R::NAME, id, "Updated");
    Ok(Json(json!({ "links": R::links(id, &fields) })))
}

pub async fn delete<R: Resource>(
    State(context): State<ArcContext>,
    Path(id): Path<String>,
    uri: Uri,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id, &uri)?;
    if !context.catalog.delete(R::TABLE, id).await? {
        return Err(not_found(&uri));
    }

    tracing::info!(resource = R::NAME, id, "Deleted");
    Ok(StatusCode::NO_CONTENT)
}
