use axum::extract::{Path, State};
use axum::http::{StatusCode, Uri};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Map, Value, json};

use crate::auth::{self, AuthenticatedUser};
use crate::core::{ApiError, ArcContext};
use crate::db::{self, NewAccount};
use crate::routes::crud::{self, JsonBody};
use crate::routes::fallback::not_found;
use crate::validation::{FieldSpec, Schema};

const ACCOUNT_SCHEMA: Schema = Schema::new(&[
    FieldSpec::required("userID"),
    FieldSpec::required("name"),
    FieldSpec::required("email"),
    FieldSpec::required("password"),
]);

const LOGIN_SCHEMA: Schema = Schema::new(&[FieldSpec::required("userID"), FieldSpec::required("password")]);

/// `GET /users/{id}` and its sub-collections take an `AuthenticatedUser`, so they need a bearer token.
pub fn router() -> Router<ArcContext> {
    Router::new()
        .route("/users", post(create))
        .route("/users/login", post(login))
        .route("/users/{id}", get(read))
        .route("/users/{id}/reviews", get(list_reviews))
        .route("/users/{id}/photos", get(list_photos))
}

/// Reads a body against a non-resource schema.
fn checked_body(body: JsonBody, schema: &Schema, name: &'static str) -> Result<Map<String, Value>, ApiError> {
    let Ok(Json(record)) = body else {
        return Err(ApiError::InvalidBody(name));
    };
    if !schema.validate(&record) {
        return Err(ApiError::InvalidBody(name));
    }
    Ok(schema.extract_fields(&record))
}

/// User ids may arrive as strings or numbers; both are stored as text.
fn user_id_field(fields: &Map<String, Value>, name: &'static str) -> Result<String, ApiError> {
    match fields.get("userID") {
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.trim().to_string()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        _ => Err(ApiError::InvalidBody(name)),
    }
}

fn string_field(fields: &Map<String, Value>, key: &str, name: &'static str) -> Result<String, ApiError> {
    fields
        .get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or(ApiError::InvalidBody(name))
}

fn ensure_same_user(user: &AuthenticatedUser, id: &str) -> Result<(), ApiError> {
    if user.0 == id {
        return Ok(());
    }
    tracing::warn!(token_user = %user.0, requested_user = %id, "Identity mismatch");
    Err(ApiError::Forbidden("Unauthorized to access the specified resource".to_string()))
}

pub async fn create(State(context): State<ArcContext>, body: JsonBody) -> Result<(StatusCode, Json<Value>), ApiError> {
    let fields = checked_body(body, &ACCOUNT_SCHEMA, "user")?;
    let user_id = user_id_field(&fields, "user")?;
    let password = string_field(&fields, "password", "user")?;

    let new_account = NewAccount {
        user_id,
        name: string_field(&fields, "name", "user")?,
        email: string_field(&fields, "email", "user")?,
        password_hash: auth::hash_password(&password, context.settings.auth.password_hash_cost)?,
    };
    let user_id = context.accounts.insert_one(new_account).await?;

    tracing::info!(user_id = %user_id, "Created user");
    Ok((
        StatusCode::CREATED,
        Json(json!({ "id": user_id, "links": { "user": format!("/users/{user_id}") } })),
    ))
}

/// Exchanges a user id and password for a session token.
pub async fn login(State(context): State<ArcContext>, body: JsonBody) -> Result<Json<Value>, ApiError> {
    let fields = checked_body(body, &LOGIN_SCHEMA, "login")?;
    let user_id = user_id_field(&fields, "login")?;
    let password = string_field(&fields, "password", "login")?;

    let Some(account) = context.accounts.find_by_user_id(&user_id, true).await? else {
        tracing::warn!(user_id = %user_id, "Login for unknown user");
        return Err(ApiError::InvalidCredentials);
    };
    if !auth::verify_password(&password, account.password_hash.as_deref())? {
        tracing::warn!(user_id = %user_id, "Invalid password");
        return Err(ApiError::InvalidCredentials);
    }

    let token = auth::generate_session_token(&context.jwt, &account.user_id)?;
    tracing::info!(user_id = %user_id, "User logged in");
    Ok(Json(json!({ "token": token })))
}

pub async fn read(
    State(context): State<ArcContext>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
    uri: Uri,
) -> Result<Json<db::Account>, ApiError> {
    ensure_same_user(&user, &id)?;
    context
        .accounts
        .find_by_user_id(&id, false)
        .await?
        .map(Json)
        .ok_or_else(|| not_found(&uri))
}

pub async fn list_reviews(
    State(context): State<ArcContext>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
    uri: Uri,
) -> Result<Json<Value>, ApiError> {
    ensure_same_user(&user, &id)?;
    let user_id = crud::parse_id(&id, &uri)?;
    let reviews = db::get_reviews_by_user_id(&context.catalog, user_id).await?;
    Ok(Json(json!({ "reviews": reviews })))
}

pub async fn list_photos(
    State(context): State<ArcContext>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
    uri: Uri,
) -> Result<Json<Value>, ApiError> {
    ensure_same_user(&user, &id)?;
    let user_id = crud::parse_id(&id, &uri)?;
    let photos = db::get_photos_by_user_id(&context.catalog, user_id).await?;
    Ok(Json(json!({ "photos": photos })))
}
