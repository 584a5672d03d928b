use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::FromRow;

use crate::core::Resource;
use crate::db::{Beer, Gateway, StoreError};
use crate::validation::{FieldSpec, Schema, value_as_id};

#[derive(Clone, Debug, Serialize, Deserialize, FromRow)]
pub struct Review {
    pub id: i64,
    pub beerid: i64,
    pub userid: i64,
    pub dollars: i64,
    pub stars: f64,
    pub review: Option<String>,
}

impl Resource for Review {
    const TABLE: &'static str = "reviews";
    const ROUTE: &'static str = "/reviews";
    const NAME: &'static str = "review";
    const COLLECTION: &'static str = "reviews";
    const SCHEMA: Schema = Schema::new(&[
        FieldSpec::required("dollars"),
        FieldSpec::required("stars"),
        FieldSpec::optional("review"),
        FieldSpec::required("userid"),
        FieldSpec::required("beerid"),
    ]);

    fn owner_keys(&self) -> Vec<(&'static str, i64)> {
        vec![("beerid", self.beerid), ("userid", self.userid)]
    }

    fn related_links(fields: &Map<String, Value>) -> Vec<(&'static str, String)> {
        beer_link(fields).into_iter().collect()
    }
}

/// Link to the beer named by a body's `beerid`, if it reads as an id.
pub fn beer_link(fields: &Map<String, Value>) -> Option<(&'static str, String)> {
    let beer_id = fields.get("beerid").and_then(value_as_id)?;
    Some((Beer::NAME, Beer::self_link(beer_id)))
}

/// True when the user named in `fields` has already reviewed the beer named in `fields`.
pub async fn has_user_reviewed_beer(gateway: &Gateway, fields: &Map<String, Value>) -> Result<bool, StoreError> {
    let user_id = fields.get("userid").unwrap_or(&Value::Null);
    let beer_id = fields.get("beerid").unwrap_or(&Value::Null);
    let count = gateway
        .count_matching(Review::TABLE, &[("userid", user_id), ("beerid", beer_id)])
        .await?;
    Ok(count > 0)
}

pub async fn get_reviews_by_beer_id(gateway: &Gateway, beer_id: i64) -> Result<Vec<Review>, StoreError> {
    gateway.select_where(Review::TABLE, "beerid", beer_id).await
}

pub async fn get_reviews_by_user_id(gateway: &Gateway, user_id: i64) -> Result<Vec<Review>, StoreError> {
    gateway.select_where(Review::TABLE, "userid", user_id).await
}
