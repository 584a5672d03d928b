use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::FromRow;

use crate::core::Resource;
use crate::db::{Gateway, StoreError};
use crate::validation::{FieldSpec, Schema};

#[derive(Clone, Debug, Serialize, Deserialize, FromRow)]
pub struct Photo {
    pub id: i64,
    pub beerid: i64,
    pub userid: i64,
    pub caption: String,
    pub filename: String,
}

impl Resource for Photo {
    const TABLE: &'static str = "photos";
    const ROUTE: &'static str = "/photos";
    const NAME: &'static str = "photo";
    const COLLECTION: &'static str = "photos";
    const SCHEMA: Schema = Schema::new(&[
        FieldSpec::required("userid"),
        FieldSpec::required("beerid"),
        FieldSpec::required("caption"),
        FieldSpec::required("filename"),
    ]);

    fn owner_keys(&self) -> Vec<(&'static str, i64)> {
        vec![("beerid", self.beerid), ("userid", self.userid)]
    }

    fn related_links(fields: &Map<String, Value>) -> Vec<(&'static str, String)> {
        crate::db::beer_link(fields).into_iter().collect()
    }
}

pub async fn get_photos_by_beer_id(gateway: &Gateway, beer_id: i64) -> Result<Vec<Photo>, StoreError> {
    gateway.select_where(Photo::TABLE, "beerid", beer_id).await
}

pub async fn get_photos_by_user_id(gateway: &Gateway, user_id: i64) -> Result<Vec<Photo>, StoreError> {
    gateway.select_where(Photo::TABLE, "userid", user_id).await
}
