use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::core::Resource;
use crate::validation::{FieldSpec, Schema};

#[derive(Clone, Debug, Serialize, Deserialize, FromRow)]
pub struct Manufacturer {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub phone: String,
}

impl Resource for Manufacturer {
    const TABLE: &'static str = "manufacturers";
    const ROUTE: &'static str = "/manufacturers";
    const NAME: &'static str = "manufacturer";
    const COLLECTION: &'static str = "manufacturers";
    const SCHEMA: Schema = Schema::new(&[
        FieldSpec::required("name"),
        FieldSpec::required("city"),
        FieldSpec::required("state"),
        FieldSpec::required("zip"),
        FieldSpec::required("phone"),
    ]);
}
