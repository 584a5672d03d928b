use serde::Serialize;
use serde_json::{Map, Value};
use sqlx::FromRow;
use sqlx::sqlite::SqliteRow;

use crate::validation::Schema;

/// A catalog entity served by the generic CRUD controller.
pub trait Resource: for<'r> FromRow<'r, SqliteRow> + Serialize + Send + Sync + Unpin + 'static {
    /// Table in the catalog store.
    const TABLE: &'static str;

    /// Route prefix, e.g. `/beers`.
    const ROUTE: &'static str;

    /// Singular name used as link key and in error messages.
    const NAME: &'static str;

    /// Key of the item array in list responses.
    const COLLECTION: &'static str;

    const SCHEMA: Schema;

    /// Reference columns that an update may not change, with their stored values.
    fn owner_keys(&self) -> Vec<(&'static str, i64)> {
        Vec::new()
    }

    /// Links to parent resources named by a validated body.
    fn related_links(_fields: &Map<String, Value>) -> Vec<(&'static str, String)> {
        Vec::new()
    }

    #[must_use]
    fn self_link(id: i64) -> String {
        format!("{}/{id}", Self::ROUTE)
    }

    #[must_use]
    fn links(id: i64, fields: &Map<String, Value>) -> Map<String, Value> {
        let mut links = Map::new();
        links.insert(Self::NAME.to_string(), Value::String(Self::self_link(id)));
        for (name, href) in Self::related_links(fields) {
            links.insert(name.to_string(), Value::String(href));
        }
        links
    }
}
