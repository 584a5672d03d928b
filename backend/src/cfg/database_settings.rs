use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct DatabaseSettings {
    /// Catalog store: beers, manufacturers, reviews, photos.
    #[serde(default)]
    pub url: String,

    /// Account store: users, kept apart from the catalog.
    #[serde(default)]
    pub accounts_url: String,

    #[serde(default)]
    pub max_connections: u32,

    #[serde(default)]
    pub run_migrations_on_startup: bool,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: "sqlite:taproom.sqlite".to_string(),
            accounts_url: "sqlite:accounts.sqlite".to_string(),
            max_connections: 5,
            run_migrations_on_startup: true,
        }
    }
}
