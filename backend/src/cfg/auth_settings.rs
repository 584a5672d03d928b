use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct AuthSettings {
    /// Token signing secret; when shorter than 32 bytes a persisted `.jwt_secret` is used instead.
    #[serde(default)]
    pub secret: String,

    #[serde(default)]
    pub token_expiry: i64, // In seconds (e.g., 24 hours = 86400)

    #[serde(default)]
    pub password_hash_cost: u32,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            secret: String::new(),
            token_expiry: 24 * 60 * 60, // 24 hours
            password_hash_cost: 8,
        }
    }
}
