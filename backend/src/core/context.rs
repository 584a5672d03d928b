use crate::auth;
use crate::cfg;
use crate::db;

pub type ArcContext = std::sync::Arc<Context>;

/// Everything a request handler may touch. Built once at startup and shared read-only.
#[derive(Clone)]
pub struct Context {
    pub catalog: db::Gateway,
    pub accounts: db::AccountStore,
    pub jwt: auth::JwtContext,
    pub settings: cfg::AppSettings,
}

impl Context {
    #[must_use]
    pub fn new(
        catalog: db::Gateway,
        accounts: db::AccountStore,
        jwt: auth::JwtContext,
        settings: cfg::AppSettings,
    ) -> ArcContext {
        Self {
            catalog,
            accounts,
            jwt,
            settings,
        }
        .into()
    }
}
