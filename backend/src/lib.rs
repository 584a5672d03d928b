#![deny(clippy::all)]
#![warn(clippy::nursery)]
#![warn(clippy::pedantic)]
#![warn(clippy::todo)]
#![allow(missing_docs)]
#![allow(clippy::missing_errors_doc)]


pub mod cfg {
    mod app_settings;
    mod auth_settings;
    mod database_settings;
    mod server_settings;

    pub use app_settings::*;
    pub use auth_settings::*;
    pub use database_settings::*;
    pub use server_settings::*;
}

pub mod core {
    mod context;
    mod error;
    mod resource;

    pub use context::*;
    pub use error::*;
    pub use resource::*;
}

pub mod validation {
    mod schema;

    pub use schema::*;
}

pub mod pagination {
    mod page;

    pub use page::*;
}

pub mod auth {
    mod extractor;
    mod jwt;
    mod password;

    pub use extractor::*;
    pub use jwt::*;
    pub use password::*;
}

pub mod db {
    mod accounts;
    mod beers;
    mod gateway;
    mod manufacturers;
    mod photos;
    mod pool;
    mod reviews;

    pub use accounts::*;
    pub use beers::*;
    pub use gateway::*;
    pub use manufacturers::*;
    pub use photos::*;
    pub use pool::*;
    pub use reviews::*;
}

pub mod routes {
    pub mod beers;
    pub mod crud;
    pub mod fallback;
    pub mod health;
    pub mod manufacturers;
    pub mod photos;
    pub mod reviews;
    pub mod users;
}

pub mod app {
    mod cli;
    mod migrations;
    mod router;
    mod server;

    pub use cli::*;
    pub use migrations::*;
    pub use router::*;
    pub use server::*;
}
