use std::error::Error;
use std::net::SocketAddr;

use clap::Parser;
use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::app;
use crate::auth;
use crate::cfg;
use crate::core;
use crate::db;

/// Application-level error type
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    ConfigLoadingFailed(#[from] config::ConfigError),

    #[error("Database error: {0}")]
    DatabaseOperationFailed(#[from] db::StoreError),

    #[error("Migration error: {0}")]
    MigrationFailed(#[from] app::MigrationError),

    #[error("CLI error: {0}")]
    CliOperationFailed(#[from] app::CliError),

    #[error("Session secret error: {0}")]
    SecretLoadingFailed(#[from] auth::JwtError),

    #[error("Network address parsing error: {0}")]
    AddressParsingFailed(#[from] std::net::AddrParseError),

    #[error("Server error: {0}")]
    ServerStartingFailed(#[from] std::io::Error),
}

/// Connects both stores and assembles the shared request context.
pub async fn create_context(settings: cfg::AppSettings, jwt_secret: &str) -> Result<core::ArcContext, db::StoreError> {
    let catalog = db::connect(&settings.database.url, settings.database.max_connections).await?;
    let accounts = db::connect(&settings.database.accounts_url, settings.database.max_connections).await?;
    let jwt = auth::JwtContext::new(&settings.auth, jwt_secret);

    Ok(core::Context::new(
        db::Gateway::new(catalog),
        db::AccountStore::new(accounts),
        jwt,
        settings,
    ))
}

/// Applies both migration sets.
pub async fn migrate_stores(context: &core::Context) -> Result<(), app::MigrationError> {
    app::run_migrations(context.catalog.pool(), app::MigrationSet::Catalog).await?;
    app::run_migrations(context.accounts.pool(), app::MigrationSet::Accounts).await?;
    Ok(())
}

pub async fn run() {
    if let Err(e) = run_app().await {
        eprintln!("❌ {e}\n");

        let mut source = e.source();
        while let Some(err) = source {
            eprintln!("Caused by: {err}");
            source = err.source();
        }

        std::process::exit(1);
    }
}

async fn run_app() -> Result<(), AppError> {
    let cli = app::Cli::parse();
    let settings = cfg::AppSettings::new()?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&settings.server.log_directives))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let jwt_secret = auth::resolve_jwt_secret(&settings.auth)?;
    let context = create_context(settings, &jwt_secret).await?;

    let command = cli.command.unwrap_or(app::Command::Serve);
    if command.needs_migrated_stores() && context.settings.database.run_migrations_on_startup {
        migrate_stores(&context).await?;
    }
    if !matches!(command, app::Command::Serve) {
        app::run_cli(&context, command).await?;
        return Ok(());
    }

    let server_address = context.settings.get_server_address();
    let address = server_address.parse::<SocketAddr>()?;
    let listener = tokio::net::TcpListener::bind(address).await?;
    tracing::info!("🚀 starting server");
    tracing::info!("   app_env: {}", cfg::AppSettings::get_app_run_env());
    tracing::info!("   cfg_dir: {}", cfg::AppSettings::get_config_full_path());
    tracing::info!("   logging: {}", context.settings.server.log_directives);
    tracing::info!("   address: http://{}", server_address);

    let router = app::create_router(context);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Tokio signal handler that will wait for a user to press CTRL+C.
/// We use this in our `Server` method `with_graceful_shutdown`.
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received, shutting down gracefully"),
        Err(e) => tracing::error!("Failed to listen for shutdown signal: {}", e),
    }
}
