//! Ladle Server — recipe platform backend.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use ladle_core::config::AppConfig;
use ladle_core::error::AppError;
use ladle_core::traits::AccountStore;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Load configuration from file and environment.
///
/// An empty signing secret fails here, before anything binds a port.
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("LADLE_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Ladle v{}", env!("CARGO_PKG_VERSION"));

    // Database connection + migrations
    let db = ladle_database::connection::DatabasePool::connect(&config.database).await?;

    ladle_database::migration::run_migrations(db.pool()).await?;

    // Auth system
    let accounts: Arc<dyn AccountStore> = Arc::new(
        ladle_database::repositories::account::AccountRepository::new(db.pool().clone()),
    );

    let credentials = Arc::new(ladle_auth::credential::CredentialVerifier::new(
        Arc::clone(&accounts),
        ladle_auth::password::PasswordHasher::new(),
        ladle_auth::password::PasswordValidator::new(&config.auth),
    ));

    let authenticator = Arc::new(ladle_auth::session::SessionAuthenticator::new(
        Arc::new(ladle_auth::token::TokenIssuer::new(&config.auth)?),
        Arc::new(ladle_auth::token::TokenVerifier::new(&config.auth)?),
        Arc::clone(&credentials),
        Arc::clone(&accounts),
    ));

    // HTTP server
    let addr = format!("{}:{}", config.server.host, config.server.port);

    let app_state = ladle_api::state::AppState {
        config: Arc::new(config),
        db: db.clone(),
        authenticator,
        credentials,
        accounts,
    };

    let app = ladle_api::router::build_router(app_state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("Ladle server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    db.close().await;

    tracing::info!("Ladle server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
