//! Authgate server — multi-tenant authentication and session service.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use authgate_api::state::AppState;
use authgate_auth::identity::PgIdentityStore;
use authgate_auth::jwt::{JwtDecoder, JwtEncoder};
use authgate_auth::password::PasswordHasher;
use authgate_auth::session::{PgSessionStore, SessionManager};
use authgate_auth::tenancy::PgTenantStore;
use authgate_core::config::AppConfig;
use authgate_core::error::AppError;
use authgate_database::repositories::{SessionRepository, TenantRepository, UserRepository};

#[tokio::main]
async fn main() {
    let env = std::env::var("AUTHGATE_ENV").unwrap_or_else(|_| "development".to_string());
    let config = match AppConfig::load(&env) {
        Ok(config) => config,
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

/// Initialize tracing/logging.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt().json().with_env_filter(filter).with_target(true).init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function.
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Authgate v{}", env!("CARGO_PKG_VERSION"));

    // ── Database connection + migrations ─────────────────────────
    let db_pool = authgate_database::connection::DatabasePool::connect(&config.database)
        .await?
        .into_pool();
    authgate_database::migration::run_migrations(&db_pool).await?;

    // ── Auth system ──────────────────────────────────────────────
    // Key material is loaded here once; an unreadable key is a startup
    // failure, never a per-request client error.
    let jwt_encoder = Arc::new(JwtEncoder::from_config(&config.auth)?);
    let jwt_decoder = Arc::new(JwtDecoder::from_config(&config.auth)?);

    let identity_store = Arc::new(PgIdentityStore::new(UserRepository::new(db_pool.clone())));
    let session_store = Arc::new(PgSessionStore::new(
        SessionRepository::new(db_pool.clone()),
        &config.auth,
    ));
    let tenant_store = Arc::new(PgTenantStore::new(TenantRepository::new(db_pool.clone())));

    let session_manager = Arc::new(SessionManager::new(
        identity_store.clone(),
        session_store.clone(),
        PasswordHasher::new(),
        jwt_encoder,
    ));

    // ── HTTP server ──────────────────────────────────────────────
    let state = AppState {
        config: Arc::new(config.clone()),
        session_manager,
        jwt_decoder,
        identity_store,
        session_store,
        tenant_store,
    };

    let app = authgate_api::build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("Authgate listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    tracing::info!("Authgate shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
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
