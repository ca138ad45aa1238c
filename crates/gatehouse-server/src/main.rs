//! # Gatehouse Server
//!
//! Main entry point for the Gatehouse application: user management and
//! session reconciliation over a shared session store.

use gatehouse_config::ConfigLoader;
use gatehouse_core::{GatehouseError, GatehouseResult};
use gatehouse_repository::{create_pool, PgSessionRepository, PgUserRepository};
use gatehouse_rest::{create_router, AppState};
use gatehouse_service::{SessionServiceImpl, UserServiceImpl};
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};

mod startup;

#[tokio::main]
async fn main() {
    init_logging();

    startup::print_banner();
    info!("Starting Gatehouse Server...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run().await {
        error!("Application error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> GatehouseResult<()> {
    // Load configuration
    let config_loader = ConfigLoader::from_default_location()?;
    let config = config_loader.get().await;

    info!("Environment: {}", config.app.environment);

    // Create database pool
    let db_pool = create_pool(&config.database).await?;

    if config.database.run_migrations {
        db_pool.run_migrations().await?;
    }

    // Wire repositories and services with explicit constructor injection
    let user_repository = Arc::new(PgUserRepository::new(db_pool.clone()));
    let session_repository = Arc::new(PgSessionRepository::new(db_pool.clone()));

    let user_service = Arc::new(UserServiceImpl::new(
        user_repository.clone(),
        config.accounts.verified_domain.clone(),
    ));
    let session_service = Arc::new(SessionServiceImpl::new(
        user_repository,
        session_repository,
    ));

    let app_state = AppState::new(user_service, session_service);

    // Create REST router
    let router = create_router(app_state, &config.server);

    // Start REST server
    let addr = config.server.addr();
    startup::print_startup_info(config.server.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| GatehouseError::Internal(format!("Failed to bind {}: {}", addr, e)))?;

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| GatehouseError::Internal(format!("Server error: {}", e)))?;

    db_pool.close().await;

    info!("Server shutdown complete");
    Ok(())
}

fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,gatehouse=debug,tower_http=debug"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        }
    }
}
