//! SiteReport Server — access control, page locking, and sharing for
//! construction-project reports.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{fmt, EnvFilter};

use sitereport_api::state::AppState;
use sitereport_auth::rbac::checker::PermissionChecker;
use sitereport_core::config::AppConfig;
use sitereport_core::error::AppError;
use sitereport_registry::lock::memory::MemoryLockRegistry;
use sitereport_registry::share::memory::MemoryShareRegistry;
use sitereport_registry::share::token::ShareTokenGenerator;
use sitereport_registry::user::directory::UserDirectory;
use sitereport_service::lock::LockService;
use sitereport_service::share::ShareService;
use sitereport_service::user::UserService;

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
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("SITEREPORT_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function.
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting SiteReport v{}", env!("CARGO_PKG_VERSION"));

    // Access control
    let checker = Arc::new(PermissionChecker::new());
    let directory = Arc::new(UserDirectory::new());

    // Registries
    let lock_registry = Arc::new(MemoryLockRegistry::new(config.lock.clone()));
    let share_registry = Arc::new(MemoryShareRegistry::new());

    // Coordinators
    let lock_service = Arc::new(LockService::new(
        Arc::clone(&directory),
        Arc::clone(&checker),
        lock_registry,
        config.lock.clone(),
    ));
    let share_service = Arc::new(ShareService::new(
        Arc::clone(&directory),
        Arc::clone(&checker),
        share_registry,
        ShareTokenGenerator::new(&config.share),
    ));
    let user_service = Arc::new(UserService::new(
        Arc::clone(&directory),
        Arc::clone(&checker),
    ));

    user_service.bootstrap_admin(&config.bootstrap).await?;

    let app_state = AppState {
        config: Arc::new(config.clone()),
        checker,
        directory,
        lock_service,
        share_service,
        user_service,
    };

    let app = sitereport_api::build_router(app_state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::with_source(
            sitereport_core::error::ErrorKind::Internal,
            format!("Failed to bind {addr}"),
            e,
        ))?;

    tracing::info!("SiteReport server listening on {addr}");

    let grace = std::time::Duration::from_secs(config.server.shutdown_grace_seconds);
    let server = axum::serve(listener, app).with_graceful_shutdown(async {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, draining connections...");
    });

    // Bound the drain: once the signal lands, open connections get
    // `shutdown_grace_seconds` to finish before the process exits anyway.
    tokio::select! {
        result = server => {
            result.map_err(|e| AppError::with_source(
                sitereport_core::error::ErrorKind::Internal,
                "Server error",
                e,
            ))?;
            tracing::info!("SiteReport server shut down gracefully");
        }
        _ = async {
            shutdown_signal().await;
            tokio::time::sleep(grace).await;
        } => {
            tracing::warn!(
                "Connections did not drain within {}s, shutting down anyway",
                grace.as_secs()
            );
        }
    }

    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!("Failed to install SIGTERM handler: {e}"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
