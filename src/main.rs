//! Todo Feed API
//!
//! Serves the to-do list HTTP API.
//!
//! # Environment Variables
//!
//! - `STORAGE_MODE`: `file` (default) | `in_memory`
//! - `DB_FILE_PATH`: JSON store file (default: `./db`)
//! - `DEFAULT_PAGE_SIZE`: page size when `limit` is absent (default: 10)
//! - `HOST`: Server host address (default: `0.0.0.0`)
//! - `PORT`: Server port (default: `3000`)
//! - `LOG_FORMAT`: `pretty` (default) | `json`
//! - `RUST_LOG`: Logging level (e.g., `debug`, `info`, `todo_feed=debug`)

use tokio::net::TcpListener;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use todo_feed::api::{AppConfig, AppState, create_router};
use todo_feed::infrastructure::{AppSettings, LogFormat, TodoRepository};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let settings = match AppSettings::from_env() {
        Ok(settings) => settings,
        Err(error) => {
            eprintln!("Configuration error: {error}");
            std::process::exit(1);
        }
    };

    init_tracing(settings.log_format);

    tracing::info!(
        storage_mode = ?settings.storage_mode,
        db_file_path = %settings.db_file_path.display(),
        default_page_size = settings.default_page_size,
        "Starting Todo Feed API"
    );

    let repository = TodoRepository::new(settings.create_store());
    let application_state = AppState::with_config(
        repository,
        AppConfig {
            default_page_size: settings.default_page_size,
        },
    );
    let application = create_router(application_state);

    let address = match settings.socket_address() {
        Ok(address) => address,
        Err(error) => {
            tracing::error!(%error, "Invalid server address");
            std::process::exit(1);
        }
    };

    let listener = match TcpListener::bind(address).await {
        Ok(listener) => listener,
        Err(error) => {
            tracing::error!(%error, "Failed to bind to address {}", address);
            std::process::exit(1);
        }
    };

    match listener.local_addr() {
        Ok(address) => tracing::info!("Listening on {}", address),
        Err(error) => tracing::warn!(%error, "Could not determine local address"),
    }

    if let Err(error) = axum::serve(listener, application)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(%error, "Server error");
        std::process::exit(1);
    }

    tracing::info!("Server shutdown complete");
}

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "todo_feed=debug,tower_http=debug".into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
    }
}

/// Completes on SIGINT (Ctrl+C) or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::warn!(%error, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::warn!(%error, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
