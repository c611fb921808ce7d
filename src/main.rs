use quizbank_server::api::{router, AppState};
use quizbank_server::config::Config;
use quizbank_server::storage::open_storage;

use tokio::signal;
use tracing::{debug, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from .env file if present
    let dotenv_result = dotenvy::dotenv();

    // Load configuration
    let config = Config::from_env()?;

    let _guard = init_logging(&config);

    if let Err(e) = dotenv_result {
        debug!("No .env file loaded: {}", e);
    }

    let socket_addr = config.socket_addr()?;

    info!("Starting quiz server on {}", socket_addr);
    if !config.admin.is_configured() {
        warn!("ADMIN_USERNAME/ADMIN_PASSWORD not set - admin endpoints will reject every request");
    }

    let storage = open_storage(&config)?;
    storage.initialize_default_questions().await;

    let app = router(AppState::new(storage));

    // Create listener
    let listener = tokio::net::TcpListener::bind(&socket_addr).await?;
    info!("Server listening on {}", socket_addr);

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");

    Ok(())
}

/// Console logging always; JSON file logging with daily rotation when LOG_DIR is set.
fn init_logging(config: &Config) -> Option<WorkerGuard> {
    let (file_layer, guard) = match &config.log_dir {
        Some(log_dir) => {
            // Create log directory if it doesn't exist
            std::fs::create_dir_all(log_dir).unwrap_or_else(|e| {
                eprintln!("Warning: Could not create log directory {}: {}", log_dir.display(), e);
            });

            let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, "quizbank-server.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

            let layer = fmt::layer()
                .with_target(true)
                .with_ansi(false)
                .json()
                .with_writer(non_blocking);

            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,quizbank_server=debug")),
        )
        .with(fmt::layer().with_target(true))
        .with(file_layer)
        .init();

    if let Some(log_dir) = &config.log_dir {
        debug!("Logging initialized - log directory: {}", log_dir.display());
    }

    guard
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
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Received shutdown signal");
}
