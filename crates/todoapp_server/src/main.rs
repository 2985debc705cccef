//! Server entry point.
//!
//! # Responsibility
//! - Load configuration (`.env` honored) and initialize logging.
//! - Bootstrap the database once so per-request opens find it migrated.
//! - Serve the API until Ctrl+C or SIGTERM.

use anyhow::{anyhow, Context, Result};
use log::info;
use todoapp_api::{router, AppState, ServerConfig};
use todoapp_core::db::open_db;
use todoapp_core::{init_logging, LogConfig};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let config = ServerConfig::from_env()?;

    let log_config =
        LogConfig::new(&config.log_level, &config.log_dir, true).map_err(|err| anyhow!(err))?;
    init_logging(&log_config).map_err(|err| anyhow!(err))?;

    let conn = open_db(&config.db_path)
        .with_context(|| format!("failed to open database {}", config.db_path.display()))?;
    drop(conn);

    let app = router(AppState::new(&config.db_path), &config.cors_origins);
    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    info!(
        "event=server_start module=server status=ok addr={} db_path={}",
        config.bind_addr,
        config.db_path.display()
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("event=server_stop module=server status=ok");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("event=server_shutdown module=server status=start");
}
