use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use medical_server::config::Config;
use medical_server::{router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    let config = Config::parse();
    let db = config.open_database().with_context(|| {
        format!("Failed to open database at {}", config.database.display())
    })?;
    if config.in_memory {
        info!("using in-memory database");
    } else {
        info!(path = %config.database.display(), "opened database");
    }

    let listener = TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("Failed to bind to address: {}", config.bind))?;
    info!(addr = %config.bind, "medical server listening");

    axum::serve(listener, router(AppState::new(db)))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server failed")?;

    info!("medical server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("received shutdown signal");
    }
}
