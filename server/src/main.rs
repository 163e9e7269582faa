use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use todo_server::{AppState, Config, MemoryStore, MongoStore, StoreKind, TodoStore};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine; flags and the real environment still apply.
    let loaded_env = todo_server::config::load_env_file(Path::new(".env"))
        .context("failed to load .env")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    if loaded_env {
        info!("loaded settings from .env");
    }

    let config = Config::parse();
    config.validate()?;
    let addr = config.listen_addr()?;

    let (store, mongo): (Arc<dyn TodoStore>, Option<MongoStore>) = match config.store {
        StoreKind::Memory => (Arc::new(MemoryStore::new()), None),
        StoreKind::Mongo => {
            let uri = config.mongo_uri.as_deref().unwrap_or_default();
            let mongo = MongoStore::connect(
                uri,
                &config.database,
                &config.collection,
                config.timeout(),
            )
            .await
            .context("Error connecting to MongoDB")?;
            (Arc::new(mongo.clone()), Some(mongo))
        }
    };
    info!(store = store.kind(), timeout = ?config.timeout(), "store ready");

    let app = todo_server::app(AppState::new(store, config.timeout()));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "listening");

    todo_server::run(listener, app, shutdown_signal()).await?;

    if let Some(mongo) = mongo {
        mongo.shutdown().await;
    }
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(%err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                warn!(%err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received");
}
