use std::env;
use std::sync::Arc;

use recipebox_server::config::{Config, StoreKind};
use recipebox_server::store::{MemoryStore, PgStore};
use recipebox_server::{api, AppState, OPENAPI_PATH};
use tokio::signal;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn init_telemetry() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Check for --openapi flag to dump spec and exit
    if env::args().any(|arg| arg == "--openapi") {
        println!("{}", api::openapi().to_pretty_json()?);
        return Ok(());
    }

    init_telemetry();

    let config = Config::from_env()?;
    tracing::debug!(store = ?config.store, prefix = %config.api_prefix, "loaded configuration");

    // Connection failures are logged, not fatal: requests report the store
    // as unavailable instead.
    let store: AppState = match config.store {
        StoreKind::Postgres => Arc::new(PgStore::connect(&config.database_url)),
        StoreKind::Memory => {
            tracing::warn!("Using in-memory recipe store; recipes are lost on exit");
            Arc::new(MemoryStore::new())
        }
    };

    let app = recipebox_server::app(store, &config.api_prefix);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    let addr = listener.local_addr()?;

    tracing::info!("Server listening on {}", addr);
    tracing::info!("Recipes API mounted at {}/", config.api_prefix);
    tracing::info!("OpenAPI spec available at {}", OPENAPI_PATH);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => tracing::info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                tracing::error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                tracing::info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("Failed to install terminate handler: {}", e);
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
}
