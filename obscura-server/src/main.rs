//! Obscura Server - REST API for the photo attestation registry
//!
//! Exposes obscura-core functionality via HTTP endpoints:
//! - POST /attestations - register a photo hash with its commitment
//! - GET  /attestations/{hash} - read an attestation record
//! - POST /attestations/{hash}/proof - check an ownership proof

use tracing_subscriber::EnvFilter;

use obscura_server::{create_router_with_config, AppState, Config, RegistryStore};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("obscura_server=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env();

    let store = match RegistryStore::from_env(&config).await {
        Ok(store) => store,
        Err(e) => {
            tracing::error!(error = %e, "Failed to initialize attestation storage");
            std::process::exit(1);
        }
    };

    let state = AppState::new(store);
    let app = create_router_with_config(&config, state);

    let addr = config.socket_addr();
    tracing::info!(%addr, "Obscura attestation registry listening");
    tracing::info!("API docs available at http://{}/docs", addr);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, %addr, "Failed to bind listener");
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Resolve on Ctrl-C or SIGTERM so in-flight requests can drain.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
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

    tracing::info!("Shutdown signal received");
}
