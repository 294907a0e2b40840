//! # message-api
//!
//! HTTP surface of the message service: config, router, the API key guard,
//! error mapping and the server loop with graceful shutdown.

pub mod cli;
pub mod config;
pub mod error;
pub mod guard;
pub mod routes;
pub mod state;
pub mod trace;

use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};

pub use cli::{load_config, Cli, Commands};
pub use config::ApiConfig;
pub use error::ApiError;
pub use state::AppState;

/// Builds the router for the given state.
pub fn build_router(state: AppState) -> axum::Router {
    routes::build(Arc::new(state))
}

/// Opens the store, binds the listener and serves until SIGINT or SIGTERM.
pub async fn serve(config: ApiConfig) -> Result<()> {
    let addr = config.socket_addr()?;
    let state = AppState::from_config(&config).await?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("message-api stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to install CTRL+C signal handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut s) => {
                s.recv().await;
            }
            Err(e) => warn!(error = %e, "failed to install SIGTERM handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    info!("shutdown signal received; starting graceful shutdown");
}
