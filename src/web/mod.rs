//! HTTP surface over the lookups.

pub mod error;
pub mod handlers;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::services::EnvironmentSource;
use handlers::AppState;

/// Every route is mounted both with and without a trailing slash.
pub fn router(state: AppState) -> Router {
    let routes = Router::new()
        .route("/individual-greenhouse", get(handlers::individual_greenhouse))
        .route("/individual-greenhouse/", get(handlers::individual_greenhouse))
        .route("/greenhouse", get(handlers::greenhouse_snapshot))
        .route("/greenhouse/", get(handlers::greenhouse_snapshot))
        .route("/coord", get(handlers::coordinate))
        .route("/coord/", get(handlers::coordinate))
        .route("/health", get(handlers::health_score))
        .route("/health/", get(handlers::health_score))
        .route("/healthz", get(handlers::healthz));

    routes
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Binds `config.listen_addr` and serves until Ctrl-C or SIGTERM.
pub async fn serve(config: &Config, source: Arc<dyn EnvironmentSource>) -> Result<()> {
    let state = AppState {
        source,
        climate: Arc::new(config.climate.clone()),
    };

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.listen_addr))?;

    info!(addr = %config.listen_addr, "terra_health listening");
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        if let Ok(mut sigterm) = signal(SignalKind::terminate()) {
            sigterm.recv().await;
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
