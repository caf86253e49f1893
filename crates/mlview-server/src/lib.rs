//! mlview-server: Axum server for the mlview dashboard.
//!
//! Serves the embedded Leptos frontend and forwards everything under the API
//! prefix to the tracking server, so the browser only ever talks to one
//! origin.

pub mod assets;
pub mod proxy;
pub mod state;

use axum::{routing::any, Router};
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::state::AppState;

pub use state::ServerConfig;

/// Build the Axum router with all routes.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_route = format!("{}/{{*path}}", state.config.api.api_prefix());

    Router::new()
        .route(&api_route, any(proxy::forward))
        .fallback(assets::serve_frontend)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Start the server on the configured address.
pub async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    if config.api.api_prefix().is_empty() {
        anyhow::bail!("the API prefix must not be empty when serving the dashboard");
    }

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!(
        "proxying {} to {}",
        config.api.api_prefix(),
        config.tracking_uri
    );

    let state = AppState::new(config)?;
    let app = build_router(state);

    info!("mlview dashboard at http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
