//! HTTP server: canonical redirects, server-rendered pages, static files.

mod pages;
mod state;
mod statics;


use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{routing::get, Router};
use site::config::ServerConfig;
use tower_http::trace::TraceLayer;

pub use state::{AppState, SharedState};

pub async fn run() -> Result<()> {
    // Local runs may keep their settings in .env
    let _ = dotenvy::dotenv();
    init_tracing();

    let config = ServerConfig::from_env();
    log_runtime_config(&config);

    let addr = config.bind_addr();
    let state = Arc::new(AppState::new(config));
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!("Server running on http://{addr}");
    axum::serve(listener, app).await.context("serving http")?;
    Ok(())
}

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/sitemap.xml", get(pages::sitemap))
        .merge(statics::routes(&state.config))
        .fallback(pages::page)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "web=info,site=info,tower_http=info".into()),
        )
        .init();
}

fn log_runtime_config(config: &ServerConfig) {
    tracing::info!(
        mode = ?config.mode,
        site_url = %config.site_url,
        build_id = %config.build_id,
        root = %config.root_dir.display(),
        "startup"
    );
    let static_dir = config.static_dir();
    if !static_dir.is_dir() {
        tracing::warn!("static directory {} does not exist", static_dir.display());
    }
}
