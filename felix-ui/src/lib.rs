//! felix-ui library - Fix-It Felix diagnostic dashboard
//!
//! Serves the browser dashboard and proxies analysis submissions to the AI Engine.

use axum::extract::DefaultBodyLimit;
use axum::Router;
use felix_common::config::ServiceConfig;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod client;
pub mod engine;
pub mod error;

pub use crate::engine::EngineClient;
pub use crate::error::{ProxyError, ProxyResult};

/// Application state shared across HTTP handlers
///
/// Immutable after startup.
#[derive(Clone)]
pub struct AppState {
    /// Forwarding client for the AI Engine
    pub engine: EngineClient,
    /// Upper bound on an inbound analyze request body
    pub max_upload_bytes: usize,
}

impl AppState {
    /// Create new application state
    pub fn new(engine: EngineClient, max_upload_bytes: usize) -> Self {
        Self {
            engine,
            max_upload_bytes,
        }
    }

    /// Build state from resolved configuration
    pub fn from_config(config: &ServiceConfig) -> felix_common::Result<Self> {
        let engine = EngineClient::new(config.engine_url.clone(), config.engine_timeout)?;
        Ok(Self::new(engine, config.max_upload_bytes))
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    // Analyze proxy carries image uploads, so it gets its own body limit
    let proxy = Router::new()
        .route("/api/analyze", post(api::analyze))
        .layer(DefaultBodyLimit::max(state.max_upload_bytes));

    let public = Router::new()
        .route("/", get(api::serve_index))
        .route("/static/app.js", get(api::serve_app_js))
        .route("/static/app.css", get(api::serve_app_css))
        .route("/api/buildinfo", get(api::get_build_info))
        .merge(api::health_routes());

    Router::new()
        .merge(proxy)
        .merge(public)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
