//! platelens-server library - HTTP surface for the analysis pipeline

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::Router;
use tower_http::cors::CorsLayer;

use platelens_app::AnalysisPipeline;

pub mod api;

/// Largest accepted upload. Food photos are small; this is generous.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<AnalysisPipeline>,
}

impl AppState {
    pub fn new(pipeline: Arc<AnalysisPipeline>) -> Self {
        Self { pipeline }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::post;

    Router::new()
        .route("/analyze", post(api::analyze))
        .merge(api::health_routes())
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
