pub mod error;
pub mod routes;

use std::sync::Arc;
use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use crate::PassportExtractor;

#[derive(Clone)]
pub struct AppState {
    pub extractor: Arc<PassportExtractor>,
}

impl AppState {
    pub fn new(extractor: PassportExtractor) -> Self {
        AppState {
            extractor: Arc::new(extractor),
        }
    }
}

/// Build the HTTP surface: extraction, health check and the CORS allow-list.
pub fn router(state: AppState, allowed_origins: Vec<HeaderValue>, max_upload_bytes: usize) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true);

    Router::new()
        .route("/api/extract-passport", post(routes::extract_passport))
        .route("/api/health", get(routes::health_check))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(cors)
        .with_state(state)
}
