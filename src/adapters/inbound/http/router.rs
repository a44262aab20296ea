use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers::{get_feed, get_live_stream, health, list_media, reload_feed};
use crate::{
    domain::models::LiveStream,
    ports::services::{FeedService, MediaService},
};

/// Application state containing all services
#[derive(Clone)]
pub struct AppState {
    pub feed_service: Arc<dyn FeedService>,
    pub media_service: Arc<dyn MediaService>,
    pub live_stream: LiveStream,
}

/// Create the main application router with all endpoints
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        // Feeds
        .route("/feeds/{kind}", get(get_feed))
        .route("/feeds/{kind}/reload", post(reload_feed))
        // Ad-hoc listing
        .route("/media", get(list_media))
        .route("/live", get(get_live_stream))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        // Add state for dependency injection
        .with_state(state)
}
