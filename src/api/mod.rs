//! HTTP API module
//!
//! Local control surface for the timer: the buttons and custom-duration
//! input of a pomodoro app, as endpoints.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/timer/start", post(start_handler))
        .route("/timer/stop", post(stop_handler))
        .route("/timer/configure", post(configure_handler))
        .route("/timer/custom", post(custom_handler))
        .route("/timer/preset/:name", post(preset_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
