//! HTTP API module
//!
//! This module contains all HTTP endpoint handlers and response structures.

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
        // Pointer gestures
        .route("/dial/press", post(press_handler))
        .route("/dial/drag/begin", post(drag_begin_handler))
        .route("/dial/drag/update", post(drag_update_handler))
        .route("/dial/drag/end", post(drag_end_handler))
        .route("/dial/set", post(set_handler))
        .route("/dial/resize", post(resize_handler))
        // Actions
        .route("/toggle", post(toggle_handler))
        .route("/time/add", post(add_time_handler))
        .route("/time/remove", post(remove_time_handler))
        .route("/alarm/stop", post(stop_alarm_handler))
        .route("/status", get(status_handler))
        .route("/render", get(render_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
