//! Mealistik HTTP server library.
//!
//! Exposes the configuration, shared state, and router so integration
//! tests can drive the exact router the binary serves.

pub mod config;
pub mod routes;
pub mod state;

use std::sync::Arc;

use axum::Router;
use axum::http::HeaderValue;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the router with all routes and middleware.
#[must_use]
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(routes::pages::router())
        .merge(routes::forms::router())
        .merge(routes::sys::router())
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            axum::http::header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            axum::http::header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .with_state(state)
}
