//! Route gateway.
//!
//! Each sibling module owns one resource and exports a subrouter; this
//! module merges them, attaches shared middleware, and binds the state, so
//! `main.rs` never needs to know about individual endpoints.

use std::sync::Arc;

use axum::http::Method;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::AppState;

mod alerts;
mod analytics;
mod food_security;
mod health;
mod sensors;
mod ws;

// ---

pub fn router(state: Arc<AppState>) -> Router {
    // ---
    let cors = CorsLayer::new()
        .allow_origin(state.config.cors_origin.clone())
        .allow_methods([Method::GET, Method::POST]);

    Router::new()
        .merge(health::router())
        .merge(sensors::router())
        .merge(alerts::router())
        .merge(food_security::router())
        .merge(analytics::router())
        .merge(ws::router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
