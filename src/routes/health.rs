// src/routes/health.rs
//! API health check endpoint for the resilience backend.
//!
//! This module defines the `/api/health` route used by container orchestrators
//! and the dashboard itself to verify that the service is running and able to
//! respond to HTTP requests. It follows the Explicit Module Boundary Pattern
//! (EMBP):
//! - Internal to this file: endpoint handler(s) and related types
//! - Exports to the gateway (`mod.rs`): a subrouter containing the route

use axum::{routing::get, Json, Router};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

/// JSON response body for the `/api/health` endpoint.
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    message: &'static str,
    /// RFC 3339 time at which the response was produced.
    timestamp: String,
    initiative: &'static str,
    version: &'static str,
}

/// Handle `GET /api/health`.
///
/// Returns a JSON object indicating the API is reachable. This endpoint is
/// deliberately lightweight and does not touch the sensor store or the
/// real-time channel.
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK",
        message: "Climate Resilience & Food Security Backend is running",
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        initiative: "FNB Climate Resilience Program",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Create a subrouter containing the `/api/health` route.
///
/// This router is generic over the application state so it can merge cleanly
/// with the gateway router, regardless of the state type.
///
/// # Type Parameters
/// - `S`: Application state type shared by all routes in the gateway.
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/api/health", get(health))
}
