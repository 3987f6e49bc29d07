//! Error types for the dashboard backend.
//!
//! [`DashboardError`] covers the failures the library layer can report. Route
//! handlers return it directly; the [`IntoResponse`] impl renders it as a
//! JSON body of the form `{"error": ..., "status": ...}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    /// The requested resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// A real-time frame from a client could not be understood.
    #[error("malformed client frame: {0}")]
    MalformedFrame(#[source] serde_json::Error),

    /// An outbound event could not be encoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A perturbation produced a NaN or infinite value.
    #[error("sensor {sensor_id} produced a non-finite reading")]
    NonFiniteReading { sensor_id: u32 },
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::MalformedFrame(_) => StatusCode::BAD_REQUEST,
            Self::Serialization(_) | Self::NonFiniteReading { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = serde_json::json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        });

        (status, Json(body)).into_response()
    }
}

pub type Result<T, E = DashboardError> = std::result::Result<T, E>;
