use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::{debug, info};

use crate::{AppState, DashboardError, Sensor, SensorStatus, SensorType};

// ---

pub fn router() -> Router<Arc<AppState>> {
    // ---
    Router::new()
        .route("/api/sensors", get(list_sensors))
        .route("/api/sensors/{id}", get(get_sensor))
}

async fn list_sensors(
    Query(params): Query<SensorsQuery>,
    State(state): State<Arc<AppState>>,
) -> Json<Vec<Sensor>> {
    // ---
    let snapshot = state.store.get_all().await;
    debug!("GET /api/sensors - {} sensors in store", snapshot.len());

    let filtered = apply_filters(snapshot, &params);
    info!("GET /api/sensors - returning {} sensors", filtered.len());
    Json(filtered)
}

async fn get_sensor(
    Path(id): Path<u32>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Sensor>, DashboardError> {
    // ---
    state
        .store
        .get(id)
        .await
        .map(Json)
        .ok_or_else(|| DashboardError::NotFound(format!("sensor {id}")))
}

/// Query parameters for filtering sensors
#[derive(Debug, Default, Deserialize)]
pub struct SensorsQuery {
    region: Option<String>,
    #[serde(rename = "type")]
    kind: Option<SensorType>,
    status: Option<SensorStatus>,
    limit: Option<u32>,
}

/// Apply query filters to a sensor snapshot
fn apply_filters(sensors: Vec<Sensor>, params: &SensorsQuery) -> Vec<Sensor> {
    // ---
    debug!("Apply filter: {:?}", params);
    sensors
        .into_iter()
        .filter(|s| {
            params
                .region
                .as_ref()
                .map_or(true, |region| &s.location.region == region)
        })
        .filter(|s| params.kind.map_or(true, |kind| s.kind == kind))
        .filter(|s| params.status.map_or(true, |status| s.status() == status))
        .take(params.limit.unwrap_or(1000) as usize)
        .collect()
}
