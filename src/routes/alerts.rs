use std::sync::Arc;

use axum::{extract::Query, routing::get, Json, Router};
use chrono::Utc;
use serde::Deserialize;
use tracing::info;

use crate::{catalog, Alert, AlertSeverity, AlertStatus, AppState};

// ---

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/alerts", get(list_alerts))
}

/// Query parameters for filtering alerts
#[derive(Debug, Default, Deserialize)]
pub struct AlertsQuery {
    severity: Option<AlertSeverity>,
    status: Option<AlertStatus>,
}

async fn list_alerts(Query(params): Query<AlertsQuery>) -> Json<Vec<Alert>> {
    // ---
    let alerts: Vec<Alert> = catalog::alerts(Utc::now())
        .into_iter()
        .filter(|a| params.severity.map_or(true, |severity| a.severity == severity))
        .filter(|a| params.status.map_or(true, |status| a.status == status))
        .collect();

    info!("GET /api/alerts - returning {} alerts", alerts.len());
    Json(alerts)
}
