//! Integration tests for the REST endpoints.
//!
//! Tests drive the Axum `Router` directly via `tower::ServiceExt` without
//! binding a TCP port.

use std::sync::Arc;

use anyhow::Result;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::DateTime;
use resilience_hub::{router, AppState};
use serde_json::Value;
use tower::ServiceExt;

fn app() -> Router {
    router(Arc::new(AppState::default()))
}

async fn get(uri: &str) -> Result<(StatusCode, Value)> {
    // ---
    let response = app()
        .oneshot(Request::builder().uri(uri).body(Body::empty())?)
        .await?;
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    Ok((status, body))
}

#[tokio::test]
async fn health_reports_ok_with_valid_timestamp() -> Result<()> {
    // ---
    let (status, body) = get("/api/health").await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "OK");
    assert!(!body["message"].as_str().unwrap_or_default().is_empty());
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));

    let timestamp = body["timestamp"].as_str().unwrap_or_default();
    assert!(!timestamp.is_empty(), "timestamp should not be empty");
    tokio_test::assert_ok!(DateTime::parse_from_rfc3339(timestamp));
    Ok(())
}

#[tokio::test]
async fn sensors_list_has_derived_statuses() -> Result<()> {
    // ---
    let (status, body) = get("/api/sensors").await?;
    assert_eq!(status, StatusCode::OK);

    let sensors = body.as_array().cloned().unwrap_or_default();
    assert_eq!(sensors.len(), 4);

    let fire = &sensors[0];
    assert_eq!(fire["id"], 1);
    assert_eq!(fire["type"], "fire_hazard");
    assert_eq!(fire["currentValue"], 7.2);
    assert_eq!(fire["threshold"], 5.0);
    assert_eq!(fire["status"], "critical");
    assert_eq!(fire["location"]["region"], "durban");

    let weather = &sensors[2];
    assert_eq!(weather["currentValue"], 28.0);
    assert_eq!(weather["status"], "normal");
    Ok(())
}

#[tokio::test]
async fn sensors_filters_apply() -> Result<()> {
    // ---
    let (status, body) = get("/api/sensors?status=normal").await?;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<i64> = body
        .as_array()
        .map(|a| a.iter().filter_map(|s| s["id"].as_i64()).collect())
        .unwrap_or_default();
    assert_eq!(ids, vec![3, 4]);

    let (_, body) = get("/api/sensors?type=water_level&limit=5").await?;
    assert_eq!(body.as_array().map(Vec::len), Some(1));

    let (_, body) = get("/api/sensors?region=nowhere").await?;
    assert_eq!(body.as_array().map(Vec::len), Some(0));
    Ok(())
}

#[tokio::test]
async fn sensors_reject_unknown_enum_values() -> Result<()> {
    // ---
    let (status, _) = get("/api/sensors?type=volcano").await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = get("/api/alerts?severity=apocalyptic").await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn single_sensor_and_not_found() -> Result<()> {
    // ---
    let (status, body) = get("/api/sensors/2").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["type"], "water_level");
    assert_eq!(body["status"], "warning");

    let (status, body) = get("/api/sensors/404").await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], 404);
    assert_eq!(body["error"], "not found: sensor 404");
    Ok(())
}

#[tokio::test]
async fn alerts_are_served_and_filterable() -> Result<()> {
    // ---
    let (status, body) = get("/api/alerts").await?;
    assert_eq!(status, StatusCode::OK);

    let alerts = body.as_array().cloned().unwrap_or_default();
    assert_eq!(alerts.len(), 2);
    assert_eq!(alerts[0]["severity"], "high");
    assert_eq!(alerts[0]["status"], "active");
    assert_eq!(alerts[0]["foodImpact"]["suppliesAtRisk"], "320 tons");
    assert_eq!(alerts[1]["foodImpact"]["routesDisrupted"], 3);

    let (_, body) = get("/api/alerts?status=monitoring").await?;
    let monitoring = body.as_array().cloned().unwrap_or_default();
    assert_eq!(monitoring.len(), 1);
    assert_eq!(monitoring[0]["severity"], "moderate");
    Ok(())
}

#[tokio::test]
async fn food_security_endpoints() -> Result<()> {
    // ---
    let (status, body) = get("/api/food-security").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalInventory"], "2,450 tons");
    assert_eq!(body["distribution"].as_array().map(Vec::len), Some(6));

    let (status, body) = get("/api/food-security/communities").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["name"], "KwaMashu Township");
    assert_eq!(body[2]["resilienceScore"], 55);

    let (status, body) = get("/api/food-security/supply-chain").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalRoutes"], 15);
    assert_eq!(body["routes"][1]["status"], "delayed");
    assert_eq!(body["routes"][1]["delayReason"], "Flooded roads");
    assert!(body["routes"][1].get("nextDelivery").is_none());
    Ok(())
}

#[tokio::test]
async fn food_predictions_snapshot() -> Result<()> {
    // ---
    let (status, body) = get("/api/analytics/food-predictions").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cropYield"]["confidence"], 78);
    assert_eq!(body["foodPrices"]["trend"], "up");
    assert_eq!(body["supplyChain"]["trigger"], "Weather-related closures");
    Ok(())
}

#[tokio::test]
async fn unknown_route_is_404() -> Result<()> {
    // ---
    let (status, _) = get("/api/readings").await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}
