//! Food security endpoints: inventory snapshot, vulnerable communities, and
//! supply-chain route status. All three are read-only views of fixed data.

use std::sync::Arc;

use axum::{routing::get, Json, Router};
use chrono::Utc;

use crate::{catalog, AppState, Community, FoodSecuritySnapshot, SupplyChain};

// ---

pub fn router() -> Router<Arc<AppState>> {
    // ---
    Router::new()
        .route("/api/food-security", get(snapshot))
        .route("/api/food-security/communities", get(communities))
        .route("/api/food-security/supply-chain", get(supply_chain))
}

async fn snapshot() -> Json<FoodSecuritySnapshot> {
    Json(catalog::food_security())
}

async fn communities() -> Json<Vec<Community>> {
    Json(catalog::communities())
}

/// Route timestamps are relative to the time of the request.
async fn supply_chain() -> Json<SupplyChain> {
    Json(catalog::supply_chain(Utc::now()))
}
