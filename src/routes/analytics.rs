use std::sync::Arc;

use axum::{routing::get, Json, Router};

use crate::{catalog, AppState, FoodPredictions};

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/analytics/food-predictions", get(food_predictions))
}

async fn food_predictions() -> Json<FoodPredictions> {
    Json(catalog::food_predictions())
}
