//! Backend for the climate resilience and food security dashboard.
//!
//! Serves mock sensor, alert, and food-security data over REST and pushes
//! simulated sensor updates to region-scoped WebSocket subscribers.
//!
//! Module map (Explicit Module Boundary Pattern: siblings import shared types
//! through this gateway, never through each other's paths):
//! - `config`  – environment-driven [`Config`]
//! - `models`  – records and closed enumerations
//! - `catalog` – fixed seed and read-only datasets
//! - `store`   – the in-memory [`SensorStore`]
//! - `events`  – tagged real-time event shapes
//! - `channel` – the region fan-out [`RegionChannel`]
//! - `ticker`  – the single global ticker
//! - `routes`  – HTTP and WebSocket endpoints

pub mod catalog;
pub mod channel;
pub mod config;
pub mod error;
pub mod events;
pub mod models;
pub mod routes;
pub mod state;
pub mod store;
pub mod ticker;

pub use channel::{ClientId, RegionChannel};
pub use config::Config;
pub use error::DashboardError;
pub use events::{ClientEvent, ServerEvent};
pub use models::{
    Alert, AlertSeverity, AlertStatus, Community, FoodPredictions, FoodSecuritySnapshot, Sensor,
    SensorStatus, SensorType, SupplyChain,
};
pub use routes::router;
pub use state::AppState;
pub use store::SensorStore;
