//! Data models for the climate resilience and food security dashboard.
//!
//! All JSON field names are camelCase to match what the dashboard frontend
//! consumes. Enumeration-like fields (sensor type, status, severity) are
//! closed Rust enums so an unknown value can never enter the system.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, Result};

// ---

/// A sensor is `critical` once its reading exceeds the threshold by this factor.
pub const CRITICAL_FACTOR: f64 = 1.2;

/// Kind of environmental sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorType {
    FireHazard,
    WaterLevel,
    AirQuality,
    Weather,
    Wind,
    Temperature,
    Humidity,
    Seismic,
}

/// Derived sensor health classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SensorStatus {
    Normal,
    Warning,
    Critical,
}

impl SensorStatus {
    /// Classify a reading against its trigger level.
    ///
    /// `critical` when `value > threshold * 1.2`, `warning` when
    /// `value > threshold`, otherwise `normal`.
    pub fn classify(value: f64, threshold: f64) -> Self {
        // ---
        if value > threshold * CRITICAL_FACTOR {
            Self::Critical
        } else if value > threshold {
            Self::Warning
        } else {
            Self::Normal
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Increasing,
    Decreasing,
    Stable,
}

/// Geographic placement of a sensor. `region` is the fan-out partition key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub region: String,
}

/// Forecast attached to a sensor by the (mocked) prediction model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub trend: Trend,
    pub confidence: f64,
}

/// Everything needed to construct a [`Sensor`], minus the derived status.
#[derive(Debug, Clone)]
pub struct SensorSeed {
    pub id: u32,
    pub name: &'static str,
    pub kind: SensorType,
    pub location: Location,
    pub current_value: f64,
    pub unit: &'static str,
    pub threshold: f64,
    pub icon: &'static str,
    pub uptime: &'static str,
    pub accuracy: &'static str,
    pub last_calibration: &'static str,
    pub prediction: Prediction,
    pub food_impact: &'static str,
    pub affected_supplies: &'static [&'static str],
    pub resilience_impact: &'static str,
    pub food_security_risk: &'static str,
}

/// Authoritative sensor record held by the state store.
///
/// `current_value`, `threshold` and `status` are private so the status can
/// only change together with the reading it is derived from.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Sensor {
    // ---
    pub id: u32,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: SensorType,
    pub location: Location,
    current_value: f64,
    pub unit: String,
    threshold: f64,
    status: SensorStatus,
    pub icon: String,
    pub uptime: String,
    pub accuracy: String,
    pub last_calibration: String,
    pub prediction: Prediction,
    pub last_updated: DateTime<Utc>,
    pub food_impact: String,
    pub affected_supplies: Vec<String>,
    pub resilience_impact: String,
    pub food_security_risk: String,
}

impl Sensor {
    /// Build a sensor from seed data, deriving its initial status.
    pub fn from_seed(seed: SensorSeed, now: DateTime<Utc>) -> Self {
        // ---
        let current_value = seed.current_value.max(0.0);
        Self {
            id: seed.id,
            name: seed.name.to_string(),
            kind: seed.kind,
            location: seed.location,
            current_value,
            unit: seed.unit.to_string(),
            threshold: seed.threshold,
            status: SensorStatus::classify(current_value, seed.threshold),
            icon: seed.icon.to_string(),
            uptime: seed.uptime.to_string(),
            accuracy: seed.accuracy.to_string(),
            last_calibration: seed.last_calibration.to_string(),
            prediction: seed.prediction,
            last_updated: now,
            food_impact: seed.food_impact.to_string(),
            affected_supplies: seed.affected_supplies.iter().map(|s| s.to_string()).collect(),
            resilience_impact: seed.resilience_impact.to_string(),
            food_security_risk: seed.food_security_risk.to_string(),
        }
    }

    pub fn current_value(&self) -> f64 {
        self.current_value
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn status(&self) -> SensorStatus {
        self.status
    }

    /// Apply a new reading: clamp to zero, round to one decimal, re-derive status.
    ///
    /// Rejects NaN and infinite values and leaves the sensor untouched.
    pub fn apply_reading(&mut self, value: f64, at: DateTime<Utc>) -> Result<SensorUpdate> {
        // ---
        if !value.is_finite() {
            return Err(DashboardError::NonFiniteReading { sensor_id: self.id });
        }

        let rounded = (value.max(0.0) * 10.0).round() / 10.0;
        self.current_value = rounded;
        self.status = SensorStatus::classify(rounded, self.threshold);
        self.last_updated = at;

        Ok(self.to_update())
    }

    /// Partial view of this sensor pushed to real-time subscribers.
    pub fn to_update(&self) -> SensorUpdate {
        SensorUpdate {
            id: self.id,
            current_value: self.current_value,
            status: self.status,
            last_updated: self.last_updated,
            food_impact: self.food_impact.clone(),
            food_security_risk: self.food_security_risk.clone(),
        }
    }
}

/// Partial sensor record carried by a `sensorUpdate` event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorUpdate {
    pub id: u32,
    pub current_value: f64,
    pub status: SensorStatus,
    pub last_updated: DateTime<Utc>,
    pub food_impact: String,
    pub food_security_risk: String,
}

// --- alerts

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Low,
    Moderate,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertStatus {
    Active,
    Monitoring,
    Resolved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertType {
    Fire,
    Flood,
    Earthquake,
    Storm,
    Integrated,
    Other,
}

/// Food-security consequences attached to an alert. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertFoodImpact {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplies_at_risk: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affected_crops: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub communities_affected: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub routes_disrupted: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_delays: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affected_areas: Option<Vec<String>>,
}

/// Read-only alert record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub severity: AlertSeverity,
    pub status: AlertStatus,
    pub location: String,
    pub timestamp: DateTime<Utc>,
    pub food_impact: AlertFoodImpact,
    #[serde(rename = "type")]
    pub kind: AlertType,
}

// --- food security

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodCategory {
    pub category: String,
    pub amount: String,
    pub risk: String,
}

/// Aggregate inventory and supply-chain snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodSecuritySnapshot {
    pub total_inventory: String,
    pub at_risk_supplies: String,
    pub vulnerable_population: String,
    pub supply_chain_status: String,
    pub operational_routes: String,
    pub food_price_index: String,
    pub distribution: Vec<FoodCategory>,
}

/// Resilience record for one vulnerable community.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Community {
    pub id: u32,
    pub name: String,
    pub population: u32,
    pub food_security_index: String,
    pub climate_risk: String,
    pub main_crops: Vec<String>,
    pub support_needed: Vec<String>,
    pub resilience_score: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteStatus {
    Operational,
    Delayed,
    Closed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplyRoute {
    pub id: u32,
    pub name: String,
    pub status: RouteStatus,
    pub last_delivery: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_delivery: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delay_reason: Option<String>,
    pub communities_served: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplyChain {
    pub operational_routes: u32,
    pub disrupted_routes: u32,
    pub total_routes: u32,
    pub average_delivery_time: String,
    pub routes: Vec<SupplyRoute>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

/// One forward-looking projection line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projection {
    pub current: String,
    pub prediction: String,
    pub confidence: u8,
    pub trend: Direction,
    pub trigger: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodPredictions {
    pub crop_yield: Projection,
    pub food_prices: Projection,
    pub supply_chain: Projection,
}
