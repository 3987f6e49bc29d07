//! Real-time event shapes exchanged over the WebSocket channel.
//!
//! Every frame is JSON text of the form `{"kind": "<eventName>", "data": <payload>}`.
//! Server events are pushed to region subscribers; client events drive
//! subscriptions and relays.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{DashboardError, Result};
use crate::models::SensorUpdate;

// ---

/// A sensor reading submitted by a client for relay to its region.
///
/// Only `region` is interpreted; every other field is carried through verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorReport {
    pub region: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// Body of a `sensorUpdate` event: either a tick result or a relayed report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SensorPayload {
    Tick(SensorUpdate),
    Relayed(SensorReport),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodSecurityUpdate {
    pub at_risk_supplies: String,
    pub supply_chain_status: String,
    pub timestamp: DateTime<Utc>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityUpdate {
    pub community_id: u32,
    pub resilience_score: u32,
    pub timestamp: DateTime<Utc>,
}

/// Events pushed from the server to subscribed clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "camelCase")]
pub enum ServerEvent {
    SensorUpdate(SensorPayload),
    FoodSecurityUpdate(FoodSecurityUpdate),
    CommunityUpdate(CommunityUpdate),
}

impl ServerEvent {
    /// The event name as it appears in the `kind` tag.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SensorUpdate(_) => "sensorUpdate",
            Self::FoodSecurityUpdate(_) => "foodSecurityUpdate",
            Self::CommunityUpdate(_) => "communityUpdate",
        }
    }

    /// Encode as a WebSocket text frame.
    pub fn to_frame(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl From<SensorUpdate> for ServerEvent {
    fn from(update: SensorUpdate) -> Self {
        Self::SensorUpdate(SensorPayload::Tick(update))
    }
}

/// Events sent by clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "camelCase")]
pub enum ClientEvent {
    JoinRegion(String),
    LeaveRegion(String),
    SensorData(SensorReport),
}

impl ClientEvent {
    /// Decode a WebSocket text frame.
    pub fn parse(frame: &str) -> Result<Self> {
        serde_json::from_str(frame).map_err(DashboardError::MalformedFrame)
    }
}
