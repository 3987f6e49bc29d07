//! Shared application state.
//!
//! [`AppState`] is built once at startup, wrapped in [`Arc`](std::sync::Arc)
//! and injected into every handler via Axum's `State` extractor. It also
//! feeds the global ticker.

use crate::channel::RegionChannel;
use crate::store::SensorStore;
use crate::Config;

pub struct AppState {
    pub config: Config,
    /// Authoritative sensor records.
    pub store: SensorStore,
    /// Region subscriptions of live WebSocket connections.
    pub channel: RegionChannel,
}

impl AppState {
    /// Seed the sensor store and size the channel from `config`.
    pub fn new(config: Config) -> Self {
        let channel = RegionChannel::new(config.client_buffer);
        Self {
            config,
            store: SensorStore::seeded(),
            channel,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
