//! In-memory sensor state store.
//!
//! [`SensorStore`] is the single owner of the sensor array. Reads hand out
//! snapshots (clones), and the only mutation path is [`SensorStore::tick`],
//! which perturbs every reading and re-derives its status in one pass under
//! the write lock.

use chrono::Utc;
use rand::Rng;
use tokio::sync::RwLock;
use tracing::warn;

use crate::catalog;
use crate::models::{Sensor, SensorUpdate};

/// Largest absolute change applied to a reading in one tick.
pub const MAX_DELTA: f64 = 1.0;

/// A tick result paired with the region it must be published to.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionalUpdate {
    pub region: String,
    pub update: SensorUpdate,
}

#[derive(Debug)]
pub struct SensorStore {
    sensors: RwLock<Vec<Sensor>>,
}

impl SensorStore {
    pub fn new(sensors: Vec<Sensor>) -> Self {
        Self {
            sensors: RwLock::new(sensors),
        }
    }

    /// A store holding the fixed seed list.
    pub fn seeded() -> Self {
        let now = Utc::now();
        let sensors = catalog::seed_sensors()
            .into_iter()
            .map(|seed| Sensor::from_seed(seed, now))
            .collect();
        Self::new(sensors)
    }

    /// Snapshot of every sensor record.
    pub async fn get_all(&self) -> Vec<Sensor> {
        self.sensors.read().await.clone()
    }

    pub async fn get(&self, id: u32) -> Option<Sensor> {
        self.sensors.read().await.iter().find(|s| s.id == id).cloned()
    }

    pub async fn sensor_count(&self) -> usize {
        self.sensors.read().await.len()
    }

    /// Perturb every sensor by a uniform delta in `[-MAX_DELTA, MAX_DELTA)`.
    pub async fn tick<R: Rng>(&self, rng: &mut R) -> Vec<RegionalUpdate> {
        self.tick_with(|_| rng.random_range(-MAX_DELTA..MAX_DELTA))
            .await
    }

    /// Apply `delta(sensor)` to every sensor.
    ///
    /// A sensor whose new value is rejected is logged and left unchanged; the
    /// remaining sensors are still updated.
    pub async fn tick_with<F>(&self, mut delta: F) -> Vec<RegionalUpdate>
    where
        F: FnMut(&Sensor) -> f64,
    {
        // ---
        let now = Utc::now();
        let mut sensors = self.sensors.write().await;
        let mut updates = Vec::with_capacity(sensors.len());

        for sensor in sensors.iter_mut() {
            let next = sensor.current_value() + delta(sensor);
            match sensor.apply_reading(next, now) {
                Ok(update) => updates.push(RegionalUpdate {
                    region: sensor.location.region.clone(),
                    update,
                }),
                Err(e) => warn!(sensor_id = sensor.id, "Skipping sensor this tick: {e}"),
            }
        }

        updates
    }
}

impl Default for SensorStore {
    fn default() -> Self {
        Self::seeded()
    }
}
