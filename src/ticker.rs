//! The single process-wide ticker.
//!
//! Every period the ticker perturbs the sensor store and publishes one
//! `sensorUpdate` per sensor to that sensor's region. On the same beat it
//! independently rolls the two auxiliary streams:
//!
//! - `foodSecurityUpdate` with probability [`FOOD_SECURITY_PROBABILITY`]
//! - `communityUpdate` with probability [`COMMUNITY_PROBABILITY`]
//!
//! both published to the configured default region. Server-originated
//! events reach every subscriber of the region; nobody is excluded.
//!
//! Connections never own a timer. Closing a connection only removes its
//! subscriptions, so the tick cadence is independent of the client count.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::catalog::COMMUNITY_COUNT;
use crate::events::{CommunityUpdate, FoodSecurityUpdate, ServerEvent};
use crate::state::AppState;

pub const FOOD_SECURITY_PROBABILITY: f64 = 0.2;
pub const COMMUNITY_PROBABILITY: f64 = 0.1;

/// Resilience scores are drawn from `[40, 70)`.
pub const RESILIENCE_SCORE_MIN: u32 = 40;
pub const RESILIENCE_SCORE_MAX: u32 = 70;

/// What one tick produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub sensor_updates: usize,
    pub deliveries: usize,
    pub food_security: bool,
    pub community: bool,
}

pub fn roll_food_security<R: Rng>(rng: &mut R, now: DateTime<Utc>) -> Option<FoodSecurityUpdate> {
    // ---
    if !rng.random_bool(FOOD_SECURITY_PROBABILITY) {
        return None;
    }

    let at_risk = 300 + rng.random_range(0..50u32);
    let supply_chain = 80 + rng.random_range(0..10u32);

    Some(FoodSecurityUpdate {
        at_risk_supplies: format!("{at_risk} tons"),
        supply_chain_status: format!("{supply_chain}%"),
        timestamp: now,
        message: "Food security metrics updated".to_string(),
    })
}

pub fn roll_community_update<R: Rng>(rng: &mut R, now: DateTime<Utc>) -> Option<CommunityUpdate> {
    // ---
    if !rng.random_bool(COMMUNITY_PROBABILITY) {
        return None;
    }

    Some(CommunityUpdate {
        community_id: rng.random_range(1..=COMMUNITY_COUNT),
        resilience_score: rng.random_range(RESILIENCE_SCORE_MIN..RESILIENCE_SCORE_MAX),
        timestamp: now,
    })
}

/// Run one tick against `state` and publish everything it produced.
pub async fn run_tick<R: Rng>(state: &AppState, rng: &mut R) -> TickReport {
    // ---
    let mut report = TickReport::default();

    let updates = state.store.tick(rng).await;
    report.sensor_updates = updates.len();

    for regional in updates {
        report.deliveries += state
            .channel
            .publish(&regional.region, ServerEvent::from(regional.update), None)
            .await;
    }

    let now = Utc::now();
    let region = state.config.default_region.as_str();

    if let Some(update) = roll_food_security(rng, now) {
        report.food_security = true;
        report.deliveries += state
            .channel
            .publish(region, ServerEvent::FoodSecurityUpdate(update), None)
            .await;
    }

    if let Some(update) = roll_community_update(rng, now) {
        report.community = true;
        report.deliveries += state
            .channel
            .publish(region, ServerEvent::CommunityUpdate(update), None)
            .await;
    }

    report
}

/// Spawn the global ticker. The first tick fires one `period` after spawning.
///
/// A tick that overruns its slot is not made up for; the next one runs on
/// the following scheduled instant.
pub fn spawn(state: Arc<AppState>, period: Duration) -> JoinHandle<()> {
    // ---
    tokio::spawn(async move {
        let mut rng = StdRng::from_os_rng();
        let mut ticks = interval_at(Instant::now() + period, period);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);

        info!(period_secs = period.as_secs_f64(), "Sensor ticker started");

        loop {
            ticks.tick().await;
            let report = run_tick(&state, &mut rng).await;
            let stats = state.channel.stats().await;
            debug!(
                sensors = report.sensor_updates,
                deliveries = report.deliveries,
                food_security = report.food_security,
                community = report.community,
                clients = stats.clients,
                dropped_total = stats.dropped,
                "Tick complete"
            );
        }
    })
}
