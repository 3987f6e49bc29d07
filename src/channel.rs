//! Region-scoped fan-out of real-time events.
//!
//! Connected clients are grouped into named regions. A publish to a region
//! reaches every client currently joined to it, optionally excluding the
//! client that triggered the publish.
//!
//! ```text
//!                 ┌── region "durban" ──► client A, client B
//! Ticker ──┐      │
//!           ├── RegionChannel
//! Client C ┘      │
//!   (relay)       └── region "cape-town" ──► client C
//! ```
//!
//! Delivery is best-effort and at-most-once. Each client owns a bounded
//! queue; when it is full the event is dropped for that client only and
//! counted in [`ChannelStats::dropped`]. Nothing is replayed to clients that
//! connect or join later.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::{mpsc, RwLock};
use tracing::debug;
use uuid::Uuid;

use crate::events::ServerEvent;

/// Opaque identifier assigned to each connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClientId(Uuid);

impl ClientId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ClientId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Receiving half handed to a connection.
pub type EventReceiver = mpsc::Receiver<Arc<ServerEvent>>;

/// Point-in-time counters for monitoring.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChannelStats {
    pub delivered: u64,
    pub dropped: u64,
    pub clients: usize,
    pub regions: usize,
}

struct ClientHandle {
    tx: mpsc::Sender<Arc<ServerEvent>>,
    regions: HashSet<String>,
}

#[derive(Default)]
struct Registry {
    clients: HashMap<ClientId, ClientHandle>,
    /// Regions persist once created, even when their member set empties.
    regions: HashMap<String, HashSet<ClientId>>,
}

pub struct RegionChannel {
    registry: RwLock<Registry>,
    buffer: usize,
    delivered: AtomicU64,
    dropped: AtomicU64,
}

impl RegionChannel {
    /// Create a channel whose per-client queues hold `buffer` events.
    pub fn new(buffer: usize) -> Self {
        Self {
            registry: RwLock::new(Registry::default()),
            buffer: buffer.max(1),
            delivered: AtomicU64::new(0),
            dropped: AtomicU64::new(0),
        }
    }

    /// Register a new connection. It belongs to no region until it joins one.
    pub async fn connect(&self) -> (ClientId, EventReceiver) {
        // ---
        let id = ClientId::new();
        let (tx, rx) = mpsc::channel(self.buffer);
        let handle = ClientHandle {
            tx,
            regions: HashSet::new(),
        };
        self.registry.write().await.clients.insert(id, handle);
        debug!(client = %id, "Client registered");
        (id, rx)
    }

    /// Add `client` to `region`. Idempotent; any string is a valid region.
    ///
    /// Returns `true` when the membership is new. Unknown clients are ignored.
    pub async fn join(&self, client: ClientId, region: &str) -> bool {
        // ---
        let mut registry = self.registry.write().await;
        let Registry { clients, regions } = &mut *registry;

        let Some(handle) = clients.get_mut(&client) else {
            debug!(client = %client, region, "Join from unregistered client ignored");
            return false;
        };

        handle.regions.insert(region.to_string());
        regions.entry(region.to_string()).or_default().insert(client)
    }

    /// Remove `client` from a single region.
    pub async fn leave_region(&self, client: ClientId, region: &str) -> bool {
        // ---
        let mut registry = self.registry.write().await;
        let Registry { clients, regions } = &mut *registry;

        if let Some(handle) = clients.get_mut(&client) {
            handle.regions.remove(region);
        }
        regions
            .get_mut(region)
            .is_some_and(|members| members.remove(&client))
    }

    /// Drop `client` entirely, removing it from every region it joined.
    ///
    /// Returns the number of regions the client was removed from.
    pub async fn leave(&self, client: ClientId) -> usize {
        // ---
        let mut registry = self.registry.write().await;
        let Registry { clients, regions } = &mut *registry;

        let Some(handle) = clients.remove(&client) else {
            return 0;
        };

        let mut removed = 0;
        for name in &handle.regions {
            if let Some(members) = regions.get_mut(name.as_str()) {
                if members.remove(&client) {
                    removed += 1;
                }
            }
        }
        removed
    }

    /// Deliver `event` to every member of `region` other than `exclude`.
    ///
    /// Never waits on a slow client. Returns the number of clients the event
    /// was queued for.
    pub async fn publish(
        &self,
        region: &str,
        event: ServerEvent,
        exclude: Option<ClientId>,
    ) -> usize {
        // ---
        let registry = self.registry.read().await;
        let Some(members) = registry.regions.get(region) else {
            return 0;
        };

        let event = Arc::new(event);
        let mut delivered = 0;
        let mut dropped = 0;

        for id in members.iter().filter(|id| Some(**id) != exclude) {
            let Some(handle) = registry.clients.get(id) else {
                continue;
            };
            match handle.tx.try_send(Arc::clone(&event)) {
                Ok(()) => delivered += 1,
                Err(e) => {
                    debug!(client = %id, region, "Dropping {} event: {e}", event.name());
                    dropped += 1;
                }
            }
        }

        self.delivered.fetch_add(delivered, Ordering::Relaxed);
        self.dropped.fetch_add(dropped, Ordering::Relaxed);
        delivered as usize
    }

    /// Current members of `region`.
    pub async fn members(&self, region: &str) -> Vec<ClientId> {
        self.registry
            .read()
            .await
            .regions
            .get(region)
            .map(|members| members.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Whether `region` has ever been joined.
    pub async fn has_region(&self, region: &str) -> bool {
        self.registry.read().await.regions.contains_key(region)
    }

    pub async fn stats(&self) -> ChannelStats {
        let registry = self.registry.read().await;
        ChannelStats {
            delivered: self.delivered.load(Ordering::Relaxed),
            dropped: self.dropped.load(Ordering::Relaxed),
            clients: registry.clients.len(),
            regions: registry.regions.len(),
        }
    }
}

impl Default for RegionChannel {
    fn default() -> Self {
        Self::new(64)
    }
}
