//! # Availability Cache
//!
//! Short-lived map from normalized candidate to its last known availability.
//! Entries older than the TTL are never served; callers must re-query.
//! Expired entries are pruned when read and whenever a new answer is stored.
//!
//! One cache is meant to be shared (via `Arc`) by every checker in a session.
//! Writes are last-write-wins and entries are immutable snapshots, so a plain
//! `RwLock` around the map is all the coordination needed.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::availability::clock::{Clock, TokioClock};

/// A cached availability answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    pub available: bool,
    /// Monotonic timestamp used for expiry
    pub checked_at: Instant,
    /// Wall-clock timestamp, for logs and diagnostics only
    pub checked_at_utc: DateTime<Utc>,
}

/// Process-wide availability cache
#[derive(Debug)]
pub struct AvailabilityCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl AvailabilityCache {
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
            clock,
        }
    }

    /// Cache backed by Tokio's clock
    pub fn with_ttl(ttl: Duration) -> Self {
        Self::new(ttl, Arc::new(TokioClock))
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Fresh entry for `candidate`, or `None` if absent or expired
    pub async fn get(&self, candidate: &str) -> Option<CacheEntry> {
        let now = self.clock.now();
        {
            let entries = self.entries.read().await;
            match entries.get(candidate) {
                None => return None,
                Some(entry) if now.saturating_duration_since(entry.checked_at) <= self.ttl => {
                    return Some(entry.clone());
                }
                Some(_) => {}
            }
        }

        // Expired: prune it, unless someone refreshed it in the meantime
        let mut entries = self.entries.write().await;
        if let Some(entry) = entries.get(candidate) {
            if now.saturating_duration_since(entry.checked_at) > self.ttl {
                entries.remove(candidate);
            }
        }
        None
    }

    /// Store a fresh answer, overwriting any existing entry.
    /// Expired entries for other candidates are pruned on the way.
    pub async fn put(&self, candidate: &str, available: bool) {
        let now = self.clock.now();
        let entry = CacheEntry {
            available,
            checked_at: now,
            checked_at_utc: Utc::now(),
        };

        let ttl = self.ttl;
        let mut entries = self.entries.write().await;
        entries.retain(|_, e| now.saturating_duration_since(e.checked_at) <= ttl);
        entries.insert(candidate.to_string(), entry);
    }

    /// Drop every entry
    pub async fn invalidate_all(&self) {
        let mut entries = self.entries.write().await;
        let count = entries.len();
        entries.clear();
        tracing::debug!("Availability cache invalidated ({} entries dropped)", count);
    }

    /// Number of stored entries, expired ones included
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}
