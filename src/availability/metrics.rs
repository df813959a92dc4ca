//! # Check Metrics
//!
//! Counters for the availability workflow, shared between a checker and the
//! tasks it spawns.

use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct CheckMetrics {
    queries_dispatched: AtomicU64,
    cache_hits: AtomicU64,
    stale_responses: AtomicU64,
    query_failures: AtomicU64,
    cache_invalidations: AtomicU64,
    reservations_committed: AtomicU64,
    reservations_rejected: AtomicU64,
}

/// Point-in-time copy of [`CheckMetrics`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub queries_dispatched: u64,
    pub cache_hits: u64,
    pub stale_responses: u64,
    pub query_failures: u64,
    pub cache_invalidations: u64,
    pub reservations_committed: u64,
    pub reservations_rejected: u64,
}

impl CheckMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_query(&self) {
        self.queries_dispatched.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_stale_response(&self) {
        self.stale_responses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_query_failure(&self) {
        self.query_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cache_invalidation(&self) {
        self.cache_invalidations.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_commit(&self) {
        self.reservations_committed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_rejection(&self) {
        self.reservations_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            queries_dispatched: self.queries_dispatched.load(Ordering::Relaxed),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            stale_responses: self.stale_responses.load(Ordering::Relaxed),
            query_failures: self.query_failures.load(Ordering::Relaxed),
            cache_invalidations: self.cache_invalidations.load(Ordering::Relaxed),
            reservations_committed: self.reservations_committed.load(Ordering::Relaxed),
            reservations_rejected: self.reservations_rejected.load(Ordering::Relaxed),
        }
    }
}

impl MetricsSnapshot {
    /// Share of resolved checks answered from the cache
    pub fn cache_hit_rate(&self) -> f64 {
        let resolved = self.queries_dispatched + self.cache_hits;
        if resolved == 0 {
            0.0
        } else {
            self.cache_hits as f64 / resolved as f64
        }
    }
}
