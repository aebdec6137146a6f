//! Cache Statistics Module
//!
//! Tracks write activity and byte-budget occupancy.

use serde::Serialize;

// == Cache Stats ==
/// Counters for accepted and rejected writes plus current occupancy.
///
/// Lookups never touch these counters.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Entries created by Put or PutIfAbsent
    pub inserts: u64,
    /// In-place value replacements by Put or Set
    pub updates: u64,
    /// Entries removed by Delete
    pub deletes: u64,
    /// Entries evicted to make room
    pub evictions: u64,
    /// Writes refused (capacity, presence or absence)
    pub rejections: u64,
    /// Current number of entries in the cache
    pub total_entries: usize,
    /// Bytes currently charged against the capacity
    pub used_bytes: usize,
    /// Fixed byte capacity
    pub capacity_bytes: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats for a cache of the given capacity.
    pub fn new(capacity_bytes: usize) -> Self {
        Self {
            capacity_bytes,
            ..Self::default()
        }
    }

    // == Utilization ==
    /// Fraction of the byte capacity in use.
    ///
    /// Returns 0.0 for a zero-capacity cache.
    pub fn utilization(&self) -> f64 {
        if self.capacity_bytes == 0 {
            0.0
        } else {
            self.used_bytes as f64 / self.capacity_bytes as f64
        }
    }

    pub fn record_insert(&mut self) {
        self.inserts += 1;
    }

    pub fn record_update(&mut self) {
        self.updates += 1;
    }

    pub fn record_delete(&mut self) {
        self.deletes += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub fn record_rejection(&mut self) {
        self.rejections += 1;
    }

    // == Update Occupancy ==
    /// Updates the entry count and byte usage snapshot.
    pub fn set_occupancy(&mut self, total_entries: usize, used_bytes: usize) {
        self.total_entries = total_entries;
        self.used_bytes = used_bytes;
    }
}
