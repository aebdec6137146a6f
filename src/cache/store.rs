//! Cache Store Module
//!
//! Main cache engine combining the recency chain, a key index and a byte
//! budget with least-recently-written eviction.

use std::collections::HashMap;

use tracing::debug;

use crate::cache::entry::footprint;
use crate::cache::{CacheStats, Entry, EntryId, RecencyChain};

// == Cache Store ==
/// Byte-budgeted LRU cache engine.
///
/// Every entry costs `len(key) + len(value)` bytes and the sum never exceeds
/// the capacity fixed at construction. Writes move the touched entry to the
/// most recently used position; lookups do not. Eviction always removes the
/// least recently written entry.
///
/// The store has no internal locking. Callers must serialize access to one
/// instance, e.g. behind the mutex held by `api::AppState`.
#[derive(Debug)]
pub struct CacheStore {
    /// Entries in write-recency order
    chain: RecencyChain,
    /// Key to chain handle
    index: HashMap<Vec<u8>, EntryId>,
    /// Write statistics
    stats: CacheStats,
    /// Maximum total footprint
    capacity_bytes: usize,
    /// Sum of footprints of all entries
    used_bytes: usize,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty CacheStore holding at most `capacity_bytes` of keys
    /// and values.
    pub fn new(capacity_bytes: usize) -> Self {
        Self {
            chain: RecencyChain::new(),
            index: HashMap::new(),
            stats: CacheStats::new(capacity_bytes),
            capacity_bytes,
            used_bytes: 0,
        }
    }

    // == Get ==
    /// Returns the current value for `key`.
    ///
    /// Does not change recency order, byte accounting or statistics.
    pub fn get(&self, key: &[u8]) -> Option<&[u8]> {
        let id = self.index.get(key)?;
        self.chain.get(*id).map(Entry::value)
    }

    // == Put ==
    /// Inserts `key` or replaces its value, making it most recently used.
    ///
    /// Returns false, leaving the cache unchanged, when the pair alone is
    /// larger than the capacity.
    pub fn put(&mut self, key: &[u8], value: &[u8]) -> bool {
        match self.index.get(key).copied() {
            Some(id) => self.update_existing(id, value),
            None => self.insert_new(key, value),
        }
    }

    // == Put If Absent ==
    /// Inserts `key` only if it is not already cached.
    pub fn put_if_absent(&mut self, key: &[u8], value: &[u8]) -> bool {
        if self.index.contains_key(key) {
            self.reject(key, "key already present");
            return false;
        }

        self.insert_new(key, value)
    }

    // == Set ==
    /// Replaces the value of an existing key. Never creates an entry.
    pub fn set(&mut self, key: &[u8], value: &[u8]) -> bool {
        match self.index.get(key).copied() {
            Some(id) => self.update_existing(id, value),
            None => {
                self.reject(key, "key not present");
                false
            }
        }
    }

    // == Delete ==
    /// Removes an entry by key.
    ///
    /// Returns false if the key is not cached.
    pub fn delete(&mut self, key: &[u8]) -> bool {
        let Some(id) = self.index.remove(key) else {
            self.reject(key, "key not present");
            return false;
        };

        if let Some(entry) = self.chain.remove(id) {
            self.used_bytes -= entry.footprint();
        }
        self.stats.record_delete();
        true
    }

    // == Contains ==
    /// Checks if a key is cached, without touching recency.
    pub fn contains(&self, key: &[u8]) -> bool {
        self.index.contains_key(key)
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_occupancy(self.len(), self.used_bytes);
        stats
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.chain.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    pub fn capacity_bytes(&self) -> usize {
        self.capacity_bytes
    }

    pub fn used_bytes(&self) -> usize {
        self.used_bytes
    }

    /// Bytes available without evicting anything.
    pub fn free_bytes(&self) -> usize {
        self.capacity_bytes - self.used_bytes
    }

    // == Insert New ==
    /// Appends a pair for a key known to be absent, evicting as needed.
    fn insert_new(&mut self, key: &[u8], value: &[u8]) -> bool {
        let needed = footprint(key, value);
        if needed > self.capacity_bytes {
            self.reject(key, "pair exceeds capacity");
            return false;
        }

        self.make_room(needed);

        let id = self.chain.push_tail(Entry::new(key, value));
        self.index.insert(key.to_vec(), id);
        self.used_bytes += needed;
        self.stats.record_insert();
        true
    }

    // == Update Existing ==
    /// Moves an entry to the tail and replaces its value.
    ///
    /// Feasibility is decided before the chain is touched, so a rejected
    /// update leaves both order and value as they were.
    fn update_existing(&mut self, id: EntryId, value: &[u8]) -> bool {
        let Some(entry) = self.chain.get(id) else {
            debug_assert!(false, "index points at a vacant chain slot");
            self.reject(b"", "indexed entry missing from chain");
            return false;
        };
        let old_size = entry.footprint();
        let new_size = footprint(entry.key(), value);

        if new_size > self.capacity_bytes {
            let key = entry.key().to_vec();
            self.reject(&key, "updated pair exceeds capacity");
            return false;
        }

        self.chain.move_to_tail(id);

        // The moved entry is the tail, so it is only reached once every
        // other entry is gone, and by then new_size <= capacity fits.
        if new_size > old_size {
            self.make_room(new_size - old_size);
        }
        debug_assert!(self.chain.get(id).is_some());

        self.used_bytes = self.used_bytes - old_size + new_size;
        if let Some(entry) = self.chain.get_mut(id) {
            entry.replace_value(value);
        }
        self.stats.record_update();
        true
    }

    // == Make Room ==
    /// Evicts from the head until `needed` bytes are free.
    fn make_room(&mut self, needed: usize) {
        while self.free_bytes() < needed {
            if !self.evict_oldest() {
                break;
            }
        }
    }

    // == Evict Oldest ==
    /// Removes the least recently written entry.
    ///
    /// Returns false only when the cache is empty.
    fn evict_oldest(&mut self) -> bool {
        let Some(entry) = self.chain.pop_head() else {
            return false;
        };

        self.index.remove(entry.key());
        self.used_bytes -= entry.footprint();
        self.stats.record_eviction();
        debug!(
            key = %String::from_utf8_lossy(entry.key()),
            freed = entry.footprint(),
            used_bytes = self.used_bytes,
            "evicted least recently written entry"
        );
        true
    }

    fn reject(&mut self, key: &[u8], reason: &str) {
        self.stats.record_rejection();
        debug!(key = %String::from_utf8_lossy(key), reason, "write rejected");
    }

    // == Test Helpers ==
    /// Keys from least to most recently written.
    #[cfg(test)]
    pub(crate) fn keys_in_recency_order(&self) -> Vec<Vec<u8>> {
        self.chain.keys_forward()
    }

    /// Asserts chain, index and byte accounting agree.
    #[cfg(test)]
    pub(crate) fn assert_invariants(&self) {
        self.chain.assert_linked();

        let keys = self.chain.keys_forward();
        assert_eq!(keys.len(), self.index.len(), "index and chain sizes differ");
        for key in &keys {
            let id = self.index.get(key).expect("chain key missing from index");
            assert_eq!(self.chain.get(*id).map(Entry::key), Some(key.as_slice()));
        }

        let total: usize = keys
            .iter()
            .map(|k| k.len() + self.get(k).map_or(0, <[u8]>::len))
            .sum();
        assert_eq!(total, self.used_bytes, "used_bytes out of sync");
        assert!(self.used_bytes <= self.capacity_bytes, "over capacity");
    }
}
