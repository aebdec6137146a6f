//! Cache Entry Module
//!
//! Defines a single stored key/value pair and its links in the recency chain.

// == Entry Id ==
/// Stable handle to an entry slot inside the recency chain.
///
/// Handles stay valid while other entries are inserted, moved or removed.
/// A handle is invalidated only when its own entry leaves the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryId(pub(crate) usize);

// == Entry ==
/// One cached pair plus its chain links.
#[derive(Debug, Clone)]
pub struct Entry {
    /// The key, never mutated after creation
    key: Vec<u8>,
    /// The stored value, replaced on update
    value: Vec<u8>,
    /// Neighbour closer to the head (least recently touched side)
    pub(crate) prev: Option<EntryId>,
    /// Neighbour closer to the tail (most recently touched side)
    pub(crate) next: Option<EntryId>,
}

impl Entry {
    // == Constructor ==
    /// Creates an unlinked entry holding copies of `key` and `value`.
    pub fn new(key: &[u8], value: &[u8]) -> Self {
        Self {
            key: key.to_vec(),
            value: value.to_vec(),
            prev: None,
            next: None,
        }
    }

    /// Returns the entry key.
    pub fn key(&self) -> &[u8] {
        &self.key
    }

    /// Returns the current value.
    pub fn value(&self) -> &[u8] {
        &self.value
    }

    // == Footprint ==
    /// Bytes charged against the cache capacity: `len(key) + len(value)`.
    pub fn footprint(&self) -> usize {
        footprint(&self.key, &self.value)
    }

    // == Replace Value ==
    /// Overwrites the value in place, reusing the existing buffer.
    pub fn replace_value(&mut self, value: &[u8]) {
        self.value.clear();
        self.value.extend_from_slice(value);
    }
}

// == Utility Functions ==
/// Footprint of a prospective pair.
pub fn footprint(key: &[u8], value: &[u8]) -> usize {
    key.len() + value.len()
}
