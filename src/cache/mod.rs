//! Cache Module
//!
//! Provides the in-memory cache engine: a byte-budgeted store with
//! least-recently-written eviction.

mod chain;
mod entry;
mod stats;
mod store;


// Re-export public types
pub use chain::RecencyChain;
pub use entry::{Entry, EntryId};
pub use stats::CacheStats;
pub use store::CacheStore;
