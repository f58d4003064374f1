//! Persistent caching for place details.
//!
//! This module provides:
//! - A string key-value storage abstraction with SQLite, memory and no-op backends
//! - A versioned codec that purges the namespace when the schema version changes
//! - Freshness rules that age record data and photo URLs independently

mod codec;
mod freshness;
mod storage;
mod traits;

pub use codec::{CacheCodec, CacheEntry, DEFAULT_CACHE_VERSION, DEFAULT_NAMESPACE};
pub use freshness::FreshnessPolicy;
pub use storage::{KeyValueStore, MemoryStorage, NoopStorage, SqliteStorage};
pub use traits::{CacheResult, CacheSource};
