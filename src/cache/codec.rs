//! Serialization of cache entries into the key-value store.
//!
//! The codec owns the namespace layout and the version marker. Any storage or
//! parse failure is logged and reported as a miss, never as an error.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::storage::KeyValueStore;
use crate::place::PlaceRecord;

/// Version written when the code's expectation is not configured.
pub const DEFAULT_CACHE_VERSION: &str = "1.0";

/// Default prefix for entry keys.
pub const DEFAULT_NAMESPACE: &str = "place_cache_";

/// The unit of persistence: one per place id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheEntry {
  pub place_id: String,
  pub data: PlaceRecord,
  /// Epoch milliseconds at which this entry was written
  pub timestamp: i64,
  pub photo_urls: Vec<String>,
}

/// Reads and writes [`CacheEntry`] values under a versioned namespace.
pub struct CacheCodec {
  storage: Arc<dyn KeyValueStore>,
  namespace: String,
  version: String,
}

impl CacheCodec {
  pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
    Self {
      storage,
      namespace: DEFAULT_NAMESPACE.to_string(),
      version: DEFAULT_CACHE_VERSION.to_string(),
    }
  }

  pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
    self.namespace = namespace.into();
    self
  }

  pub fn with_version(mut self, version: impl Into<String>) -> Self {
    self.version = version.into();
    self
  }

  /// The version this codec expects to find in storage.
  pub fn version(&self) -> &str {
    &self.version
  }

  /// Storage key for a place entry.
  pub fn entry_key(&self, place_id: &str) -> String {
    format!("{}{}", self.namespace, place_id)
  }

  /// Storage key for the version marker.
  ///
  /// Lives outside the entry prefix so that purging entries never removes it.
  pub fn version_key(&self) -> String {
    format!("cache_version:{}", self.namespace)
  }

  /// Look up the entry for `place_id`.
  ///
  /// A version mismatch purges the whole namespace first and returns `None`.
  pub fn get(&self, place_id: &str) -> Option<CacheEntry> {
    if !self.ensure_version() {
      return None;
    }

    let key = self.entry_key(place_id);
    let raw = match self.storage.read(&key) {
      Ok(Some(raw)) => raw,
      Ok(None) => return None,
      Err(e) => {
        warn!(place_id, error = %e, "Failed to read cache entry");
        return None;
      }
    };

    match serde_json::from_str::<CacheEntry>(&raw) {
      Ok(entry) => Some(entry),
      Err(e) => {
        warn!(place_id, error = %e, "Discarding unparseable cache entry");
        None
      }
    }
  }

  /// Replace the entry for `place_id`, stamping it with the current time.
  ///
  /// A version mismatch purges the namespace before the write. Returns
  /// whether the write succeeded.
  pub fn set(&self, place_id: &str, data: &PlaceRecord, photo_urls: &[String]) -> bool {
    self.ensure_version();

    let entry = CacheEntry {
      place_id: place_id.to_string(),
      data: data.clone(),
      timestamp: Utc::now().timestamp_millis(),
      photo_urls: photo_urls.to_vec(),
    };

    let raw = match serde_json::to_string(&entry) {
      Ok(raw) => raw,
      Err(e) => {
        warn!(place_id, error = %e, "Failed to serialize cache entry");
        return false;
      }
    };

    match self.storage.write(&self.entry_key(place_id), &raw) {
      Ok(()) => {
        debug!(place_id, "Cached place details");
        true
      }
      Err(e) => {
        warn!(place_id, error = %e, "Failed to write cache entry");
        false
      }
    }
  }

  /// Evict a single entry.
  pub fn remove(&self, place_id: &str) -> bool {
    match self.storage.remove(&self.entry_key(place_id)) {
      Ok(()) => true,
      Err(e) => {
        warn!(place_id, error = %e, "Failed to evict cache entry");
        false
      }
    }
  }

  /// Compare the stored marker against the expected version, purging on mismatch.
  ///
  /// Returns `true` when the stored version already matched.
  fn ensure_version(&self) -> bool {
    let stored = match self.storage.read(&self.version_key()) {
      Ok(stored) => stored,
      Err(e) => {
        warn!(error = %e, "Failed to read cache version marker");
        return false;
      }
    };

    if stored.as_deref() == Some(self.version.as_str()) {
      return true;
    }

    let prefix = self.namespace.clone();
    match self.storage.remove_all(&|key| key.starts_with(&prefix)) {
      Ok(purged) => info!(
        stored = stored.as_deref().unwrap_or("none"),
        expected = %self.version,
        purged,
        "Cache version changed, purged entries"
      ),
      Err(e) => warn!(error = %e, "Failed to purge cache entries"),
    }

    if let Err(e) = self.storage.write(&self.version_key(), &self.version) {
      warn!(error = %e, "Failed to write cache version marker");
    }

    false
  }
}
