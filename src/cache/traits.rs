//! Result metadata for cache lookups.

use chrono::{DateTime, TimeZone, Utc};

/// Result from a cache operation, including data and metadata about the source.
#[derive(Debug, Clone)]
pub struct CacheResult<T> {
  /// The actual data
  pub data: T,
  /// Where the data came from
  pub source: CacheSource,
  /// When the data was cached (if from cache)
  pub cached_at: Option<DateTime<Utc>>,
}

impl<T> CacheResult<T> {
  /// Create a new cache result from fresh provider data.
  pub fn from_network(data: T) -> Self {
    Self {
      data,
      source: CacheSource::Network,
      cached_at: None,
    }
  }

  /// Create a new cache result from the remote document store fallback.
  pub fn from_remote_store(data: T) -> Self {
    Self {
      data,
      source: CacheSource::RemoteStore,
      cached_at: None,
    }
  }

  /// Create a new cache result from cached data.
  ///
  /// `timestamp` is the entry's write time in epoch milliseconds.
  pub fn from_cache(data: T, timestamp: i64, photos_stale: bool) -> Self {
    Self {
      data,
      source: if photos_stale {
        CacheSource::CacheStalePhotos
      } else {
        CacheSource::CacheFresh
      },
      cached_at: Utc.timestamp_millis_opt(timestamp).single(),
    }
  }
}

/// Indicates where returned data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheSource {
  /// Fresh data from the live provider
  Network,
  /// Last-known-good data from the remote document store
  RemoteStore,
  /// Data from cache, still considered fresh
  CacheFresh,
  /// Data from cache; photo URLs are being repaired in the background
  CacheStalePhotos,
}

impl std::fmt::Display for CacheSource {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let label = match self {
      CacheSource::Network => "network",
      CacheSource::RemoteStore => "remote-store",
      CacheSource::CacheFresh => "cache",
      CacheSource::CacheStalePhotos => "cache (refreshing photos)",
    };
    f.write_str(label)
  }
}
