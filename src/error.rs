//! Error types surfaced by the place cache.

use thiserror::Error;

/// Errors produced while resolving place details.
///
/// Only `NotFound` and `FetchFailed` ever reach callers of
/// [`PlaceService::fetch_place_details`](crate::place::PlaceService::fetch_place_details);
/// `Provider` describes a live-fetch failure that is recovered internally.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PlaceError {
  #[error("Place not found: {place_id}")]
  NotFound { place_id: String },

  #[error("Failed to fetch place {place_id}: {reason}")]
  FetchFailed { place_id: String, reason: String },

  #[error("Provider error: {0}")]
  Provider(String),
}

impl PlaceError {
  /// Whether the place is known not to exist anywhere.
  pub fn is_not_found(&self) -> bool {
    matches!(self, PlaceError::NotFound { .. })
  }
}
