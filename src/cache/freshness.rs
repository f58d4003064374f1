//! Freshness rules for cached place data.
//!
//! Record data and photo URLs age independently: photo URLs handed out by the
//! provider expire well before the rest of the record goes out of date.

use chrono::{DateTime, Duration, Utc};

use super::codec::CacheEntry;
use crate::place::PlaceRecord;

/// Time-to-live thresholds for cached data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreshnessPolicy {
  /// Past this age the record is refetched before being served
  pub data_ttl: Duration,
  /// Past this age (measured from `last_fetched`) photo URLs are repaired
  pub photo_ttl: Duration,
  /// Past this age a fresh hit also schedules a background refresh
  pub aging_threshold: Duration,
}

impl Default for FreshnessPolicy {
  fn default() -> Self {
    Self {
      data_ttl: Duration::hours(24),
      photo_ttl: Duration::days(3),
      aging_threshold: Duration::hours(6),
    }
  }
}

impl FreshnessPolicy {
  pub fn is_data_stale(&self, entry: &CacheEntry) -> bool {
    self.is_data_stale_at(entry, Utc::now())
  }

  pub fn is_data_stale_at(&self, entry: &CacheEntry, now: DateTime<Utc>) -> bool {
    age_of(entry, now) > self.data_ttl
  }

  pub fn is_aging(&self, entry: &CacheEntry) -> bool {
    self.is_aging_at(entry, Utc::now())
  }

  pub fn is_aging_at(&self, entry: &CacheEntry, now: DateTime<Utc>) -> bool {
    age_of(entry, now) > self.aging_threshold
  }

  pub fn should_refresh_photos(&self, record: &PlaceRecord) -> bool {
    self.should_refresh_photos_at(record, Utc::now())
  }

  /// Missing or unparseable `last_fetched` counts as due for refresh.
  pub fn should_refresh_photos_at(&self, record: &PlaceRecord, now: DateTime<Utc>) -> bool {
    let Some(last_fetched) = record.last_fetched.as_deref() else {
      return true;
    };

    match DateTime::parse_from_rfc3339(last_fetched) {
      Ok(fetched) => now - fetched.with_timezone(&Utc) > self.photo_ttl,
      Err(_) => true,
    }
  }
}

fn age_of(entry: &CacheEntry, now: DateTime<Utc>) -> Duration {
  Duration::milliseconds(now.timestamp_millis() - entry.timestamp)
}
