//! Place details with transparent caching and remote-store fallback.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::hours::parse_opening_hours;
use super::provider::{PlaceProvider, ProviderPlace, ProviderStatus, DETAIL_FIELDS};
use super::remote::{RemoteStore, RemoteSyncWriter};
use super::types::{PhotoRef, PlaceDetails, PlaceRecord};
use crate::cache::{CacheCodec, CacheResult, FreshnessPolicy};
use crate::error::PlaceError;
use crate::executor::{BackgroundExecutor, TaskKind};

/// Maximum number of photos resolved per fetch.
pub const MAX_PHOTOS: usize = 10;

/// Widths tried, in order, when resolving a photo.
const PHOTO_WIDTHS: [u32; 2] = [1200, 400];

/// Resolves place details from the local cache, the live provider, or the
/// remote document store, in that order of preference.
///
/// Cloning is cheap; background refreshes run on a clone.
#[derive(Clone)]
pub struct PlaceService {
  codec: Arc<CacheCodec>,
  policy: FreshnessPolicy,
  provider: Arc<dyn PlaceProvider>,
  remote: Arc<dyn RemoteStore>,
  sync: RemoteSyncWriter,
  executor: BackgroundExecutor,
  max_photos: usize,
}

impl PlaceService {
  pub fn new(
    codec: CacheCodec,
    provider: Arc<dyn PlaceProvider>,
    remote: Arc<dyn RemoteStore>,
    executor: BackgroundExecutor,
  ) -> Self {
    let sync = RemoteSyncWriter::new(Arc::clone(&remote), executor.clone());

    Self {
      codec: Arc::new(codec),
      policy: FreshnessPolicy::default(),
      provider,
      remote,
      sync,
      executor,
      max_photos: MAX_PHOTOS,
    }
  }

  pub fn with_policy(mut self, policy: FreshnessPolicy) -> Self {
    self.policy = policy;
    self
  }

  pub fn with_max_photos(mut self, max_photos: usize) -> Self {
    self.max_photos = max_photos.min(MAX_PHOTOS);
    self
  }

  pub fn executor(&self) -> &BackgroundExecutor {
    &self.executor
  }

  /// Get details for a place.
  ///
  /// Fails only with `NotFound` or `FetchFailed`.
  pub async fn fetch_place_details(
    &self,
    place_id: &str,
    force_refresh: bool,
  ) -> Result<PlaceDetails, PlaceError> {
    self
      .fetch_with_source(place_id, force_refresh)
      .await
      .map(|result| result.data)
  }

  /// Same as [`fetch_place_details`](Self::fetch_place_details), but also
  /// reports where the data came from.
  ///
  /// 1. Unless forced, serve a non-stale cache entry immediately
  /// 2. Schedule a background refetch if its photos are due or it is aging
  /// 3. Otherwise fetch live, falling back to the remote store
  pub async fn fetch_with_source(
    &self,
    place_id: &str,
    force_refresh: bool,
  ) -> Result<CacheResult<PlaceDetails>, PlaceError> {
    if force_refresh {
      debug!(place_id, "Forced refresh, skipping cache");
      return self.fetch_from_sources(place_id).await;
    }

    let Some(entry) = self.codec.get(place_id) else {
      debug!(place_id, "Cache miss");
      return self.fetch_from_sources(place_id).await;
    };

    let now = Utc::now();
    if self.policy.is_data_stale_at(&entry, now) {
      debug!(place_id, "Cached entry is stale");
      return self.fetch_from_sources(place_id).await;
    }

    let photos_stale = self.policy.should_refresh_photos_at(&entry.data, now);
    if photos_stale {
      debug!(place_id, "Serving cache, repairing photos in background");
      self.schedule_refresh(TaskKind::PhotoRepair, place_id);
    } else if self.policy.is_aging_at(&entry, now) {
      debug!(place_id, "Serving aging cache entry, refreshing in background");
      self.schedule_refresh(TaskKind::AgingRefresh, place_id);
    } else {
      debug!(place_id, "Cache hit");
    }

    let details = PlaceDetails {
      record: entry.data,
      photo_urls: entry.photo_urls,
    };
    Ok(CacheResult::from_cache(details, entry.timestamp, photos_stale))
  }

  /// Whether photo URLs for a place are due for refresh.
  ///
  /// Uses `record` when given, otherwise the cached entry. Nothing cached
  /// means a refresh is due.
  pub fn should_refresh_photos(&self, place_id: &str, record: Option<&PlaceRecord>) -> bool {
    match record {
      Some(record) => self.policy.should_refresh_photos(record),
      None => self
        .codec
        .get(place_id)
        .map_or(true, |entry| self.policy.should_refresh_photos(&entry.data)),
    }
  }

  /// Drop the cached entry for a place.
  pub fn evict(&self, place_id: &str) -> bool {
    self.codec.remove(place_id)
  }

  fn schedule_refresh(&self, kind: TaskKind, place_id: &str) {
    let service = self.clone();
    let owned_id = place_id.to_string();

    self.executor.submit(kind, place_id, async move {
      service.fetch_from_sources(&owned_id).await?;
      Ok(())
    });
  }

  /// Live provider first, remote store as fallback.
  ///
  /// Concurrent calls for the same place are not coalesced.
  async fn fetch_from_sources(
    &self,
    place_id: &str,
  ) -> Result<CacheResult<PlaceDetails>, PlaceError> {
    let provider_err = match self.fetch_live(place_id).await {
      Ok(details) => {
        self
          .codec
          .set(place_id, &details.record, &details.photo_urls);
        self.sync.sync_to_remote_store(place_id, &details);
        return Ok(CacheResult::from_network(details));
      }
      Err(e) => e,
    };

    warn!(place_id, error = %provider_err, "Provider fetch failed, trying remote store");

    match self.remote.get(place_id).await {
      Ok(Some(document)) => {
        info!(place_id, "Serving place from remote store");
        let details = document.into_details();
        let cached_is_newer = self
          .codec
          .get(place_id)
          .is_some_and(|entry| fetched_later(&entry.data, &details.record));

        if cached_is_newer {
          debug!(place_id, "Remote document is older than the cache, not caching it");
        } else {
          self
            .codec
            .set(place_id, &details.record, &details.photo_urls);
        }
        Ok(CacheResult::from_remote_store(details))
      }
      Ok(None) if provider_err.is_not_found() => Err(PlaceError::NotFound {
        place_id: place_id.to_string(),
      }),
      Ok(None) => Err(PlaceError::FetchFailed {
        place_id: place_id.to_string(),
        reason: provider_err.to_string(),
      }),
      Err(e) => {
        warn!(place_id, error = %e, "Remote store fallback failed");
        Err(PlaceError::FetchFailed {
          place_id: place_id.to_string(),
          reason: format!("{}; remote store: {}", provider_err, e),
        })
      }
    }
  }

  async fn fetch_live(&self, place_id: &str) -> Result<PlaceDetails, PlaceError> {
    info!(place_id, "Fetching place details from provider");

    let response = self
      .provider
      .get_details(place_id, DETAIL_FIELDS)
      .await
      .map_err(|e| PlaceError::Provider(e.to_string()))?;

    let place = match (response.status, response.result) {
      (ProviderStatus::Ok, Some(place)) => place,
      (ProviderStatus::NotFound | ProviderStatus::ZeroResults, _) => {
        return Err(PlaceError::NotFound {
          place_id: place_id.to_string(),
        })
      }
      (status, _) => {
        return Err(PlaceError::Provider(format!(
          "status {:?}{}",
          status,
          response
            .error_message
            .map(|m| format!(": {}", m))
            .unwrap_or_default()
        )))
      }
    };

    let record = self.to_record(place_id, place);
    let to_resolve = record.photos.len().min(self.max_photos);
    let photo_urls = self.resolve_photos(&record.photos[..to_resolve]).await;

    Ok(PlaceDetails { record, photo_urls })
  }

  fn to_record(&self, place_id: &str, place: ProviderPlace) -> PlaceRecord {
    let weekday_text = place
      .opening_hours
      .map(|hours| hours.weekday_text)
      .unwrap_or_default();

    PlaceRecord {
      place_id: place_id.to_string(),
      name: place.name,
      formatted_address: place.formatted_address,
      rating: place.rating,
      user_ratings_total: place.user_ratings_total,
      phone: place.formatted_phone_number,
      website: place.website,
      opening_hours: parse_opening_hours(&weekday_text),
      photos: place.photos.into_iter().map(PhotoRef::from).collect(),
      reviews: place.reviews.into_iter().map(Into::into).collect(),
      last_fetched: Some(Utc::now().to_rfc3339()),
    }
  }

  /// Resolve photos in order, dropping any that fail at every width.
  async fn resolve_photos(&self, photos: &[PhotoRef]) -> Vec<String> {
    let mut urls = Vec::with_capacity(photos.len());
    for photo in photos {
      if let Some(url) = self.resolve_photo(photo).await {
        urls.push(url);
      }
    }
    urls
  }

  async fn resolve_photo(&self, photo: &PhotoRef) -> Option<String> {
    for width in PHOTO_WIDTHS {
      match self.provider.photo_url(photo, width).await {
        Ok(url) => return Some(url),
        Err(e) => debug!(
          photo = %photo.photo_reference,
          width,
          error = %e,
          "Photo resolution failed"
        ),
      }
    }

    warn!(photo = %photo.photo_reference, "Dropping unresolvable photo");
    None
  }
}

/// Whether `a` was fetched from the provider strictly after `b`.
///
/// A record with no parseable `last_fetched` counts as oldest.
fn fetched_later(a: &PlaceRecord, b: &PlaceRecord) -> bool {
  match (fetched_at(a), fetched_at(b)) {
    (Some(a), Some(b)) => a > b,
    (Some(_), None) => true,
    (None, _) => false,
  }
}

fn fetched_at(record: &PlaceRecord) -> Option<DateTime<Utc>> {
  let raw = record.last_fetched.as_deref()?;
  DateTime::parse_from_rfc3339(raw)
    .ok()
    .map(|at| at.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::cache::{CacheEntry, CacheSource, KeyValueStore, MemoryStorage};
  use crate::executor::ExecutorDelays;
  use crate::place::fakes::{FakeProvider, FakeRemoteStore};
  use crate::place::provider::{ProviderOpeningHours, ProviderPhoto};
  use crate::place::remote::PlaceDocument;
  use chrono::Duration as ChronoDuration;
  use std::time::Duration;

  struct Harness {
    storage: Arc<MemoryStorage>,
    provider: Arc<FakeProvider>,
    remote: Arc<FakeRemoteStore>,
    service: PlaceService,
    version: String,
  }

  impl Harness {
    fn new() -> Self {
      Self::with_version("1.0")
    }

    fn with_version(version: &str) -> Self {
      let storage = Arc::new(MemoryStorage::new());
      Self::over(storage, version)
    }

    fn over(storage: Arc<MemoryStorage>, version: &str) -> Self {
      let provider = Arc::new(FakeProvider::new());
      let remote = Arc::new(FakeRemoteStore::new());
      let codec = CacheCodec::new(storage.clone()).with_version(version);
      let executor = BackgroundExecutor::new(ExecutorDelays {
        photo_repair: Duration::from_millis(5),
        aging_refresh: Duration::from_millis(20),
        remote_sync: Duration::ZERO,
      });
      let service = PlaceService::new(codec, provider.clone(), remote.clone(), executor);

      Self {
        storage,
        provider,
        remote,
        service,
        version: version.to_string(),
      }
    }

    fn codec(&self) -> CacheCodec {
      CacheCodec::new(self.storage.clone()).with_version(self.version.clone())
    }

    /// Write an entry as if it had been cached `age` ago with photos fetched `photos_age` ago.
    fn seed(&self, place_id: &str, name: &str, age: ChronoDuration, photos_age: ChronoDuration) {
      let codec = self.codec();
      let now = Utc::now();
      let entry = CacheEntry {
        place_id: place_id.to_string(),
        data: PlaceRecord {
          place_id: place_id.to_string(),
          name: name.to_string(),
          last_fetched: Some((now - photos_age).to_rfc3339()),
          ..Default::default()
        },
        timestamp: (now - age).timestamp_millis(),
        photo_urls: vec!["https://photos.test/old".to_string()],
      };

      self
        .storage
        .write(&codec.version_key(), codec.version())
        .unwrap();
      self
        .storage
        .write(
          &codec.entry_key(place_id),
          &serde_json::to_string(&entry).unwrap(),
        )
        .unwrap();
    }

    fn cached(&self, place_id: &str) -> Option<CacheEntry> {
      self.codec().get(place_id)
    }

    async fn drain(&self) {
      assert!(self.service.executor().drain(Duration::from_secs(2)).await);
    }
  }

  fn place(name: &str) -> ProviderPlace {
    ProviderPlace {
      name: name.to_string(),
      ..Default::default()
    }
  }

  fn photo(reference: &str) -> ProviderPhoto {
    ProviderPhoto {
      photo_reference: reference.to_string(),
      width: None,
      height: None,
    }
  }

  #[tokio::test]
  async fn test_miss_fetches_live_and_syncs() {
    let h = Harness::new();
    h.provider.set_place("p1", place("Park"));

    let result = h.service.fetch_with_source("p1", false).await.unwrap();
    assert_eq!(result.source, CacheSource::Network);
    assert_eq!(result.data.record.name, "Park");
    assert_eq!(result.data.record.place_id, "p1");
    assert!(result.data.record.last_fetched.is_some());
    assert_eq!(h.provider.detail_calls(), 1);

    let cached = h.cached("p1").unwrap();
    assert_eq!(cached.data.name, "Park");

    h.drain().await;
    assert_eq!(h.remote.upsert_count(), 1);
    assert_eq!(h.remote.document("p1").unwrap().record.name, "Park");
  }

  #[tokio::test]
  async fn test_fresh_hit_skips_provider() {
    let h = Harness::new();
    h.seed("p1", "Cached", ChronoDuration::hours(1), ChronoDuration::hours(1));

    let result = h.service.fetch_with_source("p1", false).await.unwrap();
    assert_eq!(result.source, CacheSource::CacheFresh);
    assert_eq!(result.data.record.name, "Cached");
    assert_eq!(result.data.photo_urls, vec!["https://photos.test/old".to_string()]);

    h.drain().await;
    assert_eq!(h.provider.detail_calls(), 0);
  }

  #[tokio::test]
  async fn test_aging_hit_refreshes_in_background() {
    let h = Harness::new();
    h.seed("p2", "Cached", ChronoDuration::hours(7), ChronoDuration::hours(7));
    h.provider.set_place("p2", place("Refreshed"));

    let result = h.service.fetch_with_source("p2", false).await.unwrap();
    assert_eq!(result.source, CacheSource::CacheFresh);
    assert_eq!(result.data.record.name, "Cached");
    assert_eq!(h.provider.detail_calls(), 0);
    assert_eq!(h.service.executor().in_flight(), 1);

    h.drain().await;
    assert_eq!(h.provider.detail_calls(), 1);
    assert_eq!(h.cached("p2").unwrap().data.name, "Refreshed");
    assert_eq!(h.remote.upsert_count(), 1);
  }

  #[tokio::test]
  async fn test_stale_photos_served_then_repaired() {
    let h = Harness::new();
    h.seed("p1", "Cached", ChronoDuration::hours(1), ChronoDuration::days(4));
    h.provider.set_place(
      "p1",
      ProviderPlace {
        photos: vec![photo("fresh")],
        ..place("Cached")
      },
    );

    let result = h.service.fetch_with_source("p1", false).await.unwrap();
    assert_eq!(result.source, CacheSource::CacheStalePhotos);
    assert_eq!(result.data.photo_urls, vec!["https://photos.test/old".to_string()]);
    assert_eq!(h.provider.detail_calls(), 0);

    h.drain().await;
    assert_eq!(h.provider.detail_calls(), 1);
    let repaired = h.cached("p1").unwrap();
    assert_eq!(
      repaired.photo_urls,
      vec!["https://photos.test/fresh?w=1200".to_string()]
    );
    assert!(!h.service.should_refresh_photos("p1", None));
  }

  #[tokio::test]
  async fn test_stale_data_fetches_synchronously() {
    let h = Harness::new();
    h.seed("p1", "Old", ChronoDuration::hours(25), ChronoDuration::hours(25));
    h.provider.set_place("p1", place("New"));

    let result = h.service.fetch_with_source("p1", false).await.unwrap();
    assert_eq!(result.source, CacheSource::Network);
    assert_eq!(result.data.record.name, "New");
    assert_eq!(h.provider.detail_calls(), 1);
  }

  #[tokio::test]
  async fn test_force_refresh_bypasses_fresh_cache() {
    let h = Harness::new();
    h.seed("p1", "Cached", ChronoDuration::minutes(5), ChronoDuration::minutes(5));
    h.provider.set_place("p1", place("Live"));

    let details = h.service.fetch_place_details("p1", true).await.unwrap();
    assert_eq!(details.record.name, "Live");
    assert_eq!(h.provider.detail_calls(), 1);
    assert_eq!(h.remote.get_count(), 0);
  }

  #[tokio::test]
  async fn test_provider_failure_falls_back_to_remote_store() {
    let h = Harness::new();
    h.provider.set_unreachable(true);
    h.remote.insert(
      "p1",
      PlaceDocument {
        record: PlaceRecord {
          place_id: "p1".to_string(),
          name: "Remote Park".to_string(),
          ..Default::default()
        },
        photo_urls: vec!["https://photos.test/remote".to_string()],
        updated_at: None,
      },
    );

    let result = h.service.fetch_with_source("p1", false).await.unwrap();
    assert_eq!(result.source, CacheSource::RemoteStore);
    assert_eq!(result.data.record.name, "Remote Park");
    assert_eq!(h.cached("p1").unwrap().data.name, "Remote Park");

    h.drain().await;
    // Data that came from the remote store is not written back to it
    assert_eq!(h.remote.upsert_count(), 0);
  }

  #[tokio::test]
  async fn test_background_fallback_keeps_newer_cache() {
    let h = Harness::new();
    h.seed("p1", "Newer cached", ChronoDuration::hours(7), ChronoDuration::hours(1));
    h.provider.set_unreachable(true);
    h.remote.insert(
      "p1",
      PlaceDocument {
        record: PlaceRecord {
          place_id: "p1".to_string(),
          name: "Older remote".to_string(),
          last_fetched: Some((Utc::now() - ChronoDuration::days(20)).to_rfc3339()),
          ..Default::default()
        },
        photo_urls: vec![],
        updated_at: None,
      },
    );
    let seeded = h.cached("p1").unwrap();

    let first = h.service.fetch_place_details("p1", false).await.unwrap();
    assert_eq!(first.record.name, "Newer cached");

    // Aging refresh hits the unreachable provider, then the remote store
    h.drain().await;
    assert_eq!(h.remote.get_count(), 1);
    assert_eq!(h.cached("p1").unwrap(), seeded);

    let second = h.service.fetch_place_details("p1", false).await.unwrap();
    assert_eq!(second.record.name, "Newer cached");
  }

  #[test]
  fn test_fetched_later_ordering() {
    let at = |days: i64| PlaceRecord {
      last_fetched: Some((Utc::now() - ChronoDuration::days(days)).to_rfc3339()),
      ..Default::default()
    };

    assert!(fetched_later(&at(1), &at(20)));
    assert!(!fetched_later(&at(20), &at(1)));
    assert!(fetched_later(&at(1), &PlaceRecord::default()));
    assert!(!fetched_later(&PlaceRecord::default(), &at(1)));
  }

  #[tokio::test]
  async fn test_not_found_everywhere() {
    let h = Harness::new();
    h.provider.set_status("p1", ProviderStatus::NotFound);

    let err = h.service.fetch_place_details("p1", false).await.unwrap_err();
    assert_eq!(
      err,
      PlaceError::NotFound {
        place_id: "p1".to_string()
      }
    );
    assert_eq!(h.remote.get_count(), 1);
    assert!(h.cached("p1").is_none());
  }

  #[tokio::test]
  async fn test_total_failure_is_fetch_failed() {
    let h = Harness::new();
    h.provider.set_unreachable(true);
    h.remote.fail_gets(true);

    let err = h.service.fetch_place_details("p1", false).await.unwrap_err();
    assert!(matches!(err, PlaceError::FetchFailed { .. }));

    h.remote.fail_gets(false);
    let err = h.service.fetch_place_details("p1", false).await.unwrap_err();
    assert!(matches!(err, PlaceError::FetchFailed { .. }));
  }

  #[tokio::test]
  async fn test_provider_error_status_is_a_provider_failure() {
    let h = Harness::new();
    h.provider.set_status("p1", ProviderStatus::OverQueryLimit);

    let err = h.service.fetch_place_details("p1", false).await.unwrap_err();
    match err {
      PlaceError::FetchFailed { reason, .. } => assert!(reason.contains("OverQueryLimit")),
      other => panic!("unexpected error: {:?}", other),
    }
  }

  #[tokio::test]
  async fn test_photo_resolution_retries_and_drops() {
    let h = Harness::new();
    h.provider.set_place(
      "p1",
      ProviderPlace {
        photos: vec![photo("a"), photo("b"), photo("c")],
        ..place("Park")
      },
    );
    h.provider.fail_photo("a", 1200);
    h.provider.fail_photo("b", 1200);
    h.provider.fail_photo("b", 400);

    let details = h.service.fetch_place_details("p1", false).await.unwrap();
    assert_eq!(
      details.photo_urls,
      vec![
        "https://photos.test/a?w=400".to_string(),
        "https://photos.test/c?w=1200".to_string(),
      ]
    );
    assert_eq!(details.record.photos.len(), 3);
    assert_eq!(h.provider.photo_calls(), 5);
  }

  #[tokio::test]
  async fn test_photo_count_is_capped() {
    let h = Harness::new();
    let photos = (0..12).map(|i| photo(&format!("p{}", i))).collect();
    h.provider.set_place(
      "p1",
      ProviderPlace {
        photos,
        ..place("Park")
      },
    );

    let details = h.service.fetch_place_details("p1", false).await.unwrap();
    assert_eq!(details.photo_urls.len(), MAX_PHOTOS);
    assert_eq!(h.provider.photo_calls(), MAX_PHOTOS as u32);
  }

  #[tokio::test]
  async fn test_opening_hours_are_parsed() {
    let h = Harness::new();
    h.provider.set_place(
      "p1",
      ProviderPlace {
        opening_hours: Some(ProviderOpeningHours {
          weekday_text: vec![
            "Monday: 9:00 AM – 5:00 PM".to_string(),
            "garbage".to_string(),
          ],
        }),
        ..place("Park")
      },
    );

    let details = h.service.fetch_place_details("p1", false).await.unwrap();
    assert_eq!(details.record.opening_hours.len(), 1);
    assert_eq!(details.record.opening_hours["Monday"], "9:00 AM – 5:00 PM");
  }

  #[tokio::test]
  async fn test_background_failure_keeps_cache() {
    let h = Harness::new();
    h.seed("p1", "Cached", ChronoDuration::hours(7), ChronoDuration::hours(7));
    h.provider.set_unreachable(true);

    let first = h.service.fetch_place_details("p1", false).await.unwrap();
    h.drain().await;
    assert_eq!(h.provider.detail_calls(), 1);

    let second = h.service.fetch_place_details("p1", false).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(h.cached("p1").unwrap().data.name, "Cached");
  }

  #[tokio::test]
  async fn test_concurrent_misses_are_not_coalesced() {
    let h = Harness::new();
    h.provider.set_place("p1", place("Park"));

    let (a, b) = tokio::join!(
      h.service.fetch_place_details("p1", false),
      h.service.fetch_place_details("p1", false)
    );
    assert!(a.is_ok() && b.is_ok());
    assert_eq!(h.provider.detail_calls(), 2);
  }

  #[tokio::test]
  async fn test_version_change_forces_miss() {
    let old = Harness::with_version("1.0");
    old.seed("p1", "Old Schema", ChronoDuration::minutes(1), ChronoDuration::minutes(1));

    let new = Harness::over(old.storage.clone(), "1.1");
    new.provider.set_place("p1", place("New Schema"));

    let result = new.service.fetch_with_source("p1", false).await.unwrap();
    assert_eq!(result.source, CacheSource::Network);
    assert_eq!(result.data.record.name, "New Schema");
    assert_eq!(new.provider.detail_calls(), 1);
  }

  #[tokio::test]
  async fn test_should_refresh_photos_lookup() {
    let h = Harness::new();
    assert!(h.service.should_refresh_photos("missing", None));

    h.seed("p1", "Cached", ChronoDuration::hours(1), ChronoDuration::hours(1));
    assert!(!h.service.should_refresh_photos("p1", None));

    let record = PlaceRecord {
      last_fetched: Some((Utc::now() - ChronoDuration::days(5)).to_rfc3339()),
      ..Default::default()
    };
    assert!(h.service.should_refresh_photos("p1", Some(&record)));
  }

  #[tokio::test]
  async fn test_evict() {
    let h = Harness::new();
    h.seed("p1", "Cached", ChronoDuration::hours(1), ChronoDuration::hours(1));
    assert!(h.service.evict("p1"));
    assert!(h.cached("p1").is_none());
  }
}
