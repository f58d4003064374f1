//! In-memory collaborators for tests.

use color_eyre::{eyre::eyre, Result};
use futures::future::BoxFuture;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Mutex;

use super::provider::{PlaceProvider, ProviderPlace, ProviderResponse, ProviderStatus};
use super::remote::{PlaceDocument, RemoteStore};
use super::types::PhotoRef;

/// Provider that answers from a map and counts calls.
#[derive(Default)]
pub struct FakeProvider {
  responses: Mutex<HashMap<String, ProviderResponse>>,
  failing_photos: Mutex<HashSet<(String, u32)>>,
  unreachable: AtomicBool,
  detail_calls: AtomicU32,
  photo_calls: AtomicU32,
}

impl FakeProvider {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn set_place(&self, place_id: &str, place: ProviderPlace) {
    self
      .responses
      .lock()
      .unwrap()
      .insert(place_id.to_string(), ProviderResponse::ok(place));
  }

  pub fn set_status(&self, place_id: &str, status: ProviderStatus) {
    self
      .responses
      .lock()
      .unwrap()
      .insert(place_id.to_string(), ProviderResponse::status(status));
  }

  /// Make every details call fail at the transport level.
  pub fn set_unreachable(&self, unreachable: bool) {
    self.unreachable.store(unreachable, Ordering::SeqCst);
  }

  /// Make resolving `reference` at `max_width` fail.
  pub fn fail_photo(&self, reference: &str, max_width: u32) {
    self
      .failing_photos
      .lock()
      .unwrap()
      .insert((reference.to_string(), max_width));
  }

  pub fn detail_calls(&self) -> u32 {
    self.detail_calls.load(Ordering::SeqCst)
  }

  pub fn photo_calls(&self) -> u32 {
    self.photo_calls.load(Ordering::SeqCst)
  }
}

impl PlaceProvider for FakeProvider {
  fn get_details<'a>(
    &'a self,
    place_id: &'a str,
    _fields: &'a [&'a str],
  ) -> BoxFuture<'a, Result<ProviderResponse>> {
    self.detail_calls.fetch_add(1, Ordering::SeqCst);

    let result = if self.unreachable.load(Ordering::SeqCst) {
      Err(eyre!("provider unreachable"))
    } else {
      Ok(
        self
          .responses
          .lock()
          .unwrap()
          .get(place_id)
          .cloned()
          .unwrap_or_else(|| ProviderResponse::status(ProviderStatus::NotFound)),
      )
    };

    // Suspend once, as a real network call would
    Box::pin(async move {
      tokio::task::yield_now().await;
      result
    })
  }

  fn photo_url<'a>(
    &'a self,
    photo: &'a PhotoRef,
    max_width: u32,
  ) -> BoxFuture<'a, Result<String>> {
    self.photo_calls.fetch_add(1, Ordering::SeqCst);

    let failing = self
      .failing_photos
      .lock()
      .unwrap()
      .contains(&(photo.photo_reference.clone(), max_width));

    let result = if failing {
      Err(eyre!("photo {} unavailable", photo.photo_reference))
    } else {
      Ok(format!(
        "https://photos.test/{}?w={}",
        photo.photo_reference, max_width
      ))
    };

    Box::pin(async move { result })
  }
}

/// Remote store backed by a map.
#[derive(Default)]
pub struct FakeRemoteStore {
  documents: Mutex<HashMap<String, PlaceDocument>>,
  failing_gets: AtomicBool,
  failing_upserts: AtomicBool,
  get_calls: AtomicU32,
  upsert_calls: AtomicU32,
}

impl FakeRemoteStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn insert(&self, place_id: &str, document: PlaceDocument) {
    self
      .documents
      .lock()
      .unwrap()
      .insert(place_id.to_string(), document);
  }

  pub fn document(&self, place_id: &str) -> Option<PlaceDocument> {
    self.documents.lock().unwrap().get(place_id).cloned()
  }

  pub fn fail_gets(&self, fail: bool) {
    self.failing_gets.store(fail, Ordering::SeqCst);
  }

  pub fn fail_upserts(&self, fail: bool) {
    self.failing_upserts.store(fail, Ordering::SeqCst);
  }

  pub fn get_count(&self) -> u32 {
    self.get_calls.load(Ordering::SeqCst)
  }

  pub fn upsert_count(&self) -> u32 {
    self.upsert_calls.load(Ordering::SeqCst)
  }
}

impl RemoteStore for FakeRemoteStore {
  fn get<'a>(&'a self, place_id: &'a str) -> BoxFuture<'a, Result<Option<PlaceDocument>>> {
    self.get_calls.fetch_add(1, Ordering::SeqCst);

    let result = if self.failing_gets.load(Ordering::SeqCst) {
      Err(eyre!("remote store unavailable"))
    } else {
      Ok(self.document(place_id))
    };

    Box::pin(async move { result })
  }

  fn upsert<'a>(
    &'a self,
    place_id: &'a str,
    document: &'a PlaceDocument,
  ) -> BoxFuture<'a, Result<()>> {
    self.upsert_calls.fetch_add(1, Ordering::SeqCst);

    let result = if self.failing_upserts.load(Ordering::SeqCst) {
      Err(eyre!("remote store rejected write"))
    } else {
      self.insert(place_id, document.clone());
      Ok(())
    };

    Box::pin(async move { result })
  }
}
