//! Remote document store and the best-effort writer that keeps it in sync.

use chrono::Utc;
use color_eyre::{eyre::eyre, Result};
use futures::future::BoxFuture;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};
use url::Url;

use super::types::{PlaceDetails, PlaceRecord};
use crate::executor::{BackgroundExecutor, TaskKind};

/// Document persisted in the remote store for each place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceDocument {
  pub record: PlaceRecord,
  #[serde(default)]
  pub photo_urls: Vec<String>,
  /// RFC 3339 time of the upsert
  #[serde(default)]
  pub updated_at: Option<String>,
}

impl PlaceDocument {
  pub fn new(details: &PlaceDetails) -> Self {
    Self {
      record: details.record.clone(),
      photo_urls: details.photo_urls.clone(),
      updated_at: Some(Utc::now().to_rfc3339()),
    }
  }

  pub fn into_details(self) -> PlaceDetails {
    PlaceDetails {
      record: self.record,
      photo_urls: self.photo_urls,
    }
  }
}

/// Capability to read and upsert place documents by identifier.
pub trait RemoteStore: Send + Sync {
  fn get<'a>(&'a self, place_id: &'a str) -> BoxFuture<'a, Result<Option<PlaceDocument>>>;

  fn upsert<'a>(
    &'a self,
    place_id: &'a str,
    document: &'a PlaceDocument,
  ) -> BoxFuture<'a, Result<()>>;
}

/// Remote store used when none is configured: never has data, accepts writes.
pub struct NullRemoteStore;

impl RemoteStore for NullRemoteStore {
  fn get<'a>(&'a self, _place_id: &'a str) -> BoxFuture<'a, Result<Option<PlaceDocument>>> {
    Box::pin(async { Ok(None) })
  }

  fn upsert<'a>(
    &'a self,
    _place_id: &'a str,
    _document: &'a PlaceDocument,
  ) -> BoxFuture<'a, Result<()>> {
    Box::pin(async { Ok(()) })
  }
}

/// Remote store exposed as `GET`/`PUT {base_url}/places/{place_id}`.
#[derive(Clone)]
pub struct HttpRemoteStore {
  client: reqwest::Client,
  base_url: Url,
}

impl HttpRemoteStore {
  pub fn new(base_url: &str) -> Result<Self> {
    let base_url = Url::parse(base_url)
      .map_err(|e| eyre!("Invalid remote store URL {}: {}", base_url, e))?;

    let client = reqwest::Client::builder()
      .build()
      .map_err(|e| eyre!("Failed to create HTTP client: {}", e))?;

    Ok(Self { client, base_url })
  }

  fn document_url(&self, place_id: &str) -> Result<Url> {
    let mut url = self.base_url.clone();
    url
      .path_segments_mut()
      .map_err(|_| eyre!("Remote store URL cannot be a base: {}", self.base_url))?
      .pop_if_empty()
      .push("places")
      .push(place_id);
    Ok(url)
  }

  async fn fetch(&self, place_id: &str) -> Result<Option<PlaceDocument>> {
    let response = self
      .client
      .get(self.document_url(place_id)?)
      .send()
      .await
      .map_err(|e| eyre!("Failed to get document {}: {}", place_id, e))?;

    if response.status() == StatusCode::NOT_FOUND {
      return Ok(None);
    }
    if !response.status().is_success() {
      return Err(eyre!(
        "Remote store returned HTTP {} for {}",
        response.status(),
        place_id
      ));
    }

    let body = response
      .text()
      .await
      .map_err(|e| eyre!("Failed to read document {}: {}", place_id, e))?;

    let document = serde_json::from_str(&body)
      .map_err(|e| eyre!("Failed to parse document {}: {}", place_id, e))?;

    Ok(Some(document))
  }

  async fn put(&self, place_id: &str, document: &PlaceDocument) -> Result<()> {
    let body = serde_json::to_string(document)
      .map_err(|e| eyre!("Failed to serialize document {}: {}", place_id, e))?;

    let response = self
      .client
      .put(self.document_url(place_id)?)
      .header(reqwest::header::CONTENT_TYPE, "application/json")
      .body(body)
      .send()
      .await
      .map_err(|e| eyre!("Failed to upsert document {}: {}", place_id, e))?;

    if !response.status().is_success() {
      return Err(eyre!(
        "Remote store rejected upsert of {} with HTTP {}",
        place_id,
        response.status()
      ));
    }

    Ok(())
  }
}

impl RemoteStore for HttpRemoteStore {
  fn get<'a>(&'a self, place_id: &'a str) -> BoxFuture<'a, Result<Option<PlaceDocument>>> {
    Box::pin(self.fetch(place_id))
  }

  fn upsert<'a>(
    &'a self,
    place_id: &'a str,
    document: &'a PlaceDocument,
  ) -> BoxFuture<'a, Result<()>> {
    Box::pin(self.put(place_id, document))
  }
}

/// Pushes freshly fetched details to the remote store without blocking.
///
/// Failures are logged by the executor and never retried.
#[derive(Clone)]
pub struct RemoteSyncWriter {
  store: Arc<dyn RemoteStore>,
  executor: BackgroundExecutor,
}

impl RemoteSyncWriter {
  pub fn new(store: Arc<dyn RemoteStore>, executor: BackgroundExecutor) -> Self {
    Self { store, executor }
  }

  pub fn sync_to_remote_store(&self, place_id: &str, details: &PlaceDetails) {
    let store = Arc::clone(&self.store);
    let owned_id = place_id.to_string();
    let document = PlaceDocument::new(details);

    self.executor.submit(TaskKind::RemoteSync, place_id, async move {
      debug!(place_id = %owned_id, "Syncing place to remote store");
      store.upsert(&owned_id, &document).await?;
      info!(place_id = %owned_id, "Synced place to remote store");
      Ok(())
    });
  }
}
