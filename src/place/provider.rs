//! Live place-details provider.
//!
//! The provider is the source of truth for ratings, reviews and photo URLs.
//! It is rate limited and slow, which is why everything else in this crate
//! exists.

use color_eyre::{eyre::eyre, Result};
use futures::future::BoxFuture;
use serde::Deserialize;
use url::Url;

use super::types::{PhotoRef, Review};

/// Fields requested from the provider on every details call.
pub const DETAIL_FIELDS: &[&str] = &[
  "place_id",
  "name",
  "formatted_address",
  "rating",
  "user_ratings_total",
  "formatted_phone_number",
  "website",
  "opening_hours",
  "photos",
  "reviews",
];

/// Capability to look up place details by identifier.
pub trait PlaceProvider: Send + Sync {
  /// Fetch details for `place_id`, restricted to `fields`.
  ///
  /// Transport failures are errors; provider-level failures come back as a
  /// non-`Ok` status.
  fn get_details<'a>(
    &'a self,
    place_id: &'a str,
    fields: &'a [&'a str],
  ) -> BoxFuture<'a, Result<ProviderResponse>>;

  /// Resolve a photo handle to a directly renderable URL.
  fn photo_url<'a>(&'a self, photo: &'a PhotoRef, max_width: u32)
    -> BoxFuture<'a, Result<String>>;
}

/// Provider status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProviderStatus {
  Ok,
  ZeroResults,
  NotFound,
  InvalidRequest,
  OverQueryLimit,
  RequestDenied,
  #[serde(other)]
  UnknownError,
}

/// Record-or-status answer from the provider.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderResponse {
  pub status: ProviderStatus,
  #[serde(default)]
  pub result: Option<ProviderPlace>,
  #[serde(default)]
  pub error_message: Option<String>,
}

impl ProviderResponse {
  pub fn ok(place: ProviderPlace) -> Self {
    Self {
      status: ProviderStatus::Ok,
      result: Some(place),
      error_message: None,
    }
  }

  pub fn status(status: ProviderStatus) -> Self {
    Self {
      status,
      result: None,
      error_message: None,
    }
  }
}

/// Place payload as the provider returns it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderPlace {
  #[serde(default)]
  pub place_id: Option<String>,
  #[serde(default)]
  pub name: String,
  #[serde(default)]
  pub formatted_address: Option<String>,
  #[serde(default)]
  pub rating: Option<f64>,
  #[serde(default)]
  pub user_ratings_total: Option<u32>,
  #[serde(default)]
  pub formatted_phone_number: Option<String>,
  #[serde(default)]
  pub website: Option<String>,
  #[serde(default)]
  pub opening_hours: Option<ProviderOpeningHours>,
  #[serde(default)]
  pub photos: Vec<ProviderPhoto>,
  #[serde(default)]
  pub reviews: Vec<ProviderReview>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderOpeningHours {
  #[serde(default)]
  pub weekday_text: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderPhoto {
  pub photo_reference: String,
  #[serde(default)]
  pub width: Option<u32>,
  #[serde(default)]
  pub height: Option<u32>,
}

impl From<ProviderPhoto> for PhotoRef {
  fn from(photo: ProviderPhoto) -> Self {
    Self {
      photo_reference: photo.photo_reference,
      width: photo.width,
      height: photo.height,
    }
  }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderReview {
  #[serde(default)]
  pub author_name: String,
  #[serde(default)]
  pub rating: Option<f64>,
  #[serde(default)]
  pub text: String,
  #[serde(default)]
  pub relative_time_description: Option<String>,
  #[serde(default)]
  pub time: Option<i64>,
}

impl From<ProviderReview> for Review {
  fn from(review: ProviderReview) -> Self {
    Self {
      author_name: review.author_name,
      rating: review.rating,
      text: review.text,
      relative_time_description: review.relative_time_description,
      time: review.time,
    }
  }
}

/// Provider reached over HTTP with JSON responses.
#[derive(Clone)]
pub struct HttpPlaceProvider {
  client: reqwest::Client,
  base_url: Url,
  api_key: String,
}

impl HttpPlaceProvider {
  pub fn new(base_url: &str, api_key: String) -> Result<Self> {
    let base_url = Url::parse(base_url)
      .map_err(|e| eyre!("Invalid provider URL {}: {}", base_url, e))?;

    let client = reqwest::Client::builder()
      .build()
      .map_err(|e| eyre!("Failed to create HTTP client: {}", e))?;

    Ok(Self {
      client,
      base_url,
      api_key,
    })
  }

  /// Append `segments` to the base URL, whether or not it ends in a slash.
  fn endpoint(&self, segments: &[&str]) -> Result<Url> {
    let mut url = self.base_url.clone();
    url
      .path_segments_mut()
      .map_err(|_| eyre!("Provider URL cannot be a base: {}", self.base_url))?
      .pop_if_empty()
      .extend(segments);
    Ok(url)
  }

  async fn fetch_details(&self, place_id: &str, fields: &[&str]) -> Result<ProviderResponse> {
    let mut url = self.endpoint(&["details", "json"])?;
    url
      .query_pairs_mut()
      .append_pair("place_id", place_id)
      .append_pair("fields", &fields.join(","))
      .append_pair("key", &self.api_key);

    let response = self
      .client
      .get(url)
      .send()
      .await
      .map_err(|e| eyre!("Failed to get details for {}: {}", place_id, e))?;

    let status = response.status();
    if !status.is_success() {
      return Err(eyre!("Provider returned HTTP {} for {}", status, place_id));
    }

    let body = response
      .text()
      .await
      .map_err(|e| eyre!("Failed to read details for {}: {}", place_id, e))?;

    serde_json::from_str(&body).map_err(|e| eyre!("Failed to parse details for {}: {}", place_id, e))
  }

  async fn resolve_photo(&self, photo: &PhotoRef, max_width: u32) -> Result<String> {
    let mut url = self.endpoint(&["photo"])?;
    url
      .query_pairs_mut()
      .append_pair("maxwidth", &max_width.to_string())
      .append_pair("photo_reference", &photo.photo_reference)
      .append_pair("key", &self.api_key);

    // The photo endpoint redirects to the actual image; keep the final URL
    let response = self
      .client
      .get(url)
      .send()
      .await
      .map_err(|e| eyre!("Failed to resolve photo: {}", e))?;

    if !response.status().is_success() {
      return Err(eyre!("Photo endpoint returned HTTP {}", response.status()));
    }

    Ok(response.url().to_string())
  }
}

impl PlaceProvider for HttpPlaceProvider {
  fn get_details<'a>(
    &'a self,
    place_id: &'a str,
    fields: &'a [&'a str],
  ) -> BoxFuture<'a, Result<ProviderResponse>> {
    Box::pin(self.fetch_details(place_id, fields))
  }

  fn photo_url<'a>(
    &'a self,
    photo: &'a PhotoRef,
    max_width: u32,
  ) -> BoxFuture<'a, Result<String>> {
    Box::pin(self.resolve_photo(photo, max_width))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_endpoint_keeps_base_path() {
    for base in [
      "https://maps.example.com/api/place",
      "https://maps.example.com/api/place/",
    ] {
      let provider = HttpPlaceProvider::new(base, "key".to_string()).unwrap();
      assert_eq!(
        provider.endpoint(&["details", "json"]).unwrap().as_str(),
        "https://maps.example.com/api/place/details/json"
      );
      assert_eq!(
        provider.endpoint(&["photo"]).unwrap().as_str(),
        "https://maps.example.com/api/place/photo"
      );
    }
  }

  #[test]
  fn test_parse_details_response() {
    let body = r#"{
      "status": "OK",
      "result": {
        "place_id": "p1",
        "name": "Park",
        "rating": 4.5,
        "user_ratings_total": 120,
        "opening_hours": { "weekday_text": ["Monday: 9:00 AM – 5:00 PM"] },
        "photos": [{ "photo_reference": "abc", "width": 800, "height": 600 }],
        "reviews": [{ "author_name": "Ana", "rating": 5, "text": "Lovely" }]
      }
    }"#;

    let response: ProviderResponse = serde_json::from_str(body).unwrap();
    assert_eq!(response.status, ProviderStatus::Ok);

    let place = response.result.unwrap();
    assert_eq!(place.name, "Park");
    assert_eq!(place.user_ratings_total, Some(120));
    assert_eq!(place.photos[0].photo_reference, "abc");
    assert_eq!(place.reviews[0].rating, Some(5.0));
  }

  #[test]
  fn test_parse_unknown_status() {
    let response: ProviderResponse =
      serde_json::from_str(r#"{ "status": "SOMETHING_NEW" }"#).unwrap();
    assert_eq!(response.status, ProviderStatus::UnknownError);
    assert!(response.result.is_none());
  }

  #[test]
  fn test_parse_not_found_status() {
    let response: ProviderResponse =
      serde_json::from_str(r#"{ "status": "NOT_FOUND", "error_message": "gone" }"#).unwrap();
    assert_eq!(response.status, ProviderStatus::NotFound);
    assert_eq!(response.error_message.as_deref(), Some("gone"));
  }
}
