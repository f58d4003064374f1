use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Place details as handed to display code.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceRecord {
  pub place_id: String,
  pub name: String,
  #[serde(default)]
  pub formatted_address: Option<String>,
  #[serde(default)]
  pub rating: Option<f64>,
  #[serde(default)]
  pub user_ratings_total: Option<u32>,
  #[serde(default)]
  pub phone: Option<String>,
  #[serde(default)]
  pub website: Option<String>,
  /// Opening hours keyed by day name (e.g. "Monday" -> "9:00 AM – 5:00 PM")
  #[serde(default)]
  pub opening_hours: BTreeMap<String, String>,
  /// Raw photo handles as returned by the provider
  #[serde(default)]
  pub photos: Vec<PhotoRef>,
  #[serde(default)]
  pub reviews: Vec<Review>,
  /// RFC 3339 timestamp of the last live fetch. Set by the service only.
  #[serde(default)]
  pub last_fetched: Option<String>,
}

/// Raw photo handle; must be resolved to a URL before rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoRef {
  pub photo_reference: String,
  #[serde(default)]
  pub width: Option<u32>,
  #[serde(default)]
  pub height: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
  pub author_name: String,
  #[serde(default)]
  pub rating: Option<f64>,
  #[serde(default)]
  pub text: String,
  #[serde(default)]
  pub relative_time_description: Option<String>,
  /// Epoch seconds
  #[serde(default)]
  pub time: Option<i64>,
}

/// A place record together with its resolved photo URLs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceDetails {
  pub record: PlaceRecord,
  pub photo_urls: Vec<String>,
}
