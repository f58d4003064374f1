//! Recover place identifiers from shareable map URLs.

use url::Url;

/// Query parameters that carry the identifier directly.
const ID_PARAMS: &[&str] = &["place_id", "query_place_id"];

/// Prefix used inside search queries and path segments (`q=place_id:...`).
const ID_PREFIX: &str = "place_id:";

/// Prefix of identifiers as issued by the provider.
const ID_SIGNATURE: &str = "ChIJ";

/// Extract a place identifier from a shareable URL.
///
/// Query parameters are checked before the path. Returns `None` when the URL
/// doesn't parse or carries no identifier.
pub fn extract_place_id(url: &str) -> Option<String> {
  let url = Url::parse(url.trim()).ok()?;
  from_query(&url).or_else(|| from_path(&url))
}

fn from_query(url: &Url) -> Option<String> {
  let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();

  for param in ID_PARAMS {
    if let Some((_, value)) = pairs.iter().find(|(key, _)| key == param) {
      if is_valid_id(value) {
        return Some(value.clone());
      }
    }
  }

  pairs
    .iter()
    .filter(|(key, _)| key == "q" || key == "query")
    .filter_map(|(_, value)| value.strip_prefix(ID_PREFIX))
    .find(|id| is_valid_id(id))
    .map(String::from)
}

fn from_path(url: &Url) -> Option<String> {
  url.path_segments()?.find_map(|segment| {
    let segment = percent_decode(segment);
    if let Some(id) = segment.strip_prefix(ID_PREFIX) {
      return is_valid_id(id).then(|| id.to_string());
    }
    (segment.starts_with(ID_SIGNATURE) && is_valid_id(&segment)).then_some(segment)
  })
}

fn is_valid_id(id: &str) -> bool {
  !id.is_empty()
    && id
      .chars()
      .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

fn percent_decode(segment: &str) -> String {
  url::form_urlencoded::parse(format!("s={}", segment).as_bytes())
    .next()
    .map(|(_, value)| value.into_owned())
    .unwrap_or_else(|| segment.to_string())
}
