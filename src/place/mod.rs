//! Place details: domain types, collaborators, and the caching service.

#[cfg(test)]
pub(crate) mod fakes;
mod hours;
mod provider;
mod remote;
mod service;
mod share_url;
mod types;

pub use hours::parse_opening_hours;
pub use provider::{
  HttpPlaceProvider, PlaceProvider, ProviderOpeningHours, ProviderPhoto, ProviderPlace,
  ProviderResponse, ProviderReview, ProviderStatus, DETAIL_FIELDS,
};
pub use remote::{HttpRemoteStore, NullRemoteStore, PlaceDocument, RemoteStore, RemoteSyncWriter};
pub use service::{PlaceService, MAX_PHOTOS};
pub use share_url::extract_place_id;
pub use types::{PhotoRef, PlaceDetails, PlaceRecord, Review};
