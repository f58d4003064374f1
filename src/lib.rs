//! Client-side caching for place details.
//!
//! Details are served from a versioned local cache when fresh enough, fetched
//! from a rate-limited live provider otherwise, and fall back to a remote
//! document store when the provider is unavailable. Fresh results are pushed
//! to the remote store in the background.

pub mod cache;
pub mod config;
pub mod error;
pub mod executor;
pub mod logging;
pub mod place;

pub use error::PlaceError;
pub use place::{extract_place_id, PlaceDetails, PlaceRecord, PlaceService};
