//! Data access for the carefind recommender.
//!
//! Responsibilities:
//! - Load hospital candidates from the CSV dataset.
//! - Persist geocoding results between runs.
//! - Resolve addresses through an HTTP geocoder, with caching.
//!
//! Boundaries:
//! - Do not encode ranking rules (live in `carefind-core` and
//!   `carefind-scorer`).
//! - Expose synchronous entry points; async I/O stays behind an owned or
//!   borrowed Tokio runtime.
//!
//! Invariants:
//! - Resolvers are thread-safe.
//! - No global mutable state.

mod dataset;
mod fs;
mod geocode;
pub mod nominatim;
mod runtime;

pub use dataset::{
    DatasetError, LoadedDataset, OPTIONAL_COLUMNS, REQUIRED_COLUMNS, load_candidates,
    read_candidates,
};
pub use geocode::{CachedCoordinate, CachingResolver, GeocodeCache, GeocodeCacheError};
pub use nominatim::{GeocoderBuildError, GeocoderError, NominatimConfig, NominatimGeocoder};
