//! Geocoding collaborator seams.
//!
//! [`Geocoder`] turns a scoped free-text query into ordered [`GeoResult`]s and
//! [`ReverseGeocoder`] turns a position into a single best match. Both are
//! asynchronous and single-threaded: the engine drives many requests
//! concurrently on one thread, so futures are not required to be `Send`.
//!
//! Implementations must return `Ok(Vec::new())` for a query that matched
//! nothing; transport and decoding failures are [`ProviderError`]s.

mod error;
mod provider;

pub use error::ProviderError;
pub use provider::{
    GeoKind, GeoResult, GeocodeQuery, Geocoder, ReverseGeocodeResult, ReverseGeocoder,
};
