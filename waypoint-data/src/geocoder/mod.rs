//! HTTP geocoding collaborator.
//!
//! [`HttpGeocoder`] implements both [`waypoint_core::Geocoder`] and
//! [`waypoint_core::ReverseGeocoder`] against a Yandex-style endpoint
//! (`/1.x/?format=json&geocode=...`). Forward queries send the scoped text;
//! reverse queries send `"<lon>,<lat>"` and keep the first match.
//!
//! # Example
//!
//! ```no_run
//! use waypoint_core::{CoordinatePair, ReverseGeocoder};
//! use waypoint_data::geocoder::HttpGeocoder;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let geocoder = HttpGeocoder::new("https://geocode-maps.yandex.ru/1.x/")?;
//! let found = geocoder
//!     .reverse_geocode(CoordinatePair::new(37.61, 55.75))
//!     .await?;
//! println!("{}", found.display_address());
//! # Ok(())
//! # }
//! ```

mod provider;
mod yandex;

pub use provider::{
    DEFAULT_BASE_URL, DEFAULT_USER_AGENT, HttpGeocoder, HttpGeocoderConfig, ProviderBuildError,
};
