//! Data access adapters for the waypoint engine.
//!
//! Responsibilities:
//! - Implement the core's collaborator traits against real services.
//! - Own provider wire formats so they never leak into `waypoint-core`.
//!
//! Boundaries:
//! - Do not encode interaction rules (live in `waypoint-core`).
//! - Map every transport and decoding failure onto
//!   [`waypoint_core::ProviderError`].

pub mod geocoder;

pub use geocoder::{HttpGeocoder, HttpGeocoderConfig, ProviderBuildError};
