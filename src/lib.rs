//! Facade crate for the waypoint route-building engine.
//!
//! This crate re-exports the core state machines and session driver, and
//! exposes the HTTP geocoder behind the default `http` feature.

#![forbid(unsafe_code)]

pub use waypoint_core::map;
pub use waypoint_core::{
    AddressBar, BarEffect, Candidate, CandidateList, CandidateListController, CommitError,
    ConflictError, CoordinatePair, DefaultCity, DragReorderController, EngineConfig, GeoKind,
    GeoResult, GeocodeQuery, Geocoder, Notification, PendingAddress, ProviderError,
    ReverseGeocodeResult, ReverseGeocoder, RoutePlanner, RouteSnapshot, RouteStore, UiEvent,
    ValidationError, Waypoint,
};

#[cfg(feature = "http")]
pub use waypoint_data::{HttpGeocoder, HttpGeocoderConfig, ProviderBuildError};
