//! Core state machines for interactive route building.
//!
//! A user types into two fields, a default-city scope and a new-waypoint
//! address. Each keystroke becomes a scoped [`GeocodeQuery`]; answers become
//! a navigable [`CandidateList`]; a confirmed candidate becomes a
//! [`Waypoint`] in the [`RouteStore`]. The route can then be reordered by
//! dragging list entries and relocated by dragging map markers.
//!
//! The controllers are synchronous and perform no I/O. [`RoutePlanner`]
//! composes them and drives the asynchronous [`Geocoder`] and
//! [`ReverseGeocoder`] collaborators on a single thread.

#![forbid(unsafe_code)]

mod address_bar;
mod candidates;
mod config;
mod coords;
mod error;
pub mod geocode;
mod input;
pub mod map;
mod reorder;
mod route;
mod session;
mod waypoint;

#[doc(hidden)]
pub mod test_support;

pub use address_bar::{AddressBar, BarEffect};
pub use candidates::{Candidate, CandidateList, CandidateListController, QueryTicket};
pub use config::{
    DEFAULT_ADDRESS_PAGE_SIZE, DEFAULT_BOUNDS_PADDING, DEFAULT_CANDIDATE_CAP,
    DEFAULT_CITY_PAGE_SIZE, DEFAULT_INITIAL_CENTER, DEFAULT_RECENTER_ZOOM, EngineConfig,
};
pub use coords::{CoordinateParseError, CoordinatePair};
pub use error::{CommitError, ConflictError, ValidationError};
pub use geocode::{
    GeoKind, GeoResult, GeocodeQuery, Geocoder, ProviderError, ReverseGeocodeResult,
    ReverseGeocoder,
};
pub use input::{
    ADDRESS_MAX_CHARS, ActiveField, CITY_MAX_CHARS, FieldError, InputModeController, Key, KeyEvent,
};
pub use reorder::{DragPayload, DragReorderController};
pub use route::{RouteSnapshot, RouteStore};
pub use session::{Notification, RoutePlanner, UiEvent};
pub use waypoint::{DefaultCity, PendingAddress, Waypoint};
