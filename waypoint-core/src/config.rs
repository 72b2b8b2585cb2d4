//! Tunable engine parameters.

use serde::{Deserialize, Serialize};

use crate::{CoordinatePair, GeoKind};

/// Maximum number of candidates shown in the suggestion list.
pub const DEFAULT_CANDIDATE_CAP: usize = 10;

/// Results requested for address queries.
pub const DEFAULT_ADDRESS_PAGE_SIZE: u16 = 10;

/// Results requested for city queries; larger so administrative areas survive
/// the kind filter.
pub const DEFAULT_CITY_PAGE_SIZE: u16 = 20;

/// Degrees added on each side of the marker extent when fitting the view.
pub const DEFAULT_BOUNDS_PADDING: f64 = 0.001;

/// Zoom level used when recentering on a default city.
pub const DEFAULT_RECENTER_ZOOM: u8 = 10;

/// Initial map centre (Moscow).
pub const DEFAULT_INITIAL_CENTER: CoordinatePair = CoordinatePair::new(37.64, 55.76);

/// Configuration shared by the address bar and the map synchroniser.
///
/// # Examples
/// ```
/// use waypoint_core::EngineConfig;
///
/// let config = EngineConfig::default().with_candidate_cap(5);
/// assert_eq!(config.candidate_cap, 5);
/// assert_eq!(config.city_page_size, 20);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum entries in the candidate list.
    pub candidate_cap: usize,
    /// Result count requested for address queries.
    pub address_page_size: u16,
    /// Result count requested for city queries.
    pub city_page_size: u16,
    /// Kinds admissible as a default city.
    pub city_kinds: Vec<GeoKind>,
    /// Padding in degrees applied when fitting the view to markers.
    pub bounds_padding: f64,
    /// Zoom level used when recentering.
    pub recenter_zoom: u8,
    /// Map centre before any city is chosen.
    pub initial_center: CoordinatePair,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            candidate_cap: DEFAULT_CANDIDATE_CAP,
            address_page_size: DEFAULT_ADDRESS_PAGE_SIZE,
            city_page_size: DEFAULT_CITY_PAGE_SIZE,
            city_kinds: vec![GeoKind::Locality, GeoKind::Province],
            bounds_padding: DEFAULT_BOUNDS_PADDING,
            recenter_zoom: DEFAULT_RECENTER_ZOOM,
            initial_center: DEFAULT_INITIAL_CENTER,
        }
    }
}

impl EngineConfig {
    /// Set the candidate cap.
    #[must_use]
    pub fn with_candidate_cap(mut self, cap: usize) -> Self {
        self.candidate_cap = cap;
        self
    }

    /// Set the result counts requested for address and city queries.
    #[must_use]
    pub fn with_page_sizes(mut self, address: u16, city: u16) -> Self {
        self.address_page_size = address;
        self.city_page_size = city;
        self
    }

    /// Set the kinds admissible as a default city.
    #[must_use]
    pub fn with_city_kinds(mut self, kinds: impl IntoIterator<Item = GeoKind>) -> Self {
        self.city_kinds = kinds.into_iter().collect();
        self
    }

    /// Set the bounds padding in degrees.
    #[must_use]
    pub fn with_bounds_padding(mut self, padding: f64) -> Self {
        self.bounds_padding = padding;
        self
    }

    /// Set the initial map centre.
    #[must_use]
    pub fn with_initial_center(mut self, center: CoordinatePair) -> Self {
        self.initial_center = center;
        self
    }
}
