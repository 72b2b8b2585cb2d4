//! The map-rendering collaborator and its synchroniser.
//!
//! The engine never draws. It describes the frame it wants through
//! [`MapSurface`] and receives marker drag-ends as events. The surface is
//! obtained once from a [`MapLoader`]; nothing renders before it is ready.
//!
//! [`HeadlessMap`] is a surface that only records the latest frame. It backs
//! the replay driver and the behaviour tests.

mod sync;

pub use sync::{MapSyncController, ReverseLookup};

use async_trait::async_trait;
use geo::Rect;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::CoordinatePair;

/// One marker on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerSpec {
    /// Marker position.
    pub position: CoordinatePair,
    /// 1-based position of the waypoint in the route.
    pub label: usize,
    /// Whether this is the focused waypoint.
    pub highlighted: bool,
    /// Hover text, the waypoint address.
    pub tooltip: String,
}

/// How the path between waypoints is travelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoutingMode {
    /// On foot.
    #[default]
    Pedestrian,
}

/// A request for the collaborator to draw the route line.
///
/// The collaborator computes the geometry from the ordered addresses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathRequest {
    /// Waypoint addresses in route order.
    pub reference_points: Vec<String>,
    /// Travel mode.
    pub mode: RoutingMode,
}

/// Operations the engine invokes on a ready map.
pub trait MapSurface {
    /// Remove every marker and the path overlay.
    fn clear(&mut self);

    /// Draw `markers`, in route order.
    fn show_markers(&mut self, markers: &[MarkerSpec]);

    /// Draw the route line.
    fn show_path(&mut self, path: &PathRequest);

    /// Fit the view to `bounds`, with x as longitude and y as latitude.
    fn fit_bounds(&mut self, bounds: Rect<f64>);

    /// Centre the view on `center` at `zoom`.
    fn recenter(&mut self, center: CoordinatePair, zoom: u8);
}

/// Errors from obtaining a map surface.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapError {
    /// The map SDK failed to load.
    #[error("map failed to load: {message}")]
    LoadFailed {
        /// Description of the failure.
        message: String,
    },
}

/// A map SDK that becomes ready asynchronously.
#[async_trait(?Send)]
pub trait MapLoader {
    /// The surface handed out once loading completes.
    type Surface: MapSurface;

    /// Wait for the SDK and return its surface.
    ///
    /// # Errors
    ///
    /// Returns [`MapError`] when the SDK cannot be loaded.
    async fn ready(self) -> Result<Self::Surface, MapError>;
}

/// A loader whose surface is available immediately.
#[derive(Debug, Clone, Default)]
pub struct ReadyMap<S>(pub S);

#[async_trait(?Send)]
impl<S: MapSurface + 'static> MapLoader for ReadyMap<S> {
    type Surface = S;

    async fn ready(self) -> Result<S, MapError> {
        Ok(self.0)
    }
}

/// The centre and zoom last requested.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// View centre.
    pub center: CoordinatePair,
    /// Zoom level.
    pub zoom: u8,
}

/// A surface that records the frame instead of drawing it.
///
/// # Examples
/// ```
/// use waypoint_core::CoordinatePair;
/// use waypoint_core::map::{HeadlessMap, MapSurface};
///
/// let mut map = HeadlessMap::default();
/// map.recenter(CoordinatePair::new(13.4, 52.52), 10);
/// assert_eq!(map.viewport().map(|view| view.zoom), Some(10));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HeadlessMap {
    markers: Vec<MarkerSpec>,
    path: Option<PathRequest>,
    bounds: Option<Rect<f64>>,
    viewport: Option<Viewport>,
    renders: usize,
}

impl HeadlessMap {
    /// Markers currently drawn.
    #[must_use]
    pub fn markers(&self) -> &[MarkerSpec] {
        &self.markers
    }

    /// The route line currently drawn.
    #[must_use]
    pub const fn path(&self) -> Option<&PathRequest> {
        self.path.as_ref()
    }

    /// Bounds most recently fitted. Survives [`MapSurface::clear`].
    #[must_use]
    pub const fn bounds(&self) -> Option<Rect<f64>> {
        self.bounds
    }

    /// Centre and zoom most recently requested.
    #[must_use]
    pub const fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    /// Number of times the frame was cleared for a redraw.
    #[must_use]
    pub const fn renders(&self) -> usize {
        self.renders
    }
}

impl MapSurface for HeadlessMap {
    fn clear(&mut self) {
        self.markers.clear();
        self.path = None;
        self.renders += 1;
    }

    fn show_markers(&mut self, markers: &[MarkerSpec]) {
        self.markers = markers.to_vec();
    }

    fn show_path(&mut self, path: &PathRequest) {
        self.path = Some(path.clone());
    }

    fn fit_bounds(&mut self, bounds: Rect<f64>) {
        self.bounds = Some(bounds);
    }

    fn recenter(&mut self, center: CoordinatePair, zoom: u8) {
        self.viewport = Some(Viewport { center, zoom });
    }
}
