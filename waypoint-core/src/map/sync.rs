//! Keeps a [`MapSurface`] in step with the route.

use geo::{Coord, Rect};
use log::{debug, warn};

use crate::{
    ConflictError, CoordinatePair, EngineConfig, ProviderError, ReverseGeocodeResult,
    RouteSnapshot, RouteStore, Waypoint,
};

use super::{MapSurface, MarkerSpec, PathRequest, RoutingMode};

/// A reverse lookup started by a marker drag.
///
/// Carries the address the waypoint had when the drag ended so the result can
/// be checked against the route it lands on.
#[derive(Debug, Clone, PartialEq)]
pub struct ReverseLookup {
    /// Route index of the dragged marker.
    pub index: usize,
    /// Where the marker was dropped.
    pub position: CoordinatePair,
    /// Address of the waypoint at `index` when the drag ended.
    pub address_at_drag: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Rendered {
    revision: u64,
    focus: Option<usize>,
}

/// Renders route snapshots as markers, a path and fitted bounds.
#[derive(Debug)]
pub struct MapSyncController<S> {
    surface: Option<S>,
    rendered: Option<Rendered>,
    focus: Option<usize>,
    scope: Option<CoordinatePair>,
    bounds_padding: f64,
    recenter_zoom: u8,
    initial_center: CoordinatePair,
}

impl<S> Default for MapSyncController<S> {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

impl<S> MapSyncController<S> {
    /// Create a detached controller.
    #[must_use]
    pub const fn new(config: &EngineConfig) -> Self {
        Self {
            surface: None,
            rendered: None,
            focus: None,
            scope: None,
            bounds_padding: config.bounds_padding,
            recenter_zoom: config.recenter_zoom,
            initial_center: config.initial_center,
        }
    }

    /// The attached surface.
    #[must_use]
    pub const fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    /// Whether a surface is attached.
    #[must_use]
    pub const fn is_attached(&self) -> bool {
        self.surface.is_some()
    }

    /// Index of the highlighted waypoint.
    #[must_use]
    pub const fn focus(&self) -> Option<usize> {
        self.focus
    }

    /// Record the focused waypoint. Returns whether it changed.
    pub fn set_focus(&mut self, focus: Option<usize>) -> bool {
        let changed = self.focus != focus;
        self.focus = focus;
        changed
    }

    /// Start relocating the waypoint at `index` to `position`.
    ///
    /// Returns `None` when `index` is outside the route.
    #[must_use]
    pub fn begin_relocate(
        &self,
        index: usize,
        position: CoordinatePair,
        route: &RouteSnapshot,
    ) -> Option<ReverseLookup> {
        let waypoint = route.waypoints().get(index)?;
        Some(ReverseLookup {
            index,
            position,
            address_at_drag: waypoint.address.clone(),
        })
    }

    /// Apply the reverse-geocode `result` for `lookup` to the current route.
    ///
    /// The waypoint takes the dropped position and the result's
    /// `"country, address line"` address. A failed lookup leaves the route
    /// untouched, as does a lookup whose waypoint was moved, removed or
    /// replaced while it was in flight. Returns whether the route changed.
    ///
    /// # Errors
    ///
    /// Returns [`ConflictError`] when the resolved address already belongs to
    /// another waypoint.
    pub fn finish_relocate(
        &self,
        lookup: ReverseLookup,
        result: Result<ReverseGeocodeResult, ProviderError>,
        route: &mut RouteStore,
    ) -> Result<bool, ConflictError> {
        let resolved = match result {
            Ok(resolved) => resolved,
            Err(err) => {
                warn!("reverse geocode at {} failed: {err}", lookup.position);
                return Ok(false);
            }
        };
        let current = route.snapshot();
        let still_there = current
            .waypoints()
            .get(lookup.index)
            .is_some_and(|waypoint| waypoint.address == lookup.address_at_drag);
        if !still_there {
            debug!(
                "discarding relocation of {:?}: route changed during lookup",
                lookup.address_at_drag
            );
            return Ok(false);
        }
        let moved = Waypoint::new(lookup.position, resolved.display_address());
        let Some(sequence) = current.relocated(lookup.index, moved) else {
            return Ok(false);
        };
        route.reorder(sequence).inspect_err(|err| {
            warn!("relocation rejected: {err}");
        })?;
        Ok(true)
    }

    fn needs_render(&self, route: &RouteSnapshot) -> bool {
        self.rendered
            != Some(Rendered {
                revision: route.revision(),
                focus: self.focus,
            })
    }
}

impl<S: MapSurface> MapSyncController<S> {
    /// Attach `surface` and draw `route` on it.
    ///
    /// The view is centred on the default city if one is set, otherwise on
    /// the configured initial centre.
    pub fn attach(&mut self, mut surface: S, route: &RouteSnapshot) {
        let center = self.scope.unwrap_or(self.initial_center);
        surface.recenter(center, self.recenter_zoom);
        self.surface = Some(surface);
        self.rendered = None;
        self.sync(route);
    }

    /// Redraw if `route` or the focus changed since the last render.
    ///
    /// Does nothing while detached.
    pub fn sync(&mut self, route: &RouteSnapshot) {
        if self.surface.is_none() || !self.needs_render(route) {
            return;
        }
        self.render(route);
    }

    /// Centre the view on the new default city.
    ///
    /// Clearing the scope leaves the view where it is.
    pub fn recenter(&mut self, scope: Option<CoordinatePair>) {
        self.scope = scope;
        let (Some(center), Some(surface)) = (scope, self.surface.as_mut()) else {
            return;
        };
        surface.recenter(center, self.recenter_zoom);
    }

    fn render(&mut self, route: &RouteSnapshot) {
        let focus = self.focus;
        let padding = self.bounds_padding;
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        self.rendered = Some(Rendered {
            revision: route.revision(),
            focus,
        });
        surface.clear();
        let waypoints = route.waypoints();
        if waypoints.is_empty() {
            return;
        }

        let markers: Vec<MarkerSpec> = waypoints
            .iter()
            .enumerate()
            .map(|(index, waypoint)| MarkerSpec {
                position: waypoint.pos,
                label: index + 1,
                highlighted: focus == Some(index),
                tooltip: waypoint.address.clone(),
            })
            .collect();
        surface.show_markers(&markers);

        if waypoints.len() > 1 {
            surface.show_path(&PathRequest {
                reference_points: waypoints.iter().map(|w| w.address.clone()).collect(),
                mode: RoutingMode::Pedestrian,
            });
        }

        if let Some(bounds) = padded_bounds(waypoints, padding) {
            surface.fit_bounds(bounds);
        }
    }
}

/// The extent of `waypoints` grown by `padding` degrees on every side.
fn padded_bounds(waypoints: &[Waypoint], padding: f64) -> Option<Rect<f64>> {
    let extent = waypoints.iter().map(|w| w.pos.coord()).fold(
        None::<Rect<f64>>,
        |bounds, coord| match bounds {
            Some(existing) => Some(Rect::new(
                Coord {
                    x: existing.min().x.min(coord.x),
                    y: existing.min().y.min(coord.y),
                },
                Coord {
                    x: existing.max().x.max(coord.x),
                    y: existing.max().y.max(coord.y),
                },
            )),
            None => Some(Rect::new(coord, coord)),
        },
    )?;
    Some(Rect::new(
        Coord {
            x: extent.min().x - padding,
            y: extent.min().y - padding,
        },
        Coord {
            x: extent.max().x + padding,
            y: extent.max().y + padding,
        },
    ))
}
