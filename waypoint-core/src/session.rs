//! The event-driven session that ties the controllers together.
//!
//! [`RoutePlanner`] owns the route, the address bar, the drag controller and
//! the map synchroniser. UI events are applied synchronously through
//! [`RoutePlanner::handle`]; geocoder calls they trigger run concurrently on
//! the current thread and land one at a time through
//! [`RoutePlanner::next_completion`]. Every landing re-reads the live state,
//! so nothing is applied against a view captured before the suspension.
//!
//! After each transition the planner publishes at most one route revision to
//! both the map and the [`Notification`] queue.

use std::mem;
use std::rc::Rc;

use futures_util::future::LocalBoxFuture;
use futures_util::stream::FuturesUnordered;
use futures_util::{FutureExt, StreamExt};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::map::{MapError, MapLoader, MapSurface, MapSyncController, ReverseLookup};
use crate::{
    AddressBar, BarEffect, CommitError, CoordinatePair, DragPayload, DragReorderController,
    EngineConfig, GeoResult, Geocoder, KeyEvent, ProviderError, QueryTicket,
    ConflictError, ReverseGeocodeResult, ReverseGeocoder, RouteSnapshot, RouteStore,
};

/// A user interaction delivered by the presentation layer.
///
/// # Examples
/// ```
/// use waypoint_core::{ActiveField, Key, KeyEvent, UiEvent};
///
/// let event: UiEvent = serde_json::from_str(
///     r#"{ "type": "key", "field": "address", "key": "other", "text": "Tv" }"#,
/// )?;
/// assert_eq!(
///     event,
///     UiEvent::Key(KeyEvent::new(ActiveField::Address, Key::Other, "Tv")),
/// );
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UiEvent {
    /// A key was released in one of the fields.
    Key(KeyEvent),
    /// The pointer moved over a candidate row.
    Hover {
        /// Row index.
        index: usize,
    },
    /// A candidate row was clicked.
    ConfirmCandidate {
        /// Row index.
        index: usize,
    },
    /// A click inside the widget but outside the list.
    OutsideClick,
    /// The "+" button next to the address field.
    CommitAddress,
    /// The clear button next to the city field.
    ClearCity,
    /// The remove button on a route entry.
    RemoveWaypoint {
        /// Address of the entry.
        address: String,
    },
    /// A route entry started being dragged.
    DragStart {
        /// Index of the dragged entry.
        origin: usize,
    },
    /// A dragged entry entered another entry.
    DragEnter {
        /// Index of the entry under the pointer.
        target: usize,
    },
    /// A dragged entry left another entry.
    DragLeave {
        /// Index of the entry the pointer left.
        target: usize,
    },
    /// A dragged entry was dropped.
    Drop {
        /// Index carried by the drag payload.
        origin: usize,
        /// Index of the entry it was dropped on.
        target: usize,
    },
    /// A route entry gained or lost focus.
    FocusWaypoint {
        /// Index of the focused entry, `None` on blur.
        index: Option<usize>,
    },
    /// A map marker was dropped at new coordinates.
    MarkerDragEnd {
        /// Route index of the marker.
        index: usize,
        /// New latitude.
        lat: f64,
        /// New longitude.
        lon: f64,
    },
}

/// State pushed to the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    /// The route has a new revision.
    RouteChanged(RouteSnapshot),
    /// The default city was confirmed (`Some`) or cleared (`None`).
    DefaultScopeChanged(Option<CoordinatePair>),
    /// The focused route entry changed.
    FocusChanged(Option<usize>),
    /// A dragged marker resolved to an address already in the route; the
    /// waypoint kept its previous position.
    RelocationRejected(ConflictError),
}

enum Completion {
    Geocode {
        ticket: QueryTicket,
        response: Result<Vec<GeoResult>, ProviderError>,
    },
    Reverse {
        lookup: ReverseLookup,
        response: Result<ReverseGeocodeResult, ProviderError>,
    },
}

/// A route-building session.
///
/// # Examples
/// ```
/// use waypoint_core::map::{HeadlessMap, ReadyMap};
/// use waypoint_core::test_support::{StubGeocoder, StubReverseGeocoder, geo_result};
/// use waypoint_core::{ActiveField, EngineConfig, GeoKind, Key, KeyEvent, RoutePlanner, UiEvent};
///
/// # tokio::runtime::Builder::new_current_thread().build()?.block_on(async {
/// let geocoder = StubGeocoder::default().with_results(
///     "Street",
///     vec![geo_result("Street 1", "Russia, Street 1", GeoKind::Street, 37.6)],
/// );
/// let mut planner: RoutePlanner<_, _, HeadlessMap> =
///     RoutePlanner::new(geocoder, StubReverseGeocoder::default(), &EngineConfig::default());
/// planner.attach_map(ReadyMap(HeadlessMap::default())).await?;
///
/// planner.handle(UiEvent::Key(KeyEvent::new(ActiveField::Address, Key::Other, "Street")))?;
/// planner.settle().await;
/// planner.handle(UiEvent::ConfirmCandidate { index: 0 })?;
/// planner.handle(UiEvent::CommitAddress)?;
///
/// assert_eq!(planner.route().waypoints()[0].address, "Russia, Street 1");
/// assert_eq!(planner.map().map(|map| map.markers().len()), Some(1));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// # })?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct RoutePlanner<G, R, S> {
    geocoder: Rc<G>,
    reverse: Rc<R>,
    in_flight: FuturesUnordered<LocalBoxFuture<'static, Completion>>,
    bar: AddressBar,
    route: RouteStore,
    drag: DragReorderController,
    map: MapSyncController<S>,
    published: u64,
    notifications: Vec<Notification>,
}

impl<G, R, S> RoutePlanner<G, R, S>
where
    G: Geocoder + 'static,
    R: ReverseGeocoder + 'static,
    S: MapSurface,
{
    /// Create an empty session.
    #[must_use]
    pub fn new(geocoder: G, reverse: R, config: &EngineConfig) -> Self {
        Self {
            geocoder: Rc::new(geocoder),
            reverse: Rc::new(reverse),
            in_flight: FuturesUnordered::new(),
            bar: AddressBar::new(config),
            route: RouteStore::default(),
            drag: DragReorderController::default(),
            map: MapSyncController::new(config),
            published: 0,
            notifications: Vec::new(),
        }
    }

    /// Wait for the map SDK and draw the current route on it.
    ///
    /// # Errors
    ///
    /// Returns [`MapError`] when the loader fails; the session keeps working
    /// without a map.
    pub async fn attach_map<L>(&mut self, loader: L) -> Result<(), MapError>
    where
        L: MapLoader<Surface = S>,
    {
        let surface = loader.ready().await?;
        self.map.attach(surface, &self.route.snapshot());
        Ok(())
    }

    /// Apply one UI event.
    ///
    /// # Errors
    ///
    /// Returns the validation or conflict error raised by the event. The
    /// message is also on display in the address bar.
    pub fn handle(&mut self, event: UiEvent) -> Result<(), CommitError> {
        let outcome = self.dispatch(event);
        self.publish();
        outcome
    }

    fn dispatch(&mut self, event: UiEvent) -> Result<(), CommitError> {
        match event {
            UiEvent::Key(key) => {
                let effect = self.bar.handle_key(&key, &mut self.route)?;
                self.apply_effect(effect);
            }
            UiEvent::Hover { index } => self.bar.hover(index),
            UiEvent::ConfirmCandidate { index } => {
                let effect = self.bar.confirm(index);
                self.apply_effect(effect);
            }
            UiEvent::OutsideClick => self.bar.outside_click(),
            UiEvent::CommitAddress => {
                self.bar.commit(&mut self.route)?;
            }
            UiEvent::ClearCity => {
                let effect = self.bar.clear_city();
                self.apply_effect(effect);
            }
            UiEvent::RemoveWaypoint { address } => {
                self.route.remove(&address);
            }
            UiEvent::DragStart { origin } => {
                let _payload = self.drag.drag_start(origin);
            }
            UiEvent::DragEnter { target } => self.drag.drag_enter(target),
            UiEvent::DragLeave { target } => self.drag.drag_leave(target),
            UiEvent::Drop { origin, target } => {
                self.drag
                    .drop(DragPayload { origin }, target, &mut self.route)?;
            }
            UiEvent::FocusWaypoint { index } => {
                if self.map.set_focus(index) {
                    self.notifications.push(Notification::FocusChanged(index));
                }
            }
            UiEvent::MarkerDragEnd { index, lat, lon } => {
                let position = CoordinatePair::from_lat_lon([lat, lon]);
                match self.map.begin_relocate(index, position, &self.route.snapshot()) {
                    Some(lookup) => self.spawn_reverse(lookup),
                    None => debug!("ignoring drag of unknown marker {index}"),
                }
            }
        }
        Ok(())
    }

    fn apply_effect(&mut self, effect: Option<BarEffect>) {
        match effect {
            Some(BarEffect::Query(ticket, query)) => {
                let geocoder = Rc::clone(&self.geocoder);
                self.in_flight.push(
                    async move {
                        let response = geocoder.geocode(&query).await;
                        Completion::Geocode { ticket, response }
                    }
                    .boxed_local(),
                );
            }
            Some(BarEffect::ScopeChanged(scope)) => {
                self.map.recenter(scope);
                self.notifications
                    .push(Notification::DefaultScopeChanged(scope));
            }
            Some(BarEffect::Committed(_)) | None => {}
        }
    }

    fn spawn_reverse(&mut self, lookup: ReverseLookup) {
        let reverse = Rc::clone(&self.reverse);
        self.in_flight.push(
            async move {
                let response = reverse.reverse_geocode(lookup.position).await;
                Completion::Reverse { lookup, response }
            }
            .boxed_local(),
        );
    }

    /// Wait for the next geocoder call to finish and apply it.
    ///
    /// Returns `false` when nothing was in flight.
    pub async fn next_completion(&mut self) -> bool {
        let Some(completion) = self.in_flight.next().await else {
            return false;
        };
        match completion {
            Completion::Geocode { ticket, response } => {
                self.bar.apply_response(ticket, response);
            }
            Completion::Reverse { lookup, response } => {
                if let Err(conflict) = self.map.finish_relocate(lookup, response, &mut self.route)
                {
                    self.notifications
                        .push(Notification::RelocationRejected(conflict));
                }
            }
        }
        self.publish();
        true
    }

    /// Apply completions until nothing is in flight.
    pub async fn settle(&mut self) {
        while self.next_completion().await {}
    }

    fn publish(&mut self) {
        let snapshot = self.route.snapshot();
        if snapshot.revision() != self.published {
            self.published = snapshot.revision();
            self.notifications
                .push(Notification::RouteChanged(snapshot.clone()));
        }
        self.map.sync(&snapshot);
    }

    /// Drain the notifications produced since the last call.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        mem::take(&mut self.notifications)
    }

    /// The current route revision.
    #[must_use]
    pub fn route(&self) -> RouteSnapshot {
        self.route.snapshot()
    }

    /// The address bar state.
    #[must_use]
    pub const fn address_bar(&self) -> &AddressBar {
        &self.bar
    }

    /// The list drag state.
    #[must_use]
    pub const fn drag(&self) -> &DragReorderController {
        &self.drag
    }

    /// The attached map surface.
    #[must_use]
    pub const fn map(&self) -> Option<&S> {
        self.map.surface()
    }

    /// Index of the focused route entry.
    #[must_use]
    pub const fn focus(&self) -> Option<usize> {
        self.map.focus()
    }

    /// Number of geocoder calls still in flight.
    #[must_use]
    pub fn pending_requests(&self) -> usize {
        self.in_flight.len()
    }
}
