//! The composite address-entry widget.
//!
//! [`AddressBar`] joins the [`InputModeController`] and the
//! [`CandidateListController`] behind the keyboard state machine. It never
//! performs I/O: a keystroke that needs suggestions returns
//! [`BarEffect::Query`], and the caller delivers the eventual response via
//! [`AddressBar::apply_response`].

use log::{debug, warn};

use crate::{
    ActiveField, CandidateList, CandidateListController, CommitError, CoordinatePair,
    EngineConfig, GeoResult, GeocodeQuery, InputModeController, Key, KeyEvent, ProviderError,
    QueryTicket, RouteStore, ValidationError, Waypoint,
};

/// Work the caller must carry out after an address-bar transition.
#[derive(Debug, Clone, PartialEq)]
pub enum BarEffect {
    /// Send `query` to the geocoder and hand the answer back with `ticket`.
    Query(QueryTicket, GeocodeQuery),
    /// The default-city scope changed; `None` means it was cleared.
    ScopeChanged(Option<CoordinatePair>),
    /// The pending address was appended to the route.
    Committed(Waypoint),
}

/// Keyboard, pointer and confirmation handling for the two fields.
#[derive(Debug, Clone, Default)]
pub struct AddressBar {
    input: InputModeController,
    candidates: CandidateListController,
}

impl AddressBar {
    /// Create an address bar using the list limits from `config`.
    #[must_use]
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            input: InputModeController::default(),
            candidates: CandidateListController::new(config),
        }
    }

    /// Field texts, confirmed selections and the displayed error.
    #[must_use]
    pub const fn input(&self) -> &InputModeController {
        &self.input
    }

    /// The displayed suggestion list.
    #[must_use]
    pub const fn candidates(&self) -> &CandidateList {
        self.candidates.list()
    }

    /// Run the keyboard state machine for one key release.
    ///
    /// # Errors
    ///
    /// Returns the validation or conflict error raised by Enter. The error is
    /// also left on display against its field.
    pub fn handle_key(
        &mut self,
        event: &KeyEvent,
        route: &mut RouteStore,
    ) -> Result<Option<BarEffect>, CommitError> {
        self.input.set_active(event.field);
        self.input.clear_error();
        match event.key {
            Key::Enter => self.enter(event.field, route),
            Key::Escape => {
                if self.candidates.list().is_empty() {
                    self.revert_field(event.field);
                } else {
                    self.collapse_suggestions();
                }
                Ok(None)
            }
            Key::ArrowUp => {
                self.candidates.move_up();
                Ok(None)
            }
            Key::ArrowDown => {
                self.candidates.move_down();
                Ok(None)
            }
            Key::ArrowLeft | Key::ArrowRight => Ok(None),
            Key::Backspace | Key::Delete | Key::Other => Ok(self.edit(event)),
        }
    }

    fn enter(
        &mut self,
        field: ActiveField,
        route: &mut RouteStore,
    ) -> Result<Option<BarEffect>, CommitError> {
        if let Some(index) = self.candidates.list().highlight() {
            return Ok(self.confirm(index));
        }
        if self.input.text(field).is_empty() {
            return Ok(None);
        }
        match field {
            ActiveField::Address => {
                let waypoint = self.commit(route)?;
                Ok(Some(BarEffect::Committed(waypoint)))
            }
            ActiveField::City => {
                let error = ValidationError::CityNotChosen;
                self.input.show_error(ActiveField::City, error.to_string());
                Err(error.into())
            }
        }
    }

    fn edit(&mut self, event: &KeyEvent) -> Option<BarEffect> {
        let field = event.field;
        self.input.type_text(field, &event.text);
        let text = self.input.text(field);
        if !text.is_empty() {
            let (ticket, query) = self
                .candidates
                .issue_query(field, text, self.input.default_city());
            return Some(BarEffect::Query(ticket, query));
        }

        self.candidates.invalidate(field);
        self.candidates.clear();
        if !event.key.is_deletion() {
            return None;
        }
        match field {
            ActiveField::City if self.input.default_city().is_some() => {
                self.input.reset_default_city();
                Some(BarEffect::ScopeChanged(None))
            }
            ActiveField::City => None,
            ActiveField::Address => {
                self.input.reset_pending();
                None
            }
        }
    }

    /// Confirm the candidate at `index` for the active field.
    ///
    /// Returns [`BarEffect::ScopeChanged`] when a city was confirmed. Does
    /// nothing for an index outside the list.
    pub fn confirm(&mut self, index: usize) -> Option<BarEffect> {
        let candidate = self.candidates.get(index)?.clone();
        let field = self.input.active();
        let effect = match field {
            ActiveField::City => {
                self.input.confirm_city(&candidate);
                Some(BarEffect::ScopeChanged(Some(candidate.pos)))
            }
            ActiveField::Address => {
                self.input.confirm_address(&candidate);
                None
            }
        };
        self.candidates.invalidate(field);
        self.candidates.clear();
        effect
    }

    /// Highlight the row under the pointer.
    pub fn hover(&mut self, index: usize) {
        self.candidates.hover(index);
    }

    /// Dismiss the suggestion list, keeping the field text.
    pub fn collapse_suggestions(&mut self) {
        self.candidates.invalidate(self.input.active());
        self.candidates.clear();
    }

    /// Restore `field` to its last confirmed value.
    pub fn revert_field(&mut self, field: ActiveField) {
        self.candidates.invalidate(field);
        self.input.revert_field(field);
    }

    /// A click anywhere in the widget outside the list.
    pub fn outside_click(&mut self) {
        self.collapse_suggestions();
    }

    /// The city clear button.
    ///
    /// Returns [`BarEffect::ScopeChanged`] with `None` when a city was set.
    pub fn clear_city(&mut self) -> Option<BarEffect> {
        let had_city = self.input.default_city().is_some();
        self.input.reset_default_city();
        self.candidates.invalidate(ActiveField::City);
        self.collapse_suggestions();
        had_city.then_some(BarEffect::ScopeChanged(None))
    }

    /// The address field's "+" action.
    ///
    /// # Errors
    ///
    /// See [`RouteStore::commit_from_pending`].
    pub fn commit(&mut self, route: &mut RouteStore) -> Result<Waypoint, CommitError> {
        let waypoint = route.commit_from_pending(&mut self.input)?;
        self.candidates.invalidate(ActiveField::Address);
        self.candidates.clear();
        Ok(waypoint)
    }

    /// Deliver the provider's answer for `ticket`.
    ///
    /// Provider failures are logged and treated as an empty result. Returns
    /// whether the list was replaced.
    pub fn apply_response(
        &mut self,
        ticket: QueryTicket,
        response: Result<Vec<GeoResult>, ProviderError>,
    ) -> bool {
        let results = response.unwrap_or_else(|err| {
            warn!("geocode query failed: {err}");
            Vec::new()
        });
        let active = self.input.active();
        let accepted = self.candidates.accept_response(
            ticket,
            results,
            active,
            self.input.text(ticket.field),
        );
        if !accepted {
            debug!("discarding stale {:?} response #{}", ticket.field, ticket.seq);
        }
        accepted
    }
}
