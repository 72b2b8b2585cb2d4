//! The two text fields of the address bar and their confirmed state.
//!
//! [`InputModeController`] holds the controlled text of the city and address
//! fields, which one is active, the confirmed [`DefaultCity`] and
//! [`PendingAddress`], and the single error message currently on display.

mod keys;

pub use keys::{Key, KeyEvent};

use serde::{Deserialize, Serialize};

use crate::{Candidate, DefaultCity, PendingAddress};

/// Which field the user is driving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActiveField {
    /// The default-city scope field.
    #[default]
    City,
    /// The new-waypoint address field.
    Address,
}

impl ActiveField {
    /// Longest text the user can type into the field, in characters.
    ///
    /// Confirmed selections are stored in full and may exceed it.
    #[must_use]
    pub const fn max_chars(self) -> usize {
        match self {
            Self::City => CITY_MAX_CHARS,
            Self::Address => ADDRESS_MAX_CHARS,
        }
    }
}

/// Typing limit of the city field.
pub const CITY_MAX_CHARS: usize = 60;

/// Typing limit of the address field.
pub const ADDRESS_MAX_CHARS: usize = 150;

/// An error message bound to a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Field the message is displayed against.
    pub field: ActiveField,
    /// Human-readable message.
    pub message: String,
}

/// Field texts, confirmed selections and the error display.
///
/// # Examples
/// ```
/// use waypoint_core::{ActiveField, InputModeController};
///
/// let mut input = InputModeController::default();
/// input.set_text(ActiveField::Address, "Tverskaya");
/// assert_eq!(input.text(ActiveField::Address), "Tverskaya");
/// assert!(input.pending().is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct InputModeController {
    active: ActiveField,
    city_text: String,
    address_text: String,
    default_city: Option<DefaultCity>,
    pending: Option<PendingAddress>,
    error: Option<FieldError>,
}

impl InputModeController {
    /// The field currently driven by the user.
    #[must_use]
    pub const fn active(&self) -> ActiveField {
        self.active
    }

    /// Make `field` the active field.
    pub const fn set_active(&mut self, field: ActiveField) {
        self.active = field;
    }

    /// Current text of `field`.
    #[must_use]
    pub fn text(&self, field: ActiveField) -> &str {
        match field {
            ActiveField::City => &self.city_text,
            ActiveField::Address => &self.address_text,
        }
    }

    /// Replace the text of `field`.
    pub fn set_text(&mut self, field: ActiveField, text: impl Into<String>) {
        *self.text_mut(field) = text.into();
    }

    /// Replace the text of `field` with user input, cut to
    /// [`ActiveField::max_chars`].
    pub fn type_text(&mut self, field: ActiveField, text: &str) {
        let typed: String = text.chars().take(field.max_chars()).collect();
        *self.text_mut(field) = typed;
    }

    fn text_mut(&mut self, field: ActiveField) -> &mut String {
        match field {
            ActiveField::City => &mut self.city_text,
            ActiveField::Address => &mut self.address_text,
        }
    }

    /// The confirmed default city, if any.
    #[must_use]
    pub const fn default_city(&self) -> Option<&DefaultCity> {
        self.default_city.as_ref()
    }

    /// The confirmed but uncommitted address, if any.
    #[must_use]
    pub const fn pending(&self) -> Option<&PendingAddress> {
        self.pending.as_ref()
    }

    /// The error currently on display.
    #[must_use]
    pub const fn error(&self) -> Option<&FieldError> {
        self.error.as_ref()
    }

    /// Display `message` against `field`, replacing any other error.
    pub fn show_error(&mut self, field: ActiveField, message: impl Into<String>) {
        self.error = Some(FieldError {
            field,
            message: message.into(),
        });
    }

    /// Remove whatever error is on display.
    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Remove the error if it is bound to `field`.
    pub fn clear_error_for(&mut self, field: ActiveField) {
        if self.error.as_ref().is_some_and(|error| error.field == field) {
            self.error = None;
        }
    }

    /// The text the address field shows for a place.
    ///
    /// With a default city the city prefix already supplies context, so the
    /// short name is preferred; otherwise the full address is shown.
    #[must_use]
    pub fn display_address<'a>(&self, name: &'a str, address: &'a str) -> &'a str {
        if self.default_city.is_some() {
            name
        } else {
            address
        }
    }

    /// The address field text for the pending address, or `""`.
    #[must_use]
    pub fn pending_display(&self) -> String {
        self.pending
            .as_ref()
            .map(|pending| {
                self.display_address(&pending.name, &pending.address)
                    .to_owned()
            })
            .unwrap_or_default()
    }

    /// Restore `field` to its last confirmed value.
    ///
    /// Does nothing when the field is empty.
    pub fn revert_field(&mut self, field: ActiveField) {
        if self.text(field).is_empty() {
            return;
        }
        let restored = match field {
            ActiveField::City => self
                .default_city
                .as_ref()
                .map(|city| city.address.clone())
                .unwrap_or_default(),
            ActiveField::Address => self.pending_display(),
        };
        self.set_text(field, restored);
    }

    /// Confirm `candidate` as the default city.
    ///
    /// Query scoping changes, so any pending address and the address text are
    /// dropped. The city field becomes active.
    pub fn confirm_city(&mut self, candidate: &Candidate) {
        self.default_city = Some(DefaultCity {
            pos: candidate.pos,
            address: candidate.address.clone(),
        });
        self.pending = None;
        self.address_text.clear();
        self.city_text.clone_from(&candidate.address);
        self.active = ActiveField::City;
        self.clear_error_for(ActiveField::City);
    }

    /// Confirm `candidate` as the pending address.
    pub fn confirm_address(&mut self, candidate: &Candidate) {
        let display = self
            .display_address(&candidate.name, &candidate.address)
            .to_owned();
        self.pending = Some(PendingAddress {
            pos: candidate.pos,
            name: candidate.name.clone(),
            address: candidate.address.clone(),
        });
        self.address_text = display;
        self.active = ActiveField::Address;
        self.clear_error_for(ActiveField::Address);
    }

    /// Forget the default city and empty the city field.
    pub fn reset_default_city(&mut self) {
        self.default_city = None;
        self.city_text.clear();
        self.clear_error_for(ActiveField::City);
    }

    /// Forget the pending address.
    pub fn reset_pending(&mut self) {
        self.pending = None;
        self.clear_error_for(ActiveField::Address);
    }

    /// Clear the pending address and the address text after a commit.
    pub(crate) fn finish_commit(&mut self) {
        self.pending = None;
        self.address_text.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CoordinatePair;
    use rstest::{fixture, rstest};

    fn candidate(name: &str, address: &str) -> Candidate {
        Candidate {
            pos: CoordinatePair::new(13.4, 52.52),
            name: name.to_owned(),
            address: address.to_owned(),
            parent: String::new(),
        }
    }

    #[fixture]
    fn input() -> InputModeController {
        InputModeController::default()
    }

    #[rstest]
    fn address_display_prefers_full_address_without_city(mut input: InputModeController) {
        input.confirm_address(&candidate("Unter den Linden 1", "Germany, Berlin, Unter den Linden 1"));
        assert_eq!(
            input.text(ActiveField::Address),
            "Germany, Berlin, Unter den Linden 1"
        );
    }

    #[rstest]
    fn address_display_prefers_name_with_city(mut input: InputModeController) {
        input.confirm_city(&candidate("Berlin", "Germany, Berlin"));
        input.confirm_address(&candidate("Unter den Linden 1", "Germany, Berlin, Unter den Linden 1"));
        assert_eq!(input.text(ActiveField::Address), "Unter den Linden 1");
    }

    #[rstest]
    fn confirming_city_drops_pending_address(mut input: InputModeController) {
        input.confirm_address(&candidate("Street 1", "Street 1"));
        input.confirm_city(&candidate("Berlin", "Germany, Berlin"));

        assert!(input.pending().is_none());
        assert_eq!(input.text(ActiveField::Address), "");
        assert_eq!(input.text(ActiveField::City), "Germany, Berlin");
        assert_eq!(input.active(), ActiveField::City);
    }

    #[rstest]
    fn revert_restores_city_address(mut input: InputModeController) {
        input.confirm_city(&candidate("Berlin", "Germany, Berlin"));
        input.set_text(ActiveField::City, "Berl");
        input.revert_field(ActiveField::City);
        assert_eq!(input.text(ActiveField::City), "Germany, Berlin");
    }

    #[rstest]
    fn revert_without_confirmation_empties_field(mut input: InputModeController) {
        input.set_text(ActiveField::Address, "Tversk");
        input.revert_field(ActiveField::Address);
        assert_eq!(input.text(ActiveField::Address), "");
    }

    #[rstest]
    fn revert_leaves_empty_field_alone(mut input: InputModeController) {
        input.confirm_city(&candidate("Berlin", "Germany, Berlin"));
        input.set_text(ActiveField::City, "");
        input.revert_field(ActiveField::City);
        assert_eq!(input.text(ActiveField::City), "");
    }

    #[rstest]
    fn typed_text_is_cut_to_field_limit(mut input: InputModeController) {
        input.type_text(ActiveField::City, &"б".repeat(70));
        assert_eq!(input.text(ActiveField::City).chars().count(), CITY_MAX_CHARS);

        input.type_text(ActiveField::Address, &"x".repeat(200));
        assert_eq!(input.text(ActiveField::Address).len(), ADDRESS_MAX_CHARS);

        input.type_text(ActiveField::Address, "Tverskaya 7");
        assert_eq!(input.text(ActiveField::Address), "Tverskaya 7");
    }

    #[rstest]
    fn only_one_error_is_displayed(mut input: InputModeController) {
        input.show_error(ActiveField::City, "first");
        input.show_error(ActiveField::Address, "second");
        let error = input.error().expect("error shown");
        assert_eq!(error.field, ActiveField::Address);
        assert_eq!(error.message, "second");

        input.clear_error_for(ActiveField::City);
        assert!(input.error().is_some());
        input.clear_error_for(ActiveField::Address);
        assert!(input.error().is_none());
    }
}
