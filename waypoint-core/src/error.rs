//! User-facing error types raised by the address bar and route store.
//!
//! Provider failures live in [`crate::geocode::ProviderError`]; they are
//! logged and never shown to the user.

use thiserror::Error;

/// User input is incomplete or ambiguous.
///
/// The message is shown next to the field that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The address field is empty.
    #[error("please enter an address")]
    EmptyAddress,
    /// The address field has text but no candidate was ever confirmed.
    #[error("please choose an address from the list")]
    AddressNotChosen,
    /// The city field has text but no city candidate was confirmed.
    #[error("please choose a city from the list")]
    CityNotChosen,
}

/// A waypoint with the same address is already in the route.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("\"{address}\" is already in your route.")]
pub struct ConflictError {
    /// The duplicated address.
    pub address: String,
}

/// Errors from committing the pending address to the route.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommitError {
    /// Nothing usable was selected.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The selected address is already in the route.
    #[error(transparent)]
    Conflict(#[from] ConflictError),
}
