//! Geocoder traits and the request/response shapes they exchange.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::CoordinatePair;

use super::error::ProviderError;

/// Provider classification of a geo-result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeoKind {
    /// A single building.
    House,
    /// A street.
    Street,
    /// A metro station.
    Metro,
    /// A city district.
    District,
    /// A city, town or village.
    Locality,
    /// A regional subdivision.
    Area,
    /// A province or state.
    Province,
    /// A country.
    Country,
    /// Anything the engine does not distinguish.
    #[serde(other)]
    Other,
}

/// One provider suggestion for a query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoResult {
    /// Position of the object.
    pub pos: CoordinatePair,
    /// Short display name, e.g. `"Tverskaya Street, 7"`.
    pub name: String,
    /// Full formatted address.
    pub address: String,
    /// Provider classification.
    pub kind: GeoKind,
    /// Optional parent description, e.g. `"Moscow, Russia"`.
    pub parent: Option<String>,
}

/// A scoped text query.
///
/// # Examples
/// ```
/// use waypoint_core::GeocodeQuery;
///
/// let query = GeocodeQuery::new("Tverskaya 7", 10).with_scope("Russia, Moscow");
/// assert_eq!(query.full_text(), "Russia, Moscow Tverskaya 7");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeocodeQuery {
    /// Raw text typed by the user.
    pub text: String,
    /// Number of results to request from the provider.
    pub results: u16,
    /// Address prefixed to the text, normally the default city.
    pub scope: Option<String>,
}

impl GeocodeQuery {
    /// Construct an unscoped query.
    pub fn new(text: impl Into<String>, results: u16) -> Self {
        Self {
            text: text.into(),
            results,
            scope: None,
        }
    }

    /// Prefix the query with `scope`.
    #[must_use]
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// The text sent to the provider, scope first.
    #[must_use]
    pub fn full_text(&self) -> String {
        match &self.scope {
            Some(scope) => format!("{scope} {}", self.text),
            None => self.text.clone(),
        }
    }
}

/// Best match for a reverse lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReverseGeocodeResult {
    /// Country name.
    pub country: String,
    /// Address line without the country.
    pub address_line: String,
}

impl ReverseGeocodeResult {
    /// The waypoint address for this result: `"<country>, <address line>"`.
    ///
    /// # Examples
    /// ```
    /// use waypoint_core::ReverseGeocodeResult;
    ///
    /// let result = ReverseGeocodeResult {
    ///     country: "Russia".into(),
    ///     address_line: "some address".into(),
    /// };
    /// assert_eq!(result.display_address(), "Russia, some address");
    /// ```
    #[must_use]
    pub fn display_address(&self) -> String {
        if self.country.is_empty() {
            self.address_line.clone()
        } else {
            format!("{}, {}", self.country, self.address_line)
        }
    }
}

/// Resolve free-text queries into candidate geo-results.
///
/// # Examples
///
/// ```rust
/// use async_trait::async_trait;
/// use waypoint_core::{
///     CoordinatePair, GeoKind, GeoResult, GeocodeQuery, Geocoder, ProviderError,
/// };
///
/// struct Fixed;
///
/// #[async_trait(?Send)]
/// impl Geocoder for Fixed {
///     async fn geocode(&self, query: &GeocodeQuery) -> Result<Vec<GeoResult>, ProviderError> {
///         Ok(vec![GeoResult {
///             pos: CoordinatePair::new(37.6, 55.7),
///             name: query.text.clone(),
///             address: query.full_text(),
///             kind: GeoKind::Street,
///             parent: None,
///         }])
///     }
/// }
/// ```
#[async_trait(?Send)]
pub trait Geocoder {
    /// Return provider results for `query`, in provider order.
    async fn geocode(&self, query: &GeocodeQuery) -> Result<Vec<GeoResult>, ProviderError>;
}

/// Resolve a position into its best-matching address.
#[async_trait(?Send)]
pub trait ReverseGeocoder {
    /// Return the best match at `position`.
    ///
    /// Implementations return [`ProviderError::NoResult`] when nothing is
    /// found.
    async fn reverse_geocode(
        &self,
        position: CoordinatePair,
    ) -> Result<ReverseGeocodeResult, ProviderError>;
}
