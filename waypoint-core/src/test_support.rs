//! Test utilities for geocoding collaborators.
//!
//! [`StubGeocoder`] and [`StubReverseGeocoder`] answer from pre-configured
//! tables without touching the network. Clones share their request logs, so a
//! test can hand one clone to a [`crate::RoutePlanner`] and inspect the other.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use async_trait::async_trait;

use crate::{
    CoordinatePair, GeoKind, GeoResult, GeocodeQuery, Geocoder, ProviderError,
    ReverseGeocodeResult, ReverseGeocoder,
};

/// Build a geo-result at `longitude` on a fixed latitude.
#[must_use]
pub fn geo_result(name: &str, address: &str, kind: GeoKind, longitude: f64) -> GeoResult {
    GeoResult {
        pos: CoordinatePair::new(longitude, 55.7),
        name: name.to_owned(),
        address: address.to_owned(),
        kind,
        parent: None,
    }
}

/// Stub [`Geocoder`] keyed by the full query text.
///
/// Unknown queries match nothing.
///
/// # Example
///
/// ```
/// use waypoint_core::test_support::{StubGeocoder, geo_result};
/// use waypoint_core::{GeoKind, GeocodeQuery, Geocoder};
///
/// # futures_util::FutureExt::now_or_never(async {
/// let geocoder = StubGeocoder::default().with_results(
///     "Russia, Moscow Tverskaya",
///     vec![geo_result("Tverskaya", "Russia, Moscow, Tverskaya", GeoKind::Street, 37.6)],
/// );
/// let query = GeocodeQuery::new("Tverskaya", 10).with_scope("Russia, Moscow");
/// let results = geocoder.geocode(&query).await.expect("stubbed");
/// assert_eq!(results.len(), 1);
/// assert_eq!(geocoder.queries(), [query]);
/// # });
/// ```
#[derive(Debug, Clone, Default)]
pub struct StubGeocoder {
    responses: HashMap<String, Result<Vec<GeoResult>, ProviderError>>,
    queries: Rc<RefCell<Vec<GeocodeQuery>>>,
}

impl StubGeocoder {
    /// Answer `full_text` with `results`.
    #[must_use]
    pub fn with_results(mut self, full_text: impl Into<String>, results: Vec<GeoResult>) -> Self {
        self.responses.insert(full_text.into(), Ok(results));
        self
    }

    /// Answer `full_text` with `error`.
    #[must_use]
    pub fn with_error(mut self, full_text: impl Into<String>, error: ProviderError) -> Self {
        self.responses.insert(full_text.into(), Err(error));
        self
    }

    /// Queries received so far, in order.
    #[must_use]
    pub fn queries(&self) -> Vec<GeocodeQuery> {
        self.queries.borrow().clone()
    }
}

#[async_trait(?Send)]
impl Geocoder for StubGeocoder {
    async fn geocode(&self, query: &GeocodeQuery) -> Result<Vec<GeoResult>, ProviderError> {
        self.queries.borrow_mut().push(query.clone());
        self.responses
            .get(&query.full_text())
            .cloned()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

/// Stub [`ReverseGeocoder`] returning one configured answer for every
/// position.
///
/// The default answers [`ProviderError::NoResult`].
#[derive(Debug, Clone, Default)]
pub struct StubReverseGeocoder {
    response: Option<Result<ReverseGeocodeResult, ProviderError>>,
    positions: Rc<RefCell<Vec<CoordinatePair>>>,
}

impl StubReverseGeocoder {
    /// Answer every lookup with `result`.
    #[must_use]
    pub fn with_result(mut self, result: ReverseGeocodeResult) -> Self {
        self.response = Some(Ok(result));
        self
    }

    /// Fail every lookup with `error`.
    #[must_use]
    pub fn with_error(mut self, error: ProviderError) -> Self {
        self.response = Some(Err(error));
        self
    }

    /// Positions looked up so far, in order.
    #[must_use]
    pub fn positions(&self) -> Vec<CoordinatePair> {
        self.positions.borrow().clone()
    }
}

#[async_trait(?Send)]
impl ReverseGeocoder for StubReverseGeocoder {
    async fn reverse_geocode(
        &self,
        position: CoordinatePair,
    ) -> Result<ReverseGeocodeResult, ProviderError> {
        self.positions.borrow_mut().push(position);
        self.response.clone().unwrap_or_else(|| {
            Err(ProviderError::NoResult {
                position: position.to_provider_string(),
            })
        })
    }
}
