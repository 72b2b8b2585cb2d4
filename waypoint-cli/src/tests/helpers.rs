//! Test helpers: stub geocoder wiring and scratch files.

use super::*;
use camino::Utf8Path;
use waypoint_core::test_support::{StubGeocoder, StubReverseGeocoder};
use waypoint_data::HttpGeocoderConfig;

use crate::geocoder::GeocoderBuilder;

/// Hands out clones of pre-configured stubs, recording the configuration it
/// was asked to build for.
#[derive(Debug, Default)]
pub(super) struct StubGeocoderBuilder {
    pub(super) geocoder: StubGeocoder,
    pub(super) reverse: StubReverseGeocoder,
    pub(super) configs: std::cell::RefCell<Vec<HttpGeocoderConfig>>,
}

impl GeocoderBuilder for StubGeocoderBuilder {
    type Forward = StubGeocoder;
    type Reverse = StubReverseGeocoder;

    fn build(
        &self,
        config: &HttpGeocoderConfig,
    ) -> Result<(Self::Forward, Self::Reverse), CliError> {
        self.configs.borrow_mut().push(config.clone());
        Ok((self.geocoder.clone(), self.reverse.clone()))
    }
}

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path, contents).expect("write test file");
}
