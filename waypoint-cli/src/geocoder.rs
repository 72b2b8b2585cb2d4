//! Geocoder wiring shared by every subcommand.

use std::future::Future;
use std::time::Duration;

use waypoint_core::{Geocoder, ReverseGeocoder};
use waypoint_data::{HttpGeocoder, HttpGeocoderConfig};

use crate::CliError;

pub(crate) const ARG_BASE_URL: &str = "base-url";
pub(crate) const ARG_API_KEY: &str = "api-key";
pub(crate) const ARG_LANGUAGE: &str = "language";
pub(crate) const ARG_TIMEOUT_SECS: &str = "timeout-secs";

/// Geocoder settings after configuration merging; unset fields keep the
/// [`HttpGeocoderConfig`] defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct GeocoderOptions {
    pub(crate) base_url: Option<String>,
    pub(crate) api_key: Option<String>,
    pub(crate) language: Option<String>,
    pub(crate) timeout_secs: Option<u64>,
}

impl GeocoderOptions {
    pub(crate) fn into_config(self) -> HttpGeocoderConfig {
        let mut config = self
            .base_url
            .map_or_else(HttpGeocoderConfig::default, HttpGeocoderConfig::new);
        if let Some(key) = self.api_key {
            config = config.with_api_key(key);
        }
        if let Some(language) = self.language {
            config = config.with_language(language);
        }
        if let Some(secs) = self.timeout_secs {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        config
    }
}

/// Builds the geocoding collaborators for one invocation.
pub(crate) trait GeocoderBuilder {
    type Forward: Geocoder + 'static;
    type Reverse: ReverseGeocoder + 'static;

    fn build(
        &self,
        config: &HttpGeocoderConfig,
    ) -> Result<(Self::Forward, Self::Reverse), CliError>;
}

pub(crate) struct HttpGeocoderBuilder;

impl GeocoderBuilder for HttpGeocoderBuilder {
    type Forward = HttpGeocoder;
    type Reverse = HttpGeocoder;

    fn build(
        &self,
        config: &HttpGeocoderConfig,
    ) -> Result<(Self::Forward, Self::Reverse), CliError> {
        let geocoder = HttpGeocoder::with_config(config.clone()).map_err(|source| {
            CliError::BuildGeocoder {
                base_url: config.base_url.clone(),
                source,
            }
        })?;
        Ok((geocoder.clone(), geocoder))
    }
}

/// Drive `future` to completion on a fresh single-threaded runtime.
pub(crate) fn block_on<F: Future>(future: F) -> Result<F::Output, CliError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(CliError::Runtime)?;
    Ok(runtime.block_on(future))
}
