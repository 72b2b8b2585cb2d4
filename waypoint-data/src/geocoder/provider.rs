//! HTTP geocoder speaking the Yandex geocoder protocol.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use thiserror::Error;
use url::Url;
use waypoint_core::{
    CoordinatePair, GeoResult, GeocodeQuery, Geocoder, ProviderError, ReverseGeocodeResult,
    ReverseGeocoder,
};

use super::yandex::{GeoObject, GeocodeEnvelope};

/// Error type for [`HttpGeocoder`] construction failures.
#[derive(Debug, Error)]
pub enum ProviderBuildError {
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// The configured base URL is not a valid absolute URL.
    #[error("invalid geocoder base URL {url:?}: {source}")]
    InvalidBaseUrl {
        /// The rejected URL.
        url: String,
        /// Why it was rejected.
        #[source]
        source: url::ParseError,
    },
}

/// Default geocoder endpoint.
pub const DEFAULT_BASE_URL: &str = "https://geocode-maps.yandex.ru/1.x/";

/// Default user agent for geocoder requests.
pub const DEFAULT_USER_AGENT: &str = "waypoint-geocoder/0.1";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Query parameter carrying the API key; never echoed in errors.
const API_KEY_PARAM: &str = "apikey";

/// Configuration for [`HttpGeocoder`].
#[derive(Debug, Clone)]
pub struct HttpGeocoderConfig {
    /// Geocoder endpoint, e.g. `"https://geocode-maps.yandex.ru/1.x/"`.
    pub base_url: String,
    /// API key sent as `apikey`.
    pub api_key: Option<String>,
    /// Response language sent as `lang`, e.g. `"en_US"`.
    pub language: Option<String>,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for HttpGeocoderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            api_key: None,
            language: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl HttpGeocoderConfig {
    /// Create a new configuration with the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the API key.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the response language.
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Forward and reverse geocoding over HTTP.
///
/// One instance serves both directions and can be shared between them with
/// `Rc` or by cloning; clones share the underlying connection pool.
///
/// # Example
///
/// ```no_run
/// use waypoint_core::{GeocodeQuery, Geocoder};
/// use waypoint_data::{HttpGeocoder, HttpGeocoderConfig};
///
/// # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
/// let geocoder = HttpGeocoder::with_config(
///     HttpGeocoderConfig::default().with_api_key("secret"),
/// )?;
/// let results = geocoder
///     .geocode(&GeocodeQuery::new("Tverskaya 7", 10).with_scope("Russia, Moscow"))
///     .await?;
/// # let _ = results;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpGeocoder {
    client: Client,
    config: HttpGeocoderConfig,
    base: Url,
}

impl HttpGeocoder {
    /// Create a geocoder for `base_url` with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the HTTP client fails to
    /// build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(HttpGeocoderConfig::new(base_url))
    }

    /// Create a geocoder with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the HTTP client fails to
    /// build.
    pub fn with_config(config: HttpGeocoderConfig) -> Result<Self, ProviderBuildError> {
        let base =
            Url::parse(&config.base_url).map_err(|source| ProviderBuildError::InvalidBaseUrl {
                url: config.base_url.clone(),
                source,
            })?;
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(ProviderBuildError::HttpClient)?;
        Ok(Self {
            client,
            config,
            base,
        })
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &HttpGeocoderConfig {
        &self.config
    }

    /// Build the request URL for `geocode` text asking for `results` matches.
    fn request_url(&self, geocode: &str, results: u16) -> Url {
        let mut url = self.base.clone();
        {
            let mut pairs = url.query_pairs_mut();
            if let Some(key) = &self.config.api_key {
                pairs.append_pair(API_KEY_PARAM, key);
            }
            pairs
                .append_pair("format", "json")
                .append_pair("results", &results.to_string());
            if let Some(language) = &self.config.language {
                pairs.append_pair("lang", language);
            }
            pairs.append_pair("geocode", geocode);
        }
        url
    }

    async fn fetch(&self, url: Url) -> Result<GeocodeEnvelope, ProviderError> {
        let shown = redacted(&url);
        debug!("geocoder request {shown}");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, &shown))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(&err, &shown))?;
        let body = response
            .text()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, &shown))?;
        serde_json::from_str(&body).map_err(|err| ProviderError::Parse {
            message: err.to_string(),
        })
    }

    /// Convert a reqwest error to a `ProviderError`.
    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &str) -> ProviderError {
        if error.is_timeout() {
            return ProviderError::Timeout {
                url: url.to_owned(),
                timeout_secs: self.config.timeout.as_secs(),
            };
        }

        if let Some(status) = error.status() {
            return ProviderError::Http {
                url: url.to_owned(),
                status: status.as_u16(),
                message: error.to_string(),
            };
        }

        ProviderError::Network {
            url: url.to_owned(),
            message: error.to_string(),
        }
    }
}

/// Render `url` with the API key removed.
fn redacted(url: &Url) -> String {
    let mut shown = url.clone();
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(name, _)| name != API_KEY_PARAM)
        .map(|(name, value)| (name.into_owned(), value.into_owned()))
        .collect();
    shown.query_pairs_mut().clear().extend_pairs(kept);
    shown.into()
}

#[async_trait(?Send)]
impl Geocoder for HttpGeocoder {
    async fn geocode(&self, query: &GeocodeQuery) -> Result<Vec<GeoResult>, ProviderError> {
        let url = self.request_url(&query.full_text(), query.results);
        Ok(self.fetch(url).await?.into_geo_results())
    }
}

#[async_trait(?Send)]
impl ReverseGeocoder for HttpGeocoder {
    async fn reverse_geocode(
        &self,
        position: CoordinatePair,
    ) -> Result<ReverseGeocodeResult, ProviderError> {
        let geocode = format!("{},{}", position.longitude(), position.latitude());
        let url = self.request_url(&geocode, 1);
        self.fetch(url)
            .await?
            .into_objects()
            .into_iter()
            .next()
            .map(GeoObject::into_reverse_result)
            .ok_or_else(|| ProviderError::NoResult {
                position: position.to_provider_string(),
            })
    }
}
