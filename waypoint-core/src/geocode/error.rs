use thiserror::Error;

/// Errors from [`crate::Geocoder`] and [`crate::ReverseGeocoder`] requests.
///
/// The engine degrades silently on these: they are logged and the request is
/// treated as having produced no results.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// Network error during the request.
    #[error("network error requesting {url}: {message}")]
    Network {
        /// The URL that was requested.
        url: String,
        /// Description of the network failure.
        message: String,
    },
    /// The request timed out.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// The URL that was requested.
        url: String,
        /// Timeout duration in seconds.
        timeout_secs: u64,
    },
    /// The provider answered with a non-success status.
    #[error("HTTP {status} from {url}: {message}")]
    Http {
        /// The URL that was requested.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error message or response body excerpt.
        message: String,
    },
    /// The response body could not be decoded.
    #[error("failed to parse geocoder response: {message}")]
    Parse {
        /// Description of the parse failure.
        message: String,
    },
    /// A reverse lookup found nothing at the position.
    #[error("no result found at {position}")]
    NoResult {
        /// The position that was looked up, in provider order.
        position: String,
    },
}
