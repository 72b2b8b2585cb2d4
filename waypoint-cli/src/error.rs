//! Error types emitted by the waypoint CLI.
//!
//! Keep this error type reasonably small, as every command helper returns
//! `Result<_, CliError>`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use thiserror::Error;
use waypoint_core::ProviderError;
use waypoint_core::map::MapError;
use waypoint_data::ProviderBuildError;

/// Errors emitted by the waypoint CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Argument name.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// Constructing the HTTP geocoder failed.
    #[error("failed to build geocoder for {base_url:?}: {source}")]
    BuildGeocoder {
        /// Configured endpoint.
        base_url: String,
        /// Underlying failure.
        #[source]
        source: ProviderBuildError,
    },
    /// Building the async runtime failed.
    #[error("failed to start async runtime: {0}")]
    Runtime(#[source] std::io::Error),
    /// The geocoder request failed.
    #[error("geocoder request failed: {0}")]
    Geocode(#[source] ProviderError),
    /// Opening the replay script failed.
    #[error("failed to open replay script at {path:?}: {source}")]
    OpenScript {
        /// Script path.
        path: Utf8PathBuf,
        /// Underlying failure.
        #[source]
        source: std::io::Error,
    },
    /// The replay script is not a JSON list of UI events.
    #[error("failed to parse replay script JSON at {path:?}: {source}")]
    ParseScript {
        /// Script path.
        path: Utf8PathBuf,
        /// Underlying failure.
        #[source]
        source: serde_json::Error,
    },
    /// Opening the engine configuration file failed.
    #[error("failed to open engine config at {path:?}: {source}")]
    OpenEngineConfig {
        /// Config path.
        path: Utf8PathBuf,
        /// Underlying failure.
        #[source]
        source: std::io::Error,
    },
    /// The engine configuration file is not valid JSON for `EngineConfig`.
    #[error("failed to parse engine config JSON at {path:?}: {source}")]
    ParseEngineConfig {
        /// Config path.
        path: Utf8PathBuf,
        /// Underlying failure.
        #[source]
        source: serde_json::Error,
    },
    /// The map surface never became ready.
    #[error("failed to attach map: {0}")]
    AttachMap(#[source] MapError),
    /// Serialising command output failed.
    #[error("failed to serialise output: {0}")]
    SerialiseOutput(#[source] serde_json::Error),
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
