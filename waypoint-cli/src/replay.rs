//! `replay` command: drive a full session from a recorded event script.

use std::io::{BufReader, Write};

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};
use clap::Parser;
use log::{debug, warn};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use waypoint_core::map::{HeadlessMap, ReadyMap};
use waypoint_core::{
    Candidate, DefaultCity, EngineConfig, FieldError, Geocoder, Notification, PendingAddress,
    ReverseGeocoder, RoutePlanner, UiEvent, Waypoint,
};
use waypoint_data::HttpGeocoderConfig;

use crate::geocoder::{
    ARG_API_KEY, ARG_BASE_URL, ARG_LANGUAGE, ARG_TIMEOUT_SECS, GeocoderBuilder, GeocoderOptions,
    block_on,
};
use crate::{CliError, write_json};

pub(crate) const ARG_REPLAY_SCRIPT: &str = "script";
pub(crate) const ENV_REPLAY_SCRIPT: &str = "WAYPOINT_CMDS_REPLAY_SCRIPT";
pub(crate) const ARG_ENGINE_CONFIG: &str = "engine-config";

/// CLI arguments for the `replay` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Feed a JSON list of UI events through a route-building \
                 session backed by the HTTP geocoder. Every geocoder request \
                 settles before the next event, so the run is \
                 deterministic for a fixed geocoder. Prints the final \
                 route, address bar state and map frame as JSON.",
    about = "Replay a recorded session of UI events"
)]
#[ortho_config(prefix = "WAYPOINT")]
pub(crate) struct ReplayArgs {
    /// Path to a JSON file containing a list of UI events.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) script: Option<Utf8PathBuf>,
    /// JSON file overriding engine settings such as the candidate cap.
    #[arg(long = ARG_ENGINE_CONFIG, value_name = "path")]
    #[serde(default)]
    pub(crate) engine_config: Option<Utf8PathBuf>,
    /// Geocoder endpoint.
    #[arg(long = ARG_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) base_url: Option<String>,
    /// Geocoder API key.
    #[arg(long = ARG_API_KEY, value_name = "key")]
    #[serde(default)]
    pub(crate) api_key: Option<String>,
    /// Response language, e.g. "en_US".
    #[arg(long = ARG_LANGUAGE, value_name = "lang")]
    #[serde(default)]
    pub(crate) language: Option<String>,
    /// Request timeout in seconds.
    #[arg(long = ARG_TIMEOUT_SECS, value_name = "secs")]
    #[serde(default)]
    pub(crate) timeout_secs: Option<u64>,
}

impl ReplayArgs {
    pub(crate) fn into_config(self) -> Result<ReplayConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ReplayConfig::try_from(merged)
    }
}

/// Resolved `replay` configuration.
#[derive(Debug, Clone)]
pub(crate) struct ReplayConfig {
    pub(crate) script: Utf8PathBuf,
    pub(crate) engine_config: Option<Utf8PathBuf>,
    pub(crate) geocoder: HttpGeocoderConfig,
}

impl TryFrom<ReplayArgs> for ReplayConfig {
    type Error = CliError;

    fn try_from(args: ReplayArgs) -> Result<Self, Self::Error> {
        let script = args.script.ok_or(CliError::MissingArgument {
            field: ARG_REPLAY_SCRIPT,
            env: ENV_REPLAY_SCRIPT,
        })?;
        let options = GeocoderOptions {
            base_url: args.base_url,
            api_key: args.api_key,
            language: args.language,
            timeout_secs: args.timeout_secs,
        };
        Ok(Self {
            script,
            engine_config: args.engine_config,
            geocoder: options.into_config(),
        })
    }
}

/// An event the session refused, with the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct RejectedEvent {
    pub(crate) index: usize,
    pub(crate) message: String,
}

/// Session state after the last event.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct ReplayReport {
    pub(crate) route: Vec<Waypoint>,
    pub(crate) default_city: Option<DefaultCity>,
    pub(crate) pending: Option<PendingAddress>,
    pub(crate) field_error: Option<FieldError>,
    pub(crate) candidates: Vec<Candidate>,
    pub(crate) rejected: Vec<RejectedEvent>,
    pub(crate) map: Option<HeadlessMap>,
}

pub(crate) fn run_replay_with<B: GeocoderBuilder>(
    args: ReplayArgs,
    builder: &B,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let events = load_script(&config.script)?;
    let engine = match &config.engine_config {
        Some(path) => load_engine_config(path)?,
        None => EngineConfig::default(),
    };
    let (geocoder, reverse) = builder.build(&config.geocoder)?;
    let report = block_on(replay(geocoder, reverse, &engine, events))??;
    write_json(writer, &report)
}

/// Loads a JSON-encoded list of [`UiEvent`]s from disk.
pub(crate) fn load_script(path: &Utf8Path) -> Result<Vec<UiEvent>, CliError> {
    let file = fs_utf8::File::open_ambient(path, ambient_authority()).map_err(|source| {
        CliError::OpenScript {
            path: path.to_path_buf(),
            source,
        }
    })?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|source| CliError::ParseScript {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads [`EngineConfig`] overrides from a JSON file; absent keys keep
/// their defaults.
pub(crate) fn load_engine_config(path: &Utf8Path) -> Result<EngineConfig, CliError> {
    let file = fs_utf8::File::open_ambient(path, ambient_authority()).map_err(|source| {
        CliError::OpenEngineConfig {
            path: path.to_path_buf(),
            source,
        }
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| {
        CliError::ParseEngineConfig {
            path: path.to_path_buf(),
            source,
        }
    })
}

/// Apply `events` in order, settling every request after each one.
pub(crate) async fn replay<G, R>(
    geocoder: G,
    reverse: R,
    engine: &EngineConfig,
    events: Vec<UiEvent>,
) -> Result<ReplayReport, CliError>
where
    G: Geocoder + 'static,
    R: ReverseGeocoder + 'static,
{
    let mut planner: RoutePlanner<G, R, HeadlessMap> =
        RoutePlanner::new(geocoder, reverse, engine);
    planner
        .attach_map(ReadyMap(HeadlessMap::default()))
        .await
        .map_err(CliError::AttachMap)?;

    let mut rejected = Vec::new();
    for (index, event) in events.into_iter().enumerate() {
        if let Err(err) = planner.handle(event) {
            warn!("event {index} rejected: {err}");
            rejected.push(RejectedEvent {
                index,
                message: err.to_string(),
            });
        }
        planner.settle().await;
        for notification in planner.take_notifications() {
            debug!("event {index}: {notification:?}");
            if let Notification::RelocationRejected(conflict) = notification {
                rejected.push(RejectedEvent {
                    index,
                    message: conflict.to_string(),
                });
            }
        }
    }

    let bar = planner.address_bar();
    Ok(ReplayReport {
        route: planner.route().waypoints().to_vec(),
        default_city: bar.input().default_city().cloned(),
        pending: bar.input().pending().cloned(),
        field_error: bar.input().error().cloned(),
        candidates: bar.candidates().entries().to_vec(),
        rejected,
        map: planner.map().cloned(),
    })
}
