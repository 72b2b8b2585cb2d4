//! One-shot `suggest` and `reverse` commands.

use std::io::Write;

use clap::Parser;
use log::debug;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use waypoint_core::{
    ActiveField, Candidate, CandidateListController, CoordinatePair, EngineConfig, Geocoder,
    ReverseGeocoder,
};
use waypoint_data::HttpGeocoderConfig;

use crate::geocoder::{
    ARG_API_KEY, ARG_BASE_URL, ARG_LANGUAGE, ARG_TIMEOUT_SECS, GeocoderBuilder, GeocoderOptions,
    block_on,
};
use crate::{CliError, write_json};

pub(crate) const ARG_SUGGEST_QUERY: &str = "query";
pub(crate) const ENV_SUGGEST_QUERY: &str = "WAYPOINT_CMDS_SUGGEST_QUERY";
pub(crate) const ARG_REVERSE_LAT: &str = "lat";
pub(crate) const ENV_REVERSE_LAT: &str = "WAYPOINT_CMDS_REVERSE_LAT";
pub(crate) const ARG_REVERSE_LON: &str = "lon";
pub(crate) const ENV_REVERSE_LON: &str = "WAYPOINT_CMDS_REVERSE_LON";

/// CLI arguments for the `suggest` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Send one query to the geocoder and print the suggestion \
                 list exactly as the address bar would show it: city \
                 queries keep only localities and provinces, and every list \
                 is truncated to ten entries.",
    about = "Show the suggestions offered for a query"
)]
#[ortho_config(prefix = "WAYPOINT")]
pub(crate) struct SuggestArgs {
    /// Text typed into the field.
    #[arg(value_name = "text")]
    #[serde(default)]
    pub(crate) query: Option<String>,
    /// Suggest default cities instead of addresses.
    #[arg(long)]
    #[serde(default)]
    pub(crate) city: bool,
    /// Default city address prefixed to address queries.
    #[arg(long, value_name = "address")]
    #[serde(default)]
    pub(crate) scope: Option<String>,
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

/// Resolved `suggest` configuration.
#[derive(Debug, Clone)]
pub(crate) struct SuggestConfig {
    pub(crate) query: String,
    pub(crate) field: ActiveField,
    pub(crate) scope: Option<String>,
    pub(crate) geocoder: HttpGeocoderConfig,
}

impl SuggestArgs {
    pub(crate) fn into_config(self) -> Result<SuggestConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        SuggestConfig::try_from(merged)
    }
}

impl TryFrom<SuggestArgs> for SuggestConfig {
    type Error = CliError;

    fn try_from(args: SuggestArgs) -> Result<Self, Self::Error> {
        let query = args
            .query
            .filter(|text| !text.is_empty())
            .ok_or(CliError::MissingArgument {
                field: ARG_SUGGEST_QUERY,
                env: ENV_SUGGEST_QUERY,
            })?;
        let field = if args.city {
            ActiveField::City
        } else {
            ActiveField::Address
        };
        let options = GeocoderOptions {
            base_url: args.base_url,
            api_key: args.api_key,
            language: args.language,
            timeout_secs: args.timeout_secs,
        };
        Ok(Self {
            query,
            field,
            scope: args.scope,
            geocoder: options.into_config(),
        })
    }
}

/// CLI arguments for the `reverse` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Resolve a position into the address a marker dropped \
                 there would receive.",
    about = "Resolve a position into an address"
)]
#[ortho_config(prefix = "WAYPOINT")]
pub(crate) struct ReverseArgs {
    /// Latitude in degrees.
    #[arg(long = ARG_REVERSE_LAT, value_name = "deg", allow_hyphen_values = true)]
    #[serde(default)]
    pub(crate) lat: Option<f64>,
    /// Longitude in degrees.
    #[arg(long = ARG_REVERSE_LON, value_name = "deg", allow_hyphen_values = true)]
    #[serde(default)]
    pub(crate) lon: Option<f64>,
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

/// Resolved `reverse` configuration.
#[derive(Debug, Clone)]
pub(crate) struct ReverseConfig {
    pub(crate) position: CoordinatePair,
    pub(crate) geocoder: HttpGeocoderConfig,
}

impl ReverseArgs {
    pub(crate) fn into_config(self) -> Result<ReverseConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ReverseConfig::try_from(merged)
    }
}

impl TryFrom<ReverseArgs> for ReverseConfig {
    type Error = CliError;

    fn try_from(args: ReverseArgs) -> Result<Self, Self::Error> {
        let lat = args.lat.ok_or(CliError::MissingArgument {
            field: ARG_REVERSE_LAT,
            env: ENV_REVERSE_LAT,
        })?;
        let lon = args.lon.ok_or(CliError::MissingArgument {
            field: ARG_REVERSE_LON,
            env: ENV_REVERSE_LON,
        })?;
        let options = GeocoderOptions {
            base_url: args.base_url,
            api_key: args.api_key,
            language: args.language,
            timeout_secs: args.timeout_secs,
        };
        Ok(Self {
            position: CoordinatePair::from_lat_lon([lat, lon]),
            geocoder: options.into_config(),
        })
    }
}

/// Output of the `reverse` command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct ReverseOutput {
    pub(crate) country: String,
    pub(crate) address_line: String,
    /// The address a relocated waypoint would carry.
    pub(crate) address: String,
}

pub(crate) fn run_suggest_with<B: GeocoderBuilder>(
    args: SuggestArgs,
    builder: &B,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let candidates = execute_suggest(&config, builder)?;
    write_json(writer, &candidates)
}

/// Query the geocoder and shape the answer through the candidate list.
pub(crate) fn execute_suggest<B: GeocoderBuilder>(
    config: &SuggestConfig,
    builder: &B,
) -> Result<Vec<Candidate>, CliError> {
    let (geocoder, _) = builder.build(&config.geocoder)?;
    let mut controller = CandidateListController::new(&EngineConfig::default());
    let (ticket, mut query) = controller.issue_query(config.field, &config.query, None);
    if let (ActiveField::Address, Some(scope)) = (config.field, &config.scope) {
        query = query.with_scope(scope.clone());
    }
    debug!("suggest query {:?}", query.full_text());
    let results = block_on(geocoder.geocode(&query))?.map_err(CliError::Geocode)?;
    controller.accept_response(ticket, results, config.field, &config.query);
    Ok(controller.list().entries().to_vec())
}

pub(crate) fn run_reverse_with<B: GeocoderBuilder>(
    args: ReverseArgs,
    builder: &B,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let output = execute_reverse(&config, builder)?;
    write_json(writer, &output)
}

pub(crate) fn execute_reverse<B: GeocoderBuilder>(
    config: &ReverseConfig,
    builder: &B,
) -> Result<ReverseOutput, CliError> {
    let (_, reverse) = builder.build(&config.geocoder)?;
    let found = block_on(reverse.reverse_geocode(config.position))?.map_err(CliError::Geocode)?;
    Ok(ReverseOutput {
        address: found.display_address(),
        country: found.country,
        address_line: found.address_line,
    })
}

#[cfg(test)]
pub(crate) fn suggest_config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<SuggestConfig, CliError> {
    let merged = SuggestArgs::merge_from_layers(layers).map_err(CliError::from)?;
    SuggestConfig::try_from(merged)
}
