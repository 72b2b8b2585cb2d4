//! Command-line interface for the waypoint engine.
//!
//! Three subcommands share one HTTP geocoder configuration:
//!
//! - `suggest` runs a single address or city query and prints the candidate
//!   list the address bar would show.
//! - `reverse` resolves a position into the address a dragged marker would
//!   receive.
//! - `replay` feeds a JSON script of UI events through a full session and
//!   prints the resulting route and map frame.
#![forbid(unsafe_code)]

use std::io::Write;

use clap::{Parser, Subcommand};
use serde::Serialize;

mod error;
mod geocoder;
mod lookup;
mod replay;

pub use error::CliError;

use geocoder::HttpGeocoderBuilder;
use lookup::{ReverseArgs, SuggestArgs};
use replay::ReplayArgs;

/// Run the waypoint CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns a [`CliError`] when arguments or configuration are invalid, the
/// geocoder fails, or output cannot be written.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse()?;
    let mut stdout = std::io::stdout().lock();
    let builder = HttpGeocoderBuilder;
    match cli.command {
        Command::Suggest(args) => lookup::run_suggest_with(args, &builder, &mut stdout),
        Command::Reverse(args) => lookup::run_reverse_with(args, &builder, &mut stdout),
        Command::Replay(args) => replay::run_replay_with(args, &builder, &mut stdout),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "waypoint",
    about = "Resolve addresses and replay route-building sessions",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show the suggestions offered for a query.
    Suggest(SuggestArgs),
    /// Resolve a position into an address.
    Reverse(ReverseArgs),
    /// Replay a recorded session of UI events.
    Replay(ReplayArgs),
}

/// Write `value` as pretty JSON followed by a newline.
fn write_json<T: Serialize>(writer: &mut dyn Write, value: &T) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerialiseOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
mod tests;
