//! Entry point for the `waypoint` binary.
#![forbid(unsafe_code)]

use waypoint_cli::CliError;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    match waypoint_cli::run() {
        Ok(()) => {}
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            eprintln!("waypoint: {err}");
            std::process::exit(1);
        }
    }
}
