//! Shared test harness modules for the waypoint CLI.

use super::*;

mod helpers;
mod replay_unit;
