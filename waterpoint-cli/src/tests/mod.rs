//! Shared test harness modules for the water point CLI.
#![expect(
    clippy::panic,
    reason = "Tests assert panic branches to surface unexpected CLI outcomes"
)]

use super::*;

mod command_unit;
mod config_unit;
mod helpers;
