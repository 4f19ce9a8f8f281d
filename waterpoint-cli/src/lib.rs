//! Command-line front end for the water point registry.
//!
//! Each subcommand stands in for one screen of the mobile application: it
//! resolves its options, checks user input, calls the store, and renders the
//! result as text on the supplied writer.
#![forbid(unsafe_code)]

use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use waterpoint_core::{
    Clock, FileStorage, FixedLocation, Location, LocationProvider, SystemClock, WaterPointId,
    WaterPointStore,
};

mod browse;
mod detail;
mod edit;
mod error;
mod feedback;
mod render;

pub use error::CliError;

use browse::ListArgs;
use detail::{MapLinkArgs, ShowArgs};
use edit::{AddArgs, DeleteArgs, UpdateArgs};
use feedback::{RateArgs, ReportArgs};

pub(crate) const ARG_DATA_DIR: &str = "data-dir";
pub(crate) const ARG_ID: &str = "id";
pub(crate) const ARG_NAME: &str = "name";
pub(crate) const ARG_DISTRICT: &str = "district";
pub(crate) const ARG_PRICE: &str = "price";
pub(crate) const ARG_DESCRIPTION: &str = "description";
pub(crate) const ARG_STARS: &str = "stars";
pub(crate) const ENV_SHOW_ID: &str = "WATERPOINT_CMDS_SHOW_ID";
pub(crate) const ENV_UPDATE_ID: &str = "WATERPOINT_CMDS_UPDATE_ID";
pub(crate) const ENV_DELETE_ID: &str = "WATERPOINT_CMDS_DELETE_ID";
pub(crate) const ENV_REPORT_ID: &str = "WATERPOINT_CMDS_REPORT_ID";
pub(crate) const ENV_RATE_ID: &str = "WATERPOINT_CMDS_RATE_ID";
pub(crate) const ENV_MAP_LINK_ID: &str = "WATERPOINT_CMDS_MAP_LINK_ID";
pub(crate) const ENV_ADD_NAME: &str = "WATERPOINT_CMDS_ADD_NAME";
pub(crate) const ENV_ADD_DISTRICT: &str = "WATERPOINT_CMDS_ADD_DISTRICT";
pub(crate) const ENV_ADD_PRICE: &str = "WATERPOINT_CMDS_ADD_PRICE";
pub(crate) const ENV_REPORT_DESCRIPTION: &str = "WATERPOINT_CMDS_REPORT_DESCRIPTION";
pub(crate) const ENV_RATE_STARS: &str = "WATERPOINT_CMDS_RATE_STARS";

/// Data directory used when none is configured.
pub const DEFAULT_DATA_DIR: &str = "waterpoint-data";

/// Store type every command runs against in production.
pub(crate) type FileStore = WaterPointStore<FileStorage, SystemClock>;

/// Run the CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let mut stdout = std::io::stdout().lock();
    dispatch(cli.command, &mut stdout)
}

fn dispatch(command: Command, out: &mut dyn Write) -> Result<(), CliError> {
    match command {
        Command::List(args) => browse::run_list(args, out),
        Command::Add(args) => edit::run_add(args, out),
        Command::Show(args) => detail::run_show(args, out),
        Command::Update(args) => edit::run_update(args, out),
        Command::Delete(args) => edit::run_delete(args, out),
        Command::Report(args) => feedback::run_report(args, out),
        Command::Rate(args) => feedback::run_rate(args, out),
        Command::MapLink(args) => detail::run_map_link(args, out),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "waterpoint",
    about = "Find, add, rate and report community water points",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List water points, optionally filtered or sorted.
    List(ListArgs),
    /// Register a new water point.
    Add(AddArgs),
    /// Show one water point with its recent reports.
    Show(ShowArgs),
    /// Edit fields of a water point.
    Update(UpdateArgs),
    /// Remove a water point permanently.
    Delete(DeleteArgs),
    /// Report a problem at a water point.
    Report(ReportArgs),
    /// Rate a water point from 1 to 5 stars.
    Rate(RateArgs),
    /// Print links that open a water point in a map application.
    MapLink(MapLinkArgs),
}

/// Resolve the configured data directory, falling back to the default, and
/// reject paths that exist but are not directories.
pub(crate) fn resolve_data_dir(configured: Option<Utf8PathBuf>) -> Result<Utf8PathBuf, CliError> {
    let data_dir = configured.unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_DATA_DIR));
    check_data_dir(&data_dir)?;
    Ok(data_dir)
}

fn check_data_dir(path: &Utf8Path) -> Result<(), CliError> {
    let inspect = |source| CliError::InspectDataDir {
        path: path.to_path_buf(),
        source,
    };
    let exists = waterpoint_fs::path_exists(path).map_err(inspect)?;
    if exists && !waterpoint_fs::dir_exists(path).map_err(inspect)? {
        return Err(CliError::DataDirNotDirectory {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

pub(crate) fn open_store(data_dir: &Utf8Path) -> FileStore {
    WaterPointStore::new(FileStorage::new(data_dir))
}

pub(crate) fn now() -> DateTime<Utc> {
    SystemClock.now()
}

/// Turn the positional id into a [`WaterPointId`], naming `env` when absent.
pub(crate) fn require_id(id: Option<String>, env: &'static str) -> Result<WaterPointId, CliError> {
    id.map(WaterPointId::from).ok_or(CliError::MissingArgument { field: ARG_ID, env })
}

/// Combine optional coordinates into a location; both or neither must be set.
pub(crate) fn resolve_location(
    latitude: Option<f64>,
    longitude: Option<f64>,
) -> Result<Option<Location>, CliError> {
    match (latitude, longitude) {
        (Some(lat), Some(lon)) => Ok(Some(Location::checked(lat, lon)?)),
        (None, None) => Ok(None),
        _ => Err(CliError::IncompleteLocation),
    }
}

/// The device location collaborator for coordinates given on the command line.
///
/// `None` means the user has not shared a position, so nothing is asked.
pub(crate) fn location_provider(location: Option<Location>) -> Option<Box<dyn LocationProvider>> {
    location.map(|here| Box::new(FixedLocation(here)) as Box<dyn LocationProvider>)
}

#[cfg(test)]
mod tests;
