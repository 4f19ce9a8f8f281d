//! `list` command: the home screen as text.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use waterpoint_core::{
    Clock, Location, LocationProvider, PointFilter, Storage, WaterPointStore, apply_filter,
    locate_or_none,
};

use crate::{
    ARG_DATA_DIR, CliError, location_provider, open_store, render, resolve_data_dir,
    resolve_location,
};

/// CLI arguments for the `list` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "list",
    long_about = "List every stored water point. Pass your position with \
                 --latitude and --longitude to see distances and sort by \
                 proximity.",
    about = "List water points"
)]
#[ortho_config(prefix = "WATERPOINT")]
pub(crate) struct ListArgs {
    /// Directory holding the water point collection.
    #[arg(long = ARG_DATA_DIR, value_name = "dir")]
    #[serde(default)]
    pub(crate) data_dir: Option<Utf8PathBuf>,
    /// How to narrow or order the list: all, nearby, cheap or functional.
    #[arg(long, value_name = "filter")]
    #[serde(default)]
    pub(crate) filter: Option<PointFilter>,
    /// Your latitude in decimal degrees.
    #[arg(long, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) latitude: Option<f64>,
    /// Your longitude in decimal degrees.
    #[arg(long, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) longitude: Option<f64>,
    /// Print the collection as JSON instead of text.
    #[arg(long)]
    #[serde(default)]
    pub(crate) json: bool,
}

impl ListArgs {
    pub(crate) fn into_config(self) -> Result<ListConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ListConfig::try_from(merged)
    }
}

/// Resolved `list` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ListConfig {
    pub(crate) data_dir: Utf8PathBuf,
    pub(crate) filter: PointFilter,
    pub(crate) user_location: Option<Location>,
    pub(crate) json: bool,
}

impl TryFrom<ListArgs> for ListConfig {
    type Error = CliError;

    fn try_from(args: ListArgs) -> Result<Self, Self::Error> {
        Ok(Self {
            data_dir: resolve_data_dir(args.data_dir)?,
            filter: args.filter.unwrap_or_default(),
            user_location: resolve_location(args.latitude, args.longitude)?,
            json: args.json,
        })
    }
}

pub(crate) fn run_list(args: ListArgs, out: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let store = open_store(&config.data_dir);
    let provider = location_provider(config.user_location);
    execute_list(&config, &store, provider.as_deref(), out)
}

pub(crate) fn execute_list<S: Storage, C: Clock>(
    config: &ListConfig,
    store: &WaterPointStore<S, C>,
    provider: Option<&dyn LocationProvider>,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let user_location = provider.and_then(locate_or_none);
    let points = apply_filter(&store.list_all(), config.filter, user_location);
    if config.json {
        let payload = serde_json::to_string_pretty(&points).map_err(CliError::SerializeOutput)?;
        writeln!(out, "{payload}")?;
        return Ok(());
    }
    render::write_list(out, &points, user_location)?;
    Ok(())
}
