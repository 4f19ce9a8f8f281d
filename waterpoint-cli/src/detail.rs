//! `show` and `map-link` commands: the detail screen and its map button.

use std::io::Write;

use camino::Utf8PathBuf;
use chrono::{DateTime, Utc};
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use waterpoint_core::{Clock, MapLink, Platform, Storage, WaterPoint, WaterPointId, WaterPointStore};

use crate::{
    ARG_DATA_DIR, CliError, ENV_MAP_LINK_ID, ENV_SHOW_ID, now, open_store, render,
    require_id, resolve_data_dir,
};

/// CLI arguments for the `show` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(name = "show", about = "Show one water point")]
#[ortho_config(prefix = "WATERPOINT")]
pub(crate) struct ShowArgs {
    /// Identifier of the water point.
    #[arg(value_name = "id")]
    #[serde(default)]
    pub(crate) id: Option<String>,
    /// Directory holding the water point collection.
    #[arg(long = ARG_DATA_DIR, value_name = "dir")]
    #[serde(default)]
    pub(crate) data_dir: Option<Utf8PathBuf>,
}

impl ShowArgs {
    pub(crate) fn into_config(self) -> Result<ShowConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ShowConfig::try_from(merged)
    }
}

/// Resolved `show` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ShowConfig {
    pub(crate) data_dir: Utf8PathBuf,
    pub(crate) id: WaterPointId,
}

impl TryFrom<ShowArgs> for ShowConfig {
    type Error = CliError;

    fn try_from(args: ShowArgs) -> Result<Self, Self::Error> {
        Ok(Self {
            id: require_id(args.id, ENV_SHOW_ID)?,
            data_dir: resolve_data_dir(args.data_dir)?,
        })
    }
}

/// CLI arguments for the `map-link` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "map-link",
    long_about = "Print the deep link that opens a water point in the \
                 platform's map application, followed by a browser link \
                 to use when no map application is installed.",
    about = "Print map links for a water point"
)]
#[ortho_config(prefix = "WATERPOINT")]
pub(crate) struct MapLinkArgs {
    /// Identifier of the water point.
    #[arg(value_name = "id")]
    #[serde(default)]
    pub(crate) id: Option<String>,
    /// Directory holding the water point collection.
    #[arg(long = ARG_DATA_DIR, value_name = "dir")]
    #[serde(default)]
    pub(crate) data_dir: Option<Utf8PathBuf>,
    /// Target platform: ios, android or web.
    #[arg(long, value_name = "platform")]
    #[serde(default)]
    pub(crate) platform: Option<Platform>,
}

impl MapLinkArgs {
    pub(crate) fn into_config(self) -> Result<MapLinkConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        MapLinkConfig::try_from(merged)
    }
}

/// Resolved `map-link` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MapLinkConfig {
    pub(crate) data_dir: Utf8PathBuf,
    pub(crate) id: WaterPointId,
    pub(crate) platform: Platform,
}

impl TryFrom<MapLinkArgs> for MapLinkConfig {
    type Error = CliError;

    fn try_from(args: MapLinkArgs) -> Result<Self, Self::Error> {
        Ok(Self {
            id: require_id(args.id, ENV_MAP_LINK_ID)?,
            data_dir: resolve_data_dir(args.data_dir)?,
            platform: args.platform.unwrap_or_default(),
        })
    }
}

pub(crate) fn run_show(args: ShowArgs, out: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    execute_show(&config, &open_store(&config.data_dir), now(), out)
}

pub(crate) fn execute_show<S: Storage, C: Clock>(
    config: &ShowConfig,
    store: &WaterPointStore<S, C>,
    now: DateTime<Utc>,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let point = find(store, &config.id)?;
    render::write_detail(out, &point, now)?;
    Ok(())
}

pub(crate) fn run_map_link(args: MapLinkArgs, out: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    execute_map_link(&config, &open_store(&config.data_dir), out)
}

pub(crate) fn execute_map_link<S: Storage, C: Clock>(
    config: &MapLinkConfig,
    store: &WaterPointStore<S, C>,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let point = find(store, &config.id)?;
    render::write_map_link(out, &MapLink::for_point(&point, config.platform))?;
    Ok(())
}

/// Look up `id`, turning a miss into [`CliError::NotFound`].
pub(crate) fn find<S: Storage, C: Clock>(
    store: &WaterPointStore<S, C>,
    id: &WaterPointId,
) -> Result<WaterPoint, CliError> {
    store
        .find_by_id(id)
        .ok_or_else(|| CliError::NotFound { id: id.clone() })
}
