//! `add`, `update` and `delete` commands.

use std::io::Write;

use camino::Utf8PathBuf;
use chrono::{DateTime, Utc};
use clap::Parser;
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use waterpoint_core::validation::{WaterPointDraft, parse_price, require_text};
use waterpoint_core::{
    Clock, LocationProvider, Storage, WaterPointId, WaterPointPatch, WaterPointStatus,
    WaterPointStore, locate_or_none,
};

use crate::{
    ARG_DATA_DIR, ARG_DISTRICT, ARG_NAME, ARG_PRICE, CliError, ENV_ADD_DISTRICT, ENV_ADD_NAME,
    ENV_ADD_PRICE, ENV_DELETE_ID, ENV_UPDATE_ID, location_provider, now, open_store, require_id,
    resolve_data_dir, resolve_location,
};

/// CLI arguments for the `add` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "add",
    long_about = "Register a new water point. The position comes from \
                 --latitude and --longitude; a water point cannot be \
                 added without one.",
    about = "Register a new water point"
)]
#[ortho_config(prefix = "WATERPOINT")]
pub(crate) struct AddArgs {
    /// Directory holding the water point collection.
    #[arg(long = ARG_DATA_DIR, value_name = "dir")]
    #[serde(default)]
    pub(crate) data_dir: Option<Utf8PathBuf>,
    /// Display name.
    #[arg(long = ARG_NAME, value_name = "text")]
    #[serde(default)]
    pub(crate) name: Option<String>,
    /// Neighbourhood the water point is in.
    #[arg(long = ARG_DISTRICT, value_name = "text")]
    #[serde(default)]
    pub(crate) district: Option<String>,
    /// Price of a 20 L container, in FCFA.
    #[arg(long = ARG_PRICE, value_name = "amount")]
    #[serde(default)]
    pub(crate) price: Option<String>,
    /// Initial status: functional, broken, crowded or unknown.
    #[arg(long, value_name = "status")]
    #[serde(default)]
    pub(crate) status: Option<WaterPointStatus>,
    /// Latitude in decimal degrees.
    #[arg(long, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) latitude: Option<f64>,
    /// Longitude in decimal degrees.
    #[arg(long, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) longitude: Option<f64>,
}

impl AddArgs {
    pub(crate) fn into_config(self) -> Result<AddConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        AddConfig::try_from(merged)
    }
}

/// Resolved `add` command configuration.
///
/// The draft is left unchecked here; [`execute_add`] validates it once the
/// location provider has been consulted.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct AddConfig {
    pub(crate) data_dir: Utf8PathBuf,
    pub(crate) draft: WaterPointDraft,
}

impl TryFrom<AddArgs> for AddConfig {
    type Error = CliError;

    fn try_from(args: AddArgs) -> Result<Self, Self::Error> {
        let name = args.name.ok_or(CliError::MissingArgument {
            field: ARG_NAME,
            env: ENV_ADD_NAME,
        })?;
        let district = args.district.ok_or(CliError::MissingArgument {
            field: ARG_DISTRICT,
            env: ENV_ADD_DISTRICT,
        })?;
        let price = args.price.ok_or(CliError::MissingArgument {
            field: ARG_PRICE,
            env: ENV_ADD_PRICE,
        })?;
        Ok(Self {
            data_dir: resolve_data_dir(args.data_dir)?,
            draft: WaterPointDraft {
                name,
                district,
                price,
                status: args.status.unwrap_or_default(),
                location: resolve_location(args.latitude, args.longitude)?,
            },
        })
    }
}

pub(crate) fn run_add(args: AddArgs, out: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let store = open_store(&config.data_dir);
    let provider = location_provider(config.draft.location);
    execute_add(config.draft, &store, provider.as_deref(), now(), out)?;
    Ok(())
}

/// Validate `draft`, taking its position from `provider`, and append it.
pub(crate) fn execute_add<S: Storage, C: Clock>(
    mut draft: WaterPointDraft,
    store: &WaterPointStore<S, C>,
    provider: Option<&dyn LocationProvider>,
    now: DateTime<Utc>,
    out: &mut dyn Write,
) -> Result<WaterPointId, CliError> {
    draft.location = provider.and_then(locate_or_none);
    let point = draft.validate(now)?;
    let id = point.id.clone();
    store.add(point)?;
    info!("added water point {id}");
    writeln!(out, "{id}")?;
    Ok(id)
}

/// CLI arguments for the `update` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "update",
    long_about = "Overwrite selected fields of a water point. Fields that \
                 are not given keep their stored values.",
    about = "Edit a water point"
)]
#[ortho_config(prefix = "WATERPOINT")]
pub(crate) struct UpdateArgs {
    /// Identifier of the water point.
    #[arg(value_name = "id")]
    #[serde(default)]
    pub(crate) id: Option<String>,
    /// Directory holding the water point collection.
    #[arg(long = ARG_DATA_DIR, value_name = "dir")]
    #[serde(default)]
    pub(crate) data_dir: Option<Utf8PathBuf>,
    /// New display name.
    #[arg(long = ARG_NAME, value_name = "text")]
    #[serde(default)]
    pub(crate) name: Option<String>,
    /// New district.
    #[arg(long = ARG_DISTRICT, value_name = "text")]
    #[serde(default)]
    pub(crate) district: Option<String>,
    /// New price of a 20 L container, in FCFA.
    #[arg(long = ARG_PRICE, value_name = "amount")]
    #[serde(default)]
    pub(crate) price: Option<String>,
    /// New status: functional, broken, crowded or unknown.
    #[arg(long, value_name = "status")]
    #[serde(default)]
    pub(crate) status: Option<WaterPointStatus>,
    /// New latitude in decimal degrees.
    #[arg(long, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) latitude: Option<f64>,
    /// New longitude in decimal degrees.
    #[arg(long, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) longitude: Option<f64>,
}

impl UpdateArgs {
    pub(crate) fn into_config(self) -> Result<UpdateConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        UpdateConfig::try_from(merged)
    }
}

/// Resolved `update` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct UpdateConfig {
    pub(crate) data_dir: Utf8PathBuf,
    pub(crate) id: WaterPointId,
    pub(crate) patch: WaterPointPatch,
}

impl TryFrom<UpdateArgs> for UpdateConfig {
    type Error = CliError;

    fn try_from(args: UpdateArgs) -> Result<Self, Self::Error> {
        let id = require_id(args.id, ENV_UPDATE_ID)?;
        let patch = WaterPointPatch {
            name: args
                .name
                .map(|name| require_text(ARG_NAME, &name))
                .transpose()?,
            district: args
                .district
                .map(|district| require_text(ARG_DISTRICT, &district))
                .transpose()?,
            price: args.price.map(|price| parse_price(&price)).transpose()?,
            status: args.status,
            location: resolve_location(args.latitude, args.longitude)?,
            ..WaterPointPatch::default()
        };
        if patch.is_empty() {
            return Err(CliError::EmptyUpdate);
        }
        Ok(Self {
            data_dir: resolve_data_dir(args.data_dir)?,
            id,
            patch,
        })
    }
}

pub(crate) fn run_update(args: UpdateArgs, out: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    execute_update(config.id, config.patch, &open_store(&config.data_dir), out)
}

pub(crate) fn execute_update<S: Storage, C: Clock>(
    id: WaterPointId,
    patch: WaterPointPatch,
    store: &WaterPointStore<S, C>,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    store.update_by_id(&id, patch)?;
    writeln!(out, "Updated {id}")?;
    Ok(())
}

/// CLI arguments for the `delete` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(name = "delete", about = "Remove a water point permanently")]
#[ortho_config(prefix = "WATERPOINT")]
pub(crate) struct DeleteArgs {
    /// Identifier of the water point.
    #[arg(value_name = "id")]
    #[serde(default)]
    pub(crate) id: Option<String>,
    /// Directory holding the water point collection.
    #[arg(long = ARG_DATA_DIR, value_name = "dir")]
    #[serde(default)]
    pub(crate) data_dir: Option<Utf8PathBuf>,
}

impl DeleteArgs {
    pub(crate) fn into_config(self) -> Result<DeleteConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        DeleteConfig::try_from(merged)
    }
}

/// Resolved `delete` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DeleteConfig {
    pub(crate) data_dir: Utf8PathBuf,
    pub(crate) id: WaterPointId,
}

impl TryFrom<DeleteArgs> for DeleteConfig {
    type Error = CliError;

    fn try_from(args: DeleteArgs) -> Result<Self, Self::Error> {
        Ok(Self {
            id: require_id(args.id, ENV_DELETE_ID)?,
            data_dir: resolve_data_dir(args.data_dir)?,
        })
    }
}

pub(crate) fn run_delete(args: DeleteArgs, out: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    execute_delete(&config.id, &open_store(&config.data_dir), out)
}

/// Delete `id`; a missing record is not an error.
pub(crate) fn execute_delete<S: Storage, C: Clock>(
    id: &WaterPointId,
    store: &WaterPointStore<S, C>,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    store.delete_by_id(id)?;
    writeln!(out, "Deleted {id}")?;
    Ok(())
}
