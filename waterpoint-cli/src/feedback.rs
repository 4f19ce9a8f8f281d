//! `report` and `rate` commands.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use waterpoint_core::validation::{validate_rating, validate_report};
use waterpoint_core::{
    Clock, NewReport, ReportKind, Storage, WaterPointId, WaterPointStore, rating_stars,
};

use crate::detail::find;
use crate::{
    ARG_DATA_DIR, ARG_DESCRIPTION, ARG_STARS, CliError, ENV_RATE_ID, ENV_RATE_STARS,
    ENV_REPORT_DESCRIPTION, ENV_REPORT_ID, open_store, require_id, resolve_data_dir,
};

/// CLI arguments for the `report` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(name = "report", about = "Report a problem at a water point")]
#[ortho_config(prefix = "WATERPOINT")]
pub(crate) struct ReportArgs {
    /// Identifier of the water point.
    #[arg(value_name = "id")]
    #[serde(default)]
    pub(crate) id: Option<String>,
    /// Directory holding the water point collection.
    #[arg(long = ARG_DATA_DIR, value_name = "dir")]
    #[serde(default)]
    pub(crate) data_dir: Option<Utf8PathBuf>,
    /// Kind of problem: outage, cleanliness or other.
    #[arg(long, value_name = "kind")]
    #[serde(default)]
    pub(crate) kind: Option<ReportKind>,
    /// What you saw.
    #[arg(long = ARG_DESCRIPTION, value_name = "text")]
    #[serde(default)]
    pub(crate) description: Option<String>,
}

impl ReportArgs {
    pub(crate) fn into_config(self) -> Result<ReportConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ReportConfig::try_from(merged)
    }
}

/// Resolved `report` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ReportConfig {
    pub(crate) data_dir: Utf8PathBuf,
    pub(crate) id: WaterPointId,
    pub(crate) report: NewReport,
}

impl TryFrom<ReportArgs> for ReportConfig {
    type Error = CliError;

    fn try_from(args: ReportArgs) -> Result<Self, Self::Error> {
        let id = require_id(args.id, ENV_REPORT_ID)?;
        let description = args.description.ok_or(CliError::MissingArgument {
            field: ARG_DESCRIPTION,
            env: ENV_REPORT_DESCRIPTION,
        })?;
        let report = validate_report(args.kind.unwrap_or_default(), &description)?;
        Ok(Self {
            data_dir: resolve_data_dir(args.data_dir)?,
            id,
            report,
        })
    }
}

pub(crate) fn run_report(args: ReportArgs, out: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    execute_report(config.id, config.report, &open_store(&config.data_dir), out)
}

pub(crate) fn execute_report<S: Storage, C: Clock>(
    id: WaterPointId,
    report: NewReport,
    store: &WaterPointStore<S, C>,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    store.add_report(&id, report)?;
    writeln!(out, "Report recorded for {id}. Thank you.")?;
    Ok(())
}

/// CLI arguments for the `rate` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(name = "rate", about = "Rate a water point from 1 to 5 stars")]
#[ortho_config(prefix = "WATERPOINT")]
pub(crate) struct RateArgs {
    /// Identifier of the water point.
    #[arg(value_name = "id")]
    #[serde(default)]
    pub(crate) id: Option<String>,
    /// Directory holding the water point collection.
    #[arg(long = ARG_DATA_DIR, value_name = "dir")]
    #[serde(default)]
    pub(crate) data_dir: Option<Utf8PathBuf>,
    /// Number of stars, 1 to 5.
    #[arg(long = ARG_STARS, value_name = "n")]
    #[serde(default)]
    pub(crate) stars: Option<u8>,
}

impl RateArgs {
    pub(crate) fn into_config(self) -> Result<RateConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RateConfig::try_from(merged)
    }
}

/// Resolved `rate` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RateConfig {
    pub(crate) data_dir: Utf8PathBuf,
    pub(crate) id: WaterPointId,
    pub(crate) stars: u8,
}

impl TryFrom<RateArgs> for RateConfig {
    type Error = CliError;

    fn try_from(args: RateArgs) -> Result<Self, Self::Error> {
        let id = require_id(args.id, ENV_RATE_ID)?;
        let stars = args.stars.ok_or(CliError::MissingArgument {
            field: ARG_STARS,
            env: ENV_RATE_STARS,
        })?;
        Ok(Self {
            data_dir: resolve_data_dir(args.data_dir)?,
            id,
            stars: validate_rating(stars)?,
        })
    }
}

pub(crate) fn run_rate(args: RateArgs, out: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    execute_rate(&config.id, config.stars, &open_store(&config.data_dir), out)
}

/// Record the rating, then print the refreshed average.
pub(crate) fn execute_rate<S: Storage, C: Clock>(
    id: &WaterPointId,
    stars: u8,
    store: &WaterPointStore<S, C>,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    store.add_rating_and_recompute(id, stars)?;
    let point = find(store, id)?;
    writeln!(
        out,
        "Rated {id}: {} ({:.1} from {} ratings)",
        rating_stars(point.rating),
        point.rating,
        point.ratings.len()
    )?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<RateConfig, CliError> {
    let merged = RateArgs::merge_from_layers(layers).map_err(CliError::from)?;
    RateConfig::try_from(merged)
}
