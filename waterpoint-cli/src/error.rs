//! Error types emitted by the water point CLI.
//!
//! Keep this error type reasonably small, as every command helper returns
//! `Result<_, CliError>`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use thiserror::Error;
use waterpoint_core::{StoreError, ValidationError, WaterPointId};

/// Errors emitted by the water point CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// User input failed validation before reaching the store.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] ValidationError),
    /// Only one of latitude and longitude was given.
    #[error("--latitude and --longitude must be given together")]
    IncompleteLocation,
    /// `update` was run without any field to change.
    #[error("nothing to update (pass at least one field to change)")]
    EmptyUpdate,
    /// No water point carries the requested id.
    #[error("no water point with id {id}")]
    NotFound { id: WaterPointId },
    /// The data directory exists but is not a directory.
    #[error("data directory {path:?} is not a directory")]
    DataDirNotDirectory { path: Utf8PathBuf },
    /// The data directory could not be inspected due to an IO error.
    #[error("failed to inspect data directory {path:?}: {source}")]
    InspectDataDir {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The store failed to read or persist the collection.
    #[error(transparent)]
    Store(StoreError),
    /// Serializing JSON output failed.
    #[error("failed to serialize output: {0}")]
    SerializeOutput(#[source] serde_json::Error),
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}

impl From<StoreError> for CliError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { id } => Self::NotFound { id },
            other => Self::Store(other),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::WriteOutput(err)
    }
}
