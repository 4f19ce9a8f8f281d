//! Test helpers for driving CLI commands against scratch data directories.

use super::*;
use tempfile::TempDir;
use waterpoint_core::{FixedClock, MemoryStorage, test_support::sample_time};

/// An empty, UTF-8 addressable scratch directory.
pub(super) struct DataDir {
    _dir: TempDir,
    path: Utf8PathBuf,
}

impl DataDir {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let path = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 tempdir");
        Self { _dir: dir, path }
    }

    pub(super) fn path(&self) -> &Utf8Path {
        &self.path
    }

    pub(super) fn store(&self) -> FileStore {
        open_store(&self.path)
    }
}

impl std::fmt::Debug for DataDir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataDir").field("path", &self.path).finish()
    }
}

/// Storage and clock for command tests that do not touch the filesystem.
#[derive(Debug)]
pub(super) struct MemoryHarness {
    pub(super) storage: MemoryStorage,
    pub(super) clock: FixedClock,
}

impl MemoryHarness {
    pub(super) fn new() -> Self {
        Self {
            storage: MemoryStorage::default(),
            clock: FixedClock::new(sample_time()),
        }
    }

    pub(super) fn store(&self) -> WaterPointStore<&MemoryStorage, &FixedClock> {
        WaterPointStore::with_clock(&self.storage, &self.clock)
    }
}

/// Parse `argv` (without the program name) and dispatch it, capturing stdout.
pub(super) fn run_cli(argv: &[&str]) -> (Result<(), CliError>, String) {
    let mut buffer = Vec::new();
    let invocation = std::iter::once("waterpoint").chain(argv.iter().copied());
    let result = Cli::try_parse_from(invocation)
        .map_err(CliError::from)
        .and_then(|cli| dispatch(cli.command, &mut buffer));
    let stdout = String::from_utf8(buffer).expect("stdout utf-8");
    (result, stdout)
}

pub(super) fn output_of(buffer: Vec<u8>) -> String {
    String::from_utf8(buffer).expect("stdout utf-8")
}
