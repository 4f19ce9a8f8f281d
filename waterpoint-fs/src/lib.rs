//! Capability-based filesystem helpers for whole-blob persistence.
//!
//! Storage backends keep each value in a single file and rewrite it in full on
//! every save. These helpers wrap `cap-std` and `camino` so callers never touch
//! `std::fs` directly.
#![forbid(unsafe_code)]

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};
use std::io;
use std::path::Component;

/// Suffix appended to the target file name while a write is in flight.
const TEMP_SUFFIX: &str = ".tmp";

/// Open the parent directory of `path` and return it with the file name.
pub fn open_dir_and_file(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, String)> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::other("target should include a file name"))?
        .to_owned();
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, file_name))
}

/// Read the whole file at `path`.
///
/// Returns `Ok(None)` when the file or its parent directory does not exist, so
/// a store that has never been written reads as empty.
pub fn read_to_string_if_exists(path: &Utf8Path) -> io::Result<Option<String>> {
    let (dir, name) = match open_dir_and_file(path) {
        Ok(opened) => opened,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err),
    };
    match dir.read_to_string(name.as_str()) {
        Ok(contents) => Ok(Some(contents)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err),
    }
}

/// Replace the file at `path` with `contents`.
///
/// The bytes land in a sibling temporary file first and are renamed over the
/// target, so readers see either the old blob or the new one.
pub fn write_atomic(path: &Utf8Path, contents: &[u8]) -> io::Result<()> {
    ensure_parent_dir(path)?;
    let (dir, name) = open_dir_and_file(path)?;
    let temp_name = format!("{name}{TEMP_SUFFIX}");
    dir.write(temp_name.as_str(), contents)?;
    if let Err(err) = dir.rename(temp_name.as_str(), &dir, name.as_str()) {
        // Best effort: a stale temp file is harmless but untidy.
        let _cleanup = dir.remove_file(temp_name.as_str());
        return Err(err);
    }
    Ok(())
}

/// Create `path` and any missing ancestors as directories.
pub fn ensure_dir(path: &Utf8Path) -> io::Result<()> {
    if path.as_str().is_empty() || path == Utf8Path::new("/") {
        return Ok(());
    }
    let (base_dir, relative) = base_dir_and_relative(path)?;
    if relative.as_str().is_empty() {
        return Ok(());
    }
    base_dir.create_dir_all(&relative)
}

/// Ensure the parent directory for `path` exists, handling absolute paths safely for cap-std.
pub fn ensure_parent_dir(path: &Utf8Path) -> io::Result<()> {
    match path.parent() {
        Some(parent) => ensure_dir(parent),
        None => Ok(()),
    }
}

/// Return whether anything exists at `path`.
pub fn path_exists(path: &Utf8Path) -> io::Result<bool> {
    let (dir, name) = match open_dir_and_file(path) {
        Ok(opened) => opened,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(err) => return Err(err),
    };
    match dir.metadata(name.as_str()) {
        Ok(_) => Ok(true),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(err),
    }
}

/// Return whether a path exists and is a directory.
pub fn dir_exists(path: &Utf8Path) -> io::Result<bool> {
    let (dir, name) = match open_dir_and_file(path) {
        Ok(opened) => opened,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(err) => return Err(err),
    };
    match dir.metadata(name.as_str()) {
        Ok(meta) => Ok(meta.is_dir()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(err),
    }
}

/// Split an absolute or relative path into an ambient base directory and a relative suffix.
pub fn base_dir_and_relative(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, Utf8PathBuf)> {
    let std_path = path.as_std_path();

    let (base, relative) = match std_path.components().next() {
        // Windows absolute path with a drive or UNC prefix.
        Some(Component::Prefix(prefix)) => {
            let prefix_str = prefix
                .as_os_str()
                .to_str()
                .ok_or_else(|| io::Error::other("non-UTF-8 path prefix"))?;

            let base = Utf8PathBuf::from(prefix_str).join(std::path::MAIN_SEPARATOR.to_string());
            let relative = std_path
                .strip_prefix(base.as_std_path())
                .or_else(|_| std_path.strip_prefix(prefix.as_os_str()))
                .map_err(|_| io::Error::other("failed to strip prefix from path"))?
                .to_path_buf();
            (base, relative)
        }
        // Unix-style absolute path.
        Some(Component::RootDir) => {
            let base = Utf8PathBuf::from(std::path::MAIN_SEPARATOR.to_string());
            let relative = std_path
                .strip_prefix(base.as_std_path())
                .map_err(|_| io::Error::other("failed to strip root from absolute path"))?
                .to_path_buf();
            (base, relative)
        }
        _ => (Utf8PathBuf::from("."), std_path.to_path_buf()),
    };

    let dir = fs_utf8::Dir::open_ambient_dir(&base, ambient_authority())?;
    let relative_utf8 =
        Utf8PathBuf::from_path_buf(relative).map_err(|_| io::Error::other("non-UTF-8 path"))?;

    Ok((dir, relative_utf8))
}
