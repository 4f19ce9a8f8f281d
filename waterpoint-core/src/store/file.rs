use camino::{Utf8Path, Utf8PathBuf};
use log::debug;

use super::{Storage, StorageError};

/// [`Storage`] backed by one JSON file per key inside a data directory.
///
/// Key characters outside `[A-Za-z0-9_-]` become `_` in the file name, so the
/// collection key `@wend_kuuni_eau:water_points` lives in
/// `_wend_kuuni_eau_water_points.json`. Writes replace the file atomically.
///
/// # Examples
/// ```
/// use camino::Utf8Path;
/// use waterpoint_core::FileStorage;
///
/// let storage = FileStorage::new("data");
/// assert_eq!(
///     storage.path_for("@app:points"),
///     Utf8Path::new("data/_app_points.json"),
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStorage {
    root: Utf8PathBuf,
}

impl FileStorage {
    /// Store files under `root`. The directory is created on first write.
    #[must_use]
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The data directory.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// File that holds the value for `key`.
    #[must_use]
    pub fn path_for(&self, key: &str) -> Utf8PathBuf {
        let stem: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.root.join(format!("{stem}.json"))
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        waterpoint_fs::read_to_string_if_exists(&path).map_err(|source| StorageError::Read {
            key: key.to_owned(),
            source,
        })
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        waterpoint_fs::write_atomic(&path, value.as_bytes()).map_err(|source| {
            StorageError::Write {
                key: key.to_owned(),
                source,
            }
        })?;
        debug!("wrote {} bytes to {path}", value.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::TempDir;

    fn temp_storage() -> (TempDir, FileStorage) {
        let tmp = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(tmp.path().join("data")).expect("utf-8 tempdir");
        (tmp, FileStorage::new(root))
    }

    #[rstest]
    fn unknown_key_reads_as_none() {
        let (_tmp, storage) = temp_storage();
        assert_eq!(storage.get_item("missing").expect("read"), None);
    }

    #[rstest]
    fn values_round_trip_through_disk() {
        let (_tmp, storage) = temp_storage();
        storage.set_item("k", "[]").expect("write");
        storage.set_item("k", "[1]").expect("overwrite");
        assert_eq!(storage.get_item("k").expect("read").as_deref(), Some("[1]"));
    }

    #[rstest]
    fn keys_map_to_safe_file_names() {
        let storage = FileStorage::new("root");
        assert_eq!(
            storage.path_for("../etc/passwd"),
            Utf8PathBuf::from("root/___etc_passwd.json")
        );
    }
}
