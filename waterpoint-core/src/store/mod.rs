//! Persistence for the water point collection.
//!
//! The whole collection lives under one key of a [`Storage`] medium as a JSON
//! array. [`WaterPointStore`] is the only component that reads or writes that
//! key, and every mutation loads the full array, changes it in memory and
//! writes it back.
//!
//! Reads never fail outward: [`WaterPointStore::list_all`] treats a missing,
//! unreadable or corrupt blob as an empty collection and logs a warning.
//! [`WaterPointStore::try_list_all`] is available for callers that need to
//! tell those cases apart. Writes report failure through [`StoreError`].
//!
//! Two mutations interleaved from separate processes can lose an update; the
//! last write wins.

use chrono::{DateTime, Utc};
use log::{debug, warn};
use thiserror::Error;

use crate::{Clock, NewReport, SystemClock, WaterPoint, WaterPointId, WaterPointPatch};

#[cfg(feature = "store-file")]
mod file;
mod memory;

#[cfg(feature = "store-file")]
pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Key under which the collection is persisted.
pub const STORAGE_KEY: &str = "@wend_kuuni_eau:water_points";

/// Errors raised by a [`Storage`] medium.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading the value failed.
    #[error("failed to read storage key {key:?}: {source}")]
    Read {
        /// Key being read.
        key: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// Writing the value failed.
    #[error("failed to write storage key {key:?}: {source}")]
    Write {
        /// Key being written.
        key: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

/// A whole-value key/value medium.
///
/// Values are read and written in full; there is no partial update.
///
/// # Examples
///
/// ```rust
/// use std::{cell::RefCell, collections::HashMap};
/// use waterpoint_core::{Storage, StorageError};
///
/// #[derive(Default)]
/// struct Scratch(RefCell<HashMap<String, String>>);
///
/// impl Storage for Scratch {
///     fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
///         Ok(self.0.borrow().get(key).cloned())
///     }
///
///     fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
///         self.0.borrow_mut().insert(key.to_owned(), value.to_owned());
///         Ok(())
///     }
/// }
///
/// let scratch = Scratch::default();
/// scratch.set_item("k", "v").unwrap();
/// assert_eq!(scratch.get_item("k").unwrap().as_deref(), Some("v"));
/// ```
pub trait Storage {
    /// Return the value stored under `key`, or `None` if nothing is stored.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key`.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<T: Storage + ?Sized> Storage for &T {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }
}

/// Errors raised by [`WaterPointStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// No record carries the requested id; nothing was written.
    #[error("no water point with id {id}")]
    NotFound {
        /// The id that matched nothing.
        id: WaterPointId,
    },
    /// The storage medium could not be read.
    #[error("stored water points could not be read: {0}")]
    Unreadable(#[source] StorageError),
    /// The stored blob is not a valid collection.
    #[error("stored water points are corrupt: {0}")]
    Corrupt(#[source] serde_json::Error),
    /// The collection could not be encoded.
    #[error("failed to serialize water points: {0}")]
    Serialize(#[source] serde_json::Error),
    /// The storage medium rejected the write.
    #[error("failed to persist water points: {0}")]
    Write(#[source] StorageError),
}

impl StoreError {
    /// Whether the error means the record vanished rather than a storage fault.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// The gateway to the persisted water point collection.
///
/// # Examples
/// ```
/// use waterpoint_core::{MemoryStorage, WaterPointStore, test_support::sample_point};
///
/// # fn main() -> Result<(), waterpoint_core::StoreError> {
/// let store = WaterPointStore::new(MemoryStorage::default());
/// assert!(store.list_all().is_empty());
///
/// store.add(sample_point("1"))?;
/// assert_eq!(store.list_all().len(), 1);
///
/// store.delete_by_id(&"1".into())?;
/// assert!(store.list_all().is_empty());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct WaterPointStore<S, C = SystemClock> {
    storage: S,
    clock: C,
}

impl<S: Storage> WaterPointStore<S> {
    /// Create a store over `storage` that stamps records with wall-clock time.
    pub const fn new(storage: S) -> Self {
        Self::with_clock(storage, SystemClock)
    }
}

impl<S: Storage, C: Clock> WaterPointStore<S, C> {
    /// Create a store over `storage` that stamps records using `clock`.
    pub const fn with_clock(storage: S, clock: C) -> Self {
        Self { storage, clock }
    }

    /// Borrow the storage medium.
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// The full collection in storage order.
    ///
    /// A missing blob is an empty collection. So is an unreadable or corrupt
    /// one: the failure is logged and the data behind it is not recovered.
    pub fn list_all(&self) -> Vec<WaterPoint> {
        self.try_list_all().unwrap_or_else(|err| {
            warn!("treating stored water points as empty: {err}");
            Vec::new()
        })
    }

    /// The full collection, distinguishing unreadable and corrupt storage.
    pub fn try_list_all(&self) -> Result<Vec<WaterPoint>, StoreError> {
        let Some(raw) = self
            .storage
            .get_item(STORAGE_KEY)
            .map_err(StoreError::Unreadable)?
        else {
            return Ok(Vec::new());
        };
        serde_json::from_str(&raw).map_err(StoreError::Corrupt)
    }

    /// Snapshot of the first record with `id`, if any.
    pub fn find_by_id(&self, id: &WaterPointId) -> Option<WaterPoint> {
        self.list_all().into_iter().find(|point| &point.id == id)
    }

    /// Overwrite the persisted collection with `points`.
    ///
    /// Non-finite coordinates or ratings fail with [`StoreError::Serialize`]
    /// and leave storage untouched.
    pub fn replace_all(&self, points: &[WaterPoint]) -> Result<(), StoreError> {
        let payload = serde_json::to_string(points).map_err(StoreError::Serialize)?;
        self.storage
            .set_item(STORAGE_KEY, &payload)
            .map_err(StoreError::Write)?;
        debug!("persisted {} water points", points.len());
        Ok(())
    }

    /// Append `point` and persist.
    ///
    /// The caller assigns the id; uniqueness is not checked.
    pub fn add(&self, point: WaterPoint) -> Result<(), StoreError> {
        let mut points = self.list_all();
        points.push(point);
        self.replace_all(&points)
    }

    /// Overwrite the fields present in `patch` on the record with `id`, stamp
    /// `last_update`, and persist.
    pub fn update_by_id(&self, id: &WaterPointId, patch: WaterPointPatch) -> Result<(), StoreError> {
        self.modify(id, |point, now| {
            patch.apply_to(point);
            point.last_update = now;
        })
    }

    /// Remove every record with `id` and persist the rest.
    ///
    /// Succeeds whether or not anything matched.
    pub fn delete_by_id(&self, id: &WaterPointId) -> Result<(), StoreError> {
        let mut points = self.list_all();
        let before = points.len();
        points.retain(|point| &point.id != id);
        if points.len() == before {
            debug!("delete of {id} matched no water point");
        }
        self.replace_all(&points)
    }

    /// Append `report`, dated now, to the record with `id` and persist.
    pub fn add_report(&self, id: &WaterPointId, report: NewReport) -> Result<(), StoreError> {
        self.modify(id, |point, now| point.reports.push(report.into_report(now)))
    }

    /// Append `value` to the ratings of the record with `id`, recompute its
    /// mean rating, and persist.
    ///
    /// The value is expected to lie in `1..=5` but is not checked here.
    pub fn add_rating_and_recompute(&self, id: &WaterPointId, value: u8) -> Result<(), StoreError> {
        self.modify(id, |point, _| point.push_rating(value))
    }

    /// Apply `mutate` to the first record with `id` and persist the collection.
    fn modify<F>(&self, id: &WaterPointId, mutate: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut WaterPoint, DateTime<Utc>),
    {
        let mut points = self.list_all();
        let Some(point) = points.iter_mut().find(|point| &point.id == id) else {
            return Err(StoreError::NotFound { id: id.clone() });
        };
        mutate(point, self.clock.now());
        self.replace_all(&points)
    }
}
