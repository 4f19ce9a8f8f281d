use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::io;

use super::{Storage, StorageError};

/// Process-local [`Storage`], for tests and throwaway sessions.
///
/// Not `Sync`: the store is single-threaded.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RefCell<HashMap<String, String>>,
    reject_writes: Cell<bool>,
}

impl MemoryStorage {
    /// The raw value under `key`, bypassing the store.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    /// Put `value` under `key` verbatim, bypassing the store.
    pub fn insert_raw(&self, key: &str, value: &str) {
        self.items
            .borrow_mut()
            .insert(key.to_owned(), value.to_owned());
    }

    /// Make every following write fail as if the device were full.
    pub fn fail_writes(&self, reject: bool) {
        self.reject_writes.set(reject);
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.raw(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.reject_writes.get() {
            return Err(StorageError::Write {
                key: key.to_owned(),
                source: io::Error::new(io::ErrorKind::StorageFull, "storage quota exceeded"),
            });
        }
        self.insert_raw(key, value);
        Ok(())
    }
}
