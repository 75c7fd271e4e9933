// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Durable string-keyed slot storage.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::StorageError;

/// Opaque get/set/remove of serialized blobs under named slots.
///
/// No size or expiry guarantees are assumed. Writers sharing a backend are
/// not coordinated: the last write to a slot wins.
pub trait SlotStorage: Send {
    /// Reads a slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&mut self, slot: &str) -> Result<Option<String>, StorageError>;

    /// Writes a slot, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn set(&mut self, slot: &str, value: &str) -> Result<(), StorageError>;

    /// Removes a slot. Removing an absent slot is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn remove(&mut self, slot: &str) -> Result<(), StorageError>;
}

/// In-process slot storage.
///
/// Clones share the same slots, the way every tab of one origin shares one
/// local storage area.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, String>>, StorageError> {
        self.slots
            .lock()
            .map_err(|_| StorageError::Unavailable(String::from("memory storage lock poisoned")))
    }
}

impl SlotStorage for MemoryStorage {
    fn get(&mut self, slot: &str) -> Result<Option<String>, StorageError> {
        Ok(self.lock()?.get(slot).cloned())
    }

    fn set(&mut self, slot: &str, value: &str) -> Result<(), StorageError> {
        self.lock()?.insert(slot.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, slot: &str) -> Result<(), StorageError> {
        self.lock()?.remove(slot);
        Ok(())
    }
}

/// A storage backend shared by several owners.
///
/// The draft store and the credential source of one wizard typically sit on
/// the same database; each gets a clone of this handle.
#[derive(Debug)]
pub struct SharedStorage<S> {
    inner: Arc<Mutex<S>>,
}

impl<S> Clone for SharedStorage<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: SlotStorage> SharedStorage<S> {
    pub fn new(storage: S) -> Self {
        Self {
            inner: Arc::new(Mutex::new(storage)),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, S>, StorageError> {
        self.inner
            .lock()
            .map_err(|_| StorageError::Unavailable(String::from("shared storage lock poisoned")))
    }
}

impl<S: SlotStorage> SlotStorage for SharedStorage<S> {
    fn get(&mut self, slot: &str) -> Result<Option<String>, StorageError> {
        self.lock()?.get(slot)
    }

    fn set(&mut self, slot: &str, value: &str) -> Result<(), StorageError> {
        self.lock()?.set(slot, value)
    }

    fn remove(&mut self, slot: &str) -> Result<(), StorageError> {
        self.lock()?.remove(slot)
    }
}
