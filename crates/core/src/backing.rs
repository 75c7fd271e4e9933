// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::draft_store::{Draft, DraftStore, SharedDraftStore};
use crate::error::StoreError;
use crate::storage::SlotStorage;

/// Records a wizard reads at aggregation time and clears after success.
pub trait DraftBacking: Send {
    /// What aggregation receives.
    type Snapshot: Clone + Send;

    /// Takes an owned snapshot of the current records.
    fn snapshot(&self) -> Self::Snapshot;

    /// Removes what a successful submission carried.
    ///
    /// Records changed after `submitted` was taken must survive.
    ///
    /// # Errors
    ///
    /// Returns an error if the new state cannot be persisted.
    fn clear_submitted(&mut self, submitted: &Self::Snapshot) -> Result<(), StoreError>;
}

/// Backing for wizards that aggregate nothing but their own steps.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoBacking;

impl DraftBacking for NoBacking {
    type Snapshot = ();

    fn snapshot(&self) -> Self::Snapshot {}

    fn clear_submitted(&mut self, _submitted: &()) -> Result<(), StoreError> {
        Ok(())
    }
}

impl<T, S> DraftBacking for DraftStore<T, S>
where
    T: Clone + PartialEq + Serialize + DeserializeOwned + Send,
    S: SlotStorage,
{
    type Snapshot = Vec<Draft<T>>;

    fn snapshot(&self) -> Self::Snapshot {
        Self::snapshot(self)
    }

    fn clear_submitted(&mut self, submitted: &Self::Snapshot) -> Result<(), StoreError> {
        self.remove_submitted(submitted)
    }
}

impl<T, S> DraftBacking for SharedDraftStore<T, S>
where
    T: Clone + PartialEq + Serialize + DeserializeOwned + Send,
    S: SlotStorage,
{
    type Snapshot = Vec<Draft<T>>;

    fn snapshot(&self) -> Self::Snapshot {
        Self::snapshot(self)
    }

    fn clear_submitted(&mut self, submitted: &Self::Snapshot) -> Result<(), StoreError> {
        self.with(|store| store.remove_submitted(submitted))
    }
}
