// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persisted collection of draft records.
//!
//! The whole collection, together with the record being edited, is written
//! to a single durable slot as a versioned envelope:
//!
//! ```json
//! {"state":{"guards":[{"id":"...", ...}],"editingGuard":null},"version":0}
//! ```
//!
//! `editingGuard` holds the whole record being edited. Only its `id` is read
//! back, so a pointer to a record that is no longer in the collection is
//! written as `{"id":"..."}`.
//!
//! Every mutation serializes the new state and writes it before the
//! in-memory collection is replaced, so a failed write leaves both sides
//! unchanged.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::StoreError;
use crate::storage::SlotStorage;

/// Slot used when no other is configured.
pub const DEFAULT_DRAFT_SLOT: &str = "guards-storage";

/// Version written into the persisted envelope.
pub const DRAFT_FORMAT_VERSION: u32 = 0;

/// Identifier assigned to a draft when it is added.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DraftId(String);

impl DraftId {
    /// Generates a fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DraftId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A record together with its store-assigned identifier.
///
/// The identifier is flattened next to the record's own fields on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Draft<T> {
    pub id: DraftId,
    #[serde(flatten)]
    pub record: T,
}

/// Handle returned by [`DraftStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener<T> = Box<dyn Fn(&[Draft<T>]) + Send>;

#[derive(Serialize)]
#[serde(untagged)]
enum EditingRef<'a, T> {
    Record(&'a Draft<T>),
    Dangling { id: &'a DraftId },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EnvelopeStateRef<'a, T> {
    guards: &'a [Draft<T>],
    editing_guard: Option<EditingRef<'a, T>>,
}

#[derive(Serialize)]
struct EnvelopeRef<'a, T> {
    state: EnvelopeStateRef<'a, T>,
    version: u32,
}

/// Any object with an `id`; the rest of the edited record is ignored.
#[derive(Deserialize)]
struct EditingId {
    id: DraftId,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct EnvelopeState<T> {
    guards: Vec<Draft<T>>,
    #[serde(default)]
    editing_guard: Option<EditingId>,
}

#[derive(Deserialize)]
struct Envelope<T> {
    state: EnvelopeState<T>,
}

/// An ordered, persisted collection of drafts plus an editing pointer.
pub struct DraftStore<T, S> {
    storage: S,
    slot: String,
    records: Vec<Draft<T>>,
    editing: Option<DraftId>,
    listeners: Vec<(SubscriptionId, Listener<T>)>,
    next_subscription: u64,
}

impl<T, S> std::fmt::Debug for DraftStore<T, S>
where
    T: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DraftStore")
            .field("slot", &self.slot)
            .field("records", &self.records)
            .field("editing", &self.editing)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl<T, S> DraftStore<T, S>
where
    T: Clone + Serialize + DeserializeOwned,
    S: SlotStorage,
{
    /// Opens the store on the default slot, rehydrating any persisted state.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot cannot be read. A slot holding an
    /// undecodable blob is not an error: it is logged and the store starts
    /// empty.
    pub fn open(storage: S) -> Result<Self, StoreError> {
        Self::open_slot(storage, DEFAULT_DRAFT_SLOT)
    }

    /// Opens the store on a named slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot cannot be read.
    pub fn open_slot(mut storage: S, slot: impl Into<String>) -> Result<Self, StoreError> {
        let slot: String = slot.into();
        let (records, editing) = match storage.get(&slot)? {
            None => (Vec::new(), None),
            Some(blob) => match serde_json::from_str::<Envelope<T>>(&blob) {
                Ok(envelope) => {
                    debug!(
                        slot = %slot,
                        count = envelope.state.guards.len(),
                        "Rehydrated drafts"
                    );
                    let editing: Option<DraftId> =
                        envelope.state.editing_guard.map(|editing| editing.id);
                    (envelope.state.guards, editing)
                }
                Err(err) => {
                    warn!(slot = %slot, error = %err, "Ignoring malformed persisted drafts");
                    (Vec::new(), None)
                }
            },
        };

        Ok(Self {
            storage,
            slot,
            records,
            editing,
            listeners: Vec::new(),
            next_subscription: 0,
        })
    }

    /// Appends a record and returns its freshly assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the new state cannot be persisted.
    pub fn add(&mut self, record: T) -> Result<DraftId, StoreError> {
        let id: DraftId = self.fresh_id();
        let mut records: Vec<Draft<T>> = self.records.clone();
        records.push(Draft {
            id: id.clone(),
            record,
        });
        self.commit(records, self.editing.clone())?;
        debug!(slot = %self.slot, id = %id, "Draft added");
        Ok(id)
    }

    /// Replaces the record whose identifier matches `draft.id`, in place.
    ///
    /// The editing pointer is cleared whether or not a record matched, and
    /// the state is persisted either way. Returns whether a record matched.
    ///
    /// # Errors
    ///
    /// Returns an error if the new state cannot be persisted.
    pub fn update(&mut self, draft: Draft<T>) -> Result<bool, StoreError> {
        let mut records: Vec<Draft<T>> = self.records.clone();
        let matched: bool = match records.iter_mut().find(|existing| existing.id == draft.id) {
            Some(existing) => {
                existing.record = draft.record;
                true
            }
            None => false,
        };
        self.commit(records, None)?;
        debug!(slot = %self.slot, id = %draft.id, matched, "Draft updated");
        Ok(matched)
    }

    /// Removes the record with `id`. Returns whether one was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the new state cannot be persisted.
    pub fn delete(&mut self, id: &DraftId) -> Result<bool, StoreError> {
        let records: Vec<Draft<T>> = self
            .records
            .iter()
            .filter(|draft| &draft.id != id)
            .cloned()
            .collect();
        let removed: bool = records.len() != self.records.len();
        self.commit(records, self.editing.clone())?;
        debug!(slot = %self.slot, id = %id, removed, "Draft deleted");
        Ok(removed)
    }

    /// Marks which draft is being edited, or clears the mark.
    ///
    /// The target is not checked against the collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the new state cannot be persisted.
    pub fn set_editing_target(&mut self, target: Option<DraftId>) -> Result<(), StoreError> {
        let records: Vec<Draft<T>> = self.records.clone();
        self.commit(records, target)
    }

    /// Clears the collection and the editing pointer and removes the slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot cannot be removed; the in-memory state is
    /// then left as it was.
    pub fn reset(&mut self) -> Result<(), StoreError> {
        self.storage.remove(&self.slot)?;
        self.records.clear();
        self.editing = None;
        debug!(slot = %self.slot, "Drafts reset");
        self.notify();
        Ok(())
    }

    /// The current collection, in insertion order.
    #[must_use]
    pub fn records(&self) -> &[Draft<T>] {
        &self.records
    }

    /// An owned copy of the current collection.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Draft<T>> {
        self.records.clone()
    }

    #[must_use]
    pub fn get(&self, id: &DraftId) -> Option<&Draft<T>> {
        self.records.iter().find(|draft| &draft.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub const fn editing_target(&self) -> Option<&DraftId> {
        self.editing.as_ref()
    }

    /// The draft the editing pointer refers to, if it still exists.
    #[must_use]
    pub fn editing_record(&self) -> Option<&Draft<T>> {
        self.editing.as_ref().and_then(|id| self.get(id))
    }

    #[must_use]
    pub fn slot(&self) -> &str {
        &self.slot
    }

    /// Registers a listener called with the collection after every change.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: Fn(&[Draft<T>]) + Send + 'static,
    {
        let id: SubscriptionId = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before: usize = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        before != self.listeners.len()
    }

    fn fresh_id(&self) -> DraftId {
        loop {
            let id: DraftId = DraftId::generate();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }

    fn commit(
        &mut self,
        records: Vec<Draft<T>>,
        editing: Option<DraftId>,
    ) -> Result<(), StoreError> {
        let editing_guard: Option<EditingRef<'_, T>> = editing.as_ref().map(|id| {
            records
                .iter()
                .find(|draft| &draft.id == id)
                .map_or(EditingRef::Dangling { id }, EditingRef::Record)
        });
        let envelope: EnvelopeRef<'_, T> = EnvelopeRef {
            state: EnvelopeStateRef {
                guards: &records,
                editing_guard,
            },
            version: DRAFT_FORMAT_VERSION,
        };
        let blob: String =
            serde_json::to_string(&envelope).map_err(|e| StoreError::Encoding(e.to_string()))?;
        self.storage.set(&self.slot, &blob)?;

        self.records = records;
        self.editing = editing;
        self.notify();
        Ok(())
    }

    fn notify(&self) {
        for (_, listener) in &self.listeners {
            listener(&self.records);
        }
    }
}

impl<T, S> DraftStore<T, S>
where
    T: Clone + PartialEq + Serialize + DeserializeOwned,
    S: SlotStorage,
{
    /// Removes the drafts that went out with a submission.
    ///
    /// Only drafts still equal to their submitted copy are removed; one
    /// added or edited since `submitted` was taken stays. When nothing is
    /// left the store is [`reset`](Self::reset).
    ///
    /// # Errors
    ///
    /// Returns an error if the new state cannot be persisted.
    pub fn remove_submitted(&mut self, submitted: &[Draft<T>]) -> Result<(), StoreError> {
        let remaining: Vec<Draft<T>> = self
            .records
            .iter()
            .filter(|draft| !submitted.contains(draft))
            .cloned()
            .collect();
        if remaining.is_empty() {
            return self.reset();
        }

        let editing: Option<DraftId> = self
            .editing
            .clone()
            .filter(|id| remaining.iter().any(|draft| &draft.id == id));
        let kept: usize = remaining.len();
        self.commit(remaining, editing)?;
        debug!(slot = %self.slot, kept, "Submitted drafts removed");
        Ok(())
    }
}

/// A draft store shared between a wizard and the handlers that edit it.
pub struct SharedDraftStore<T, S> {
    inner: Arc<Mutex<DraftStore<T, S>>>,
}

impl<T, S> Clone for SharedDraftStore<T, S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: std::fmt::Debug, S> std::fmt::Debug for SharedDraftStore<T, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("SharedDraftStore").field(&self.inner).finish()
    }
}

impl<T, S> SharedDraftStore<T, S>
where
    T: Clone + Serialize + DeserializeOwned,
    S: SlotStorage,
{
    pub fn new(store: DraftStore<T, S>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Runs `f` with exclusive access to the store.
    ///
    /// A listener that panicked while the lock was held does not make the
    /// store unusable; the collection it guards is only replaced after a
    /// successful write.
    pub fn with<R>(&self, f: impl FnOnce(&mut DraftStore<T, S>) -> R) -> R {
        let mut guard: MutexGuard<'_, DraftStore<T, S>> =
            self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    #[must_use]
    pub fn snapshot(&self) -> Vec<Draft<T>> {
        self.with(|store| store.records().to_vec())
    }
}
