// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde_json::Value;
use std::sync::{Arc, Mutex};

use crate::{
    DEFAULT_DRAFT_SLOT, Draft, DraftBacking, DraftId, DraftStore, MemoryStorage,
    SharedDraftStore, SlotStorage, StorageError, StoreError,
};

use super::helpers::{FlakyStorage, Guard, create_test_guard};

fn open_store(storage: &MemoryStorage) -> DraftStore<Guard, MemoryStorage> {
    DraftStore::open(storage.clone()).unwrap()
}

fn persisted(storage: &MemoryStorage) -> Option<Value> {
    storage
        .clone()
        .get(DEFAULT_DRAFT_SLOT)
        .unwrap()
        .map(|blob| serde_json::from_str(&blob).unwrap())
}

#[test]
fn test_open_on_absent_slot_starts_empty() {
    let storage: MemoryStorage = MemoryStorage::new();
    let store: DraftStore<Guard, MemoryStorage> = open_store(&storage);

    assert!(store.is_empty());
    assert!(store.editing_target().is_none());
    assert_eq!(store.slot(), "guards-storage");
    assert!(persisted(&storage).is_none());
}

#[test]
fn test_add_assigns_distinct_ids_in_insertion_order() {
    let storage: MemoryStorage = MemoryStorage::new();
    let mut store: DraftStore<Guard, MemoryStorage> = open_store(&storage);

    let first: DraftId = store.add(create_test_guard("Night Guard", 2)).unwrap();
    let second: DraftId = store.add(create_test_guard("Day Guard", 3)).unwrap();

    assert_ne!(first, second);
    assert_eq!(store.len(), 2);
    assert_eq!(store.records()[0].id, first);
    assert_eq!(store.records()[0].record.description, "Night Guard");
    assert_eq!(store.records()[1].id, second);
}

#[test]
fn test_add_persists_versioned_envelope() {
    let storage: MemoryStorage = MemoryStorage::new();
    let mut store: DraftStore<Guard, MemoryStorage> = open_store(&storage);

    let id: DraftId = store.add(create_test_guard("Night Guard", 2)).unwrap();

    let blob: Value = persisted(&storage).unwrap();
    assert_eq!(blob["version"], 0);
    assert!(blob["state"]["editingGuard"].is_null());
    let record: &Value = &blob["state"]["guards"][0];
    assert_eq!(record["id"], id.as_str());
    assert_eq!(record["description"], "Night Guard");
    assert_eq!(record["numberOfPersons"], 2);
}

#[test]
fn test_reopen_rehydrates_records_and_editing_target() {
    let storage: MemoryStorage = MemoryStorage::new();
    let mut store: DraftStore<Guard, MemoryStorage> = open_store(&storage);
    store.add(create_test_guard("Night Guard", 2)).unwrap();
    let second: DraftId = store.add(create_test_guard("Day Guard", 3)).unwrap();
    store.set_editing_target(Some(second.clone())).unwrap();

    let reopened: DraftStore<Guard, MemoryStorage> = open_store(&storage);

    assert_eq!(reopened.records(), store.records());
    assert_eq!(reopened.editing_target(), Some(&second));
    assert_eq!(
        reopened.editing_record().unwrap().record.description,
        "Day Guard"
    );
}

#[test]
fn test_update_replaces_in_place_and_clears_editing_target() {
    let storage: MemoryStorage = MemoryStorage::new();
    let mut store: DraftStore<Guard, MemoryStorage> = open_store(&storage);
    let first: DraftId = store.add(create_test_guard("Night Guard", 2)).unwrap();
    let second: DraftId = store.add(create_test_guard("Day Guard", 3)).unwrap();
    store.set_editing_target(Some(first.clone())).unwrap();

    let matched: bool = store
        .update(Draft {
            id: first.clone(),
            record: create_test_guard("Night Guard", 5),
        })
        .unwrap();

    assert!(matched);
    assert_eq!(store.records()[0].id, first);
    assert_eq!(store.records()[0].record.number_of_persons, 5);
    assert_eq!(store.records()[1].id, second);
    assert!(store.editing_target().is_none());
    assert!(persisted(&storage).unwrap()["state"]["editingGuard"].is_null());
}

#[test]
fn test_update_with_unknown_id_changes_nothing_but_editing_target() {
    let storage: MemoryStorage = MemoryStorage::new();
    let mut store: DraftStore<Guard, MemoryStorage> = open_store(&storage);
    let id: DraftId = store.add(create_test_guard("Night Guard", 2)).unwrap();
    store.set_editing_target(Some(id)).unwrap();
    let before: Vec<Draft<Guard>> = store.snapshot();

    let matched: bool = store
        .update(Draft {
            id: DraftId::new("missing"),
            record: create_test_guard("Ghost", 1),
        })
        .unwrap();

    assert!(!matched);
    assert_eq!(store.records(), before.as_slice());
    assert!(store.editing_target().is_none());
}

#[test]
fn test_delete_removes_only_the_matching_record() {
    let storage: MemoryStorage = MemoryStorage::new();
    let mut store: DraftStore<Guard, MemoryStorage> = open_store(&storage);
    let first: DraftId = store.add(create_test_guard("Night Guard", 2)).unwrap();
    let second: DraftId = store.add(create_test_guard("Day Guard", 3)).unwrap();

    assert!(store.delete(&first).unwrap());
    assert!(!store.delete(&DraftId::new("missing")).unwrap());

    assert_eq!(store.len(), 1);
    assert_eq!(store.records()[0].id, second);
    assert_eq!(
        persisted(&storage).unwrap()["state"]["guards"]
            .as_array()
            .unwrap()
            .len(),
        1
    );
}

#[test]
fn test_editing_target_is_not_checked_against_records() {
    let storage: MemoryStorage = MemoryStorage::new();
    let mut store: DraftStore<Guard, MemoryStorage> = open_store(&storage);

    store
        .set_editing_target(Some(DraftId::new("dangling")))
        .unwrap();

    assert_eq!(store.editing_target(), Some(&DraftId::new("dangling")));
    assert!(store.editing_record().is_none());
}

#[test]
fn test_reset_clears_memory_and_removes_slot() {
    let storage: MemoryStorage = MemoryStorage::new();
    let mut store: DraftStore<Guard, MemoryStorage> = open_store(&storage);
    let id: DraftId = store.add(create_test_guard("Night Guard", 2)).unwrap();
    store.set_editing_target(Some(id.clone())).unwrap();

    store.reset().unwrap();

    assert!(store.is_empty());
    assert!(store.editing_target().is_none());
    assert!(persisted(&storage).is_none());

    let next: DraftId = store.add(create_test_guard("Day Guard", 1)).unwrap();
    assert_ne!(next, id);
}

#[test]
fn test_malformed_blob_starts_empty() {
    let mut storage: MemoryStorage = MemoryStorage::new();
    storage.set(DEFAULT_DRAFT_SLOT, "{not json").unwrap();

    let store: DraftStore<Guard, MemoryStorage> = open_store(&storage);

    assert!(store.is_empty());
}

#[test]
fn test_blob_with_wrong_shape_starts_empty() {
    let mut storage: MemoryStorage = MemoryStorage::new();
    storage
        .set(DEFAULT_DRAFT_SLOT, r#"{"state":{"guards":[{"id":"a"}]},"version":0}"#)
        .unwrap();

    let store: DraftStore<Guard, MemoryStorage> = open_store(&storage);

    assert!(store.is_empty());
}

#[test]
fn test_failed_write_leaves_memory_unchanged() {
    let storage: FlakyStorage = FlakyStorage::default();
    let mut store: DraftStore<Guard, FlakyStorage> = DraftStore::open(storage.clone()).unwrap();
    let id: DraftId = store.add(create_test_guard("Night Guard", 2)).unwrap();

    storage.fail_writes(true);

    let add = store.add(create_test_guard("Day Guard", 3));
    let delete = store.delete(&id);
    let reset = store.reset();

    assert_eq!(
        add,
        Err(StoreError::Storage(StorageError::Backend(String::from(
            "disk full"
        ))))
    );
    assert!(delete.is_err());
    assert!(reset.is_err());
    assert_eq!(store.len(), 1);
    assert_eq!(store.records()[0].id, id);
}

#[test]
fn test_custom_slot_is_independent_of_default() {
    let storage: MemoryStorage = MemoryStorage::new();
    let mut custom: DraftStore<Guard, MemoryStorage> =
        DraftStore::open_slot(storage.clone(), "other-drafts").unwrap();
    custom.add(create_test_guard("Night Guard", 2)).unwrap();

    let default: DraftStore<Guard, MemoryStorage> = open_store(&storage);

    assert!(default.is_empty());
    assert_eq!(custom.slot(), "other-drafts");
}

#[test]
fn test_subscribers_observe_every_change_until_unsubscribed() {
    let storage: MemoryStorage = MemoryStorage::new();
    let mut store: DraftStore<Guard, MemoryStorage> = open_store(&storage);
    let seen: Arc<Mutex<Vec<usize>>> = Arc::new(Mutex::new(Vec::new()));
    let sink: Arc<Mutex<Vec<usize>>> = Arc::clone(&seen);

    let subscription = store.subscribe(move |records| sink.lock().unwrap().push(records.len()));
    let id: DraftId = store.add(create_test_guard("Night Guard", 2)).unwrap();
    store.add(create_test_guard("Day Guard", 3)).unwrap();
    store.delete(&id).unwrap();

    assert!(store.unsubscribe(subscription));
    assert!(!store.unsubscribe(subscription));
    store.reset().unwrap();

    assert_eq!(*seen.lock().unwrap(), vec![1, 2, 1]);
}

#[test]
fn test_shared_store_backs_snapshot_and_clear() {
    let storage: MemoryStorage = MemoryStorage::new();
    let shared: SharedDraftStore<Guard, MemoryStorage> = SharedDraftStore::new(open_store(&storage));
    let mut backing: SharedDraftStore<Guard, MemoryStorage> = shared.clone();

    shared
        .with(|store| store.add(create_test_guard("Night Guard", 2)))
        .unwrap();

    let submitted: Vec<Draft<Guard>> = DraftBacking::snapshot(&backing);
    assert_eq!(submitted.len(), 1);
    DraftBacking::clear_submitted(&mut backing, &submitted).unwrap();
    assert!(shared.snapshot().is_empty());
    assert!(persisted(&storage).is_none());
}

#[test]
fn test_remove_submitted_keeps_later_changes() {
    let storage: MemoryStorage = MemoryStorage::new();
    let mut store: DraftStore<Guard, MemoryStorage> = open_store(&storage);
    store.add(create_test_guard("Night Guard", 2)).unwrap();
    let edited: DraftId = store.add(create_test_guard("Day Guard", 3)).unwrap();
    let submitted: Vec<Draft<Guard>> = store.snapshot();

    store
        .update(Draft {
            id: edited.clone(),
            record: create_test_guard("Day Guard", 4),
        })
        .unwrap();
    let added: DraftId = store.add(create_test_guard("Supervisor", 1)).unwrap();
    store.set_editing_target(Some(added.clone())).unwrap();

    store.remove_submitted(&submitted).unwrap();

    let ids: Vec<DraftId> = store.records().iter().map(|draft| draft.id.clone()).collect();
    assert_eq!(ids, vec![edited, added.clone()]);
    assert_eq!(store.records()[0].record.number_of_persons, 4);
    assert_eq!(store.editing_target(), Some(&added));
    assert_eq!(
        persisted(&storage).unwrap()["state"]["guards"]
            .as_array()
            .unwrap()
            .len(),
        2
    );
}

#[test]
fn test_remove_submitted_drops_pointer_to_removed_draft() {
    let storage: MemoryStorage = MemoryStorage::new();
    let mut store: DraftStore<Guard, MemoryStorage> = open_store(&storage);
    let submitted_id: DraftId = store.add(create_test_guard("Night Guard", 2)).unwrap();
    let submitted: Vec<Draft<Guard>> = store.snapshot();
    store.add(create_test_guard("Supervisor", 1)).unwrap();
    store.set_editing_target(Some(submitted_id)).unwrap();

    store.remove_submitted(&submitted).unwrap();

    assert_eq!(store.len(), 1);
    assert!(store.editing_target().is_none());
}

#[test]
fn test_editing_guard_is_persisted_as_whole_record() {
    let storage: MemoryStorage = MemoryStorage::new();
    let mut store: DraftStore<Guard, MemoryStorage> = open_store(&storage);
    let id: DraftId = store.add(create_test_guard("Night Guard", 2)).unwrap();

    store.set_editing_target(Some(id.clone())).unwrap();
    let editing: Value = persisted(&storage).unwrap()["state"]["editingGuard"].clone();
    assert_eq!(editing["id"], id.as_str());
    assert_eq!(editing["description"], "Night Guard");

    store
        .set_editing_target(Some(DraftId::new("dangling")))
        .unwrap();
    let editing: Value = persisted(&storage).unwrap()["state"]["editingGuard"].clone();
    assert_eq!(editing, serde_json::json!({ "id": "dangling" }));
    let reopened: DraftStore<Guard, MemoryStorage> = open_store(&storage);
    assert_eq!(reopened.editing_target(), Some(&DraftId::new("dangling")));
}

#[test]
fn test_reads_slot_written_by_the_web_client() {
    let mut storage: MemoryStorage = MemoryStorage::new();
    storage
        .set(
            DEFAULT_DRAFT_SLOT,
            r#"{"state":{"guards":[{"id":"g-1","description":"Un-Armed","numberOfPersons":4}],"editingGuard":{"id":"g-1","description":"Un-Armed","numberOfPersons":4}},"version":0}"#,
        )
        .unwrap();

    let store: DraftStore<Guard, MemoryStorage> = open_store(&storage);

    assert_eq!(store.len(), 1);
    assert_eq!(store.records()[0].record.description, "Un-Armed");
    assert_eq!(store.editing_target(), Some(&DraftId::new("g-1")));
}

#[test]
fn test_add_add_delete_keeps_relative_order() {
    let storage: MemoryStorage = MemoryStorage::new();
    let mut store: DraftStore<Guard, MemoryStorage> = open_store(&storage);
    assert!(store.is_empty());

    let first: DraftId = store.add(create_test_guard("Supervisor", 1)).unwrap();
    assert_eq!(store.len(), 1);

    let second: DraftId = store.add(create_test_guard("Un-Armed", 2)).unwrap();
    assert_eq!(store.len(), 2);
    assert_eq!(store.records()[0].id, first);

    store.delete(&first).unwrap();
    assert_eq!(store.len(), 1);
    assert_eq!(store.records()[0].id, second);
    assert_eq!(store.records()[0].record.description, "Un-Armed");
}

#[test]
fn test_ids_stay_unique_across_mixed_mutations() {
    let storage: MemoryStorage = MemoryStorage::new();
    let mut store: DraftStore<Guard, MemoryStorage> = open_store(&storage);
    let mut ids: Vec<DraftId> = Vec::new();

    for round in 0..20_u32 {
        let id: DraftId = store.add(create_test_guard("Guard", round + 1)).unwrap();
        if round % 3 == 0 {
            store.delete(&id).unwrap();
        } else if round % 3 == 1 {
            store
                .update(Draft {
                    id: id.clone(),
                    record: create_test_guard("Edited", round),
                })
                .unwrap();
        }
        ids.push(id);
    }

    let mut unique: Vec<DraftId> = ids.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), ids.len());

    let live: Vec<&DraftId> = store.records().iter().map(|draft| &draft.id).collect();
    let expected: Vec<&DraftId> = ids
        .iter()
        .enumerate()
        .filter(|(round, _)| round % 3 != 0)
        .map(|(_, id)| id)
        .collect();
    assert_eq!(live, expected);
}
