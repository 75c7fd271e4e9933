// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Durable slot storage on `SQLite`.
//!
//! Each slot is one row of the `storage_slots` table. The draft store writes
//! its whole envelope to one slot and the credential source reads the bearer
//! token from another, so a restart of the host process loses neither.
//!
//! ## Testing
//!
//! `SqliteSlotStorage::new_in_memory()` gives every caller its own shared
//! in-memory database, so tests need no filesystem and never see each
//! other's slots.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::prelude::*;
use diesel::upsert::excluded;
use guardpost::{SlotStorage, StorageError};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::debug;

mod backend;
mod data_models;
mod diesel_schema;
mod error;

#[cfg(test)]
mod tests;

pub use data_models::SlotRow;
pub use error::PersistenceError;

use data_models::NewSlot;
use diesel_schema::storage_slots;

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID, so
/// in-memory databases never collide.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Slot storage persisted in a `SQLite` database.
pub struct SqliteSlotStorage {
    conn: SqliteConnection,
}

impl std::fmt::Debug for SqliteSlotStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteSlotStorage").finish_non_exhaustive()
    }
}

impl SqliteSlotStorage {
    /// Creates slot storage on a fresh in-memory database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String =
            format!("file:guardpost_memdb_{db_id}?mode=memory&cache=shared");

        let conn: SqliteConnection = backend::initialize_database(&shared_memory_url)?;

        Ok(Self { conn })
    }

    /// Creates slot storage on a database file, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError(String::from("Invalid database path"))
        })?;

        let mut conn: SqliteConnection = backend::initialize_database(path_str)?;
        backend::enable_wal_mode(&mut conn)?;

        Ok(Self { conn })
    }

    /// Reads one slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn read_slot(&mut self, slot: &str) -> Result<Option<SlotRow>, PersistenceError> {
        Ok(storage_slots::table
            .find(slot)
            .select(SlotRow::as_select())
            .first(&mut self.conn)
            .optional()?)
    }

    /// Writes one slot, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the timestamp cannot be formatted or the write fails.
    pub fn write_slot(&mut self, slot: &str, value: &str) -> Result<(), PersistenceError> {
        let updated_at: String = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .map_err(|e| PersistenceError::QueryFailed(e.to_string()))?;

        diesel::insert_into(storage_slots::table)
            .values(&NewSlot {
                slot,
                value,
                updated_at: &updated_at,
            })
            .on_conflict(storage_slots::slot)
            .do_update()
            .set((
                storage_slots::value.eq(excluded(storage_slots::value)),
                storage_slots::updated_at.eq(excluded(storage_slots::updated_at)),
            ))
            .execute(&mut self.conn)?;

        debug!(slot, bytes = value.len(), "Slot written");
        Ok(())
    }

    /// Deletes one slot. Returns whether it existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_slot(&mut self, slot: &str) -> Result<bool, PersistenceError> {
        let deleted: usize =
            diesel::delete(storage_slots::table.find(slot)).execute(&mut self.conn)?;
        debug!(slot, deleted, "Slot removed");
        Ok(deleted > 0)
    }

    /// Names of all stored slots, sorted.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn slot_names(&mut self) -> Result<Vec<String>, PersistenceError> {
        Ok(storage_slots::table
            .select(storage_slots::slot)
            .order(storage_slots::slot.asc())
            .load(&mut self.conn)?)
    }
}

impl SlotStorage for SqliteSlotStorage {
    fn get(&mut self, slot: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_slot(slot)?.map(|row| row.value))
    }

    fn set(&mut self, slot: &str, value: &str) -> Result<(), StorageError> {
        self.write_slot(slot, value).map_err(StorageError::from)
    }

    fn remove(&mut self, slot: &str) -> Result<(), StorageError> {
        self.delete_slot(slot)?;
        Ok(())
    }
}
