// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;

use crate::diesel_schema::storage_slots;

/// A stored slot as read back from the database.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable)]
#[diesel(table_name = storage_slots)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SlotRow {
    pub slot: String,
    pub value: String,
    /// RFC 3339 timestamp of the last write.
    pub updated_at: String,
}

#[derive(Insertable)]
#[diesel(table_name = storage_slots)]
pub struct NewSlot<'a> {
    pub slot: &'a str,
    pub value: &'a str,
    pub updated_at: &'a str,
}
