//! Item Entity
//!
//! One physical unit with a serial number.

use kernel::role::RoleSet;
use serde::Serialize;

use crate::domain::archive::{ArchiveEntity, BlockingRef, EntityKind, ParentRef};

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub item_id: i32,
    pub item_group_id: i32,
    pub serial_number: String,
}

/// Fields for creating or updating an item
#[derive(Debug, Clone)]
pub struct NewItem {
    pub item_group_id: i32,
    pub serial_number: String,
}

impl ArchiveEntity for Item {
    const KIND: EntityKind = EntityKind::Item;
    const LIVE_TABLE: &'static str = "items";
    const ARCHIVE_TABLE: &'static str = "archive_items";
    const ID_COLUMN: &'static str = "item_id";
    const COLUMNS: &'static [&'static str] = &["item_id", "item_group_id", "serial_number"];

    const BLOCKING_REFS: &'static [BlockingRef] = &[BlockingRef {
        table: "loans",
        column: "item_id",
    }];
    const RESTORE_PARENTS: &'static [ParentRef] = &[ParentRef {
        fk_column: "item_group_id",
        parent_table: "item_groups",
        parent_id_column: "item_group_id",
    }];

    const READ_ROLES: RoleSet = RoleSet::ALL;
    const MUTATE_ROLES: RoleSet = RoleSet::STAFF;

    fn id(&self) -> i32 {
        self.item_id
    }
}
