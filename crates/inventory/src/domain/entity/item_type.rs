//! ItemType Entity
//!
//! Top of the catalog hierarchy ("Laptop", "Skærm", ...).

use kernel::role::RoleSet;
use serde::Serialize;

use crate::domain::archive::{ArchiveEntity, BlockingRef, EntityKind, ParentRef};

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ItemType {
    pub item_type_id: i32,
    pub item_type_name: String,
}

/// Fields for creating or updating an item type
#[derive(Debug, Clone)]
pub struct NewItemType {
    pub item_type_name: String,
}

impl ArchiveEntity for ItemType {
    const KIND: EntityKind = EntityKind::ItemType;
    const LIVE_TABLE: &'static str = "item_types";
    const ARCHIVE_TABLE: &'static str = "archive_item_types";
    const ID_COLUMN: &'static str = "item_type_id";
    const COLUMNS: &'static [&'static str] = &["item_type_id", "item_type_name"];

    const BLOCKING_REFS: &'static [BlockingRef] = &[BlockingRef {
        table: "item_groups",
        column: "item_type_id",
    }];
    const RESTORE_PARENTS: &'static [ParentRef] = &[];

    const READ_ROLES: RoleSet = RoleSet::ALL;
    const MUTATE_ROLES: RoleSet = RoleSet::STAFF;

    fn id(&self) -> i32 {
        self.item_type_id
    }
}
