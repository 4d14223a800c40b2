//! ItemGroup Entity
//!
//! A purchasable model within a type ("ThinkPad T14 gen 3"). Individual
//! physical units are `Item` rows pointing here.

use kernel::role::RoleSet;
use serde::Serialize;

use crate::domain::archive::{ArchiveEntity, BlockingRef, EntityKind, ParentRef};

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ItemGroup {
    pub item_group_id: i32,
    pub item_group_name: String,
    pub item_type_id: i32,
    pub price: f64,
    pub quantity: i32,
}

/// Fields for creating or updating an item group
#[derive(Debug, Clone)]
pub struct NewItemGroup {
    pub item_group_name: String,
    pub item_type_id: i32,
    pub price: f64,
    pub quantity: i32,
}

impl ArchiveEntity for ItemGroup {
    const KIND: EntityKind = EntityKind::ItemGroup;
    const LIVE_TABLE: &'static str = "item_groups";
    const ARCHIVE_TABLE: &'static str = "archive_item_groups";
    const ID_COLUMN: &'static str = "item_group_id";
    const COLUMNS: &'static [&'static str] = &[
        "item_group_id",
        "item_group_name",
        "item_type_id",
        "price",
        "quantity",
    ];

    const BLOCKING_REFS: &'static [BlockingRef] = &[
        BlockingRef {
            table: "items",
            column: "item_group_id",
        },
        BlockingRef {
            table: "requests",
            column: "item_group_id",
        },
    ];
    const RESTORE_PARENTS: &'static [ParentRef] = &[ParentRef {
        fk_column: "item_type_id",
        parent_table: "item_types",
        parent_id_column: "item_type_id",
    }];

    const READ_ROLES: RoleSet = RoleSet::ALL;
    const MUTATE_ROLES: RoleSet = RoleSet::STAFF;

    fn id(&self) -> i32 {
        self.item_group_id
    }
}
