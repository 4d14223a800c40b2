//! Request Entity
//!
//! A user asking the department for units of an item group.

use chrono::{DateTime, Utc};
use kernel::role::RoleSet;
use serde::Serialize;

use crate::domain::archive::{ArchiveEntity, BlockingRef, EntityKind, ParentRef};

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    pub request_id: i32,
    pub item_group_id: i32,
    pub requester_id: i32,
    pub quantity: i32,
    pub message: Option<String>,
    pub request_date: DateTime<Utc>,
}

/// Fields for creating or updating a request
#[derive(Debug, Clone)]
pub struct NewRequest {
    pub item_group_id: i32,
    pub requester_id: i32,
    pub quantity: i32,
    pub message: Option<String>,
    pub request_date: DateTime<Utc>,
}

impl ArchiveEntity for Request {
    const KIND: EntityKind = EntityKind::Request;
    const LIVE_TABLE: &'static str = "requests";
    const ARCHIVE_TABLE: &'static str = "archive_requests";
    const ID_COLUMN: &'static str = "request_id";
    const COLUMNS: &'static [&'static str] = &[
        "request_id",
        "item_group_id",
        "requester_id",
        "quantity",
        "message",
        "request_date",
    ];

    const BLOCKING_REFS: &'static [BlockingRef] = &[];
    const RESTORE_PARENTS: &'static [ParentRef] = &[
        ParentRef {
            fk_column: "item_group_id",
            parent_table: "item_groups",
            parent_id_column: "item_group_id",
        },
        ParentRef {
            fk_column: "requester_id",
            parent_table: "users",
            parent_id_column: "user_id",
        },
    ];

    const READ_ROLES: RoleSet = RoleSet::STAFF;
    const MUTATE_ROLES: RoleSet = RoleSet::STAFF;

    fn id(&self) -> i32 {
        self.request_id
    }
}
