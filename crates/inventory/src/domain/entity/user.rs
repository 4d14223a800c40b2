//! User Entity
//!
//! The API representation carries profile fields only. The credential
//! columns (password hash, TOTP state, lockout counters) live in the
//! same table and are listed in `COLUMNS` so the archive engine moves
//! them along, but they never appear in a response body.

use kernel::role::{Role, RoleSet};
use serde::Serialize;

use crate::domain::archive::{ArchiveEntity, BlockingRef, EntityKind, ParentRef};

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: i32,
    pub user_name: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
}

/// A fully prepared user row ready for insertion
///
/// The password has already been policy-checked and hashed by the
/// register-user use case; this type never carries clear text.
#[derive(Debug, Clone)]
pub struct NewUserRecord {
    pub user_name: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub password_hash: String,
}

/// Profile fields an update may change; credentials are out of scope
#[derive(Debug, Clone)]
pub struct UserProfileUpdate {
    pub user_name: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
}

impl ArchiveEntity for User {
    const KIND: EntityKind = EntityKind::User;
    const LIVE_TABLE: &'static str = "users";
    const ARCHIVE_TABLE: &'static str = "archive_users";
    const ID_COLUMN: &'static str = "user_id";
    const COLUMNS: &'static [&'static str] = &[
        "user_id",
        "user_name",
        "first_name",
        "last_name",
        "role",
        "password_hash",
        "totp_secret",
        "totp_enabled",
        "login_failed_count",
        "locked_until",
    ];

    const BLOCKING_REFS: &'static [BlockingRef] = &[
        BlockingRef {
            table: "loans",
            column: "borrower_id",
        },
        BlockingRef {
            table: "loans",
            column: "approver_id",
        },
        BlockingRef {
            table: "requests",
            column: "requester_id",
        },
    ];
    const RESTORE_PARENTS: &'static [ParentRef] = &[];

    const READ_ROLES: RoleSet = RoleSet::STAFF;
    const MUTATE_ROLES: RoleSet = RoleSet::ADMIN_ONLY;

    fn id(&self) -> i32 {
        self.user_id
    }
}
