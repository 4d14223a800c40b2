//! Archive Descriptors
//!
//! One generic engine moves rows between live and archive tables; the
//! per-entity differences (table names, columns, referential edges, who
//! may do what) are declared here as constants on the [`ArchiveEntity`]
//! trait. Adding an archivable entity means writing one descriptor impl,
//! not another engine.

use std::fmt;

use chrono::{DateTime, Utc};
use kernel::role::RoleSet;
use serde::Serialize;
use sqlx::Row;
use sqlx::postgres::PgRow;

use crate::error::{InventoryError, InventoryResult};

/// The six archivable entity kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    ItemType,
    ItemGroup,
    Item,
    User,
    Loan,
    Request,
}

impl EntityKind {
    /// PascalCase name used in routes and error messages
    pub const fn as_str(&self) -> &'static str {
        match self {
            EntityKind::ItemType => "ItemType",
            EntityKind::ItemGroup => "ItemGroup",
            EntityKind::Item => "Item",
            EntityKind::User => "User",
            EntityKind::Loan => "Loan",
            EntityKind::Request => "Request",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mandatory note recorded when a row is archived
///
/// Whitespace-only notes are rejected; the accepted note is stored
/// verbatim, untrimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveNote(String);

impl ArchiveNote {
    pub fn new(raw: String) -> InventoryResult<Self> {
        if raw.trim().is_empty() {
            return Err(InventoryError::EmptyArchiveNote);
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A live table whose rows may point at the entity being archived
///
/// Any matching row blocks the archival.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockingRef {
    /// Referencing live table
    pub table: &'static str,
    /// FK column in that table
    pub column: &'static str,
}

/// An FK column on the entity whose referenced live row must exist
/// before the entity can be restored
///
/// A NULL value in the column satisfies the check; a set value must
/// resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParentRef {
    /// FK column on the entity's own table
    pub fk_column: &'static str,
    /// Referenced live table
    pub parent_table: &'static str,
    /// Id column of the referenced table
    pub parent_id_column: &'static str,
}

/// Per-entity archive descriptor
///
/// `COLUMNS` is the full persisted column list, including columns the
/// API representation does not expose (the credential columns on users);
/// the engine copies every column between the live and archive tables so
/// nothing is lost across an archive/restore cycle.
pub trait ArchiveEntity:
    Serialize + for<'r> sqlx::FromRow<'r, PgRow> + Send + Sync + Unpin + 'static
{
    const KIND: EntityKind;
    const LIVE_TABLE: &'static str;
    const ARCHIVE_TABLE: &'static str;
    const ID_COLUMN: &'static str;
    const COLUMNS: &'static [&'static str];
    const BLOCKING_REFS: &'static [BlockingRef];
    const RESTORE_PARENTS: &'static [ParentRef];
    /// Roles allowed to read this kind
    const READ_ROLES: RoleSet;
    /// Roles allowed to create/update/archive/restore/purge this kind
    const MUTATE_ROLES: RoleSet;

    fn id(&self) -> i32;
}

/// An entity as it sits in its archive table
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Archived<T> {
    #[serde(flatten)]
    pub entity: T,
    pub deleted_at: DateTime<Utc>,
    pub archive_note: String,
}

// Manual impl so any descriptor's row shape extends to its archived
// shape without a second FromRow derive per entity.
impl<'r, T> sqlx::FromRow<'r, PgRow> for Archived<T>
where
    T: sqlx::FromRow<'r, PgRow>,
{
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            entity: T::from_row(row)?,
            deleted_at: row.try_get("deleted_at")?,
            archive_note: row.try_get("archive_note")?,
        })
    }
}
