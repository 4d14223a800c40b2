//! Generic Archive Engine (PostgreSQL)
//!
//! One implementation moves rows of any [`ArchiveEntity`] between its
//! live and archive tables. Every transition runs in a single
//! transaction with a `FOR UPDATE` lock on the affected row, so two
//! concurrent archives of the same id serialize and the loser observes
//! NotFound. There is no in-memory locking and no retry.
//!
//! All SQL is assembled from the descriptor's `&'static str` constants;
//! no request data is ever interpolated into statement text.

use chrono::Utc;

use crate::domain::archive::{ArchiveEntity, ArchiveNote, Archived};
use crate::domain::repository::ArchiveStore;
use crate::error::{InventoryError, InventoryResult};
use crate::infra::postgres::PgInventoryStore;

/// Statement builders, split out so statement text is unit-testable
pub(crate) mod sql {
    use crate::domain::archive::{ArchiveEntity, BlockingRef, ParentRef};

    fn columns<E: ArchiveEntity>() -> String {
        E::COLUMNS.join(", ")
    }

    pub fn select_live<E: ArchiveEntity>() -> String {
        format!(
            "SELECT {} FROM {} WHERE {} = $1",
            columns::<E>(),
            E::LIVE_TABLE,
            E::ID_COLUMN
        )
    }

    pub fn select_live_for_update<E: ArchiveEntity>() -> String {
        format!("{} FOR UPDATE", select_live::<E>())
    }

    pub fn list_live<E: ArchiveEntity>() -> String {
        format!(
            "SELECT {} FROM {} ORDER BY {}",
            columns::<E>(),
            E::LIVE_TABLE,
            E::ID_COLUMN
        )
    }

    pub fn select_archived<E: ArchiveEntity>() -> String {
        format!(
            "SELECT {}, deleted_at, archive_note FROM {} WHERE {} = $1",
            columns::<E>(),
            E::ARCHIVE_TABLE,
            E::ID_COLUMN
        )
    }

    pub fn select_archived_for_update<E: ArchiveEntity>() -> String {
        format!("{} FOR UPDATE", select_archived::<E>())
    }

    pub fn list_archived<E: ArchiveEntity>() -> String {
        format!(
            "SELECT {}, deleted_at, archive_note FROM {} ORDER BY {}",
            columns::<E>(),
            E::ARCHIVE_TABLE,
            E::ID_COLUMN
        )
    }

    /// Does any live row reference the entity being archived?
    pub fn blocking_ref_exists(r: &BlockingRef) -> String {
        format!("SELECT 1 FROM {} WHERE {} = $1 LIMIT 1", r.table, r.column)
    }

    /// Copy the live row into the archive table with timestamp and note
    pub fn insert_archive<E: ArchiveEntity>() -> String {
        format!(
            "INSERT INTO {} ({}, deleted_at, archive_note) \
             SELECT {}, $2, $3 FROM {} WHERE {} = $1",
            E::ARCHIVE_TABLE,
            columns::<E>(),
            columns::<E>(),
            E::LIVE_TABLE,
            E::ID_COLUMN
        )
    }

    pub fn delete_live<E: ArchiveEntity>() -> String {
        format!("DELETE FROM {} WHERE {} = $1", E::LIVE_TABLE, E::ID_COLUMN)
    }

    /// TRUE when the archived row's FK is NULL or its live parent exists
    pub fn parent_satisfied<E: ArchiveEntity>(p: &ParentRef) -> String {
        format!(
            "SELECT (a.{fk} IS NULL) OR EXISTS \
             (SELECT 1 FROM {pt} p WHERE p.{pid} = a.{fk}) \
             FROM {at} a WHERE a.{id} = $1",
            fk = p.fk_column,
            pt = p.parent_table,
            pid = p.parent_id_column,
            at = E::ARCHIVE_TABLE,
            id = E::ID_COLUMN
        )
    }

    pub fn live_id_taken<E: ArchiveEntity>() -> String {
        format!(
            "SELECT 1 FROM {} WHERE {} = $1 LIMIT 1",
            E::LIVE_TABLE,
            E::ID_COLUMN
        )
    }

    /// Copy the archived row back into the live table under its original id
    pub fn insert_restored<E: ArchiveEntity>() -> String {
        format!(
            "INSERT INTO {} ({}) SELECT {} FROM {} WHERE {} = $1",
            E::LIVE_TABLE,
            columns::<E>(),
            columns::<E>(),
            E::ARCHIVE_TABLE,
            E::ID_COLUMN
        )
    }

    /// Keep the serial sequence ahead of explicitly inserted ids.
    /// Runs inside the restore transaction so a rollback cannot leave
    /// the sequence pointing at a handed-out id.
    pub fn resync_sequence<E: ArchiveEntity>() -> String {
        format!(
            "SELECT setval(pg_get_serial_sequence('{t}', '{id}'), \
             (SELECT COALESCE(MAX({id}), 1) FROM {t}))",
            t = E::LIVE_TABLE,
            id = E::ID_COLUMN
        )
    }

    pub fn delete_archived<E: ArchiveEntity>() -> String {
        format!(
            "DELETE FROM {} WHERE {} = $1",
            E::ARCHIVE_TABLE,
            E::ID_COLUMN
        )
    }
}

impl ArchiveStore for PgInventoryStore {
    async fn archive<E: ArchiveEntity>(
        &self,
        id: i32,
        note: &ArchiveNote,
    ) -> InventoryResult<Archived<E>> {
        let mut tx = self.pool().begin().await?;

        let live: Option<E> = sqlx::query_as(&sql::select_live_for_update::<E>())
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        if live.is_none() {
            return Err(InventoryError::NotFound { kind: E::KIND, id });
        }

        for blocking in E::BLOCKING_REFS {
            let referenced: Option<i32> = sqlx::query_scalar(&sql::blocking_ref_exists(blocking))
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
            if referenced.is_some() {
                return Err(InventoryError::StillReferenced {
                    kind: E::KIND,
                    id,
                    referencing: blocking.table,
                });
            }
        }

        sqlx::query(&sql::insert_archive::<E>())
            .bind(id)
            .bind(Utc::now())
            .bind(note.as_str())
            .execute(&mut *tx)
            .await?;
        sqlx::query(&sql::delete_live::<E>())
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let archived: Archived<E> = sqlx::query_as(&sql::select_archived::<E>())
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::info!(kind = %E::KIND, id, "Row archived");
        Ok(archived)
    }

    async fn restore<E: ArchiveEntity>(&self, id: i32) -> InventoryResult<E> {
        let mut tx = self.pool().begin().await?;

        let archived: Option<Archived<E>> =
            sqlx::query_as(&sql::select_archived_for_update::<E>())
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        if archived.is_none() {
            return Err(InventoryError::ArchiveNotFound { kind: E::KIND, id });
        }

        for parent in E::RESTORE_PARENTS {
            let satisfied: bool = sqlx::query_scalar(&sql::parent_satisfied::<E>(parent))
                .bind(id)
                .fetch_one(&mut *tx)
                .await?;
            if !satisfied {
                return Err(InventoryError::MissingParent {
                    kind: E::KIND,
                    id,
                    parent: parent.parent_table,
                });
            }
        }

        let taken: Option<i32> = sqlx::query_scalar(&sql::live_id_taken::<E>())
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        if taken.is_some() {
            return Err(InventoryError::LiveIdCollision { kind: E::KIND, id });
        }

        sqlx::query(&sql::insert_restored::<E>())
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query(&sql::resync_sequence::<E>())
            .execute(&mut *tx)
            .await?;
        sqlx::query(&sql::delete_archived::<E>())
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let restored: E = sqlx::query_as(&sql::select_live::<E>())
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::info!(kind = %E::KIND, id, "Row restored from archive");
        Ok(restored)
    }

    async fn purge<E: ArchiveEntity>(&self, id: i32) -> InventoryResult<()> {
        let result = sqlx::query(&sql::delete_archived::<E>())
            .bind(id)
            .execute(self.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(InventoryError::ArchiveNotFound { kind: E::KIND, id });
        }

        tracing::info!(kind = %E::KIND, id, "Archived row purged");
        Ok(())
    }

    async fn find_live<E: ArchiveEntity>(&self, id: i32) -> InventoryResult<Option<E>> {
        let row = sqlx::query_as(&sql::select_live::<E>())
            .bind(id)
            .fetch_optional(self.pool())
            .await?;
        Ok(row)
    }

    async fn list_live<E: ArchiveEntity>(&self) -> InventoryResult<Vec<E>> {
        let rows = sqlx::query_as(&sql::list_live::<E>())
            .fetch_all(self.pool())
            .await?;
        Ok(rows)
    }

    async fn find_archived<E: ArchiveEntity>(
        &self,
        id: i32,
    ) -> InventoryResult<Option<Archived<E>>> {
        let row = sqlx::query_as(&sql::select_archived::<E>())
            .bind(id)
            .fetch_optional(self.pool())
            .await?;
        Ok(row)
    }

    async fn list_archived<E: ArchiveEntity>(&self) -> InventoryResult<Vec<Archived<E>>> {
        let rows = sqlx::query_as(&sql::list_archived::<E>())
            .fetch_all(self.pool())
            .await?;
        Ok(rows)
    }
}
