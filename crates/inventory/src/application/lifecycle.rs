//! Lifecycle Use Case
//!
//! The generic read/archive/restore/purge surface, shared by all six
//! entity kinds. Validation that needs no database access (the archive
//! note) happens here, before any transaction is opened.

use std::sync::Arc;

use crate::domain::archive::{ArchiveEntity, ArchiveNote, Archived};
use crate::domain::repository::ArchiveStore;
use crate::error::{InventoryError, InventoryResult};

/// Generic entity lifecycle use case
pub struct LifecycleUseCase<S>
where
    S: ArchiveStore,
{
    store: Arc<S>,
}

impl<S> LifecycleUseCase<S>
where
    S: ArchiveStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn list<E: ArchiveEntity>(&self) -> InventoryResult<Vec<E>> {
        self.store.list_live::<E>().await
    }

    pub async fn get<E: ArchiveEntity>(&self, id: i32) -> InventoryResult<E> {
        self.store
            .find_live::<E>(id)
            .await?
            .ok_or(InventoryError::NotFound { kind: E::KIND, id })
    }

    /// Archive a live row; the note is validated before anything is
    /// touched
    pub async fn archive<E: ArchiveEntity>(
        &self,
        id: i32,
        raw_note: String,
    ) -> InventoryResult<Archived<E>> {
        let note = ArchiveNote::new(raw_note)?;
        self.store.archive::<E>(id, &note).await
    }

    pub async fn restore<E: ArchiveEntity>(&self, id: i32) -> InventoryResult<E> {
        self.store.restore::<E>(id).await
    }

    pub async fn purge<E: ArchiveEntity>(&self, id: i32) -> InventoryResult<()> {
        self.store.purge::<E>(id).await
    }

    pub async fn list_archived<E: ArchiveEntity>(&self) -> InventoryResult<Vec<Archived<E>>> {
        self.store.list_archived::<E>().await
    }

    pub async fn get_archived<E: ArchiveEntity>(&self, id: i32) -> InventoryResult<Archived<E>> {
        self.store
            .find_archived::<E>(id)
            .await?
            .ok_or(InventoryError::ArchiveNotFound { kind: E::KIND, id })
    }
}
