//! Repository Traits
//!
//! Interfaces for inventory persistence. Implementations are in the
//! infrastructure layer.

use crate::domain::archive::{ArchiveEntity, ArchiveNote, Archived};
use crate::domain::entity::{
    Item, ItemGroup, ItemType, Loan, NewItem, NewItemGroup, NewItemType, NewLoan, NewRequest,
    NewUserRecord, Request, User, UserProfileUpdate,
};
use crate::error::InventoryResult;

/// Generic archive engine, one implementation for all six kinds
#[trait_variant::make(Send)]
pub trait ArchiveStore {
    /// Move a live row into its archive table
    async fn archive<E: ArchiveEntity>(
        &self,
        id: i32,
        note: &ArchiveNote,
    ) -> InventoryResult<Archived<E>>;

    /// Move an archived row back into its live table under its original id
    async fn restore<E: ArchiveEntity>(&self, id: i32) -> InventoryResult<E>;

    /// Permanently delete an archived row
    async fn purge<E: ArchiveEntity>(&self, id: i32) -> InventoryResult<()>;

    async fn find_live<E: ArchiveEntity>(&self, id: i32) -> InventoryResult<Option<E>>;

    async fn list_live<E: ArchiveEntity>(&self) -> InventoryResult<Vec<E>>;

    async fn find_archived<E: ArchiveEntity>(&self, id: i32)
    -> InventoryResult<Option<Archived<E>>>;

    async fn list_archived<E: ArchiveEntity>(&self) -> InventoryResult<Vec<Archived<E>>>;
}

/// Typed per-entity create/update repository
///
/// Create always yields a fresh serial id; update never changes the id.
#[trait_variant::make(InventoryRepository: Send)]
pub trait LocalInventoryRepository {
    async fn create_item_type(&self, new: NewItemType) -> InventoryResult<ItemType>;
    async fn update_item_type(&self, id: i32, new: NewItemType) -> InventoryResult<ItemType>;

    async fn create_item_group(&self, new: NewItemGroup) -> InventoryResult<ItemGroup>;
    async fn update_item_group(&self, id: i32, new: NewItemGroup) -> InventoryResult<ItemGroup>;

    async fn create_item(&self, new: NewItem) -> InventoryResult<Item>;
    async fn update_item(&self, id: i32, new: NewItem) -> InventoryResult<Item>;

    async fn create_user(&self, new: NewUserRecord) -> InventoryResult<User>;
    async fn update_user(&self, id: i32, update: UserProfileUpdate) -> InventoryResult<User>;

    async fn create_loan(&self, new: NewLoan) -> InventoryResult<Loan>;
    async fn update_loan(&self, id: i32, new: NewLoan) -> InventoryResult<Loan>;

    async fn create_request(&self, new: NewRequest) -> InventoryResult<Request>;
    async fn update_request(&self, id: i32, new: NewRequest) -> InventoryResult<Request>;

    /// Whether any live user rows exist (admin bootstrap check)
    async fn any_users(&self) -> InventoryResult<bool>;
}
