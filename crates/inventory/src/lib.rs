//! Inventory Backend Module
//!
//! Archivable inventory entities (ItemType, ItemGroup, Item, User, Loan,
//! Request) with a generalized soft-delete archive engine.
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, archive descriptors, repository traits
//! - `application/` - Use cases
//! - `infra/` - PostgreSQL implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Archive model
//! Deleting an entity never destroys it: the row moves into an archive
//! twin table together with a timestamp and a mandatory note. Restore
//! moves it back under its original id; purge from the archive is the
//! only irreversible operation. Both transitions are single transactions
//! guarded by row locks and referential checks.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use error::{InventoryError, InventoryResult};
pub use infra::postgres::PgInventoryStore;
pub use presentation::router::{InventoryAppState, inventory_router};
