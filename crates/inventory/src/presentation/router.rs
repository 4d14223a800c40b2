//! Inventory Router
//!
//! Routes per entity kind `{E}` (ItemType, ItemGroup, Item, User, Loan,
//! Request), all expected to sit behind the bearer-token middleware:
//!
//! - `GET    /{E}` / `POST /{E}` - list live / create
//! - `GET    /{E}/{id}` / `PUT` / `DELETE` - fetch / update / archive
//! - `POST   /{E}/RestoreById/{id}` - restore
//! - `GET    /Archive_{E}` - list archived
//! - `GET    /Archive_{E}/{id}` / `DELETE` - fetch archived / purge
//! - `POST   /Archive_{E}/RestoreById/{id}` - restore

use std::sync::Arc;

use axum::Router;
use axum::routing::{MethodRouter, get, post};

use crate::application::LifecycleUseCase;
use crate::domain::archive::ArchiveEntity;
use crate::domain::entity::{Item, ItemGroup, ItemType, Loan, Request, User};
use crate::domain::repository::{ArchiveStore, InventoryRepository};
use crate::presentation::handlers;

/// Shared state for the inventory routes
pub struct InventoryAppState<S> {
    store: Arc<S>,
}

// Manual impl: derive(Clone) would require S: Clone, but only the Arc
// is cloned.
impl<S> Clone for InventoryAppState<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

impl<S> InventoryAppState<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub(crate) fn repo(&self) -> &S {
        &self.store
    }

    pub(crate) fn store_arc(&self) -> Arc<S> {
        self.store.clone()
    }
}

impl<S> InventoryAppState<S>
where
    S: ArchiveStore,
{
    pub(crate) fn lifecycle(&self) -> LifecycleUseCase<S> {
        LifecycleUseCase::new(self.store.clone())
    }
}

/// The lifecycle routes shared by every kind; the typed create and
/// update handlers ride in on the collection and item method routers so
/// each path is registered exactly once.
fn entity_routes<E, S>(
    collection: MethodRouter<InventoryAppState<S>>,
    item: MethodRouter<InventoryAppState<S>>,
) -> Router<InventoryAppState<S>>
where
    E: ArchiveEntity,
    S: ArchiveStore + Send + Sync + 'static,
{
    let kind = E::KIND.as_str();

    Router::new()
        .route(&format!("/{kind}"), collection)
        .route(&format!("/{kind}/{{id}}"), item)
        .route(
            &format!("/{kind}/RestoreById/{{id}}"),
            post(handlers::restore_entity::<E, S>),
        )
        .route(
            &format!("/Archive_{kind}"),
            get(handlers::list_archived::<E, S>),
        )
        .route(
            &format!("/Archive_{kind}/{{id}}"),
            get(handlers::get_archived::<E, S>).delete(handlers::purge_entity::<E, S>),
        )
        .route(
            &format!("/Archive_{kind}/RestoreById/{{id}}"),
            post(handlers::restore_entity::<E, S>),
        )
}

/// Build the inventory router
pub fn inventory_router<S>(state: InventoryAppState<S>) -> Router
where
    S: ArchiveStore + InventoryRepository + Send + Sync + 'static,
{
    Router::new()
        .merge(entity_routes::<ItemType, S>(
            get(handlers::list_live::<ItemType, S>).post(handlers::create_item_type::<S>),
            get(handlers::get_live::<ItemType, S>)
                .put(handlers::update_item_type::<S>)
                .delete(handlers::archive_entity::<ItemType, S>),
        ))
        .merge(entity_routes::<ItemGroup, S>(
            get(handlers::list_live::<ItemGroup, S>).post(handlers::create_item_group::<S>),
            get(handlers::get_live::<ItemGroup, S>)
                .put(handlers::update_item_group::<S>)
                .delete(handlers::archive_entity::<ItemGroup, S>),
        ))
        .merge(entity_routes::<Item, S>(
            get(handlers::list_live::<Item, S>).post(handlers::create_item::<S>),
            get(handlers::get_live::<Item, S>)
                .put(handlers::update_item::<S>)
                .delete(handlers::archive_entity::<Item, S>),
        ))
        .merge(entity_routes::<User, S>(
            get(handlers::list_live::<User, S>).post(handlers::create_user::<S>),
            get(handlers::get_live::<User, S>)
                .put(handlers::update_user::<S>)
                .delete(handlers::archive_entity::<User, S>),
        ))
        .merge(entity_routes::<Loan, S>(
            get(handlers::list_live::<Loan, S>).post(handlers::create_loan::<S>),
            get(handlers::get_live::<Loan, S>)
                .put(handlers::update_loan::<S>)
                .delete(handlers::archive_entity::<Loan, S>),
        ))
        .merge(entity_routes::<Request, S>(
            get(handlers::list_live::<Request, S>).post(handlers::create_request::<S>),
            get(handlers::get_live::<Request, S>)
                .put(handlers::update_request::<S>)
                .delete(handlers::archive_entity::<Request, S>),
        ))
        .with_state(state)
}
