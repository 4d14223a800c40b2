//! HTTP Handlers
//!
//! The lifecycle handlers are generic over the entity kind: the same
//! seven functions serve all six entities, parameterized by the
//! descriptor. Create and update need typed bodies and therefore get one
//! handler per entity. Every handler checks the descriptor's allow-list
//! before doing anything else.

use axum::Json;
use axum::extract::{Extension, Path, State};

use crate::application::{RegisterUserUseCase, RegisterUserInput};
use crate::domain::archive::{ArchiveEntity, Archived};
use crate::domain::entity::{Item, ItemGroup, ItemType, Loan, Request, User};
use crate::domain::repository::{ArchiveStore, InventoryRepository};
use crate::presentation::dto::{
    ArchiveRequest, CreateUserPayload, ItemGroupPayload, ItemPayload, ItemTypePayload, LoanPayload,
    RequestPayload, UpdateUserPayload,
};
use crate::presentation::router::InventoryAppState;
use kernel::error::app_error::{AppError, AppResult};
use kernel::principal::CurrentUser;

// ============================================================================
// Generic lifecycle handlers
// ============================================================================

pub async fn list_live<E, S>(
    State(state): State<InventoryAppState<S>>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<E>>>
where
    E: ArchiveEntity,
    S: ArchiveStore + Send + Sync + 'static,
{
    user.require(E::READ_ROLES)?;
    let rows = state.lifecycle().list::<E>().await?;
    Ok(Json(rows))
}

pub async fn get_live<E, S>(
    State(state): State<InventoryAppState<S>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i32>,
) -> AppResult<Json<E>>
where
    E: ArchiveEntity,
    S: ArchiveStore + Send + Sync + 'static,
{
    user.require(E::READ_ROLES)?;
    let row = state.lifecycle().get::<E>(id).await?;
    Ok(Json(row))
}

/// DELETE on a live row archives it; the body carries the mandatory note
pub async fn archive_entity<E, S>(
    State(state): State<InventoryAppState<S>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i32>,
    Json(body): Json<ArchiveRequest>,
) -> AppResult<Json<Archived<E>>>
where
    E: ArchiveEntity,
    S: ArchiveStore + Send + Sync + 'static,
{
    user.require(E::MUTATE_ROLES)?;
    let archived = state.lifecycle().archive::<E>(id, body.note).await?;
    Ok(Json(archived))
}

pub async fn restore_entity<E, S>(
    State(state): State<InventoryAppState<S>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i32>,
) -> AppResult<Json<E>>
where
    E: ArchiveEntity,
    S: ArchiveStore + Send + Sync + 'static,
{
    user.require(E::MUTATE_ROLES)?;
    let restored = state.lifecycle().restore::<E>(id).await?;
    Ok(Json(restored))
}

pub async fn list_archived<E, S>(
    State(state): State<InventoryAppState<S>>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<Archived<E>>>>
where
    E: ArchiveEntity,
    S: ArchiveStore + Send + Sync + 'static,
{
    user.require(E::READ_ROLES)?;
    let rows = state.lifecycle().list_archived::<E>().await?;
    Ok(Json(rows))
}

pub async fn get_archived<E, S>(
    State(state): State<InventoryAppState<S>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i32>,
) -> AppResult<Json<Archived<E>>>
where
    E: ArchiveEntity,
    S: ArchiveStore + Send + Sync + 'static,
{
    user.require(E::READ_ROLES)?;
    let row = state.lifecycle().get_archived::<E>(id).await?;
    Ok(Json(row))
}

/// DELETE on an archived row destroys it permanently
pub async fn purge_entity<E, S>(
    State(state): State<InventoryAppState<S>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i32>,
) -> AppResult<()>
where
    E: ArchiveEntity,
    S: ArchiveStore + Send + Sync + 'static,
{
    user.require(E::MUTATE_ROLES)?;
    state.lifecycle().purge::<E>(id).await?;
    Ok(())
}

// ============================================================================
// Typed create/update handlers
// ============================================================================

macro_rules! impl_create_update {
    ($create:ident, $update:ident, $entity:ty, $payload:ty, $create_fn:ident, $update_fn:ident) => {
        pub async fn $create<S>(
            State(state): State<InventoryAppState<S>>,
            Extension(user): Extension<CurrentUser>,
            Json(body): Json<$payload>,
        ) -> AppResult<Json<$entity>>
        where
            S: InventoryRepository + ArchiveStore + Send + Sync + 'static,
        {
            user.require(<$entity>::MUTATE_ROLES)?;
            let created = state.repo().$create_fn(body.into()).await?;
            Ok(Json(created))
        }

        pub async fn $update<S>(
            State(state): State<InventoryAppState<S>>,
            Extension(user): Extension<CurrentUser>,
            Path(id): Path<i32>,
            Json(body): Json<$payload>,
        ) -> AppResult<Json<$entity>>
        where
            S: InventoryRepository + ArchiveStore + Send + Sync + 'static,
        {
            user.require(<$entity>::MUTATE_ROLES)?;
            let updated = state.repo().$update_fn(id, body.into()).await?;
            Ok(Json(updated))
        }
    };
}

impl_create_update!(
    create_item_type,
    update_item_type,
    ItemType,
    ItemTypePayload,
    create_item_type,
    update_item_type
);
impl_create_update!(
    create_item_group,
    update_item_group,
    ItemGroup,
    ItemGroupPayload,
    create_item_group,
    update_item_group
);
impl_create_update!(
    create_item,
    update_item,
    Item,
    ItemPayload,
    create_item,
    update_item
);
impl_create_update!(
    create_loan,
    update_loan,
    Loan,
    LoanPayload,
    create_loan,
    update_loan
);
impl_create_update!(
    create_request,
    update_request,
    Request,
    RequestPayload,
    create_request,
    update_request
);

/// POST /User goes through the register-user use case so the password is
/// policy-checked and hashed before it reaches the store
pub async fn create_user<S>(
    State(state): State<InventoryAppState<S>>,
    Extension(user): Extension<CurrentUser>,
    Json(body): Json<CreateUserPayload>,
) -> AppResult<Json<User>>
where
    S: InventoryRepository + ArchiveStore + Send + Sync + 'static,
{
    user.require(User::MUTATE_ROLES)?;
    let use_case = RegisterUserUseCase::new(state.store_arc());
    let created = use_case
        .execute(RegisterUserInput::from(body))
        .await
        .map_err(AppError::from)?;
    Ok(Json(created))
}

pub async fn update_user<S>(
    State(state): State<InventoryAppState<S>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i32>,
    Json(body): Json<UpdateUserPayload>,
) -> AppResult<Json<User>>
where
    S: InventoryRepository + ArchiveStore + Send + Sync + 'static,
{
    user.require(User::MUTATE_ROLES)?;
    let updated = state.repo().update_user(id, body.into()).await?;
    Ok(Json(updated))
}
