//! Inventory Error Types
//!
//! Inventory-specific error variants that map into the unified
//! `kernel::error::AppError` system.

use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::password::PasswordPolicyError;
use thiserror::Error;

use crate::domain::archive::EntityKind;

/// Inventory-specific result type alias
pub type InventoryResult<T> = Result<T, InventoryError>;

/// Inventory-specific error variants
#[derive(Debug, Error)]
pub enum InventoryError {
    /// No live row with this id
    #[error("{kind} {id} not found")]
    NotFound { kind: EntityKind, id: i32 },

    /// No archived row with this id
    #[error("Archived {kind} {id} not found")]
    ArchiveNotFound { kind: EntityKind, id: i32 },

    /// Archive note is empty or whitespace-only
    #[error("Archive note must not be empty")]
    EmptyArchiveNote,

    /// A live row still references the row being archived
    #[error("{kind} {id} is still referenced by {referencing}")]
    StillReferenced {
        kind: EntityKind,
        id: i32,
        referencing: &'static str,
    },

    /// A restore parent no longer exists live
    #[error("Cannot restore {kind} {id}: referenced row in {parent} is missing")]
    MissingParent {
        kind: EntityKind,
        id: i32,
        parent: &'static str,
    },

    /// A live row already holds the id being restored
    #[error("Cannot restore {kind} {id}: a live row already has this id")]
    LiveIdCollision { kind: EntityKind, id: i32 },

    /// Password rejected by the policy
    #[error(transparent)]
    PasswordPolicy(#[from] PasswordPolicyError),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl InventoryError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            InventoryError::NotFound { .. } | InventoryError::ArchiveNotFound { .. } => {
                ErrorKind::NotFound
            }
            InventoryError::EmptyArchiveNote | InventoryError::PasswordPolicy(_) => {
                ErrorKind::UnprocessableEntity
            }
            InventoryError::StillReferenced { .. }
            | InventoryError::MissingParent { .. }
            | InventoryError::LiveIdCollision { .. } => ErrorKind::Conflict,
            InventoryError::Database(_) | InventoryError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    fn action(&self) -> Option<String> {
        match self {
            InventoryError::EmptyArchiveNote => {
                Some("Provide a non-empty note explaining the archival".to_string())
            }
            InventoryError::StillReferenced { referencing, .. } => Some(format!(
                "Archive or delete the referencing rows in {referencing} first"
            )),
            InventoryError::MissingParent { parent, .. } => {
                Some(format!("Restore the referenced row in {parent} first"))
            }
            _ => None,
        }
    }
}

impl From<InventoryError> for AppError {
    fn from(err: InventoryError) -> Self {
        match err {
            // Driver detail goes to the log; the kernel mapping keeps the
            // response body generic
            InventoryError::Database(e) => {
                tracing::error!(error = %e, "Inventory database error");
                AppError::from(e)
            }
            other => {
                let mut app = AppError::new(other.kind(), other.to_string());
                if let Some(action) = other.action() {
                    app = app.with_action(action);
                }
                app
            }
        }
    }
}
