//! Repository Traits
//!
//! Interfaces for credential persistence. Implementation is in the
//! infrastructure layer. Archived users are invisible through this
//! interface; a lookup that finds nothing is how revocation works.

use crate::domain::entity::credentials::Credentials;
use crate::error::AuthResult;

/// Credential repository trait
#[trait_variant::make(CredentialRepository: Send)]
pub trait LocalCredentialRepository {
    /// Find credentials by login name (case-insensitive)
    async fn find_by_user_name(&self, user_name: &str) -> AuthResult<Option<Credentials>>;

    /// Find credentials by user id
    async fn find_by_user_id(&self, user_id: i32) -> AuthResult<Option<Credentials>>;

    /// Persist mutated credential state (failures, lockout, TOTP)
    async fn update(&self, credentials: &Credentials) -> AuthResult<()>;
}
