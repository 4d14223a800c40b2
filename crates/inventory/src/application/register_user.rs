//! Register User Use Case
//!
//! Creating a user is the one create path with extra rules: the clear
//! text password goes through the policy check and Argon2id hashing
//! here, and only the hash reaches the repository.

use std::sync::Arc;

use kernel::role::Role;
use platform::password::ClearTextPassword;

use crate::domain::entity::{NewUserRecord, User};
use crate::domain::repository::InventoryRepository;
use crate::error::{InventoryError, InventoryResult};

/// Register user input
pub struct RegisterUserInput {
    pub user_name: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub password: String,
}

/// Register user use case
pub struct RegisterUserUseCase<S>
where
    S: InventoryRepository,
{
    repo: Arc<S>,
}

impl<S> RegisterUserUseCase<S>
where
    S: InventoryRepository,
{
    pub fn new(repo: Arc<S>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, input: RegisterUserInput) -> InventoryResult<User> {
        let password = ClearTextPassword::new(input.password)?;
        let hash = password
            .hash()
            .map_err(|e| InventoryError::Internal(e.to_string()))?;

        let user = self
            .repo
            .create_user(NewUserRecord {
                user_name: input.user_name,
                first_name: input.first_name,
                last_name: input.last_name,
                role: input.role,
                password_hash: hash.as_phc_string().to_string(),
            })
            .await?;

        tracing::info!(user_id = user.user_id, role = %user.role, "User registered");
        Ok(user)
    }
}
