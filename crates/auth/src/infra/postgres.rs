//! PostgreSQL Credential Repository
//!
//! Reads and writes the authentication slice of the live `users` table.
//! Rows in `archive_users` are never consulted here, which is what makes
//! archiving a user an immediate access revocation.

use kernel::role::Role;
use platform::password::HashedPassword;
use sqlx::PgPool;

use crate::domain::entity::credentials::Credentials;
use crate::domain::repository::CredentialRepository;
use crate::domain::value_object::totp_secret::TotpSecret;
use crate::error::{AuthError, AuthResult};

/// Row shape for the credential columns of `users`
#[derive(sqlx::FromRow)]
struct CredentialsRow {
    user_id: i32,
    user_name: String,
    role: i16,
    password_hash: String,
    totp_secret: Option<String>,
    totp_enabled: bool,
    login_failed_count: i16,
    locked_until: Option<chrono::DateTime<chrono::Utc>>,
}

impl CredentialsRow {
    fn into_credentials(self) -> AuthResult<Credentials> {
        let role = Role::from_id(self.role)
            .ok_or_else(|| AuthError::Internal(format!("Unknown role id {}", self.role)))?;

        let password_hash = HashedPassword::from_phc_string(self.password_hash)
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        let totp_secret = match self.totp_secret {
            Some(s) => Some(
                TotpSecret::from_base32(s).map_err(|e| AuthError::Internal(e.to_string()))?,
            ),
            None => None,
        };

        Ok(Credentials {
            user_id: self.user_id,
            user_name: self.user_name,
            role,
            password_hash,
            totp_secret,
            totp_enabled: self.totp_enabled,
            login_failed_count: self.login_failed_count,
            locked_until: self.locked_until,
        })
    }
}

const CREDENTIAL_COLUMNS: &str = "user_id, user_name, role, password_hash, \
     totp_secret, totp_enabled, login_failed_count, locked_until";

/// PostgreSQL credential repository
#[derive(Clone)]
pub struct PgCredentialRepository {
    pool: PgPool,
}

impl PgCredentialRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl CredentialRepository for PgCredentialRepository {
    async fn find_by_user_name(&self, user_name: &str) -> AuthResult<Option<Credentials>> {
        let row: Option<CredentialsRow> = sqlx::query_as(&format!(
            "SELECT {CREDENTIAL_COLUMNS} FROM users WHERE lower(user_name) = lower($1)"
        ))
        .bind(user_name)
        .fetch_optional(&self.pool)
        .await?;

        row.map(CredentialsRow::into_credentials).transpose()
    }

    async fn find_by_user_id(&self, user_id: i32) -> AuthResult<Option<Credentials>> {
        let row: Option<CredentialsRow> = sqlx::query_as(&format!(
            "SELECT {CREDENTIAL_COLUMNS} FROM users WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(CredentialsRow::into_credentials).transpose()
    }

    async fn update(&self, credentials: &Credentials) -> AuthResult<()> {
        sqlx::query(
            "UPDATE users SET
                password_hash = $2,
                totp_secret = $3,
                totp_enabled = $4,
                login_failed_count = $5,
                locked_until = $6
             WHERE user_id = $1",
        )
        .bind(credentials.user_id)
        .bind(credentials.password_hash.as_phc_string())
        .bind(credentials.totp_secret.as_ref().map(TotpSecret::as_base32))
        .bind(credentials.totp_enabled)
        .bind(credentials.login_failed_count)
        .bind(credentials.locked_until)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
