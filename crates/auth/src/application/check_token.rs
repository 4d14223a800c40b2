//! Check Token Use Case
//!
//! Resolves a bearer token to the authenticated principal. Used by the
//! middleware on every protected request. Archiving a user revokes their
//! outstanding tokens because the credential lookup comes up empty.

use std::sync::Arc;

use chrono::Utc;

use crate::application::config::AuthConfig;
use crate::domain::repository::CredentialRepository;
use crate::domain::value_object::access_token;
use crate::error::AuthResult;
use kernel::principal::CurrentUser;

/// Check token use case
pub struct CheckTokenUseCase<R>
where
    R: CredentialRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> CheckTokenUseCase<R>
where
    R: CredentialRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    /// Resolve a token to the current user, or None if it does not
    /// authenticate. The role is read from the live row, not the token,
    /// so a role change takes effect on the next request.
    pub async fn identify(&self, token: &str) -> AuthResult<Option<CurrentUser>> {
        let Some(user_id) = access_token::verify(token, &self.config.token_secret, Utc::now())
        else {
            return Ok(None);
        };

        let Some(creds) = self.repo.find_by_user_id(user_id).await? else {
            tracing::debug!(user_id, "Token for archived or deleted user rejected");
            return Ok(None);
        };

        Ok(Some(CurrentUser {
            user_id: creds.user_id,
            role: creds.role,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use kernel::role::Role;
    use platform::password::ClearTextPassword;

    use crate::domain::entity::credentials::Credentials;
    use crate::error::AuthError;

    /// Repository holding at most one credential row
    struct OneUserRepo(Option<Credentials>);

    impl CredentialRepository for OneUserRepo {
        async fn find_by_user_name(&self, user_name: &str) -> AuthResult<Option<Credentials>> {
            Ok(self
                .0
                .clone()
                .filter(|c| c.user_name.eq_ignore_ascii_case(user_name)))
        }

        async fn find_by_user_id(&self, user_id: i32) -> AuthResult<Option<Credentials>> {
            Ok(self.0.clone().filter(|c| c.user_id == user_id))
        }

        async fn update(&self, _credentials: &Credentials) -> AuthResult<()> {
            Err(AuthError::Internal("read-only repository".to_string()))
        }
    }

    fn credentials() -> Credentials {
        let hash = ClearTextPassword::new("tilpas hemmelig 99".to_string())
            .unwrap()
            .hash()
            .unwrap();
        Credentials {
            user_id: 7,
            user_name: "ursula".to_string(),
            role: Role::Instruktoer,
            password_hash: hash,
            totp_secret: None,
            totp_enabled: false,
            login_failed_count: 0,
            locked_until: None,
        }
    }

    fn use_case(repo: OneUserRepo) -> (CheckTokenUseCase<OneUserRepo>, Arc<AuthConfig>) {
        let config = Arc::new(AuthConfig::with_random_secret());
        (CheckTokenUseCase::new(Arc::new(repo), config.clone()), config)
    }

    fn token_for(user_id: i32, config: &AuthConfig) -> String {
        access_token::issue(
            user_id,
            &config.token_secret,
            config.token_ttl_chrono(),
            Utc::now(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_identify_resolves_role_from_live_row() {
        let (uc, config) = use_case(OneUserRepo(Some(credentials())));
        let token = token_for(7, &config);

        let user = uc.identify(&token).await.unwrap().expect("principal");
        assert_eq!(user.user_id, 7);
        assert_eq!(user.role, Role::Instruktoer);
    }

    #[tokio::test]
    async fn test_identify_rejects_token_for_missing_user() {
        // the signature is valid but the row is gone (archived user)
        let (uc, config) = use_case(OneUserRepo(None));
        let token = token_for(7, &config);

        assert!(uc.identify(&token).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_identify_rejects_garbage_token() {
        let (uc, _) = use_case(OneUserRepo(Some(credentials())));
        assert!(uc.identify("not-a-token").await.unwrap().is_none());
    }
}
