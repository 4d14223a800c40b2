//! Sign In Use Case
//!
//! Authenticates a user and issues a bearer token. A token is only issued
//! once both factors have passed; accounts without a second factor are
//! pushed through TOTP enrollment on their first successful password login.

use std::sync::Arc;

use chrono::Utc;
use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::domain::repository::CredentialRepository;
use crate::domain::value_object::access_token;
use crate::domain::value_object::totp_secret::TotpProvisioning;
use crate::error::{AuthError, AuthResult};

/// Sign in input
pub struct SignInInput {
    /// Login name
    pub user_name: String,
    /// Password
    pub password: String,
    /// TOTP code, once the client has one to send
    pub totp_code: Option<String>,
}

/// Sign in output
pub struct SignInOutput {
    /// Bearer token; only present when fully authenticated
    pub token: Option<String>,
    /// The password passed but a TOTP code is still needed
    pub requires_two_factor: bool,
    /// Enrollment material when no confirmed second factor exists yet
    pub enrollment: Option<TotpProvisioning>,
}

/// Sign in use case
pub struct SignInUseCase<R>
where
    R: CredentialRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> SignInUseCase<R>
where
    R: CredentialRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        // Unknown and archived users take the same path as a wrong
        // password: InvalidCredentials, nothing more specific.
        let mut creds = self
            .repo
            .find_by_user_name(&input.user_name)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if creds.is_locked() {
            return Err(AuthError::AccountLocked);
        }

        let password = ClearTextPassword::for_verification(input.password);
        if !creds.password_hash.verify(&password) {
            creds.record_failure();
            self.repo.update(&creds).await?;
            return Err(AuthError::InvalidCredentials);
        }

        // Password accepted. The second factor is always required before
        // a token is issued.
        match (&creds.totp_secret, &input.totp_code) {
            // No secret yet: start enrollment and hand back the QR payload
            (None, _) => {
                let secret = creds.begin_totp_enrollment();
                self.repo.update(&creds).await?;

                let enrollment = secret
                    .provisioning(&creds.user_name)
                    .map_err(|e| AuthError::Internal(e.to_string()))?;

                tracing::info!(user_id = creds.user_id, "TOTP enrollment started");

                return Ok(SignInOutput {
                    token: None,
                    requires_two_factor: true,
                    enrollment: Some(enrollment),
                });
            }

            // Secret exists but the client sent no code
            (Some(secret), None) => {
                // While enrollment is pending, re-send the QR payload so a
                // user who closed the page can still finish
                let enrollment = if creds.totp_pending() {
                    Some(
                        secret
                            .provisioning(&creds.user_name)
                            .map_err(|e| AuthError::Internal(e.to_string()))?,
                    )
                } else {
                    None
                };

                return Ok(SignInOutput {
                    token: None,
                    requires_two_factor: true,
                    enrollment,
                });
            }

            // Secret exists and a code was supplied
            (Some(secret), Some(code)) => {
                let valid = secret
                    .verify(code, &creds.user_name)
                    .map_err(|e| AuthError::Internal(e.to_string()))?;

                if !valid {
                    creds.record_failure();
                    self.repo.update(&creds).await?;
                    return Err(AuthError::InvalidTwoFactorCode);
                }
            }
        }

        // First successful code completes enrollment
        if creds.totp_pending() {
            creds.complete_totp_enrollment();
            tracing::info!(user_id = creds.user_id, "TOTP enrollment completed");
        }

        creds.reset_failures();
        self.repo.update(&creds).await?;

        let token = access_token::issue(
            creds.user_id,
            &self.config.token_secret,
            self.config.token_ttl_chrono(),
            Utc::now(),
        )
        .map_err(|e| AuthError::Internal(e.to_string()))?;

        tracing::info!(user_id = creds.user_id, "User signed in");

        Ok(SignInOutput {
            token: Some(token),
            requires_two_factor: false,
            enrollment: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::{SystemTime, UNIX_EPOCH};

    use kernel::role::Role;
    use platform::password::ClearTextPassword;

    use crate::domain::entity::credentials::Credentials;
    use crate::domain::repository::CredentialRepository;

    struct MemRepo(Mutex<HashMap<i32, Credentials>>);

    impl MemRepo {
        fn with(creds: Credentials) -> Arc<Self> {
            let mut map = HashMap::new();
            map.insert(creds.user_id, creds);
            Arc::new(Self(Mutex::new(map)))
        }

        fn get(&self, user_id: i32) -> Credentials {
            self.0.lock().unwrap().get(&user_id).unwrap().clone()
        }
    }

    impl CredentialRepository for MemRepo {
        async fn find_by_user_name(&self, user_name: &str) -> AuthResult<Option<Credentials>> {
            Ok(self
                .0
                .lock()
                .unwrap()
                .values()
                .find(|c| c.user_name.eq_ignore_ascii_case(user_name))
                .cloned())
        }

        async fn find_by_user_id(&self, user_id: i32) -> AuthResult<Option<Credentials>> {
            Ok(self.0.lock().unwrap().get(&user_id).cloned())
        }

        async fn update(&self, credentials: &Credentials) -> AuthResult<()> {
            self.0
                .lock()
                .unwrap()
                .insert(credentials.user_id, credentials.clone());
            Ok(())
        }
    }

    const PASSWORD: &str = "tilpas hemmelig 99";

    fn credentials() -> Credentials {
        let hash = ClearTextPassword::new(PASSWORD.to_string())
            .unwrap()
            .hash()
            .unwrap();
        Credentials {
            user_id: 1,
            user_name: "ursula".to_string(),
            role: Role::Admin,
            password_hash: hash,
            totp_secret: None,
            totp_enabled: false,
            login_failed_count: 0,
            locked_until: None,
        }
    }

    fn use_case(repo: Arc<MemRepo>) -> SignInUseCase<MemRepo> {
        SignInUseCase::new(repo, Arc::new(AuthConfig::with_random_secret()))
    }

    fn input(user_name: &str, password: &str, code: Option<String>) -> SignInInput {
        SignInInput {
            user_name: user_name.to_string(),
            password: password.to_string(),
            totp_code: code,
        }
    }

    fn now_unix() -> u64 {
        SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_secs()
    }

    #[tokio::test]
    async fn test_unknown_user_fails_like_wrong_password() {
        let repo = MemRepo::with(credentials());
        let uc = use_case(repo);

        let unknown = uc.execute(input("nobody", PASSWORD, None)).await;
        let wrong = uc.execute(input("ursula", "forkert kode", None)).await;

        assert!(matches!(unknown, Err(AuthError::InvalidCredentials)));
        assert!(matches!(wrong, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_repeated_failures_lock_the_account() {
        let repo = MemRepo::with(credentials());
        let uc = use_case(repo.clone());

        for _ in 0..Credentials::MAX_LOGIN_FAILURES {
            let result = uc.execute(input("ursula", "forkert kode", None)).await;
            assert!(matches!(result, Err(AuthError::InvalidCredentials)));
        }

        assert!(repo.get(1).is_locked());
        // even the right password is refused while locked
        let result = uc.execute(input("ursula", PASSWORD, None)).await;
        assert!(matches!(result, Err(AuthError::AccountLocked)));
    }

    #[tokio::test]
    async fn test_first_login_starts_totp_enrollment() {
        let repo = MemRepo::with(credentials());
        let uc = use_case(repo.clone());

        let out = uc.execute(input("ursula", PASSWORD, None)).await.unwrap();

        assert!(out.token.is_none());
        assert!(out.requires_two_factor);
        let enrollment = out.enrollment.expect("enrollment material");
        assert!(enrollment.otpauth_url.starts_with("otpauth://totp/"));

        // the unverified secret was persisted
        let stored = repo.get(1);
        assert!(stored.totp_pending());
    }

    #[tokio::test]
    async fn test_valid_code_completes_enrollment_and_issues_token() {
        let repo = MemRepo::with(credentials());
        let uc = use_case(repo.clone());

        // first call plants the pending secret
        uc.execute(input("ursula", PASSWORD, None)).await.unwrap();
        let secret = repo.get(1).totp_secret.clone().unwrap();
        let code = secret.code_at("ursula", now_unix()).unwrap();

        let out = uc
            .execute(input("ursula", PASSWORD, Some(code)))
            .await
            .unwrap();

        assert!(out.token.is_some());
        assert!(!out.requires_two_factor);

        let stored = repo.get(1);
        assert!(stored.totp_enabled);
        assert_eq!(stored.login_failed_count, 0);
    }

    #[tokio::test]
    async fn test_wrong_code_is_rejected_and_counted() {
        let repo = MemRepo::with(credentials());
        let uc = use_case(repo.clone());

        uc.execute(input("ursula", PASSWORD, None)).await.unwrap();
        let secret = repo.get(1).totp_secret.clone().unwrap();
        let valid = secret.code_at("ursula", now_unix()).unwrap();
        let wrong = if valid == "000000" { "000001" } else { "000000" };

        let result = uc
            .execute(input("ursula", PASSWORD, Some(wrong.to_string())))
            .await;

        assert!(matches!(result, Err(AuthError::InvalidTwoFactorCode)));
        assert_eq!(repo.get(1).login_failed_count, 1);
    }
}
