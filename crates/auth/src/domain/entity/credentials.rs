//! Credentials Entity
//!
//! The authentication-relevant slice of a user row: password hash, second
//! factor, failure tracking and role. Profile data lives in the inventory
//! crate; this entity only carries what the gate needs.

use chrono::{DateTime, Utc};
use kernel::role::Role;
use platform::password::HashedPassword;

use crate::domain::value_object::totp_secret::TotpSecret;

/// Authentication credentials for one user
#[derive(Debug, Clone)]
pub struct Credentials {
    /// User id (shared with the inventory users table)
    pub user_id: i32,
    /// Login name (unique)
    pub user_name: String,
    /// Role consulted by the authorization allow-lists
    pub role: Role,
    /// Argon2id password hash
    pub password_hash: HashedPassword,
    /// TOTP secret; present once enrollment has started
    pub totp_secret: Option<TotpSecret>,
    /// Whether the secret has been confirmed with a valid code
    pub totp_enabled: bool,
    /// Consecutive login failure count
    pub login_failed_count: i16,
    /// Account locked until (temporary lockout after failures)
    pub locked_until: Option<DateTime<Utc>>,
}

impl Credentials {
    /// Maximum login failures before temporary lockout
    pub const MAX_LOGIN_FAILURES: i16 = 5;
    /// Lockout duration in minutes
    pub const LOCKOUT_MINUTES: i64 = 15;

    /// Check if the account is currently locked
    pub fn is_locked(&self) -> bool {
        match self.locked_until {
            Some(locked_until) => Utc::now() < locked_until,
            None => false,
        }
    }

    /// Record a failed login attempt
    pub fn record_failure(&mut self) {
        self.login_failed_count += 1;

        if self.login_failed_count >= Self::MAX_LOGIN_FAILURES {
            self.locked_until = Some(Utc::now() + chrono::Duration::minutes(Self::LOCKOUT_MINUTES));
        }
    }

    /// Reset failure tracking on successful login
    pub fn reset_failures(&mut self) {
        self.login_failed_count = 0;
        self.locked_until = None;
    }

    /// Start TOTP enrollment: generate and store an unverified secret
    pub fn begin_totp_enrollment(&mut self) -> TotpSecret {
        let secret = TotpSecret::generate();
        self.totp_secret = Some(secret.clone());
        self.totp_enabled = false;
        secret
    }

    /// Mark the second factor as confirmed
    pub fn complete_totp_enrollment(&mut self) {
        if self.totp_secret.is_some() {
            self.totp_enabled = true;
        }
    }

    /// A secret exists but has not been confirmed yet
    pub fn totp_pending(&self) -> bool {
        self.totp_secret.is_some() && !self.totp_enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::password::ClearTextPassword;

    fn credentials() -> Credentials {
        let hash = ClearTextPassword::new("tilpas hemmelig 99".to_string())
            .unwrap()
            .hash()
            .unwrap();
        Credentials {
            user_id: 1,
            user_name: "ursula".to_string(),
            role: Role::Elev,
            password_hash: hash,
            totp_secret: None,
            totp_enabled: false,
            login_failed_count: 0,
            locked_until: None,
        }
    }

    #[test]
    fn test_lockout_after_max_failures() {
        let mut creds = credentials();
        for _ in 0..Credentials::MAX_LOGIN_FAILURES - 1 {
            creds.record_failure();
            assert!(!creds.is_locked());
        }
        creds.record_failure();
        assert!(creds.is_locked());

        creds.reset_failures();
        assert!(!creds.is_locked());
        assert_eq!(creds.login_failed_count, 0);
    }

    #[test]
    fn test_totp_enrollment_lifecycle() {
        let mut creds = credentials();
        assert!(!creds.totp_pending());

        // completing before a secret exists is a no-op
        creds.complete_totp_enrollment();
        assert!(!creds.totp_enabled);

        creds.begin_totp_enrollment();
        assert!(creds.totp_pending());
        assert!(!creds.totp_enabled);

        creds.complete_totp_enrollment();
        assert!(creds.totp_enabled);
        assert!(!creds.totp_pending());
    }
}
