//! TOTP Secret Value Object
//!
//! Wraps the second-factor secret. Google Authenticator compatible
//! settings (SHA-1, 6 digits, 30-second step, 1 step of skew).

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use totp_rs::{Algorithm, Secret, TOTP};

const TOTP_DIGITS: usize = 6;
const TOTP_SKEW: u8 = 1;
const TOTP_STEP: u64 = 30;
const TOTP_ISSUER: &str = "IT-Depotet";

/// Enrollment material handed to a user who has no second factor yet
#[derive(Debug, Clone)]
pub struct TotpProvisioning {
    /// QR code as base64-encoded PNG
    pub qr_code_base64: String,
    /// Base32 secret for manual entry
    pub secret_base32: String,
    /// otpauth:// URL
    pub otpauth_url: String,
}

/// TOTP secret for two-factor authentication
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TotpSecret {
    /// Base32-encoded secret
    secret_base32: String,
}

impl TotpSecret {
    /// Generate a new random secret
    pub fn generate() -> Self {
        Self {
            secret_base32: Secret::generate_secret().to_encoded().to_string(),
        }
    }

    /// Create from a base32-encoded string (from database)
    pub fn from_base32(secret: impl Into<String>) -> AppResult<Self> {
        let secret_base32 = secret.into();
        // Validate by decoding
        Secret::Encoded(secret_base32.clone())
            .to_bytes()
            .map_err(|e| AppError::internal(format!("Invalid TOTP secret: {}", e)))?;

        Ok(Self { secret_base32 })
    }

    /// Base32-encoded secret for storage
    pub fn as_base32(&self) -> &str {
        &self.secret_base32
    }

    fn to_totp(&self, account_name: &str) -> AppResult<TOTP> {
        let bytes = Secret::Encoded(self.secret_base32.clone())
            .to_bytes()
            .map_err(|e| AppError::internal(format!("Invalid TOTP secret: {}", e)))?;

        TOTP::new(
            Algorithm::SHA1,
            TOTP_DIGITS,
            TOTP_SKEW,
            TOTP_STEP,
            bytes,
            Some(TOTP_ISSUER.to_string()),
            account_name.to_string(),
        )
        .map_err(|e| AppError::internal(format!("Failed to create TOTP: {}", e)))
    }

    /// Verify a code against the current wall clock
    pub fn verify(&self, code: &str, account_name: &str) -> AppResult<bool> {
        let totp = self.to_totp(account_name)?;
        Ok(totp.check_current(code).unwrap_or(false))
    }

    /// Verify a code at an explicit unix time (deterministic, for tests)
    pub fn verify_at(&self, code: &str, account_name: &str, unix_time: u64) -> AppResult<bool> {
        let totp = self.to_totp(account_name)?;
        Ok(totp.check(code, unix_time))
    }

    /// Code valid at an explicit unix time
    #[cfg(test)]
    pub fn code_at(&self, account_name: &str, unix_time: u64) -> AppResult<String> {
        let totp = self.to_totp(account_name)?;
        Ok(totp.generate(unix_time))
    }

    /// Build the enrollment material (QR PNG, base32 secret, otpauth URL)
    pub fn provisioning(&self, account_name: &str) -> AppResult<TotpProvisioning> {
        let totp = self.to_totp(account_name)?;

        let qr_code_base64 = totp
            .get_qr_base64()
            .map_err(|e| AppError::internal(format!("Failed to generate QR code: {}", e)))?;

        Ok(TotpProvisioning {
            qr_code_base64,
            secret_base32: self.secret_base32.clone(),
            otpauth_url: totp.get_url(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ACCOUNT: &str = "ursula";
    const T0: u64 = 1_767_000_000;

    #[test]
    fn test_generate_produces_secret() {
        let secret = TotpSecret::generate();
        assert!(!secret.as_base32().is_empty());
    }

    #[test]
    fn test_verify_at_accepts_matching_code() {
        let secret = TotpSecret::generate();
        let code = secret.code_at(ACCOUNT, T0).unwrap();
        assert!(secret.verify_at(&code, ACCOUNT, T0).unwrap());
    }

    #[test]
    fn test_verify_at_rejects_wrong_code() {
        let secret = TotpSecret::generate();
        let code = secret.code_at(ACCOUNT, T0).unwrap();
        let wrong = if code == "000000" { "000001" } else { "000000" };
        assert!(!secret.verify_at(wrong, ACCOUNT, T0).unwrap());
    }

    #[test]
    fn test_verify_at_respects_skew_window() {
        let secret = TotpSecret::generate();
        let code = secret.code_at(ACCOUNT, T0).unwrap();

        // one step of skew either way is accepted
        assert!(secret.verify_at(&code, ACCOUNT, T0 + TOTP_STEP).unwrap());
        // two steps is outside the window
        assert!(!secret.verify_at(&code, ACCOUNT, T0 + 3 * TOTP_STEP).unwrap());
    }

    #[test]
    fn test_from_base32_round_trip() {
        let secret = TotpSecret::generate();
        let restored = TotpSecret::from_base32(secret.as_base32().to_string()).unwrap();
        assert_eq!(secret.as_base32(), restored.as_base32());
    }

    #[test]
    fn test_from_base32_rejects_garbage() {
        assert!(TotpSecret::from_base32("not base32!!!").is_err());
    }

    #[test]
    fn test_provisioning_material() {
        let secret = TotpSecret::generate();
        let prov = secret.provisioning(ACCOUNT).unwrap();

        assert!(!prov.qr_code_base64.is_empty());
        assert_eq!(prov.secret_base32, secret.as_base32());
        assert!(prov.otpauth_url.starts_with("otpauth://totp/"));
        assert!(prov.otpauth_url.contains("IT-Depotet"));
    }
}
