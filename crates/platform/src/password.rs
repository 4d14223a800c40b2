//! Password Hashing and Verification
//!
//! NIST SP 800-63B compliant password handling with:
//! - Argon2id hashing (memory-hard, recommended by OWASP)
//! - Zeroization of sensitive data
//! - Rejection of predictable patterns
//!
//! ## Security Features
//! - Memory-hard hashing prevents GPU/ASIC attacks
//! - Zeroization prevents memory inspection attacks
//! - Unicode NFKC normalization before validation

use std::fmt;

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop};

// ============================================================================
// Constants (NIST SP 800-63B compliant)
// ============================================================================

/// Minimum password length (NIST: SHALL be at least 8)
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum password length (NIST: SHOULD permit at least 64)
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Passwords that show up in every leaked-credentials list
const DENY_LIST: &[&str] = &[
    "password", "password1", "qwertyuiop", "12345678", "123456789", "1234567890",
];

// ============================================================================
// Error Types
// ============================================================================

/// Password policy violation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    /// Password is too short
    #[error("Password must be at least {min} characters (got {actual})")]
    TooShort { min: usize, actual: usize },

    /// Password is too long
    #[error("Password must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },

    /// Password contains only whitespace
    #[error("Password cannot be empty or contain only whitespace")]
    EmptyOrWhitespace,

    /// Password contains invalid characters (control characters)
    #[error("Password contains invalid control characters")]
    InvalidCharacter,

    /// Password matches common patterns (sequential, repeated)
    #[error("Password is too common or follows a predictable pattern")]
    CommonPattern,
}

/// Password hashing/verification errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    /// Hashing operation failed
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// Invalid hash format
    #[error("Invalid password hash format")]
    InvalidHashFormat,
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// This type ensures that password data is securely erased from memory
/// when the value is dropped, preventing memory inspection attacks.
///
/// ## Security
/// - Implements `Zeroize` and `ZeroizeOnDrop`
/// - Does not implement `Clone` to prevent accidental copies
/// - Debug output is redacted
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Create a new clear text password with validation
    ///
    /// Validates against NIST SP 800-63B requirements:
    /// - Minimum 8 characters
    /// - Maximum 128 characters
    /// - No control characters
    /// - Not empty/whitespace only
    /// - Not a trivially guessable pattern
    ///
    /// Unicode is normalized using NFKC before validation.
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        // NIST: Unicode NFKC normalization before processing
        let normalized: String = raw.nfkc().collect();

        if normalized.trim().is_empty() {
            return Err(PasswordPolicyError::EmptyOrWhitespace);
        }

        // NIST: count Unicode code points, not bytes
        let char_count = normalized.chars().count();

        if char_count < MIN_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: MIN_PASSWORD_LENGTH,
                actual: char_count,
            });
        }

        if char_count > MAX_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooLong {
                max: MAX_PASSWORD_LENGTH,
                actual: char_count,
            });
        }

        // Control characters are never legitimate password content
        // (space, tab and newline excepted)
        for ch in normalized.chars() {
            if ch.is_control() && ch != ' ' && ch != '\t' && ch != '\n' {
                return Err(PasswordPolicyError::InvalidCharacter);
            }
        }

        if is_common_pattern(&normalized) {
            return Err(PasswordPolicyError::CommonPattern);
        }

        Ok(Self(normalized))
    }

    /// Create without validation
    ///
    /// Only for testing or input that has already been validated.
    #[cfg(test)]
    pub fn new_unchecked(raw: String) -> Self {
        Self(raw)
    }

    /// Create for verification against an existing hash
    ///
    /// Applies NFKC normalization but skips the policy checks: the policy
    /// applies when a password is set, not when one is checked, and stored
    /// passwords may predate the current rules.
    pub fn for_verification(raw: String) -> Self {
        Self(raw.nfkc().collect())
    }

    /// Get the password as bytes for hashing
    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Hash the password using Argon2id
    ///
    /// ## Returns
    /// PHC-formatted hash string wrapped in `HashedPassword`
    pub fn hash(&self) -> Result<HashedPassword, PasswordHashError> {
        // Random 128-bit salt per password
        let salt = SaltString::generate(OsRng);

        // Argon2::default() uses the OWASP recommended Argon2id
        // parameters: m=19456 (19 MiB), t=2, p=1
        let argon2 = Argon2::default();

        let hash = argon2
            .hash_password(self.as_bytes(), &salt)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;

        Ok(HashedPassword {
            hash: hash.to_string(),
        })
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hashed Password (Safe to store)
// ============================================================================

/// Hashed password in PHC string format
///
/// Stores the Argon2id hash in PHC format (algorithm identifier, version,
/// parameters, salt and hash in one string).
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
}

impl HashedPassword {
    /// Create from PHC string (e.g., from database)
    pub fn from_phc_string(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let hash = s.into();

        // Validate it's a valid PHC string
        PasswordHash::new(&hash).map_err(|_| PasswordHashError::InvalidHashFormat)?;

        Ok(Self { hash })
    }

    /// Get the PHC string for storage
    pub fn as_phc_string(&self) -> &str {
        &self.hash
    }

    /// Verify a password against this hash
    ///
    /// Argon2's verifier performs the comparison in constant time.
    pub fn verify(&self, password: &ClearTextPassword) -> bool {
        let Ok(parsed) = PasswordHash::new(&self.hash) else {
            return false;
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("HashedPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Pattern checks
// ============================================================================

/// Reject the patterns people actually type when forced to pick a password
fn is_common_pattern(password: &str) -> bool {
    let lower = password.to_lowercase();

    if DENY_LIST.contains(&lower.as_str()) {
        return true;
    }

    let chars: Vec<char> = lower.chars().collect();

    // Single repeated character ("aaaaaaaa")
    if chars.iter().all(|&c| c == chars[0]) {
        return true;
    }

    // Strictly ascending or descending code points ("abcdefgh", "87654321")
    let ascending = chars.windows(2).all(|w| w[1] as u32 == w[0] as u32 + 1);
    let descending = chars.windows(2).all(|w| w[0] as u32 == w[1] as u32 + 1);

    ascending || descending
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_accepts_reasonable_password() {
        assert!(ClearTextPassword::new("korrekt hest batteri".to_string()).is_ok());
    }

    #[test]
    fn test_policy_rejects_short() {
        let err = ClearTextPassword::new("abc1".to_string()).unwrap_err();
        assert!(matches!(err, PasswordPolicyError::TooShort { .. }));
    }

    #[test]
    fn test_policy_rejects_too_long() {
        let long = "x".repeat(MAX_PASSWORD_LENGTH + 1);
        // repeated char also matches CommonPattern; length must win first
        let err = ClearTextPassword::new(long).unwrap_err();
        assert!(matches!(err, PasswordPolicyError::TooLong { .. }));
    }

    #[test]
    fn test_policy_rejects_whitespace_only() {
        let err = ClearTextPassword::new("        ".to_string()).unwrap_err();
        assert_eq!(err, PasswordPolicyError::EmptyOrWhitespace);
    }

    #[test]
    fn test_policy_rejects_control_characters() {
        let err = ClearTextPassword::new("pass\u{0007}word".to_string()).unwrap_err();
        assert_eq!(err, PasswordPolicyError::InvalidCharacter);
    }

    #[test]
    fn test_policy_rejects_common_patterns() {
        for weak in ["12345678", "aaaaaaaa", "abcdefgh", "Password", "87654321"] {
            let err = ClearTextPassword::new(weak.to_string()).unwrap_err();
            assert_eq!(err, PasswordPolicyError::CommonPattern, "{weak}");
        }
    }

    #[test]
    fn test_nfkc_normalization() {
        // Fullwidth characters normalize to ASCII, so both spellings
        // produce the same stored password
        let a = ClearTextPassword::new("ｐassword42!".to_string()).unwrap();
        let b = ClearTextPassword::new("password42!".to_string()).unwrap();
        assert_eq!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn test_hash_and_verify() {
        let password = ClearTextPassword::new("tilpas hemmelig 99".to_string()).unwrap();
        let hashed = password.hash().unwrap();

        assert!(hashed.as_phc_string().starts_with("$argon2id$"));
        assert!(hashed.verify(&password));

        let wrong = ClearTextPassword::new_unchecked("noget andet".to_string());
        assert!(!hashed.verify(&wrong));
    }

    #[test]
    fn test_from_phc_string_round_trip() {
        let password = ClearTextPassword::new("tilpas hemmelig 99".to_string()).unwrap();
        let hashed = password.hash().unwrap();

        let restored = HashedPassword::from_phc_string(hashed.as_phc_string()).unwrap();
        assert!(restored.verify(&password));
    }

    #[test]
    fn test_from_phc_string_rejects_garbage() {
        assert!(HashedPassword::from_phc_string("not-a-hash").is_err());
    }

    #[test]
    fn test_debug_is_redacted() {
        let password = ClearTextPassword::new("tilpas hemmelig 99".to_string()).unwrap();
        assert!(!format!("{:?}", password).contains("hemmelig"));
        let hashed = password.hash().unwrap();
        assert!(!format!("{:?}", hashed).contains("argon2"));
    }
}
