//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Symmetric key for signing bearer tokens (32 bytes)
    pub token_secret: [u8; 32],
    /// Bearer token lifetime (7 days)
    pub token_ttl: Duration,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_secret: [0u8; 32],
            token_ttl: Duration::from_secs(7 * 24 * 3600), // 7 days
        }
    }
}

impl AuthConfig {
    /// Create config with a random signing secret (for development)
    pub fn with_random_secret() -> Self {
        use rand::RngCore;
        let mut secret = [0u8; 32];
        rand::rng().fill_bytes(&mut secret);
        Self {
            token_secret: secret,
            ..Default::default()
        }
    }

    /// Create config from an externally supplied secret (production)
    pub fn with_secret(secret: [u8; 32]) -> Self {
        Self {
            token_secret: secret,
            ..Default::default()
        }
    }

    /// Token TTL as a chrono duration, for claim arithmetic
    pub fn token_ttl_chrono(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.token_ttl.as_secs() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ttl_is_seven_days() {
        let config = AuthConfig::default();
        assert_eq!(config.token_ttl.as_secs(), 7 * 24 * 3600);
        assert_eq!(config.token_ttl_chrono(), chrono::Duration::days(7));
    }

    #[test]
    fn test_random_secret_is_not_zeros() {
        let config = AuthConfig::with_random_secret();
        assert!(config.token_secret.iter().any(|&b| b != 0));
    }
}
