//! Access Token Value Object
//!
//! Stateless JWT bearer tokens (HS256, symmetric key). Validation takes an
//! explicit clock so expiry behavior is deterministic under test; there is
//! no leeway — a token is rejected the second it expires.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// JWT claims
///
/// Only the user identifier is embedded; role and profile are looked up
/// per request so that role changes and archival take effect immediately.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: i32,
    /// Issued-at (unix seconds)
    pub iat: i64,
    /// Expiration (unix seconds)
    pub exp: i64,
}

/// Issue a signed bearer token for a user
pub fn issue(user_id: i32, secret: &[u8], ttl: Duration, now: DateTime<Utc>) -> AppResult<String> {
    let claims = Claims {
        sub: user_id,
        iat: now.timestamp(),
        exp: (now + ttl).timestamp(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret),
    )
    .map_err(|e| AppError::internal("Failed to sign access token").with_source(e))
}

/// Verify a bearer token and return the embedded user id
///
/// Returns `None` (never an error) when the signature does not verify,
/// the token is malformed, or `now` has reached the expiration instant.
pub fn verify(token: &str, secret: &[u8], now: DateTime<Utc>) -> Option<i32> {
    let mut validation = Validation::new(Algorithm::HS256);
    // Expiry is checked against the supplied clock below, with zero leeway
    validation.validate_exp = false;
    validation.leeway = 0;

    let data = decode::<Claims>(token, &DecodingKey::from_secret(secret), &validation).ok()?;

    if now.timestamp() >= data.claims.exp {
        return None;
    }

    Some(data.claims.sub)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const SECRET: &[u8] = b"0123456789abcdef0123456789abcdef";
    const TTL_DAYS: i64 = 7;

    fn issued_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 5, 12, 0, 0).unwrap()
    }

    fn token() -> String {
        issue(42, SECRET, Duration::days(TTL_DAYS), issued_at()).unwrap()
    }

    #[test]
    fn test_valid_within_lifetime() {
        let t = token();
        assert_eq!(verify(&t, SECRET, issued_at()), Some(42));
        assert_eq!(verify(&t, SECRET, issued_at() + Duration::days(6)), Some(42));
    }

    #[test]
    fn test_rejected_at_expiry_with_zero_grace() {
        let t = token();
        let expiry = issued_at() + Duration::days(TTL_DAYS);

        // one second before expiry: still valid
        assert_eq!(verify(&t, SECRET, expiry - Duration::seconds(1)), Some(42));
        // at and after expiry: absent
        assert_eq!(verify(&t, SECRET, expiry), None);
        assert_eq!(verify(&t, SECRET, expiry + Duration::seconds(1)), None);
    }

    #[test]
    fn test_rejects_wrong_key() {
        let t = token();
        assert_eq!(verify(&t, b"another-key-entirely-0123456789", issued_at()), None);
    }

    #[test]
    fn test_rejects_tampered_payload() {
        let t = token();
        // flip a character in the payload segment
        let mut parts: Vec<String> = t.split('.').map(String::from).collect();
        let mut payload: Vec<u8> = parts[1].clone().into_bytes();
        payload[0] = if payload[0] == b'A' { b'B' } else { b'A' };
        parts[1] = String::from_utf8(payload).unwrap();
        let tampered = parts.join(".");

        assert_eq!(verify(&tampered, SECRET, issued_at()), None);
    }

    #[test]
    fn test_rejects_garbage() {
        assert_eq!(verify("not-a-jwt", SECRET, issued_at()), None);
        assert_eq!(verify("", SECRET, issued_at()), None);
    }
}
