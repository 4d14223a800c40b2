//! Data Transfer Objects
//!
//! Request/response types for the auth endpoints. Field names are
//! camelCase on the wire.

use serde::{Deserialize, Serialize};

use crate::domain::value_object::totp_secret::TotpProvisioning;
use kernel::principal::CurrentUser;

/// Login request body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub user_name: String,
    pub password: String,
    /// Omitted on the first request; required once a second factor exists
    pub totp_code: Option<String>,
}

/// TOTP enrollment material returned when a user has no confirmed
/// second factor
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TotpEnrollmentDto {
    /// QR code as base64-encoded PNG
    pub qr_code: String,
    /// Base32 secret for manual authenticator entry
    pub secret: String,
    pub otpauth_url: String,
}

impl From<TotpProvisioning> for TotpEnrollmentDto {
    fn from(p: TotpProvisioning) -> Self {
        Self {
            qr_code: p.qr_code_base64,
            secret: p.secret_base32,
            otpauth_url: p.otpauth_url,
        }
    }
}

/// Login response body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Bearer token; null until both factors have passed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    pub requires_two_factor: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enrollment: Option<TotpEnrollmentDto>,
}

/// Authenticated identity response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    pub user_id: i32,
    pub role: String,
}

impl From<CurrentUser> for MeResponse {
    fn from(user: CurrentUser) -> Self {
        Self {
            user_id: user.user_id,
            role: user.role.code().to_string(),
        }
    }
}
