pub mod access_token;
pub mod totp_secret;
