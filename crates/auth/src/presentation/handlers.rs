//! HTTP Handlers
//!
//! Axum handlers for the auth endpoints.

use axum::Json;
use axum::extract::{Extension, State};

use crate::application::{SignInInput, SignInUseCase};
use crate::domain::repository::CredentialRepository;
use crate::error::AuthResult;
use crate::presentation::dto::{LoginRequest, LoginResponse, MeResponse};
use crate::presentation::router::AuthAppState;
use kernel::principal::CurrentUser;

/// POST /login
///
/// Verifies password and TOTP code and returns a bearer token. When the
/// user has no confirmed second factor, the response instead carries
/// enrollment material and `requiresTwoFactor: true`.
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    Json(body): Json<LoginRequest>,
) -> AuthResult<Json<LoginResponse>>
where
    R: CredentialRepository + Send + Sync + 'static,
{
    let use_case = SignInUseCase::new(state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(SignInInput {
            user_name: body.user_name,
            password: body.password,
            totp_code: body.totp_code,
        })
        .await?;

    Ok(Json(LoginResponse {
        token: output.token,
        requires_two_factor: output.requires_two_factor,
        enrollment: output.enrollment.map(Into::into),
    }))
}

/// GET /me
///
/// Returns the authenticated identity. The middleware has already
/// resolved the token, so this only echoes the request extension.
pub async fn me(Extension(user): Extension<CurrentUser>) -> Json<MeResponse> {
    Json(user.into())
}
