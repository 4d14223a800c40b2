//! Authentication Middleware
//!
//! Resolves the `Authorization: Bearer` header to a `CurrentUser` and
//! attaches it as a request extension. Everything behind this layer can
//! assume an authenticated principal; role checks happen per handler.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::application::CheckTokenUseCase;
use crate::domain::repository::CredentialRepository;
use crate::presentation::router::AuthAppState;
use kernel::error::app_error::AppError;
use platform::bearer::extract_bearer;

/// Reject requests without a valid bearer token
pub async fn require_bearer<R>(
    State(state): State<AuthAppState<R>>,
    mut request: Request,
    next: Next,
) -> Response
where
    R: CredentialRepository + Send + Sync + 'static,
{
    let Some(token) = extract_bearer(request.headers()) else {
        return AppError::unauthorized("Missing bearer token")
            .with_action("Send an Authorization: Bearer header")
            .into_response();
    };

    let use_case = CheckTokenUseCase::new(state.repo.clone(), state.config.clone());

    match use_case.identify(token).await {
        Ok(Some(user)) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Ok(None) => AppError::unauthorized("Invalid or expired token")
            .with_action("Sign in again to obtain a new token")
            .into_response(),
        Err(e) => e.into_response(),
    }
}
