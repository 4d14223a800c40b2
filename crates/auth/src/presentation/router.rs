//! Auth Router
//!
//! Routes:
//! - `POST /login` - password + TOTP sign-in (public)
//! - `GET /me` - authenticated identity (requires bearer token)

use std::sync::Arc;

use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};

use crate::application::config::AuthConfig;
use crate::domain::repository::CredentialRepository;
use crate::presentation::{handlers, middleware};

/// Shared state for the auth routes
pub struct AuthAppState<R> {
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

// Manual impl: derive(Clone) would require R: Clone, but only the Arcs
// are cloned.
impl<R> Clone for AuthAppState<R> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            config: self.config.clone(),
        }
    }
}

impl<R> AuthAppState<R> {
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }
}

/// Build the auth router
pub fn auth_router<R>(state: AuthAppState<R>) -> Router
where
    R: CredentialRepository + Send + Sync + 'static,
{
    let protected = Router::new()
        .route("/me", get(handlers::me))
        .route_layer(from_fn_with_state(
            state.clone(),
            middleware::require_bearer::<R>,
        ));

    Router::new()
        .route("/login", post(handlers::login::<R>))
        .merge(protected)
        .with_state(state)
}
