//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use auth::{AuthConfig, PgCredentialRepository, auth_router};
use auth::middleware::require_bearer;
use auth::presentation::router::AuthAppState;
use axum::{
    Router, http,
    http::{Method, header},
    middleware::from_fn_with_state,
};
use base64::Engine;
use base64::engine::general_purpose;
use inventory::application::{RegisterUserInput, RegisterUserUseCase};
use inventory::domain::repository::InventoryRepository;
use inventory::{InventoryAppState, PgInventoryStore, inventory_router};
use kernel::role::Role;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,inventory=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../migrations").run(&pool).await?;

    tracing::info!("Migrations completed");

    // Token signing secret
    let auth_config = if cfg!(debug_assertions) {
        AuthConfig::with_random_secret()
    } else {
        // In production, load secret from environment
        let secret_b64 =
            env::var("AUTH_TOKEN_SECRET").expect("AUTH_TOKEN_SECRET must be set in production");
        let secret_bytes = Engine::decode(&general_purpose::STANDARD, &secret_b64)?;
        anyhow::ensure!(
            secret_bytes.len() == 32,
            "AUTH_TOKEN_SECRET must decode to exactly 32 bytes"
        );
        let mut secret = [0u8; 32];
        secret.copy_from_slice(&secret_bytes);
        AuthConfig::with_secret(secret)
    };

    let store = Arc::new(PgInventoryStore::new(pool.clone()));
    let auth_state = AuthAppState::new(
        Arc::new(PgCredentialRepository::new(pool.clone())),
        Arc::new(auth_config),
    );

    // First start on an empty database: create the initial admin so
    // someone can log in and create everyone else
    bootstrap_admin(&store).await?;

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:4200,http://127.0.0.1:4200".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]));

    // Build router: every inventory route sits behind the bearer check;
    // /api/auth manages its own public/protected split
    let protected = inventory_router(InventoryAppState::new(store)).route_layer(
        from_fn_with_state(
            auth_state.clone(),
            require_bearer::<PgCredentialRepository>,
        ),
    );

    let app = Router::new()
        .nest("/api/auth", auth_router(auth_state))
        .nest("/api", protected)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], 8080));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the initial admin account when the users table is empty
///
/// Controlled by `BOOTSTRAP_ADMIN_USER` / `BOOTSTRAP_ADMIN_PASSWORD`;
/// without them an empty database simply stays empty.
async fn bootstrap_admin(store: &Arc<PgInventoryStore>) -> anyhow::Result<()> {
    if store.any_users().await.map_err(anyhow::Error::from)? {
        return Ok(());
    }

    let (Ok(user_name), Ok(password)) = (
        env::var("BOOTSTRAP_ADMIN_USER"),
        env::var("BOOTSTRAP_ADMIN_PASSWORD"),
    ) else {
        tracing::warn!("No users exist and no bootstrap admin configured");
        return Ok(());
    };

    let use_case = RegisterUserUseCase::new(store.clone());
    let admin = use_case
        .execute(RegisterUserInput {
            user_name,
            first_name: "System".to_string(),
            last_name: "Administrator".to_string(),
            role: Role::Admin,
            password,
        })
        .await
        .map_err(anyhow::Error::from)?;

    tracing::info!(user_id = admin.user_id, "Bootstrap admin created");
    Ok(())
}
