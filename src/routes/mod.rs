use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware::from_fn_with_state,
    routing::{delete, get, post},
};
use mediavault_auth::{AuthGate, SessionIssuer};
use sqlx::SqlitePool;
use tower_http::services::ServeDir;

use crate::{assets::AssetsService, config::Config, error::AppError};

mod auth;
mod health;
mod images;
mod pages;

/// Largest accepted multipart upload body
pub const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub gate: Arc<AuthGate>,
    pub issuer: Arc<SessionIssuer>,
    pub images: mediavault_image::Command,
    pub pool: SqlitePool,
}

impl AppState {
    pub fn new(config: Config, pool: SqlitePool) -> Self {
        let store = mediavault_image::LocalStore::new(&config.storage.root);

        Self {
            gate: Arc::new(config.auth.gate()),
            issuer: Arc::new(config.auth.issuer()),
            images: mediavault_image::Command::new(pool.clone(), Arc::new(store)),
            config,
            pool,
        }
    }

    /// Public URL of a stored object
    pub fn object_url(&self, storage_key: &str) -> String {
        format!(
            "{}/{storage_key}",
            self.config.storage.public_url.trim_end_matches('/')
        )
    }
}

pub async fn fallback() -> AppError {
    AppError::NotFound
}

pub fn router(app_state: AppState) -> Router {
    let mut router = Router::new()
        // Health check endpoints
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .with_state(app_state.pool.clone())
        .route("/", get(pages::gallery))
        .route("/login", get(pages::login))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/images", get(images::list))
        .route(
            "/api/images/upload",
            post(images::upload).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/api/images/{id}", delete(images::delete))
        .nest_service("/static", AssetsService::new());

    // Objects are only served locally when the public URL points back at us
    let public_url = app_state.config.storage.public_url.trim_end_matches('/');
    if public_url.starts_with('/') && public_url.len() > 1 {
        router = router.nest_service(public_url, ServeDir::new(&app_state.config.storage.root));
    }

    router
        .fallback(fallback)
        .layer(from_fn_with_state(
            app_state.clone(),
            crate::middleware::auth_middleware,
        ))
        .with_state(app_state)
}
