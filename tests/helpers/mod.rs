//! Shared setup for HTTP-level tests

#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, Response, header},
};
use http_body_util::BodyExt;
use mediavault::{
    AppState,
    config::{
        AuthConfig, Config, DatabaseConfig, ImagesConfig, ObservabilityConfig, ServerConfig,
        StorageConfig,
    },
};
use serde_json::Value;
use temp_dir::TempDir;
use tower::ServiceExt;

pub const PASSWORD: &str = "correct";
pub const SECRET: &str = "test_secret_key_minimum_32_characters_long";
pub const BOUNDARY: &str = "mediavault-test-boundary";

/// Router plus the directories it writes to; dropping it removes them
pub struct TestApp {
    pub router: Router,
    pub media: TempDir,
    pub config: Config,
}

pub fn test_config(media_root: &str, secret: &str) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
        },
        database: DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
        },
        auth: AuthConfig {
            password: PASSWORD.to_string(),
            secret: secret.to_string(),
            public_paths: [
                "/login",
                "/api/auth/login",
                "/api/auth/logout",
                "/static",
                "/media",
                "/health",
                "/ready",
            ]
            .iter()
            .map(|p| p.to_string())
            .collect(),
            api_prefix: "/api/".to_string(),
            login_path: "/login".to_string(),
        },
        storage: StorageConfig {
            root: media_root.to_string(),
            public_url: "/media".to_string(),
        },
        images: ImagesConfig { page_size: 2 },
        observability: ObservabilityConfig::default(),
    }
}

pub async fn setup() -> TestApp {
    setup_with_secret(SECRET).await
}

pub async fn setup_with_secret(secret: &str) -> TestApp {
    let media = TempDir::new().unwrap();
    let config = test_config(media.path().to_str().unwrap(), secret);

    let pool = mediavault::db::create_pool(&config.database.url, 1)
        .await
        .unwrap();
    mediavault::db::migrate(&pool).await.unwrap();

    let router = mediavault::router(AppState::new(config.clone(), pool));

    TestApp {
        router,
        media,
        config,
    }
}

/// `Cookie` header value carrying a token signed under [`SECRET`]
pub fn session_cookie() -> String {
    format!(
        "auth_token={}",
        mediavault_auth::token::sign("auth:1700000000000", SECRET)
    )
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub fn set_cookie(response: &Response<Body>) -> String {
    response
        .headers()
        .get(header::SET_COOKIE)
        .expect("Set-Cookie header")
        .to_str()
        .unwrap()
        .to_string()
}

/// One multipart part: (field name, optional file (name, content type), bytes)
pub type Part<'a> = (&'a str, Option<(&'a str, &'a str)>, &'a [u8]);

pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();

    for (name, file, data) in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match file {
            Some((file_name, content_type)) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
                    )
                    .as_bytes(),
                );
            }
            None => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
            }
        }
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn upload_request(parts: &[Part<'_>], cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/api/images/upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        );

    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }

    builder.body(Body::from(multipart_body(parts))).unwrap()
}

pub const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\nfake";
