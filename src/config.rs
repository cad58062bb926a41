use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub storage: StorageConfig,
    pub images: ImagesConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Deserialize, Clone)]
pub struct AuthConfig {
    /// Shared upload password
    #[serde(default)]
    pub password: String,
    /// Token signing secret. Empty means no session is ever accepted.
    #[serde(default)]
    pub secret: String,
    pub public_paths: Vec<String>,
    pub api_prefix: String,
    pub login_path: String,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("password", &"<redacted>")
            .field("secret", &"<redacted>")
            .field("public_paths", &self.public_paths)
            .field("api_prefix", &self.api_prefix)
            .field("login_path", &self.login_path)
            .finish()
    }
}

impl AuthConfig {
    pub fn gate(&self) -> mediavault_auth::AuthGate {
        mediavault_auth::AuthGate::new(&self.secret)
            .public_paths(self.public_paths.iter().cloned())
            .api_prefix(self.api_prefix.to_owned())
            .login_path(self.login_path.to_owned())
    }

    pub fn issuer(&self) -> mediavault_auth::SessionIssuer {
        mediavault_auth::SessionIssuer::new(self.password.to_owned(), &self.secret)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Directory holding uploaded objects
    pub root: String,
    /// Base URL objects are reachable under
    pub public_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ImagesConfig {
    pub page_size: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Structured JSON output instead of the pretty console format
    #[serde(default)]
    pub json: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Plain variables (AUTH_SECRET, UPLOAD_PASSWORD, DATABASE_URL, MEDIA_PUBLIC_URL)
    /// 2. Environment variables (MEDIAVAULT__AUTH__SECRET, etc.)
    /// 3. Config file specified by path
    /// 4. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        builder = builder
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("database.url", "sqlite:mediavault.db")?
            .set_default("database.max_connections", 5)?
            .set_default("auth.password", "")?
            .set_default("auth.secret", "")?
            .set_default(
                "auth.public_paths",
                vec![
                    "/login",
                    "/api/auth/login",
                    "/api/auth/logout",
                    "/static",
                    "/media",
                    "/health",
                    "/ready",
                ],
            )?
            .set_default("auth.api_prefix", "/api/")?
            .set_default("auth.login_path", "/login")?
            .set_default("storage.root", "data/media")?
            .set_default("storage.public_url", "/media")?
            .set_default("images.page_size", 20)?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        // The file is optional
        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        if let Ok(password) = env::var("UPLOAD_PASSWORD") {
            builder = builder.set_override("auth.password", password)?;
        }
        if let Ok(secret) = env::var("AUTH_SECRET") {
            builder = builder.set_override("auth.secret", secret)?;
        }
        if let Ok(database_url) = env::var("DATABASE_URL") {
            builder = builder.set_override("database.url", database_url)?;
        }
        if let Ok(public_url) = env::var("MEDIA_PUBLIC_URL") {
            builder = builder.set_override("storage.public_url", public_url)?;
        }

        builder = builder.add_source(
            Environment::with_prefix("MEDIAVAULT")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("auth.public_paths")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    ///
    /// Missing credentials are not an error: the gate fails closed and
    /// login always answers 401.
    pub fn validate(&self) -> Result<(), String> {
        if self.server.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }
        if self.database.max_connections < 1 {
            return Err("Database max_connections must be at least 1".to_string());
        }
        if self.images.page_size < 1 {
            return Err("Images page_size must be at least 1".to_string());
        }
        if let Some(path) = self.auth.public_paths.iter().find(|p| !p.starts_with('/')) {
            return Err(format!("Public path '{path}' must start with '/'"));
        }
        if self.auth.secret.is_empty() {
            tracing::warn!("auth.secret is empty, every protected request will be refused");
        }
        if self.auth.password.is_empty() {
            tracing::warn!("auth.password is empty, login is disabled");
        }
        Ok(())
    }
}
