//! Configuration for Roombook.
//!
//! Loaded once at startup from environment variables (with `.env` support
//! via dotenvy) and exposed through a global accessor.

use once_cell::sync::OnceCell;

static CONFIG: OnceCell<Config> = OnceCell::new();

/// Top-level application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
}

/// HTTP server settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Database settings.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file, or ":memory:".
    pub path: String,
}

/// Authentication settings.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Secret used to sign JWTs. Must be overridden in production.
    pub jwt_secret: String,
    /// Token lifetime in hours.
    pub token_ttl_hours: i64,
}

impl Config {
    /// Build configuration from the process environment.
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig {
                host: env_or("ROOMBOOK_HOST", "0.0.0.0"),
                port: env_or("ROOMBOOK_PORT", "8080").parse().unwrap_or(8080),
            },
            database: DatabaseConfig {
                path: env_or("ROOMBOOK_DB_PATH", "data/roombook.db"),
            },
            auth: AuthConfig {
                jwt_secret: env_or("ROOMBOOK_JWT_SECRET", "dev-secret-change-in-production"),
                token_ttl_hours: env_or("ROOMBOOK_TOKEN_TTL_HOURS", "24")
                    .parse()
                    .unwrap_or(24),
            },
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Initialize the global configuration. Call once at startup.
pub fn init() -> &'static Config {
    dotenvy::dotenv().ok();
    CONFIG.get_or_init(Config::from_env)
}

/// Get the global configuration. Falls back to env defaults if `init`
/// was not called (useful in tests).
pub fn config() -> &'static Config {
    CONFIG.get_or_init(Config::from_env)
}
