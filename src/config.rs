//! Configuration management for the Bibliotek server

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

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

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    /// The single origin allowed to call the API from a browser
    pub allowed_origin: String,
}

/// Validation strictness for book payloads.
///
/// The rule set is explicit configuration rather than inline checks so the
/// strict and lenient variants stay selectable without code changes.
#[derive(Debug, Deserialize, Clone)]
pub struct ValidationConfig {
    /// Reject books whose `year` is missing or not positive
    #[serde(default)]
    pub require_year: bool,
    /// Verify `author_id` references an existing author before writing;
    /// when disabled, a dangling reference is only caught by the storage
    /// foreign-key constraint and surfaces as a server error
    #[serde(default = "default_require_author_exists")]
    pub require_author_exists: bool,
}

fn default_require_author_exists() -> bool {
    true
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub cors: CorsConfig,
    #[serde(default)]
    pub validation: ValidationConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default"))
            // Layer on the environment-specific file
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add environment variables (with prefix BIBLIOTEK_)
            .add_source(
                Environment::with_prefix("BIBLIOTEK")
                    .separator("_")
                    .try_parsing(true),
            )
            // Override database URL from DATABASE_URL env var if present
            .set_override_option("database.url", env::var("DATABASE_URL").ok())?
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:bibliotek.db".to_string(),
            max_connections: 10,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origin: "http://127.0.0.1:5500".to_string(),
        }
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            require_year: false,
            require_author_exists: true,
        }
    }
}
