//! Startup configuration.
//!
//! Settings are resolved once, in order of precedence: command line or
//! environment (through [`Cli`]), the optional TOML file, built-in defaults.
//! The JWT signing secret comes from `JWT_SECRET` only and has no default.

use std::path::Path;

use notes_auth::jwt::JwtKeys;
use notes_models::db::config::DbConfig;
use serde::Deserialize;
use tracing::info;

use crate::cli::Cli;
use crate::prelude::*;

pub const JWT_SECRET_ENV: &str = "JWT_SECRET";
pub const DEFAULT_BIND: &str = "127.0.0.1:8080";
pub const DEFAULT_DATABASE_URL: &str = "notes.db";

/// Contents of the optional configuration file.
///
/// ```toml
/// bind = "0.0.0.0:8080"
/// database_url = "/var/lib/notesd/notes.db"
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub bind: Option<String>,
    pub database_url: Option<String>,
}

impl FileConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(file_path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(file_path)?;
        Self::from_toml(&contents)
    }

    /// Parse configuration from TOML string.
    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }
}

/// Fully resolved service configuration.
#[derive(Debug)]
pub struct AppConfig {
    pub bind: String,
    pub db: DbConfig,
    pub keys: JwtKeys,
}

impl AppConfig {
    /// Resolves the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// [`Error::MissingJwtSecret`] when `JWT_SECRET` is unset or blank, or any
    /// error reading the configuration file.
    pub fn load(cli: &Cli) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => {
                info!("Loading configuration from {}", path.display());
                FileConfig::from_file(path)?
            }
            None => FileConfig::default(),
        };
        Self::resolve(cli, file, std::env::var(JWT_SECRET_ENV).ok())
    }

    /// Merges the sources; `jwt_secret` is the raw value of `JWT_SECRET`.
    pub fn resolve(cli: &Cli, file: FileConfig, jwt_secret: Option<String>) -> Result<Self> {
        let jwt_secret = jwt_secret
            .filter(|secret| !secret.trim().is_empty())
            .ok_or(Error::MissingJwtSecret)?;

        let bind = cli
            .bind
            .clone()
            .or(file.bind)
            .unwrap_or_else(|| String::from(DEFAULT_BIND));
        let database_url = cli
            .database_url
            .clone()
            .or(file.database_url)
            .unwrap_or_else(|| String::from(DEFAULT_DATABASE_URL));

        Ok(Self {
            bind,
            db: DbConfig::new(database_url),
            keys: JwtKeys::new(jwt_secret.as_bytes())?,
        })
    }
}
