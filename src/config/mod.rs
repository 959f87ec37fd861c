//! # Configuration
//!
//! Process configuration read from the environment once at startup.
//! A dotenv file is loaded first, so variables in it behave exactly like
//! exported ones (already-exported variables win).
//!
//! | Variable | Required | Default |
//! |---|---|---|
//! | `DB_URL` | yes | |
//! | `DB_NAME` | no | `Sinaxario` |
//! | `DB_COLLECTION` | no | `Sinaxario` |
//! | `HTTP_HOST` | no | `localhost` |
//! | `HTTP_PORT` | no | `8080` |
//! | `CORS_ORIGINS` | no | empty (permissive) |
//! | `LOG_FORMAT` | no | `text` |
//!
//! Any error here is fatal: the process must not start serving.

mod errors;

pub use errors::{ConfigError, ConfigResult};

use std::path::Path;

use crate::http_server::HttpServerConfig;
use crate::logging::LogFormat;
use crate::store::{MongoStoreConfig, COUNTERS_COLLECTION};

pub const DB_URL: &str = "DB_URL";
pub const DB_NAME: &str = "DB_NAME";
pub const DB_COLLECTION: &str = "DB_COLLECTION";
pub const HTTP_HOST: &str = "HTTP_HOST";
pub const HTTP_PORT: &str = "HTTP_PORT";
pub const CORS_ORIGINS: &str = "CORS_ORIGINS";
pub const LOG_FORMAT: &str = "LOG_FORMAT";

const DEFAULT_DATABASE: &str = "Sinaxario";
const DEFAULT_COLLECTION: &str = "Sinaxario";
const DEFAULT_ENV_FILE: &str = ".env";
const MONGO_SCHEMES: [&str; 2] = ["mongodb://", "mongodb+srv://"];

/// Which store backs the service
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreSettings {
    Mongo(MongoStoreConfig),
    /// Process-local store; `DB_*` variables are not read
    InMemory,
}

impl StoreSettings {
    pub fn kind(&self) -> &'static str {
        match self {
            StoreSettings::Mongo(_) => "mongodb",
            StoreSettings::InMemory => "memory",
        }
    }
}

/// Full application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub store: StoreSettings,
    pub http: HttpServerConfig,
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Load the dotenv file, then read the process environment.
    ///
    /// With `env_file` set the file must exist. Without it, `./.env` is
    /// loaded when present and silently skipped otherwise.
    pub fn load(env_file: Option<&Path>, in_memory: bool) -> ConfigResult<Self> {
        load_env_file(env_file)?;
        Self::from_lookup(|key| std::env::var(key).ok(), in_memory)
    }

    /// Build configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F, in_memory: bool) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let store = if in_memory {
            StoreSettings::InMemory
        } else {
            StoreSettings::Mongo(mongo_settings(&lookup)?)
        };

        let mut http = HttpServerConfig::default();
        if let Some(host) = non_empty(lookup(HTTP_HOST)) {
            http.host = host;
        }
        if let Some(port) = non_empty(lookup(HTTP_PORT)) {
            http.port = port
                .parse()
                .map_err(|_| ConfigError::invalid(HTTP_PORT, format!("'{}' is not a port", port)))?;
        }
        if let Some(origins) = lookup(CORS_ORIGINS) {
            http.cors_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(str::to_string)
                .collect();
        }

        let log_format = match non_empty(lookup(LOG_FORMAT)) {
            Some(value) => value
                .parse()
                .map_err(|e: String| ConfigError::invalid(LOG_FORMAT, e))?,
            None => LogFormat::default(),
        };

        Ok(Self {
            store,
            http,
            log_format,
        })
    }
}

fn mongo_settings<F>(lookup: &F) -> ConfigResult<MongoStoreConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let uri = non_empty(lookup(DB_URL)).ok_or(ConfigError::Missing(DB_URL))?;
    validate_db_url(&uri)?;

    let collection =
        non_empty(lookup(DB_COLLECTION)).unwrap_or_else(|| DEFAULT_COLLECTION.to_string());
    if collection == COUNTERS_COLLECTION {
        return Err(ConfigError::invalid(
            DB_COLLECTION,
            format!("'{}' is reserved for the id sequence", COUNTERS_COLLECTION),
        ));
    }

    Ok(MongoStoreConfig {
        uri,
        database: non_empty(lookup(DB_NAME)).unwrap_or_else(|| DEFAULT_DATABASE.to_string()),
        collection,
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn validate_db_url(uri: &str) -> ConfigResult<()> {
    if MONGO_SCHEMES.iter().any(|scheme| uri.starts_with(scheme)) {
        Ok(())
    } else {
        Err(ConfigError::invalid(
            DB_URL,
            "must start with mongodb:// or mongodb+srv://",
        ))
    }
}

fn load_env_file(env_file: Option<&Path>) -> ConfigResult<()> {
    match env_file {
        Some(path) => dotenv::from_path(path)
            .map_err(|e| ConfigError::EnvFile(format!("{}: {}", path.display(), e))),
        None => {
            let default = Path::new(DEFAULT_ENV_FILE);
            if default.exists() {
                dotenv::from_path(default)
                    .map_err(|e| ConfigError::EnvFile(format!("{}: {}", DEFAULT_ENV_FILE, e)))?;
            }
            Ok(())
        }
    }
}
