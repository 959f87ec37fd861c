//! Configuration errors. All of them are fatal at startup.

use thiserror::Error;

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// dotenv file could not be read or parsed
    #[error("Failed to load env file {0}")]
    EnvFile(String),

    /// Required variable absent or blank
    #[error("Missing required variable {0}")]
    Missing(&'static str),

    /// Variable present but unusable
    #[error("Invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

impl ConfigError {
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            name,
            reason: reason.into(),
        }
    }
}
