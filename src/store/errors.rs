//! # Store Errors
//!
//! Failures of the backing store. Every variant is recoverable per
//! request except `Connection`, which is fatal when raised at startup.

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Backing store errors
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Could not connect to or ping the store
    #[error("Store connection failed: {0}")]
    Connection(String),

    /// Count or find failed
    #[error("Store query failed: {0}")]
    Query(String),

    /// Insert or sequence update failed
    #[error("Store write failed: {0}")]
    Write(String),

    /// A stored document could not be decoded into a record
    #[error("Store decode failed: {0}")]
    Decode(String),
}

impl StoreError {
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    pub fn query(msg: impl Into<String>) -> Self {
        Self::Query(msg.into())
    }

    pub fn write(msg: impl Into<String>) -> Self {
        Self::Write(msg.into())
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            Self::Connection(_) => "SINAXARIO_STORE_CONNECTION",
            Self::Query(_) => "SINAXARIO_STORE_QUERY",
            Self::Write(_) => "SINAXARIO_STORE_WRITE",
            Self::Decode(_) => "SINAXARIO_STORE_DECODE",
        }
    }

    /// Whether this error must abort startup
    pub fn is_fatal_at_startup(&self) -> bool {
        matches!(self, Self::Connection(_))
    }
}
