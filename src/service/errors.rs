//! # Service Errors
//!
//! Per-request outcomes other than success. None of these stop the
//! process; the transport layer turns each into a response.

use thiserror::Error;

use crate::store::StoreError;

/// Result type for record service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Message returned when no record matches a date lookup
pub const NOT_FOUND_MESSAGE: &str = "Dados com a data providenciada inexistente.";

/// Record service errors
#[derive(Debug, Clone, Error)]
pub enum ServiceError {
    /// Request body could not be decoded into a record
    #[error("Invalid request body: {0}")]
    InvalidPayload(String),

    /// No record matched the lookup
    #[error("{}", NOT_FOUND_MESSAGE)]
    NotFound,

    /// Backing store failed
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ServiceError {
    /// Get error code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidPayload(_) => "INVALID_PAYLOAD",
            Self::NotFound => "NOT_FOUND",
            Self::Store(e) => e.code(),
        }
    }

    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidPayload(_) => 400,
            Self::NotFound => 404,
            Self::Store(_) => 500,
        }
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(e: serde_json::Error) -> Self {
        Self::InvalidPayload(e.to_string())
    }
}
