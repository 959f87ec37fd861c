//! # Response Formatting

use serde::{Deserialize, Serialize};

/// `{"result": ...}` envelope used by create and list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultResponse<T> {
    pub result: T,
}

impl<T> ResultResponse<T> {
    pub fn new(result: T) -> Self {
        Self { result }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
