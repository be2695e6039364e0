//! API Errors
//!
//! One error type for every backend call, split by where the request failed.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// Network or browser fetch failure, no response received
    #[error("transport error on {endpoint}: {message}")]
    Transport { endpoint: String, message: String },

    /// Response received with a non-2xx status
    #[error("{endpoint} returned HTTP {status}")]
    Status { endpoint: String, status: u16 },

    /// Response body was not the expected JSON shape
    #[error("malformed response from {endpoint}: {message}")]
    Malformed { endpoint: String, message: String },
}

impl ApiError {
    pub fn transport(endpoint: &str, err: impl std::fmt::Display) -> Self {
        ApiError::Transport {
            endpoint: endpoint.to_string(),
            message: err.to_string(),
        }
    }

    pub fn malformed(endpoint: &str, err: impl std::fmt::Display) -> Self {
        ApiError::Malformed {
            endpoint: endpoint.to_string(),
            message: err.to_string(),
        }
    }

    pub fn endpoint(&self) -> &str {
        match self {
            ApiError::Transport { endpoint, .. }
            | ApiError::Status { endpoint, .. }
            | ApiError::Malformed { endpoint, .. } => endpoint,
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
