use std::fmt;
use std::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use crate::books::domain::model::BookId;

// StoreError covers every failure a request can surface: read misses and
// backend faults reported by the store, plus the one error the dispatcher
// originates itself for request values outside the supported set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StoreError {
    NotFound {
        id: BookId,
    },
    Database {
        message: String,
        retryable: bool,
    },
    Runtime {
        message: String,
    },
    InvalidRequest {
        value: Value,
    },
}

impl StoreError {
    pub fn not_found(id: BookId) -> StoreError {
        StoreError::NotFound { id }
    }

    pub fn database(message: &str, retryable: bool) -> StoreError {
        StoreError::Database { message: message.to_string(), retryable }
    }

    pub fn runtime(message: &str) -> StoreError {
        StoreError::Runtime { message: message.to_string() }
    }

    pub fn invalid_request(value: Value) -> StoreError {
        StoreError::InvalidRequest { value }
    }

    pub fn retryable(&self) -> bool {
        match self {
            StoreError::NotFound { .. } => { false }
            StoreError::Database { retryable, .. } => { *retryable }
            StoreError::Runtime { .. } => { false }
            StoreError::InvalidRequest { .. } => { false }
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::NotFound { id } => {
                write!(f, "not found: {}", id)
            }
            StoreError::Database { message, retryable } => {
                write!(f, "{} {}", message, retryable)
            }
            StoreError::Runtime { message } => {
                write!(f, "{}", message)
            }
            StoreError::InvalidRequest { value } => {
                write!(f, "invalid request: {}", value)
            }
        }
    }
}

/// A specialized Result type for book store operations.
pub type StoreResult<T> = Result<T, StoreError>;
