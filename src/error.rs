//! Error types for dictstore
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

use crate::model::ModelError;
use crate::service::Operation;

/// Result type alias using StoreError
pub type Result<T> = std::result::Result<T, StoreError>;

/// Unified error type for dictstore operations
#[derive(Debug, Error)]
pub enum StoreError {
    // -------------------------------------------------------------------------
    // Key Errors
    // -------------------------------------------------------------------------
    #[error("key '{key}' already exists")]
    KeyExists { key: String },

    #[error("key '{key}' does not exist")]
    KeyMissing { key: String },

    // -------------------------------------------------------------------------
    // Payload Errors
    // -------------------------------------------------------------------------
    #[error("validation failed: {0}")]
    Validation(#[from] ModelError),

    #[error("malformed payload: {0}")]
    Decode(String),

    // -------------------------------------------------------------------------
    // Persistence Errors
    // -------------------------------------------------------------------------
    #[error("persistence failure in {operation}: {source}")]
    Persistence {
        operation: Operation,
        source: Box<StoreError>,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot corruption detected: {0}")]
    Corruption(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Coarse classification of a [`StoreError`]
///
/// Calling layers map these to their own responses (status codes, exit
/// codes) without matching on every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    KeyExists,
    KeyMissing,
    Validation,
    Decode,
    Persistence,
    Io,
    Corruption,
    Serialization,
    Config,
}

impl StoreError {
    pub fn key_exists(key: impl Into<String>) -> Self {
        StoreError::KeyExists { key: key.into() }
    }

    pub fn key_missing(key: impl Into<String>) -> Self {
        StoreError::KeyMissing { key: key.into() }
    }

    /// Wrap a load/save failure with the logical operation that triggered it
    pub fn persistence(operation: Operation, source: StoreError) -> Self {
        StoreError::Persistence {
            operation,
            source: Box::new(source),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::KeyExists { .. } => ErrorKind::KeyExists,
            StoreError::KeyMissing { .. } => ErrorKind::KeyMissing,
            StoreError::Validation(_) => ErrorKind::Validation,
            StoreError::Decode(_) => ErrorKind::Decode,
            StoreError::Persistence { .. } => ErrorKind::Persistence,
            StoreError::Io(_) => ErrorKind::Io,
            StoreError::Corruption(_) => ErrorKind::Corruption,
            StoreError::Serialization(_) => ErrorKind::Serialization,
            StoreError::Config(_) => ErrorKind::Config,
        }
    }

    /// The logical operation named by a persistence failure, if any
    pub fn operation(&self) -> Option<Operation> {
        match self {
            StoreError::Persistence { operation, .. } => Some(*operation),
            _ => None,
        }
    }
}
