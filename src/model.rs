//! Model capability
//!
//! A model is the caller-defined value a service stores. The service never
//! looks inside it; it only asks the model to validate itself, derive its
//! key, and absorb partial updates.

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

/// A business-rule violation raised by a model
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ModelError {
    message: String,
}

impl ModelError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A storable model
pub trait Model: Clone + Serialize + DeserializeOwned {
    /// Partial shape accepted by `merge` (often a struct of `Option` fields)
    type Patch: DeserializeOwned;

    /// Check the model and return an error if it is invalid
    fn validate(&self) -> Result<(), ModelError>;

    /// Derive the primary key from a sequence number
    ///
    /// May also set derived fields on the model.
    fn make_key(&mut self, sequence: u64) -> String;

    /// Apply a partial update onto this model
    fn merge(&mut self, patch: Self::Patch) -> Result<(), ModelError>;
}
