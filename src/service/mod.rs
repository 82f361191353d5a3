//! Service Module
//!
//! The CRUD capability and its two implementations.
//!
//! ## Layering
//! ```text
//!   caller
//!     │
//!     ▼
//!   PersistentService   load snapshot → delegate → save on success
//!     │
//!     ▼
//!   DictService         check ordering, key sequence, filters
//!     │
//!     ▼
//!   OrderedDict         sorted keys/values
//! ```
//!
//! ## Operations
//! - browse / delete: many values selected by query parameters
//! - create: new value, key derived from the sequence counter
//! - select / remove: one value by key
//! - update: full replacement by key
//! - modify: partial update by key

mod dict_service;
mod persistent;

use std::fmt;

use crate::error::Result;
use crate::filter::Params;

pub use dict_service::DictService;
pub use persistent::PersistentService;

/// CRUD over a store of models
pub trait Service {
    type Model;

    /// Values matching the parameters, in ascending key order
    fn browse(&self, params: &Params) -> Result<Vec<Self::Model>>;

    /// Remove and return the values matching the parameters
    fn delete(&mut self, params: &Params) -> Result<Vec<Self::Model>>;

    /// Decode, key and store a new value
    fn create(&mut self, payload: &[u8]) -> Result<Self::Model>;

    /// Value stored under a key
    fn select(&self, key: &str) -> Result<Self::Model>;

    /// Remove and return the value stored under a key
    fn remove(&mut self, key: &str) -> Result<Self::Model>;

    /// Replace the whole value stored under a key
    ///
    /// The stored key comes from the argument, not the payload. A model
    /// that carries its own key keeps whatever the payload held, so callers
    /// that want the two to agree must set it before encoding.
    fn update(&mut self, key: &str, payload: &[u8]) -> Result<Self::Model>;

    /// Merge a partial payload into the value stored under a key
    fn modify(&mut self, key: &str, payload: &[u8]) -> Result<Self::Model>;
}

/// Logical service operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Browse,
    Delete,
    Create,
    Select,
    Remove,
    Update,
    Modify,
}

impl Operation {
    /// Whether the operation changes stored state
    pub fn is_mutation(self) -> bool {
        !matches!(self, Operation::Browse | Operation::Select)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Browse => "browse",
            Operation::Delete => "delete",
            Operation::Create => "create",
            Operation::Select => "select",
            Operation::Remove => "remove",
            Operation::Update => "update",
            Operation::Modify => "modify",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
