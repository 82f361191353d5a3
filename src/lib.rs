//! # dictstore
//!
//! An ordered in-memory key/value store with:
//! - A sorted-array dict with binary-search lookups
//! - A CRUD service with deterministic key sequencing and filtered bulk ops
//! - A snapshot decorator that loads before and saves after each call
//! - Pluggable payload codecs and snapshot handlers (memory, file)
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         Caller                               │
//! │           (payload bytes, keys, query parameters)            │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                 PersistentService (optional)                 │
//! │               load → delegate → save on success              │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │ DictService │          │  Snapshot   │
//!   │ (CRUD+seq)  │          │  Handler    │
//!   └──────┬──────┘          └─────────────┘
//!          │
//!          ▼
//!   ┌─────────────┐
//!   │ OrderedDict │
//!   │ (sorted vec)│
//!   └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod dict;
pub mod model;
pub mod filter;
pub mod codec;
pub mod service;
pub mod snapshot;
pub mod task;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use codec::{BincodeCodec, JsonCodec, PayloadCodec};
pub use config::Config;
pub use dict::OrderedDict;
pub use error::{ErrorKind, Result, StoreError};
pub use filter::{Filter, FilterFactory, Params};
pub use model::{Model, ModelError};
pub use service::{DictService, Operation, PersistentService, Service};
pub use snapshot::{FileHandler, MemoryHandler, ServiceBuilder, SnapshotHandler};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of dictstore
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
