//! Configuration for dictstore
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

use crate::dict::DEFAULT_CAPACITY;
use crate::error::{Result, StoreError};

/// Main configuration for a dictstore instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Root directory for snapshot files
    /// Internal structure:
    ///   {data_dir}/
    ///     ├── {snapshot_file}        (latest successful save)
    ///     └── {snapshot_file}.tmp    (in-flight save, renamed on success)
    pub data_dir: PathBuf,

    /// File name of the snapshot inside `data_dir`
    pub snapshot_file: String,

    /// Sync strategy: whether to fsync each snapshot save
    pub snapshot_sync: SnapshotSync,

    // -------------------------------------------------------------------------
    // Dict Configuration
    // -------------------------------------------------------------------------
    /// Initial capacity of a freshly built dict
    pub initial_capacity: usize,
}

/// Snapshot sync strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotSync {
    /// fsync the temp file before renaming it over the snapshot (safest, slowest)
    EveryWrite,

    /// leave flushing to the OS
    OsBuffered,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./dictstore_data"),
            snapshot_file: "snapshot.dsnp".to_string(),
            snapshot_sync: SnapshotSync::OsBuffered,
            initial_capacity: DEFAULT_CAPACITY,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Full path of the snapshot file
    pub fn snapshot_path(&self) -> PathBuf {
        self.data_dir.join(&self.snapshot_file)
    }

    /// Reject settings that cannot produce a usable snapshot path
    pub fn validate(&self) -> Result<()> {
        if self.snapshot_file.is_empty() {
            return Err(StoreError::Config("snapshot file name is empty".to_string()));
        }
        if self.snapshot_file.contains(['/', '\\']) {
            return Err(StoreError::Config(format!(
                "snapshot file name must not contain a path separator: {}",
                self.snapshot_file
            )));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the data directory
    pub fn data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_dir = path.into();
        self
    }

    /// Set the snapshot file name
    pub fn snapshot_file(mut self, name: impl Into<String>) -> Self {
        self.config.snapshot_file = name.into();
        self
    }

    /// Set the snapshot sync strategy
    pub fn snapshot_sync(mut self, sync: SnapshotSync) -> Self {
        self.config.snapshot_sync = sync;
        self
    }

    /// Set the initial dict capacity
    pub fn initial_capacity(mut self, capacity: usize) -> Self {
        self.config.initial_capacity = capacity;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
