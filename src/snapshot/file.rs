//! File snapshot handler
//!
//! Persists the snapshot to a single file. Saves go through a temp file
//! that is renamed over the target, so a crash mid-save leaves the previous
//! snapshot readable.

use std::fs::{self, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::codec::{JsonCodec, PayloadCodec};
use crate::config::{Config, SnapshotSync};
use crate::error::Result;
use crate::model::Model;
use crate::service::DictService;

use super::{encode_service, restore_service, ServiceBuilder, SnapshotHandler};

/// Snapshot handler backed by a file
pub struct FileHandler<M, C = JsonCodec> {
    /// Snapshot file path
    path: PathBuf,

    /// Whether to fsync before the rename
    sync: SnapshotSync,

    /// Builds the empty service each load restores into
    build: ServiceBuilder<M, C>,
}

impl<M: Model, C: PayloadCodec> FileHandler<M, C> {
    /// Open a snapshot file, creating it (and its directory) if missing
    ///
    /// A new file holds a snapshot of a freshly built service.
    pub fn open(path: impl Into<PathBuf>, build: ServiceBuilder<M, C>) -> Result<Self> {
        Self::open_with_sync(path, SnapshotSync::OsBuffered, build)
    }

    /// Open using the snapshot path and sync strategy from a config
    pub fn from_config(config: &Config, build: ServiceBuilder<M, C>) -> Result<Self> {
        config.validate()?;
        Self::open_with_sync(config.snapshot_path(), config.snapshot_sync, build)
    }

    fn open_with_sync(
        path: impl Into<PathBuf>,
        sync: SnapshotSync,
        build: ServiceBuilder<M, C>,
    ) -> Result<Self> {
        let handler = Self {
            path: path.into(),
            sync,
            build,
        };

        if let Some(parent) = handler.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        if !handler.path.exists() {
            info!(path = %handler.path.display(), "creating empty snapshot");
            handler.write(&encode_service(&(handler.build)())?)?;
        }

        Ok(handler)
    }

    /// Snapshot file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }

    /// Write bytes to the temp file, then rename over the snapshot
    ///
    /// On failure the temp file is removed and the previous snapshot stays.
    fn write(&self, bytes: &[u8]) -> Result<()> {
        let temp = self.temp_path();

        let result = self
            .write_temp(&temp, bytes)
            .and_then(|()| fs::rename(&temp, &self.path));

        if let Err(e) = result {
            let _ = fs::remove_file(&temp);
            return Err(e.into());
        }
        Ok(())
    }

    fn write_temp(&self, temp: &Path, bytes: &[u8]) -> io::Result<()> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(temp)?;

        let mut writer = BufWriter::new(file);
        writer.write_all(bytes)?;
        writer.flush()?;

        if self.sync == SnapshotSync::EveryWrite {
            writer.get_ref().sync_all()?;
        }
        Ok(())
    }
}

impl<M: Model, C: PayloadCodec> SnapshotHandler for FileHandler<M, C> {
    type Service = DictService<M, C>;

    fn load(&self) -> Result<Self::Service> {
        let bytes = fs::read(&self.path)?;
        debug!(path = %self.path.display(), bytes = bytes.len(), "loaded snapshot");
        restore_service(&self.build, &bytes)
    }

    fn save(&self, service: &Self::Service) -> Result<()> {
        let bytes = encode_service(service)?;
        self.write(&bytes)?;
        debug!(
            path = %self.path.display(),
            bytes = bytes.len(),
            entries = service.len(),
            "saved snapshot"
        );
        Ok(())
    }
}
