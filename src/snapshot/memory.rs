//! In-memory snapshot handler
//!
//! Keeps the encoded snapshot in a byte buffer. Useful for tests and for
//! embedding callers that persist the bytes themselves.

use bytes::Bytes;
use parking_lot::Mutex;
use tracing::trace;

use crate::codec::{JsonCodec, PayloadCodec};
use crate::error::Result;
use crate::model::Model;
use crate::service::DictService;

use super::{encode_service, restore_service, ServiceBuilder, SnapshotHandler};

/// Snapshot handler backed by an in-memory buffer
pub struct MemoryHandler<M, C = JsonCodec> {
    /// Last saved snapshot bytes
    buffer: Mutex<Bytes>,

    /// Builds the empty service each load restores into
    build: ServiceBuilder<M, C>,
}

impl<M: Model, C: PayloadCodec> MemoryHandler<M, C> {
    /// Create a handler holding a snapshot of a freshly built service
    pub fn new(build: ServiceBuilder<M, C>) -> Result<Self> {
        let initial = encode_service(&build())?;
        Ok(Self {
            buffer: Mutex::new(Bytes::from(initial)),
            build,
        })
    }

    /// Create a handler from existing snapshot bytes
    ///
    /// The bytes are not checked until the first load.
    pub fn from_bytes(build: ServiceBuilder<M, C>, bytes: impl Into<Bytes>) -> Self {
        Self {
            buffer: Mutex::new(bytes.into()),
            build,
        }
    }

    /// Current snapshot bytes
    pub fn bytes(&self) -> Bytes {
        self.buffer.lock().clone()
    }
}

impl<M: Model, C: PayloadCodec> SnapshotHandler for MemoryHandler<M, C> {
    type Service = DictService<M, C>;

    fn load(&self) -> Result<Self::Service> {
        let bytes = self.bytes();
        trace!(bytes = bytes.len(), "loading in-memory snapshot");
        restore_service(&self.build, &bytes)
    }

    fn save(&self, service: &Self::Service) -> Result<()> {
        let encoded = encode_service(service)?;
        trace!(bytes = encoded.len(), "saving in-memory snapshot");
        *self.buffer.lock() = Bytes::from(encoded);
        Ok(())
    }
}
