//! Snapshot handler capability

use crate::codec::JsonCodec;
use crate::error::Result;
use crate::service::{DictService, Service};

/// Reconstructs an empty service: filter factory, codec and capacity
///
/// Snapshots only carry data. Handlers call this to get a service with the
/// caller's behaviour attached, then restore the loaded state into it.
pub type ServiceBuilder<M, C = JsonCodec> = Box<dyn Fn() -> DictService<M, C> + Send + Sync>;

/// Loads and saves whole services
///
/// Contract: after `save(s)` succeeds, `load()` returns a service whose
/// `browse` with empty parameters equals `s`'s, in the same key order.
pub trait SnapshotHandler {
    type Service: Service;

    /// Load the last saved service
    fn load(&self) -> Result<Self::Service>;

    /// Save a service, replacing the previous snapshot
    fn save(&self, service: &Self::Service) -> Result<()>;
}
