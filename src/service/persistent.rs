//! Persistent Service
//!
//! Snapshot decorator: every call loads the authoritative service from a
//! handler, and every successful mutation saves it back.

use tracing::{debug, warn};

use crate::error::{Result, StoreError};
use crate::filter::Params;
use crate::snapshot::SnapshotHandler;

use super::{Operation, Service};

/// A service persisted through a [`SnapshotHandler`]
///
/// ## Semantics
/// - Reads (select, browse): load → delegate. Never saves.
/// - Mutations: load → delegate → save, the save only if delegation succeeded.
///   A failed mutation is never persisted.
/// - A save failure is reported even though the in-memory mutation
///   succeeded; the next load will not see it.
///
/// Load and save failures are wrapped in [`StoreError::Persistence`] naming
/// the operation. Errors from the delegated service pass through as-is.
///
/// ## Concurrency
/// The load-mutate-save window is not atomic. Two decorators sharing a
/// handler can lose each other's updates (last save wins).
pub struct PersistentService<H> {
    handler: H,
}

impl<H: SnapshotHandler> PersistentService<H> {
    pub fn new(handler: H) -> Self {
        Self { handler }
    }

    /// The wrapped handler
    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn into_handler(self) -> H {
        self.handler
    }

    fn load(&self, operation: Operation) -> Result<H::Service> {
        self.handler.load().map_err(|e| {
            warn!(operation = %operation, error = %e, "snapshot load failed");
            StoreError::persistence(operation, e)
        })
    }

    fn read<T, F>(&self, operation: Operation, f: F) -> Result<T>
    where
        F: FnOnce(&H::Service) -> Result<T>,
    {
        debug_assert!(!operation.is_mutation());
        let service = self.load(operation)?;
        f(&service)
    }

    fn mutate<T, F>(&self, operation: Operation, f: F) -> Result<T>
    where
        F: FnOnce(&mut H::Service) -> Result<T>,
    {
        debug_assert!(operation.is_mutation());
        let mut service = self.load(operation)?;
        let output = f(&mut service)?;

        self.handler.save(&service).map_err(|e| {
            warn!(operation = %operation, error = %e, "snapshot save failed, mutation lost");
            StoreError::persistence(operation, e)
        })?;

        debug!(operation = %operation, "snapshot saved");
        Ok(output)
    }
}

impl<H: SnapshotHandler> Service for PersistentService<H> {
    type Model = <H::Service as Service>::Model;

    fn browse(&self, params: &Params) -> Result<Vec<Self::Model>> {
        self.read(Operation::Browse, |service| service.browse(params))
    }

    fn delete(&mut self, params: &Params) -> Result<Vec<Self::Model>> {
        self.mutate(Operation::Delete, |service| service.delete(params))
    }

    fn create(&mut self, payload: &[u8]) -> Result<Self::Model> {
        self.mutate(Operation::Create, |service| service.create(payload))
    }

    fn select(&self, key: &str) -> Result<Self::Model> {
        self.read(Operation::Select, |service| service.select(key))
    }

    fn remove(&mut self, key: &str) -> Result<Self::Model> {
        self.mutate(Operation::Remove, |service| service.remove(key))
    }

    fn update(&mut self, key: &str, payload: &[u8]) -> Result<Self::Model> {
        self.mutate(Operation::Update, |service| service.update(key, payload))
    }

    fn modify(&mut self, key: &str, payload: &[u8]) -> Result<Self::Model> {
        self.mutate(Operation::Modify, |service| service.modify(key, payload))
    }
}
