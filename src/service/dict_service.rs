//! Dict Service
//!
//! CRUD over a single OrderedDict plus a key-sequence counter.

use std::fmt;

use tracing::{debug, trace};

use crate::codec::{JsonCodec, PayloadCodec};
use crate::dict::{OrderedDict, DEFAULT_CAPACITY};
use crate::error::{Result, StoreError};
use crate::filter::{FilterFactory, Params};
use crate::model::Model;

use super::Service;

/// In-memory CRUD service
///
/// ## Check ordering
/// The order of decode, existence and validation checks is observable
/// through the error a caller sees, so each operation documents it:
/// - create: decode → make_key → validate → insert
/// - update: decode → validate → existence
/// - modify: decode → existence → merge → validate
///
/// Every check runs before the dict is touched, so a failed call leaves
/// the store unchanged.
pub struct DictService<M, C = JsonCodec> {
    /// Stored models, ordered by key
    dict: OrderedDict<M>,

    /// Sequence handed to the next `make_key`; bumped only after a create succeeds
    count: u64,

    /// Turns query parameters into a predicate
    factory: FilterFactory<M>,

    /// Payload decoder
    codec: C,
}

impl<M: Model> DictService<M, JsonCodec> {
    /// Create an empty service decoding JSON payloads
    pub fn new(factory: FilterFactory<M>) -> Self {
        Self::with_codec(factory, JsonCodec)
    }
}

impl<M: Model, C: PayloadCodec> DictService<M, C> {
    /// Create an empty service with the given payload codec
    pub fn with_codec(factory: FilterFactory<M>, codec: C) -> Self {
        Self::with_capacity(factory, codec, DEFAULT_CAPACITY)
    }

    /// Create an empty service whose dict starts with the given capacity
    pub fn with_capacity(factory: FilterFactory<M>, codec: C, capacity: usize) -> Self {
        Self {
            dict: OrderedDict::with_capacity(capacity),
            count: 0,
            factory,
            codec,
        }
    }

    /// Replace the stored state, e.g. with a loaded snapshot
    pub fn restore(&mut self, dict: OrderedDict<M>, count: u64) {
        self.dict = dict;
        self.count = count;
    }

    /// The underlying dict
    pub fn dict(&self) -> &OrderedDict<M> {
        &self.dict
    }

    /// The sequence the next create will use
    pub fn count(&self) -> u64 {
        self.count
    }

    /// The payload codec
    pub fn codec(&self) -> &C {
        &self.codec
    }

    pub fn len(&self) -> usize {
        self.dict.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dict.is_empty()
    }

    /// Indices of stored values matching the parameters
    fn matching(&self, params: &Params) -> Vec<usize> {
        let filter = (self.factory)(params);
        self.dict.search(|value| filter(value))
    }
}

impl<M: Model, C: PayloadCodec> Service for DictService<M, C> {
    type Model = M;

    fn browse(&self, params: &Params) -> Result<Vec<M>> {
        let indices = self.matching(params);
        trace!(matched = indices.len(), total = self.dict.len(), "browse");

        Ok(indices
            .into_iter()
            .filter_map(|i| self.dict.value_at(i).cloned())
            .collect())
    }

    fn delete(&mut self, params: &Params) -> Result<Vec<M>> {
        let indices = self.matching(params);

        // Resolve to keys first: removing by index would shift later indices.
        let keys: Vec<String> = indices
            .iter()
            .filter_map(|&i| self.dict.key_at(i).map(str::to_owned))
            .collect();

        debug!(matched = keys.len(), total = self.dict.len(), "delete");

        if !keys.is_empty() && keys.len() == self.dict.len() && keys == self.dict.keys() {
            return Ok(self.dict.take_all());
        }

        let mut removed = Vec::with_capacity(keys.len());
        for key in keys {
            let value = self
                .dict
                .remove(&key)
                .ok_or_else(|| StoreError::key_missing(key))?;
            removed.push(value);
        }

        Ok(removed)
    }

    fn create(&mut self, payload: &[u8]) -> Result<M> {
        let mut model: M = self.codec.decode(payload)?;

        let key = model.make_key(self.count);
        model.validate()?;

        if !self.dict.insert(key.clone(), model.clone()) {
            return Err(StoreError::key_exists(key));
        }

        self.count += 1;
        debug!(key = %key, sequence = self.count - 1, "created entry");

        Ok(model)
    }

    fn select(&self, key: &str) -> Result<M> {
        self.dict
            .get(key)
            .cloned()
            .ok_or_else(|| StoreError::key_missing(key))
    }

    fn remove(&mut self, key: &str) -> Result<M> {
        let value = self
            .dict
            .remove(key)
            .ok_or_else(|| StoreError::key_missing(key))?;

        debug!(key = %key, "removed entry");
        Ok(value)
    }

    fn update(&mut self, key: &str, payload: &[u8]) -> Result<M> {
        let model: M = self.codec.decode(payload)?;
        model.validate()?;

        if !self.dict.set(key, model.clone()) {
            return Err(StoreError::key_missing(key));
        }

        debug!(key = %key, "updated entry");
        Ok(model)
    }

    fn modify(&mut self, key: &str, payload: &[u8]) -> Result<M> {
        let patch: M::Patch = self.codec.decode(payload)?;

        let index = self
            .dict
            .position(key)
            .ok_or_else(|| StoreError::key_missing(key))?;

        // Work on a copy so a failed merge or validation leaves the stored value intact.
        let mut value = self
            .dict
            .value_at(index)
            .cloned()
            .ok_or_else(|| StoreError::key_missing(key))?;

        value.merge(patch)?;
        value.validate()?;

        self.dict.replace_at(index, value.clone());
        debug!(key = %key, "modified entry");

        Ok(value)
    }
}

impl<M: fmt::Debug, C: fmt::Debug> fmt::Debug for DictService<M, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DictService")
            .field("dict", &self.dict)
            .field("count", &self.count)
            .field("codec", &self.codec)
            .finish_non_exhaustive()
    }
}
