//! Payload codecs
//!
//! Create, Update and Modify receive raw bytes. The service hands them to a
//! codec so the payload format stays a choice of the embedding caller.
//!
//! - [`JsonCodec`]: `serde_json`, the default
//! - [`BincodeCodec`]: compact binary, for in-process callers

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Result, StoreError};

/// Decodes request payloads and encodes responses
pub trait PayloadCodec {
    /// Decode a payload. Failures map to [`StoreError::Decode`].
    fn decode<T: DeserializeOwned>(&self, payload: &[u8]) -> Result<T>;

    /// Encode a value. Failures map to [`StoreError::Serialization`].
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>>;
}

/// JSON payloads
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl PayloadCodec for JsonCodec {
    fn decode<T: DeserializeOwned>(&self, payload: &[u8]) -> Result<T> {
        serde_json::from_slice(payload).map_err(|e| StoreError::Decode(e.to_string()))
    }

    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>> {
        serde_json::to_vec(value).map_err(|e| StoreError::Serialization(e.to_string()))
    }
}

/// Bincode payloads
#[derive(Debug, Clone, Copy, Default)]
pub struct BincodeCodec;

impl PayloadCodec for BincodeCodec {
    fn decode<T: DeserializeOwned>(&self, payload: &[u8]) -> Result<T> {
        bincode::deserialize(payload).map_err(|e| StoreError::Decode(e.to_string()))
    }

    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>> {
        bincode::serialize(value).map_err(|e| StoreError::Serialization(e.to_string()))
    }
}
