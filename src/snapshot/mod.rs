//! Snapshot Module
//!
//! Whole-service snapshots and the handlers that store them.
//!
//! ## Responsibilities
//! - Encode a DictService's state (sequence counter + dict) to bytes
//! - Detect corrupted or foreign snapshot bytes on decode
//! - Load/save snapshots through a [`SnapshotHandler`]
//!
//! ## File Format
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │ Header (18 bytes)                                            │
//! │   Magic: "DSNP" (4) | Version: u16 (2) | PayloadLen: u64 (8) │
//! │   PayloadCRC: u32 (4)                                        │
//! ├──────────────────────────────────────────────────────────────┤
//! │ Payload (PayloadLen bytes)                                   │
//! │   bincode { count: u64, dict: { keys, values } }             │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//! All integers little-endian.

mod file;
mod handler;
mod memory;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::codec::PayloadCodec;
use crate::dict::OrderedDict;
use crate::error::{Result, StoreError};
use crate::model::Model;
use crate::service::DictService;

pub use file::FileHandler;
pub use handler::{ServiceBuilder, SnapshotHandler};
pub use memory::MemoryHandler;

// =============================================================================
// Format Constants
// =============================================================================

/// Magic bytes identifying a dictstore snapshot
pub const MAGIC: &[u8; 4] = b"DSNP";

/// Current snapshot format version
pub const VERSION: u16 = 1;

/// Header size: Magic (4) + Version (2) + PayloadLen (8) + CRC (4) = 18 bytes
pub const HEADER_SIZE: usize = 18;

// =============================================================================
// Payload Shapes
// =============================================================================

#[derive(Serialize)]
struct StateRef<'a, M> {
    count: u64,
    dict: &'a OrderedDict<M>,
}

#[derive(Deserialize)]
#[serde(bound(deserialize = "M: Deserialize<'de>"))]
struct State<M> {
    count: u64,
    dict: OrderedDict<M>,
}

// =============================================================================
// Encoding/Decoding
// =============================================================================

/// Encode a sequence counter and dict as snapshot bytes
pub fn encode<M: Serialize>(dict: &OrderedDict<M>, count: u64) -> Result<Vec<u8>> {
    let payload = bincode::serialize(&StateRef { count, dict })
        .map_err(|e| StoreError::Serialization(e.to_string()))?;

    let mut bytes = Vec::with_capacity(HEADER_SIZE + payload.len());
    bytes.extend_from_slice(MAGIC);
    bytes.extend_from_slice(&VERSION.to_le_bytes());
    bytes.extend_from_slice(&(payload.len() as u64).to_le_bytes());
    bytes.extend_from_slice(&crc32fast::hash(&payload).to_le_bytes());
    bytes.extend_from_slice(&payload);

    Ok(bytes)
}

/// Decode snapshot bytes into a dict and sequence counter
pub fn decode<M: DeserializeOwned>(bytes: &[u8]) -> Result<(OrderedDict<M>, u64)> {
    if bytes.len() < HEADER_SIZE {
        return Err(StoreError::Corruption(format!(
            "incomplete header: expected {} bytes, got {}",
            HEADER_SIZE,
            bytes.len()
        )));
    }

    let (header, payload) = bytes.split_at(HEADER_SIZE);

    if &header[0..4] != MAGIC {
        return Err(StoreError::Corruption(format!(
            "invalid snapshot magic: expected DSNP, got {:?}",
            &header[0..4]
        )));
    }

    let version = u16::from_le_bytes([header[4], header[5]]);
    if version != VERSION {
        return Err(StoreError::Corruption(format!(
            "unsupported snapshot version: {}",
            version
        )));
    }

    let mut len_bytes = [0u8; 8];
    len_bytes.copy_from_slice(&header[6..14]);
    let payload_len = u64::from_le_bytes(len_bytes);

    if payload.len() as u64 != payload_len {
        return Err(StoreError::Corruption(format!(
            "payload length mismatch: header says {}, found {}",
            payload_len,
            payload.len()
        )));
    }

    let stored_crc = u32::from_le_bytes([header[14], header[15], header[16], header[17]]);
    let computed_crc = crc32fast::hash(payload);
    if stored_crc != computed_crc {
        return Err(StoreError::Corruption(format!(
            "payload checksum mismatch: stored {:08x}, computed {:08x}",
            stored_crc, computed_crc
        )));
    }

    let state: State<M> = bincode::deserialize(payload)
        .map_err(|e| StoreError::Corruption(format!("undecodable payload: {}", e)))?;

    Ok((state.dict, state.count))
}

/// Encode the full state of a service
pub fn encode_service<M: Model, C: PayloadCodec>(service: &DictService<M, C>) -> Result<Vec<u8>> {
    encode(service.dict(), service.count())
}

/// Build a fresh service and restore snapshot bytes into it
pub fn restore_service<M: Model, C: PayloadCodec>(
    build: &ServiceBuilder<M, C>,
    bytes: &[u8],
) -> Result<DictService<M, C>> {
    let (dict, count) = decode(bytes)?;
    let mut service = build();
    service.restore(dict, count);
    Ok(service)
}
