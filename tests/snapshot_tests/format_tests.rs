//! Snapshot Format Tests
//!
//! Tests for snapshot encoding/decoding and the in-memory handler.

use dictstore::snapshot::{self, HEADER_SIZE, MAGIC, VERSION};
use dictstore::task::{task_filter_factory, Task};
use dictstore::{
    DictService, ErrorKind, MemoryHandler, OrderedDict, Params, Service, ServiceBuilder,
    SnapshotHandler,
};

// =============================================================================
// Helper Functions
// =============================================================================

fn sample_dict() -> OrderedDict<String> {
    let mut dict = OrderedDict::new();
    dict.insert("b", "bee".to_string());
    dict.insert("a", "ay".to_string());
    dict.insert("c", "see".to_string());
    dict
}

fn task_builder() -> ServiceBuilder<Task> {
    Box::new(|| DictService::new(task_filter_factory()))
}

// =============================================================================
// Encoding Tests
// =============================================================================

#[test]
fn test_encode_header_layout() {
    let bytes = snapshot::encode(&sample_dict(), 3).unwrap();

    assert!(bytes.len() > HEADER_SIZE);
    assert_eq!(&bytes[0..4], MAGIC);
    assert_eq!(u16::from_le_bytes([bytes[4], bytes[5]]), VERSION);

    let mut len = [0u8; 8];
    len.copy_from_slice(&bytes[6..14]);
    assert_eq!(u64::from_le_bytes(len) as usize, bytes.len() - HEADER_SIZE);

    let crc = u32::from_le_bytes([bytes[14], bytes[15], bytes[16], bytes[17]]);
    assert_eq!(crc, crc32fast::hash(&bytes[HEADER_SIZE..]));
}

#[test]
fn test_decode_restores_dict_and_counter() {
    let dict = sample_dict();
    let bytes = snapshot::encode(&dict, 42).unwrap();

    let (decoded, count): (OrderedDict<String>, u64) = snapshot::decode(&bytes).unwrap();

    assert_eq!(decoded, dict);
    assert_eq!(decoded.keys(), &["a", "b", "c"]);
    assert_eq!(count, 42);
}

#[test]
fn test_empty_dict_snapshot() {
    let dict: OrderedDict<String> = OrderedDict::new();
    let bytes = snapshot::encode(&dict, 0).unwrap();

    let (decoded, count): (OrderedDict<String>, u64) = snapshot::decode(&bytes).unwrap();
    assert!(decoded.is_empty());
    assert_eq!(count, 0);
}

// =============================================================================
// Corruption Tests
// =============================================================================

#[test]
fn test_decode_truncated_header() {
    let bytes = snapshot::encode(&sample_dict(), 1).unwrap();

    let err = snapshot::decode::<String>(&bytes[..HEADER_SIZE - 1]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Corruption);
}

#[test]
fn test_decode_truncated_payload() {
    let bytes = snapshot::encode(&sample_dict(), 1).unwrap();

    let err = snapshot::decode::<String>(&bytes[..bytes.len() - 1]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Corruption);
}

#[test]
fn test_decode_trailing_bytes() {
    let mut bytes = snapshot::encode(&sample_dict(), 1).unwrap();
    bytes.push(0);

    let err = snapshot::decode::<String>(&bytes).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Corruption);
}

#[test]
fn test_decode_bad_magic() {
    let mut bytes = snapshot::encode(&sample_dict(), 1).unwrap();
    bytes[0] = b'X';

    let err = snapshot::decode::<String>(&bytes).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Corruption);
}

#[test]
fn test_decode_bad_version() {
    let mut bytes = snapshot::encode(&sample_dict(), 1).unwrap();
    bytes[4..6].copy_from_slice(&(VERSION + 1).to_le_bytes());

    let err = snapshot::decode::<String>(&bytes).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Corruption);
}

#[test]
fn test_decode_flipped_payload_bit() {
    let mut bytes = snapshot::encode(&sample_dict(), 1).unwrap();
    let last = bytes.len() - 1;
    bytes[last] ^= 0x01;

    let err = snapshot::decode::<String>(&bytes).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Corruption);
}

// =============================================================================
// Memory Handler Tests
// =============================================================================

#[test]
fn test_memory_handler_starts_empty() {
    let handler = MemoryHandler::new(task_builder()).unwrap();

    let service = handler.load().unwrap();
    assert!(service.is_empty());
    assert_eq!(service.count(), 0);
}

#[test]
fn test_memory_handler_round_trip() {
    let handler = MemoryHandler::new(task_builder()).unwrap();

    let mut service = handler.load().unwrap();
    for i in 0..5 {
        let payload = serde_json::to_vec(&Task::new(format!("task {}", i))).unwrap();
        service.create(&payload).unwrap();
    }
    handler.save(&service).unwrap();

    let loaded = handler.load().unwrap();
    assert_eq!(
        loaded.browse(&Params::new()).unwrap(),
        service.browse(&Params::new()).unwrap()
    );
    assert_eq!(loaded.count(), 5);

    // Loaded services get their filter factory back from the builder
    let done = loaded.browse(&Params::new().with("done", "true")).unwrap();
    assert_eq!(done.len(), 2);
}

#[test]
fn test_memory_handler_rejects_corrupt_bytes() {
    let handler = MemoryHandler::from_bytes(task_builder(), vec![1u8, 2, 3]);

    let err = handler.load().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Corruption);
}

#[test]
fn test_memory_handler_bytes_are_a_snapshot() {
    let handler = MemoryHandler::new(task_builder()).unwrap();
    let bytes = handler.bytes();

    let (dict, count): (OrderedDict<Task>, u64) = snapshot::decode(&bytes).unwrap();
    assert!(dict.is_empty());
    assert_eq!(count, 0);
}
