//! OrderedDict Tests
//!
//! Tests verify:
//! - Binary-search index positions
//! - Insert/set/get/remove semantics
//! - Key ordering after mixed mutations
//! - Predicate search
//! - Clear and bulk take
//! - Deserialization rejects broken ordering

use dictstore::OrderedDict;

// =============================================================================
// Helper Functions
// =============================================================================

fn dict_with(keys: &[&str]) -> OrderedDict<String> {
    let mut dict = OrderedDict::new();
    for key in keys {
        assert!(dict.insert(*key, format!("value-{}", key)));
    }
    dict
}

fn assert_strictly_ascending(dict: &OrderedDict<String>) {
    for pair in dict.keys().windows(2) {
        assert!(pair[0] < pair[1], "keys out of order: {:?}", dict.keys());
    }
    assert_eq!(dict.keys().len(), dict.values().len());
}

// =============================================================================
// Index Tests
// =============================================================================

#[test]
fn test_index_on_empty_dict_is_zero() {
    let dict: OrderedDict<String> = OrderedDict::new();
    assert_eq!(dict.index("anything"), 0);
    assert_eq!(dict.index(""), 0);
}

#[test]
fn test_index_positions() {
    let dict = dict_with(&["b", "d", "f"]);

    assert_eq!(dict.index("a"), 0);
    assert_eq!(dict.index("b"), 0);
    assert_eq!(dict.index("c"), 1);
    assert_eq!(dict.index("d"), 1);
    assert_eq!(dict.index("e"), 2);
    assert_eq!(dict.index("f"), 2);
    assert_eq!(dict.index("g"), 3); // would be appended
}

#[test]
fn test_position_only_for_present_keys() {
    let dict = dict_with(&["b", "d"]);

    assert_eq!(dict.position("b"), Some(0));
    assert_eq!(dict.position("d"), Some(1));
    assert_eq!(dict.position("c"), None);
    assert_eq!(dict.position("z"), None);
}

// =============================================================================
// Basic Operations Tests
// =============================================================================

#[test]
fn test_new_dict_is_empty() {
    let dict: OrderedDict<u32> = OrderedDict::new();
    assert!(dict.is_empty());
    assert_eq!(dict.len(), 0);
    assert_eq!(dict.get("missing"), None);
}

#[test]
fn test_insert_set_get_remove_scenario() {
    let mut dict = OrderedDict::new();

    assert!(dict.insert("5", "A"));
    assert!(!dict.insert("5", "B"));
    assert_eq!(dict.get("5"), Some(&"A"));

    assert!(dict.set("5", "B"));
    assert_eq!(dict.get("5"), Some(&"B"));

    assert_eq!(dict.remove("5"), Some("B"));
    assert_eq!(dict.get("5"), None);
    assert!(dict.is_empty());
}

#[test]
fn test_duplicate_insert_leaves_dict_unchanged() {
    let mut dict = dict_with(&["a", "b", "c"]);
    let before = dict.clone();

    assert!(!dict.insert("b", "other".to_string()));
    assert_eq!(dict, before);
}

#[test]
fn test_set_never_inserts() {
    let mut dict = dict_with(&["a"]);

    assert!(!dict.set("b", "value".to_string()));
    assert_eq!(dict.len(), 1);
    assert!(!dict.contains_key("b"));
}

#[test]
fn test_remove_missing_key() {
    let mut dict = dict_with(&["a", "c"]);

    assert_eq!(dict.remove("b"), None);
    assert_eq!(dict.len(), 2);
}

#[test]
fn test_insert_keeps_order() {
    let dict = dict_with(&["m", "c", "x", "a", "p"]);

    assert_eq!(dict.keys(), &["a", "c", "m", "p", "x"]);
    assert_eq!(dict.values()[0], "value-a");
    assert_eq!(dict.values()[4], "value-x");
}

#[test]
fn test_remove_shifts_following_entries() {
    let mut dict = dict_with(&["a", "b", "c", "d"]);

    assert_eq!(dict.remove("b"), Some("value-b".to_string()));

    assert_eq!(dict.keys(), &["a", "c", "d"]);
    assert_eq!(dict.get("c"), Some(&"value-c".to_string()));
    assert_eq!(dict.get("d"), Some(&"value-d".to_string()));
}

#[test]
fn test_keys_stay_ascending_after_mixed_mutations() {
    let mut dict = OrderedDict::new();

    // Deterministic pseudo-random sequence of inserts and removes
    let mut state: u32 = 7;
    for _ in 0..500 {
        state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        let key = format!("k{}", (state >> 8) % 64);

        if state & 1 == 0 {
            dict.insert(key.clone(), key);
        } else {
            dict.remove(&key);
        }

        assert_strictly_ascending(&dict);
    }
}

#[test]
fn test_lexicographic_ordering() {
    let dict = dict_with(&["10", "9", "1", "2"]);
    assert_eq!(dict.keys(), &["1", "10", "2", "9"]);
}

// =============================================================================
// Positional Access Tests
// =============================================================================

#[test]
fn test_key_and_value_at() {
    let dict = dict_with(&["a", "b"]);

    assert_eq!(dict.key_at(1), Some("b"));
    assert_eq!(dict.value_at(1), Some(&"value-b".to_string()));
    assert_eq!(dict.key_at(2), None);
    assert_eq!(dict.value_at(2), None);
}

#[test]
fn test_replace_at_keeps_key() {
    let mut dict = dict_with(&["a", "b"]);

    let old = dict.replace_at(0, "new".to_string());

    assert_eq!(old, Some("value-a".to_string()));
    assert_eq!(dict.key_at(0), Some("a"));
    assert_eq!(dict.get("a"), Some(&"new".to_string()));
    assert_eq!(dict.replace_at(9, "ignored".to_string()), None);
}

#[test]
fn test_iter_in_key_order() {
    let dict = dict_with(&["c", "a", "b"]);

    let pairs: Vec<(&str, &String)> = dict.iter().collect();
    assert_eq!(pairs.len(), 3);
    assert_eq!(pairs[0].0, "a");
    assert_eq!(pairs[1].0, "b");
    assert_eq!(pairs[2].0, "c");
}

// =============================================================================
// Search Tests
// =============================================================================

#[test]
fn test_search_empty_dict() {
    let dict: OrderedDict<u32> = OrderedDict::new();
    assert!(dict.search(|_| true).is_empty());
}

#[test]
fn test_search_returns_ascending_indices() {
    let mut dict = OrderedDict::new();
    for i in 0..10u32 {
        dict.insert(format!("{:02}", i), i);
    }

    let even = dict.search(|v| v % 2 == 0);
    assert_eq!(even, vec![0, 2, 4, 6, 8]);

    let all = dict.search(|_| true);
    assert_eq!(all, (0..10).collect::<Vec<_>>());

    let none = dict.search(|_| false);
    assert!(none.is_empty());
}

#[test]
fn test_search_does_not_mutate() {
    let dict = dict_with(&["a", "b", "c"]);
    let before = dict.clone();

    let _ = dict.search(|v| v.ends_with('b'));
    assert_eq!(dict, before);
}

// =============================================================================
// Clear Tests
// =============================================================================

#[test]
fn test_clear() {
    let mut dict = dict_with(&["a", "b", "c"]);

    dict.clear();

    assert!(dict.is_empty());
    assert_eq!(dict.get("a"), None);
    assert!(dict.insert("a", "again".to_string()));
}

#[test]
fn test_clear_with_capacity() {
    let mut dict = dict_with(&["a", "b"]);

    dict.clear_with_capacity(128);

    assert!(dict.is_empty());
    assert_eq!(dict.index("a"), 0);
}

#[test]
fn test_take_all_returns_values_in_key_order() {
    let mut dict = dict_with(&["b", "a", "c"]);

    let values = dict.take_all();

    assert_eq!(values, vec!["value-a", "value-b", "value-c"]);
    assert!(dict.is_empty());
}

// =============================================================================
// Serialization Tests
// =============================================================================

#[test]
fn test_deserialize_valid_dict() {
    let json = r#"{"keys":["a","b"],"values":[1,2]}"#;
    let dict: OrderedDict<u32> = serde_json::from_str(json).unwrap();

    assert_eq!(dict.get("a"), Some(&1));
    assert_eq!(dict.get("b"), Some(&2));
}

#[test]
fn test_deserialize_rejects_unsorted_keys() {
    let json = r#"{"keys":["b","a"],"values":[1,2]}"#;
    let result: Result<OrderedDict<u32>, _> = serde_json::from_str(json);

    assert!(result.is_err());
}

#[test]
fn test_deserialize_rejects_duplicate_keys() {
    let json = r#"{"keys":["a","a"],"values":[1,2]}"#;
    let result: Result<OrderedDict<u32>, _> = serde_json::from_str(json);

    assert!(result.is_err());
}

#[test]
fn test_deserialize_rejects_length_mismatch() {
    let json = r#"{"keys":["a","b"],"values":[1]}"#;
    let result: Result<OrderedDict<u32>, _> = serde_json::from_str(json);

    assert!(result.is_err());
}
