//! OrderedDict implementation
//!
//! Sorted parallel vectors with binary-search lookup.

use serde::{Deserialize, Serialize};

use super::DEFAULT_CAPACITY;

/// Sorted-array mapping from string key to value
///
/// Serializes as `{ keys, values }`. Deserialization re-checks the
/// ordering invariant, so a tampered snapshot cannot produce a dict that
/// binary search would misread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "RawDict<V>",
    bound(serialize = "V: Serialize", deserialize = "V: Deserialize<'de>")
)]
pub struct OrderedDict<V> {
    /// Strictly ascending, unique
    keys: Vec<String>,

    /// Same length as `keys`
    values: Vec<V>,
}

/// Unchecked wire shape of an OrderedDict
#[derive(Deserialize)]
struct RawDict<V> {
    keys: Vec<String>,
    values: Vec<V>,
}

impl<V> TryFrom<RawDict<V>> for OrderedDict<V> {
    type Error = String;

    fn try_from(raw: RawDict<V>) -> std::result::Result<Self, Self::Error> {
        if raw.keys.len() != raw.values.len() {
            return Err(format!(
                "dict has {} keys but {} values",
                raw.keys.len(),
                raw.values.len()
            ));
        }

        if let Some(i) = raw.keys.windows(2).position(|pair| pair[0] >= pair[1]) {
            return Err(format!(
                "dict keys out of order at index {}: '{}' >= '{}'",
                i + 1,
                raw.keys[i],
                raw.keys[i + 1]
            ));
        }

        Ok(Self {
            keys: raw.keys,
            values: raw.values,
        })
    }
}

impl<V> OrderedDict<V> {
    /// Create an empty dict with the default capacity
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create an empty dict with the given capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            keys: Vec::with_capacity(capacity),
            values: Vec::with_capacity(capacity),
        }
    }

    /// Lowest index whose key is `>= key`
    ///
    /// Equals `len()` when the key sorts after every stored key.
    pub fn index(&self, key: &str) -> usize {
        self.keys.partition_point(|k| k.as_str() < key)
    }

    /// Index of `key` if it is present
    pub fn position(&self, key: &str) -> Option<usize> {
        let i = self.index(key);
        (i < self.keys.len() && self.keys[i] == key).then_some(i)
    }

    /// Get the value for a key
    pub fn get(&self, key: &str) -> Option<&V> {
        self.position(key).map(|i| &self.values[i])
    }

    /// Check if a key is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Replace the value of an existing key. Never inserts.
    ///
    /// Returns false if the key does not exist.
    pub fn set(&mut self, key: &str, value: V) -> bool {
        match self.position(key) {
            Some(i) => {
                self.values[i] = value;
                true
            }
            None => false,
        }
    }

    /// Insert a new key at its sorted position
    ///
    /// Returns false, leaving the dict untouched, if the key exists.
    pub fn insert(&mut self, key: impl Into<String>, value: V) -> bool {
        let key = key.into();
        let i = self.index(&key);

        if i < self.keys.len() && self.keys[i] == key {
            return false;
        }

        self.keys.insert(i, key);
        self.values.insert(i, value);
        true
    }

    /// Remove a key, returning its value
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let i = self.position(key)?;
        self.keys.remove(i);
        Some(self.values.remove(i))
    }

    /// Indices of values matching the predicate, in ascending key order
    pub fn search<F>(&self, mut predicate: F) -> Vec<usize>
    where
        F: FnMut(&V) -> bool,
    {
        let mut indices = Vec::with_capacity(DEFAULT_CAPACITY);
        for (i, value) in self.values.iter().enumerate() {
            if predicate(value) {
                indices.push(i);
            }
        }
        indices
    }

    /// Clear all entries, resetting to the default capacity
    pub fn clear(&mut self) {
        self.clear_with_capacity(DEFAULT_CAPACITY);
    }

    /// Clear all entries, resetting to the given capacity
    pub fn clear_with_capacity(&mut self, capacity: usize) {
        self.keys = Vec::with_capacity(capacity);
        self.values = Vec::with_capacity(capacity);
    }

    /// Remove every entry, returning the values in key order
    pub fn take_all(&mut self) -> Vec<V> {
        self.keys = Vec::with_capacity(DEFAULT_CAPACITY);
        std::mem::replace(&mut self.values, Vec::with_capacity(DEFAULT_CAPACITY))
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Check if the dict is empty
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// All keys in ascending order
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// All values in key order
    pub fn values(&self) -> &[V] {
        &self.values
    }

    /// Key stored at an index
    pub fn key_at(&self, index: usize) -> Option<&str> {
        self.keys.get(index).map(String::as_str)
    }

    /// Value stored at an index
    pub fn value_at(&self, index: usize) -> Option<&V> {
        self.values.get(index)
    }

    /// Replace the value at an index, returning the old one
    ///
    /// The key is untouched, so ordering is preserved. Returns `None`
    /// (dropping `value`) when the index is out of bounds.
    pub fn replace_at(&mut self, index: usize, value: V) -> Option<V> {
        self.values
            .get_mut(index)
            .map(|slot| std::mem::replace(slot, value))
    }

    /// Iterate over `(key, value)` pairs in ascending key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> + '_ {
        self.keys.iter().map(String::as_str).zip(self.values.iter())
    }
}

impl<V> Default for OrderedDict<V> {
    fn default() -> Self {
        Self::new()
    }
}
