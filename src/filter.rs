//! Query parameters and filters
//!
//! Browse and Delete take caller-supplied parameters; a filter factory
//! turns them into a predicate over the stored model.

use std::collections::BTreeMap;
use std::sync::Arc;

use url::form_urlencoded;

/// A pure predicate over a model value
pub type Filter<M> = Box<dyn Fn(&M) -> bool>;

/// Builds a filter from query parameters
pub type FilterFactory<M> = Arc<dyn Fn(&Params) -> Filter<M> + Send + Sync>;

/// Filter that keeps every value
pub fn accept_all<M: 'static>() -> Filter<M> {
    Box::new(|_: &M| true)
}

/// Factory that ignores its parameters and keeps every value
pub fn accept_all_factory<M: 'static>() -> FilterFactory<M> {
    Arc::new(|_: &Params| accept_all())
}

/// Multi-valued query parameters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    values: BTreeMap<String, Vec<String>>,
}

impl Params {
    /// Create an empty parameter set
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a form-urlencoded query string such as `done=true&q=buy+milk`
    ///
    /// Keys and values are percent-decoded and `+` becomes a space. A pair
    /// without `=` maps to an empty value; empty segments are skipped.
    pub fn parse(query: &str) -> Self {
        form_urlencoded::parse(query.trim_start_matches('?').as_bytes()).collect()
    }

    /// Append a value for a key
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.entry(key.into()).or_default().push(value.into());
    }

    /// Builder-style `insert`
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// First value for a key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// All values for a key, in insertion order
    pub fn get_all(&self, key: &str) -> &[String] {
        self.values.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Params
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}
