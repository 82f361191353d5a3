//! Dict Module
//!
//! In-memory ordered mapping from string keys to values.
//!
//! ## Responsibilities
//! - Keep keys strictly ascending and unique between public calls
//! - O(log n) lookups via binary search
//! - O(n) insert/remove (elements shift to keep the arrays dense)
//! - Linear predicate search returning indices in key order
//!
//! ## Data Structure Choice
//! Two parallel vectors instead of a tree:
//! ```text
//!   keys:   ["1",  "3",  "7"]     strictly ascending
//!   values: [ A,    B,    C ]     values[i] belongs to keys[i]
//! ```
//! - Index-addressable, so search results are plain positions
//! - Cache friendly for the small-to-moderate collections a service holds
//! - Future: a BTreeMap plus position index if mutation cost shows up

mod ordered;

pub use ordered::OrderedDict;

/// Capacity used when no hint is given
pub const DEFAULT_CAPACITY: usize = 8;
