//! Location indices
//!
//! Both extractors produce an ordered multimap from a class identity to the
//! places it was seen. Keys keep first-seen order and each bucket keeps
//! insertion order, so reports list the earliest locations first.

use indexmap::IndexMap;
use serde::Serialize;
use std::path::PathBuf;

/// One use of a naming-convention class inside a stylesheet selector
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassUsageLocation {
    /// Stylesheet the selector lives in
    pub file: PathBuf,
    /// The full selector, not just the matched class
    pub selector: String,
}

/// One declaration of a class name in a store block file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeclarationLocation {
    /// Configuration document the declaration lives in
    pub file: PathBuf,
    /// Top-level block entry that declares the class
    pub block: String,
}

/// Ordered multimap from key to locations
///
/// A key is present only if at least one location was recorded for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationIndex<L> {
    buckets: IndexMap<String, Vec<L>>,
}

/// Primary suffix -> selectors using it
pub type SuffixIndex = LocationIndex<ClassUsageLocation>;

/// Declared class name -> blocks declaring it
pub type DeclarationIndex = LocationIndex<DeclarationLocation>;

impl<L> LocationIndex<L> {
    pub fn new() -> Self {
        Self {
            buckets: IndexMap::new(),
        }
    }

    /// Append a location under `key`
    pub(crate) fn record(&mut self, key: &str, location: L) {
        match self.buckets.get_mut(key) {
            Some(bucket) => bucket.push(location),
            None => {
                self.buckets.insert(key.to_string(), vec![location]);
            }
        }
    }

    /// Locations recorded for `key`, in insertion order
    pub fn locations(&self, key: &str) -> &[L] {
        self.buckets.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.buckets.contains_key(key)
    }

    /// Keys in first-seen order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.buckets.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[L])> {
        self.buckets
            .iter()
            .map(|(key, bucket)| (key.as_str(), bucket.as_slice()))
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Total number of recorded locations
    pub fn location_count(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }
}

impl<L> Default for LocationIndex<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L, K: AsRef<str>> FromIterator<(K, L)> for LocationIndex<L> {
    fn from_iter<I: IntoIterator<Item = (K, L)>>(iter: I) -> Self {
        let mut index = Self::new();
        for (key, location) in iter {
            index.record(key.as_ref(), location);
        }
        index
    }
}
