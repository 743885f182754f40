//! `key -> ordered list<value>` parameter store, case-insensitive on keys.

use std::collections::BTreeMap;

/// Reserved key accumulating positional (unnamed) argument values.
pub const ARGUMENTS: &str = "arguments";

/// `key -> ordered list<value>` store. Keys are case-folded on every write
/// and lookup; an inserted key with no values (`key=` in source) is
/// observable and distinct from a key holding a single empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    entries: BTreeMap<String, Vec<String>>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `value` under `key` (case-folded), creating the key if absent.
    pub fn insert(&mut self, key: &str, value: String) {
        self.entries.entry(key.to_lowercase()).or_default().push(value);
    }

    /// Register `key` with no values yet, distinct from inserting `""`.
    pub fn ensure_key(&mut self, key: &str) {
        self.entries.entry(key.to_lowercase()).or_default();
    }

    /// Push a positional value onto the reserved `ARGUMENTS` bucket.
    pub fn push_argument(&mut self, value: String) {
        self.insert(ARGUMENTS, value);
    }

    /// First value recorded for `key`, if any.
    pub fn value(&self, key: &str) -> Option<&str> {
        self.entries
            .get(&key.to_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// All values recorded for `key`, if the key was ever registered.
    pub fn values(&self, key: &str) -> Option<&[String]> {
        self.entries.get(&key.to_lowercase()).map(Vec::as_slice)
    }

    /// Positional arguments in source order.
    pub fn arguments(&self) -> &[String] {
        self.entries
            .get(ARGUMENTS)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Underlay `other` beneath `self`: keys already present in `self` (the
    /// call site) are left untouched; keys only present in `other` are
    /// copied in. Models "call-site wins over context".
    pub fn underlay(&mut self, other: &Params) {
        for (key, values) in &other.entries {
            self.entries
                .entry(key.clone())
                .or_insert_with(|| values.clone());
        }
    }
}
