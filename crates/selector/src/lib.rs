//! Selector algebra: `key -> set<value>` filters.
//!
//! OR within a key, AND across keys; a key the subject doesn't declare at
//! all is permissive (never fails a match). A key registered with an empty
//! allowed set means "the subject must not declare this key."

use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectorError {
    #[error("selector entry `{0}` is not of the form key=value")]
    Malformed(String),
    #[error("selector key must not be empty")]
    EmptyKey,
}

/// Anything that can report its canonical values for a selector key.
///
/// Returns `None` when the subject doesn't declare `key` at all (permissive
/// match); `Some(values)` otherwise, with `values` already coerced to their
/// canonical string form (booleans -> `"true"`/`"false"`, numbers -> base
/// 10, arrays -> one entry per element).
pub trait Subject {
    fn values(&self, key: &str) -> Option<Vec<String>>;
}

/// Coerce a raw YAML-ish value into its canonical string form(s).
pub fn canonicalize(value: &serde_yaml::Value) -> Vec<String> {
    match value {
        serde_yaml::Value::Bool(b) => vec![b.to_string()],
        serde_yaml::Value::Number(n) => vec![n.to_string()],
        serde_yaml::Value::String(s) => vec![s.clone()],
        serde_yaml::Value::Sequence(items) => {
            items.iter().flat_map(canonicalize).collect()
        }
        serde_yaml::Value::Null => Vec::new(),
        serde_yaml::Value::Mapping(_) | serde_yaml::Value::Tagged(_) => Vec::new(),
    }
}

/// A `BTreeMap<String, String>`-backed subject, convenient for ad hoc tests
/// and for adapting any frontmatter's flat fields.
#[derive(Debug, Clone, Default)]
pub struct MapSubject(BTreeMap<String, Vec<String>>);

impl MapSubject {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, values: Vec<String>) -> &mut Self {
        self.0.insert(key.into(), values);
        self
    }
}

impl Subject for MapSubject {
    fn values(&self, key: &str) -> Option<Vec<String>> {
        self.0.get(key).cloned()
    }
}

/// `key -> set<allowed value>` filter map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selectors {
    entries: BTreeMap<String, BTreeSet<String>>,
}

impl Selectors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn allowed(&self, key: &str) -> Option<&BTreeSet<String>> {
        self.entries.get(key)
    }

    /// Parse `key=value`, trimming whitespace. An empty value registers the
    /// key with no allowed values ("subject must not declare this key").
    pub fn set(&mut self, kv: &str) -> Result<(), SelectorError> {
        let (key, value) = kv
            .split_once('=')
            .ok_or_else(|| SelectorError::Malformed(kv.to_string()))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(SelectorError::EmptyKey);
        }
        let value = value.trim();
        let entry = self.entries.entry(key.to_string()).or_default();
        if !value.is_empty() {
            entry.insert(value.to_string());
        }
        Ok(())
    }

    /// Register `key` as allowing `value`, creating the key's set if needed.
    pub fn set_value(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries
            .entry(key.into())
            .or_default()
            .insert(value.into());
    }

    /// Ensure `key` exists in the map, even with no allowed values yet.
    pub fn ensure_key(&mut self, key: impl Into<String>) {
        self.entries.entry(key.into()).or_default();
    }

    /// Union `other` into `self`: OR within each key by set union, AND is
    /// implicit across keys because every key in either map still applies.
    pub fn union(&mut self, other: &Selectors) {
        for (key, values) in &other.entries {
            let entry = self.entries.entry(key.clone()).or_default();
            entry.extend(values.iter().cloned());
        }
    }

    /// Evaluate this selector set against `subject`. Returns `(true, "")`
    /// on a pass, or `(false, reason)` naming the first offending key.
    pub fn matches(&self, subject: &dyn Subject) -> (bool, String) {
        for (key, allowed) in &self.entries {
            let Some(values) = subject.values(key) else {
                continue; // subject doesn't declare this key: permissive
            };

            if allowed.is_empty() {
                return (
                    false,
                    format!("key `{key}` must be absent but subject declares it"),
                );
            }

            if !values.iter().any(|v| allowed.contains(v)) {
                let expected: Vec<_> = allowed.iter().cloned().collect();
                return (
                    false,
                    format!(
                        "key `{key}` value(s) {values:?} not in allowed set {expected:?}"
                    ),
                );
            }
        }
        (true, String::new())
    }
}
