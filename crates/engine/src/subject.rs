//! Adapts a frontmatter's raw `content` map into a selector `Subject`.

use context_engine_markdown::RawValue;
use context_engine_selector::{canonicalize, Subject};
use std::collections::BTreeMap;

pub struct ContentSubject<'a>(pub &'a BTreeMap<String, RawValue>);

impl Subject for ContentSubject<'_> {
    fn values(&self, key: &str) -> Option<Vec<String>> {
        self.0.get(key).map(canonicalize)
    }
}
