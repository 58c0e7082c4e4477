//! Label tables resolve opaque string keys found in dumps to display text.

use std::collections::{BTreeMap, HashMap};

use serde_json::{Map, Value};
use smol_str::SmolStr;

use crate::num::number::format_json_number;

/// Read-only `key -> text` lookup consulted while converting string values.
pub trait LabelLookup {
    fn lookup(&self, key: &str) -> Option<&str>;
}

impl<T: LabelLookup + ?Sized> LabelLookup for &T {
    fn lookup(&self, key: &str) -> Option<&str> {
        (**self).lookup(key)
    }
}

impl LabelLookup for HashMap<String, String> {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

impl LabelLookup for BTreeMap<String, String> {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelTable {
    entries: HashMap<SmolStr, String>,
}

impl LabelTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from the output of [`crate::parse_pairs`]. Non-string
    /// values are stored as their JSON text.
    pub fn from_pairs(pairs: &Map<String, Value>) -> Self {
        let mut table = Self::new();
        table.extend_from_pairs(pairs);
        table
    }

    pub fn extend_from_pairs(&mut self, pairs: &Map<String, Value>) {
        for (key, value) in pairs {
            let text = match value {
                Value::String(text) => text.clone(),
                Value::Number(number) => format_json_number(number),
                other => other.to_string(),
            };
            self.entries.insert(SmolStr::new(key), text);
        }
    }

    pub fn insert(&mut self, key: impl AsRef<str>, text: impl Into<String>) -> Option<String> {
        self.entries.insert(SmolStr::new(key), text.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl LabelLookup for LabelTable {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.get(key)
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for LabelTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (key, text) in iter {
            table.insert(key, text);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn from_pairs_renders_non_strings() {
        let pairs = json!({"A": "Alpha", "B": 12, "C": 1.5});
        let Value::Object(pairs) = pairs else {
            unreachable!()
        };
        let table = LabelTable::from_pairs(&pairs);
        assert_eq!(table.lookup("A"), Some("Alpha"));
        assert_eq!(table.lookup("B"), Some("12"));
        assert_eq!(table.lookup("C"), Some("1.5"));
        assert_eq!(table.lookup("D"), None);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn collects_from_tuples() {
        let table: LabelTable = [("K", "v")].into_iter().collect();
        assert_eq!(table.get("K"), Some("v"));
    }
}
