//! Extracted record types.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One logical row of extracted key/value data.
///
/// Field order follows first insertion, so exported columns appear in the
/// order headers were discovered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: IndexMap<String, Value>,
}

impl Record {
    /// Create a new empty record.
    pub fn new() -> Self {
        Self {
            fields: IndexMap::new(),
        }
    }

    /// Build a record from header/value pairs. Convenient in tests.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Set a field, replacing any previous value for the header.
    pub fn insert(&mut self, header: impl Into<String>, value: Value) {
        self.fields.insert(header.into(), value);
    }

    /// Merge a value into a field, growing a list when the header repeats.
    pub fn append(&mut self, header: impl Into<String>, value: Value) {
        let header = header.into();
        match self.fields.get_mut(&header) {
            Some(existing) => existing.extend(value),
            None => {
                self.fields.insert(header, value);
            }
        }
    }

    /// Get a field value by header.
    pub fn get(&self, header: &str) -> Option<&Value> {
        self.fields.get(header)
    }

    /// Whether the record already has a value for the header.
    pub fn contains(&self, header: &str) -> bool {
        self.fields.contains_key(header)
    }

    /// Headers in insertion order.
    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Iterate over header/value pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no fields at all.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Whether the record holds at least one non-empty value.
    ///
    /// Records failing this check are never emitted.
    pub fn has_values(&self) -> bool {
        self.fields.values().any(|v| !v.is_blank())
    }
}

/// A field value: a single cleaned string, or an ordered list of strings
/// when a cell held multiple newline-delimited entries or a header
/// recurred under the append policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// A single value
    Single(String),
    /// Multiple values in order of appearance
    Multi(Vec<String>),
}

impl Value {
    /// Individual entries, in order.
    pub fn entries(&self) -> impl Iterator<Item = &str> {
        let entries = match self {
            Value::Single(s) => std::slice::from_ref(s),
            Value::Multi(v) => v.as_slice(),
        };
        entries.iter().map(String::as_str)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        match self {
            Value::Single(_) => 1,
            Value::Multi(v) => v.len(),
        }
    }

    /// Whether every entry is empty.
    pub fn is_blank(&self) -> bool {
        self.entries().all(|s| s.trim().is_empty())
    }

    /// Whether this is an empty value.
    pub fn is_empty(&self) -> bool {
        matches!(self, Value::Multi(v) if v.is_empty())
    }

    /// Join all entries with the given delimiter.
    pub fn joined(&self, delimiter: &str) -> String {
        match self {
            Value::Single(s) => s.clone(),
            Value::Multi(v) => v.join(delimiter),
        }
    }

    /// Merge another value into this one, promoting to a list.
    pub fn extend(&mut self, other: Value) {
        let mut entries: Vec<String> = match std::mem::replace(self, Value::Single(String::new()))
        {
            Value::Single(s) => vec![s],
            Value::Multi(v) => v,
        };
        match other {
            Value::Single(s) => entries.push(s),
            Value::Multi(v) => entries.extend(v),
        }
        *self = Value::Multi(entries);
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Single(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Single(s.to_string())
    }
}

impl From<Vec<String>> for Value {
    fn from(v: Vec<String>) -> Self {
        Value::Multi(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_preserves_order() {
        let mut record = Record::new();
        record.insert("Zeta", "1".into());
        record.insert("Alpha", "2".into());
        record.insert("Mid", "3".into());

        let headers: Vec<_> = record.headers().collect();
        assert_eq!(headers, vec!["Zeta", "Alpha", "Mid"]);
    }

    #[test]
    fn test_insert_overwrites() {
        let mut record = Record::new();
        record.insert("Name", "Alpha".into());
        record.insert("Name", "Beta".into());

        assert_eq!(record.len(), 1);
        assert_eq!(record.get("Name"), Some(&Value::Single("Beta".into())));
    }

    #[test]
    fn test_append_promotes_to_list() {
        let mut record = Record::new();
        record.append("Name", "Alpha".into());
        record.append("Name", "Beta".into());

        assert_eq!(
            record.get("Name"),
            Some(&Value::Multi(vec!["Alpha".into(), "Beta".into()]))
        );
    }

    #[test]
    fn test_has_values() {
        let mut record = Record::new();
        record.insert("A", "".into());
        record.insert("B", Value::Multi(vec![" ".into()]));
        assert!(!record.has_values());

        record.insert("C", "x".into());
        assert!(record.has_values());
    }

    #[test]
    fn test_value_joined() {
        let value = Value::Multi(vec!["a".into(), "b".into(), "c".into()]);
        assert_eq!(value.joined("; "), "a; b; c");
        assert_eq!(Value::Single("x".into()).joined("; "), "x");
    }

    #[test]
    fn test_record_serializes_as_object() {
        let record = Record::from_pairs([("Name", "Alpha"), ("Status", "Pass")]);
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"Name":"Alpha","Status":"Pass"}"#);
    }

    #[test]
    fn test_multi_value_serializes_as_array() {
        let record = Record::from_pairs([("Tags", vec!["a".to_string(), "b".to_string()])]);
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"Tags":["a","b"]}"#);
    }
}
