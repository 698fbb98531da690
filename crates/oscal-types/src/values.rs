//! Variable values collected while filling a template

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Mapping from variable name to the text typed for it.
///
/// Names are case-sensitive and may contain any characters. Keys for
/// variables that no longer appear in a template are allowed to linger;
/// a missing key reads the same as an empty value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariableValues(BTreeMap<String, String>);

impl VariableValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw value for `name`, empty string when unset
    pub fn get(&self, name: &str) -> &str {
        self.0.get(name).map(String::as_str).unwrap_or("")
    }

    /// Value for `name` only if it has non-whitespace content
    pub fn filled(&self, name: &str) -> Option<&str> {
        self.0
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }

    pub fn is_filled(&self, name: &str) -> bool {
        self.filled(name).is_some()
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    /// Insert an empty entry for `name` unless a value already exists.
    ///
    /// Returns true when a new key was added.
    pub fn ensure(&mut self, name: &str) -> bool {
        if self.0.contains_key(name) {
            return false;
        }
        self.0.insert(name.to_string(), String::new());
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.0.remove(name)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for VariableValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl From<BTreeMap<String, String>> for VariableValues {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_missing_key_reads_as_empty() {
        let values = VariableValues::new();
        assert_eq!(values.get("system name"), "");
        assert!(!values.is_filled("system name"));
    }

    #[test]
    fn test_whitespace_value_is_unfilled() {
        let mut values = VariableValues::new();
        values.set("impact", "   \t");
        assert!(!values.is_filled("impact"));
        assert_eq!(values.filled("impact"), None);
        assert_eq!(values.get("impact"), "   \t");
    }

    #[test]
    fn test_ensure_keeps_existing_value() {
        let mut values = VariableValues::new();
        values.set("owner", "Jane Doe");

        assert!(!values.ensure("owner"));
        assert!(values.ensure("agency"));
        assert_eq!(values.get("owner"), "Jane Doe");
        assert_eq!(values.get("agency"), "");
        assert_eq!(values.len(), 2);
    }

    #[test]
    fn test_serializes_as_plain_object() {
        let values: VariableValues = [("b", "2"), ("a", "1")].into_iter().collect();
        let json = serde_json::to_string(&values).unwrap();
        assert_eq!(json, r#"{"a":"1","b":"2"}"#);

        let back: VariableValues = serde_json::from_str(&json).unwrap();
        assert_eq!(back, values);
    }

    #[test]
    fn test_names_keep_punctuation() {
        let mut values = VariableValues::new();
        values.set("Low, Moderate, or High", "Moderate");
        assert_eq!(values.filled("Low, Moderate, or High"), Some("Moderate"));
        assert_eq!(values.filled("low, moderate, or high"), None);
    }
}
