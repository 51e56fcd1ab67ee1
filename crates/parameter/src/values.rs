use std::collections::HashMap;
use std::ops::Index;

use serde::{Deserialize, Serialize};

/// A set of parameter values, keyed by parameter key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterValues {
    #[serde(flatten)]
    values: HashMap<String, serde_json::Value>,
}

impl ParameterValues {
    /// Create an empty value set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a value by parameter key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.values.get(key)
    }

    /// Set a value for a parameter key.
    pub fn set(&mut self, key: impl Into<String>, value: serde_json::Value) {
        self.values.insert(key.into(), value);
    }

    /// Remove a value by key, returning it if it existed.
    pub fn remove(&mut self, key: &str) -> Option<serde_json::Value> {
        self.values.remove(key)
    }

    /// Check whether a value exists for the given key.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Iterate over all keys.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// The number of values stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether there are no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Try to get a value as a string reference.
    #[must_use]
    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.values.get(key)?.as_str()
    }

    /// Try to get a value as f64.
    #[must_use]
    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.values.get(key)?.as_f64()
    }

    /// Try to get a value as bool.
    #[must_use]
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.values.get(key)?.as_bool()
    }

    /// Create a snapshot of the current values for later restore.
    #[must_use]
    pub fn snapshot(&self) -> ParameterSnapshot {
        ParameterSnapshot {
            values: self.values.clone(),
        }
    }

    /// Restore values from a previously taken snapshot.
    pub fn restore(&mut self, snapshot: &ParameterSnapshot) {
        self.values = snapshot.values.clone();
    }

    /// Compute the difference between this value set and another.
    #[must_use]
    pub fn diff(&self, other: &Self) -> ParameterDiff {
        let mut added = Vec::new();
        let mut removed = Vec::new();
        let mut changed = Vec::new();

        for key in other.values.keys() {
            if !self.values.contains_key(key) {
                added.push(key.clone());
            }
        }

        for key in self.values.keys() {
            if !other.values.contains_key(key) {
                removed.push(key.clone());
            } else if self.values[key] != other.values[key] {
                changed.push(key.clone());
            }
        }

        added.sort();
        removed.sort();
        changed.sort();

        ParameterDiff {
            added,
            removed,
            changed,
        }
    }
}

impl FromIterator<(String, serde_json::Value)> for ParameterValues {
    fn from_iter<I: IntoIterator<Item = (String, serde_json::Value)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl Index<&str> for ParameterValues {
    type Output = serde_json::Value;

    fn index(&self, key: &str) -> &Self::Output {
        &self.values[key]
    }
}

/// A frozen copy of parameter values for snapshot/restore.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterSnapshot {
    values: HashMap<String, serde_json::Value>,
}

/// Describes the differences between two parameter value sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDiff {
    /// Keys present in `other` but not in `self`.
    pub added: Vec<String>,
    /// Keys present in `self` but not in `other`.
    pub removed: Vec<String>,
    /// Keys present in both but with different values.
    pub changed: Vec<String>,
}
