// src/domain/content_values.rs
//
// Column/value pairs handed to the favorites provider

use rusqlite::types::Value;
use std::collections::BTreeMap;

/// An ordered set of column name to SQL value pairs
///
/// Used for inserts and updates through the favorites provider. Keys are
/// checked against the table contract when the write happens, not here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentValues {
    values: BTreeMap<String, Value>,
}

impl ContentValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`put`](Self::put)
    pub fn with(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.put(column, value);
        self
    }

    /// Set a column, replacing any earlier value
    pub fn put(&mut self, column: &str, value: impl Into<Value>) {
        self.values.insert(column.to_string(), value.into());
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.values.get(column)
    }

    pub fn remove(&mut self, column: &str) -> Option<Value> {
        self.values.remove(column)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.values.contains_key(column)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}
