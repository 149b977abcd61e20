//! Dotted key paths into JSON records.

use std::fmt;

use serde_json::Value;

use crate::error::{QueryError, Result};

/// A parsed path such as `customer.address.city`.
///
/// Segments index objects by field name; a numeric segment also indexes
/// arrays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPath {
    segments: Vec<String>,
}

impl KeyPath {
    pub fn parse(src: &str) -> Result<Self> {
        let src = src.trim();
        if src.is_empty() {
            return Err(QueryError::invalid("key path is empty"));
        }
        let segments: Vec<String> = src.split('.').map(str::to_string).collect();
        if segments.iter().any(String::is_empty) {
            return Err(QueryError::invalid(format!("key path '{src}' has an empty segment")));
        }
        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The value at this path; `None` when missing or `null`.
    pub fn lookup<'v>(&self, record: &'v Value) -> Option<&'v Value> {
        let mut cur = record;
        for seg in &self.segments {
            cur = match cur {
                Value::Object(map) => map.get(seg)?,
                Value::Array(items) => items.get(seg.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        match cur {
            Value::Null => None,
            v => Some(v),
        }
    }

    /// Owned key; absent keys become `null`.
    pub fn value_or_null(&self, record: &Value) -> Value {
        self.lookup(record).cloned().unwrap_or(Value::Null)
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}
