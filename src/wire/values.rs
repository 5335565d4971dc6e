//! Wire value types
//!
//! Decoded objects carry every value as literal text. Typed reads are done
//! by the caller through the permissive helpers here.

use std::collections::HashMap;

use crate::wire::codec::{NULL, encode};

/// A single scalar member value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WireValue {
    Text(String),
    /// Numeric literal, kept as its textual form
    Number(String),
    Boolean(bool),
    Null,
}

impl WireValue {
    /// Render the value as wire text
    pub fn encode(&self) -> String {
        match self {
            WireValue::Text(s) => encode(s),
            WireValue::Number(n) => n.clone(),
            WireValue::Boolean(b) => b.to_string(),
            WireValue::Null => NULL.to_string(),
        }
    }
}

impl From<&str> for WireValue {
    fn from(value: &str) -> Self {
        WireValue::Text(value.to_string())
    }
}

impl From<String> for WireValue {
    fn from(value: String) -> Self {
        WireValue::Text(value)
    }
}

impl From<bool> for WireValue {
    fn from(value: bool) -> Self {
        WireValue::Boolean(value)
    }
}

impl From<i64> for WireValue {
    fn from(value: i64) -> Self {
        WireValue::Number(value.to_string())
    }
}

impl From<f64> for WireValue {
    fn from(value: f64) -> Self {
        WireValue::Number(value.to_string())
    }
}

impl<T: Into<WireValue>> From<Option<T>> for WireValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(WireValue::Null, Into::into)
    }
}

/// Flat key → literal-text mapping produced by [`decode`](crate::wire::decode)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WireObject {
    fields: HashMap<String, String>,
}

impl WireObject {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, key: String, value: String) {
        self.fields.insert(key, value);
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Value of `key` when present and non-empty
    pub fn get_non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.is_empty())
    }

    /// Permissive boolean read; absent keys are `false`
    pub fn flag(&self, key: &str) -> bool {
        self.get(key).is_some_and(parse_bool)
    }

    /// Integer read; absent or malformed values are `None`
    pub fn int(&self, key: &str) -> Option<i32> {
        self.get(key).and_then(parse_int)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl From<WireObject> for HashMap<String, String> {
    fn from(object: WireObject) -> Self {
        object.fields
    }
}

/// `true` (any case) and `1` are true; everything else is false
pub fn parse_bool(raw: &str) -> bool {
    raw.eq_ignore_ascii_case("true") || raw == "1"
}

/// Parse a 32-bit integer, yielding `None` instead of an error
pub fn parse_int(raw: &str) -> Option<i32> {
    raw.parse().ok()
}
