//! Ordered key/value attributes bound to loggers and records
//!
//! Unlike a map, an `AttributeList` keeps every pair in insertion order and
//! never deduplicates keys. Whether a later key shadows an earlier one is up
//! to the sink that encodes the list.

use serde_json::Value;
use std::fmt;

/// A single structured field
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub key: String,
    pub value: Value,
}

impl Attribute {
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Insertion-ordered list of attributes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeList {
    attributes: Vec<Attribute>,
}

impl AttributeList {
    /// Create a new empty list
    pub fn new() -> Self {
        Self {
            attributes: Vec::new(),
        }
    }

    /// Append an attribute (builder version)
    #[must_use]
    pub fn with_attribute<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.push(key, value);
        self
    }

    /// Append an attribute
    pub fn push<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.attributes.push(Attribute::new(key, value));
    }

    /// Append every attribute of `other`, after the existing ones
    pub fn extend_from(&mut self, other: &AttributeList) {
        self.attributes.extend(other.attributes.iter().cloned());
    }

    /// A new list holding `self` followed by `other`
    #[must_use]
    pub fn concat(&self, other: &AttributeList) -> Self {
        let mut merged = self.clone();
        merged.extend_from(other);
        merged
    }

    /// Value of the last attribute named `key`
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes
            .iter()
            .rev()
            .find(|attr| attr.key == key)
            .map(|attr| &attr.value)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.attributes.iter().map(|attr| attr.key.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Attribute> {
        self.attributes.iter()
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Collapse into a JSON object; later keys overwrite earlier ones
    pub fn to_object(&self) -> Value {
        let mut map = serde_json::Map::new();
        for attr in &self.attributes {
            map.insert(attr.key.clone(), attr.value.clone());
        }
        Value::Object(map)
    }

    /// Format attributes as key=value pairs
    pub fn format_fields(&self) -> String {
        self.attributes
            .iter()
            .map(|attr| match &attr.value {
                Value::String(s) => format!("{}={}", attr.key, s),
                other => format!("{}={}", attr.key, other),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for AttributeList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_fields())
    }
}

impl<'a> IntoIterator for &'a AttributeList {
    type Item = &'a Attribute;
    type IntoIter = std::slice::Iter<'a, Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.attributes.iter()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for AttributeList {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut list = AttributeList::new();
        for (key, value) in iter {
            list.push(key, value);
        }
        list
    }
}
