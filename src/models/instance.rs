//! Entity instance values

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Key property value of an entity instance
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum KeyValue {
    Int64(i64),
    String(String),
    Boolean(bool),
    Uuid(Uuid),
}

impl KeyValue {
    /// Render the value as a URL key literal
    ///
    /// Strings are single-quoted with embedded quotes doubled; numbers,
    /// booleans and UUIDs render bare.
    pub fn to_literal(&self) -> String {
        match self {
            Self::Int64(v) => v.to_string(),
            Self::String(v) => format!("'{}'", v.replace('\'', "''")),
            Self::Boolean(v) => v.to_string(),
            Self::Uuid(v) => v.to_string(),
        }
    }
}

impl From<i64> for KeyValue {
    fn from(v: i64) -> Self {
        Self::Int64(v)
    }
}

impl From<i32> for KeyValue {
    fn from(v: i32) -> Self {
        Self::Int64(i64::from(v))
    }
}

impl From<&str> for KeyValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for KeyValue {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<bool> for KeyValue {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<Uuid> for KeyValue {
    fn from(v: Uuid) -> Self {
        Self::Uuid(v)
    }
}

/// Opaque key/value accessor over an entity instance
///
/// Only the property values needed for link generation are carried; the
/// serialization layer owns the full payload. Property order is preserved
/// as inserted.
///
/// # Example
///
/// ```rust
/// use odata_link_sdk::models::EntityInstance;
///
/// let customer = EntityInstance::new().with("ID", 42);
/// assert!(customer.get("ID").is_some());
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EntityInstance {
    properties: Vec<(String, KeyValue)>,
}

impl EntityInstance {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<KeyValue>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<KeyValue>) {
        let name = name.into();
        let value = value.into();
        match self.properties.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = value,
            None => self.properties.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&KeyValue> {
        self.properties
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_literal() {
        assert_eq!(KeyValue::from(42).to_literal(), "42");
    }

    #[test]
    fn test_string_literal_quotes() {
        assert_eq!(KeyValue::from("Ann").to_literal(), "'Ann'");
        assert_eq!(KeyValue::from("O'Brien").to_literal(), "'O''Brien'");
    }

    #[test]
    fn test_set_replaces_existing_value() {
        let mut instance = EntityInstance::new().with("ID", 1);
        instance.set("ID", 2);
        assert_eq!(instance.get("ID"), Some(&KeyValue::Int64(2)));
    }

    #[test]
    fn test_missing_property() {
        let instance = EntityInstance::new();
        assert!(instance.get("ID").is_none());
    }
}
