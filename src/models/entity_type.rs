//! Entity type descriptors for the metadata model

use super::navigation::NavigationProperty;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Entity type descriptor
///
/// Describes one structured type in the model: its namespace-qualified name,
/// an optional base type (single inheritance), the key properties declared on
/// it, and its navigation properties.
///
/// Key properties are declared on root types only; derived types inherit them.
///
/// # Example
///
/// ```rust
/// use odata_link_sdk::models::EntityType;
///
/// let customer = EntityType::new("NS", "Customer").with_key("ID");
/// assert_eq!(customer.qualified_name(), "NS.Customer");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EntityType {
    pub id: Uuid,
    pub name: String,
    pub namespace: String,
    /// Qualified name of the base type; `None` for root types
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_type: Option<String>,
    /// Names of the key properties, in declared key order
    #[serde(default)]
    pub key_properties: Vec<String>,
    #[serde(default)]
    pub navigation_properties: Vec<NavigationProperty>,
}

impl EntityType {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        let namespace = namespace.into();
        let name = name.into();
        let id = Self::generate_id(&namespace, &name);
        Self {
            id,
            name,
            namespace,
            base_type: None,
            key_properties: Vec::new(),
            navigation_properties: Vec::new(),
        }
    }

    pub fn with_base(mut self, base_type: impl Into<String>) -> Self {
        self.base_type = Some(base_type.into());
        self
    }

    pub fn with_key(mut self, property: impl Into<String>) -> Self {
        self.key_properties.push(property.into());
        self
    }

    pub fn with_navigation(mut self, property: NavigationProperty) -> Self {
        self.navigation_properties.push(property);
        self
    }

    /// Namespace-qualified name, e.g. `NS.Customer`
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.namespace, self.name)
    }

    pub fn navigation_property(&self, name: &str) -> Option<&NavigationProperty> {
        self.navigation_properties.iter().find(|p| p.name == name)
    }

    /// Generate a deterministic UUID v5 for an entity type based on its qualified name
    /// This avoids requiring random number generation (getrandom/wasm_js)
    pub fn generate_id(namespace: &str, name: &str) -> Uuid {
        let key = format!("entity-type:{}.{}", namespace, name);
        Uuid::new_v5(&Uuid::NAMESPACE_DNS, key.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualified_name() {
        let ty = EntityType::new("NS", "Customer");
        assert_eq!(ty.qualified_name(), "NS.Customer");
    }

    #[test]
    fn test_deterministic_id() {
        let a = EntityType::new("NS", "Customer");
        let b = EntityType::new("NS", "Customer");
        assert_eq!(a.id, b.id);

        let other = EntityType::new("NS", "Order");
        assert_ne!(a.id, other.id);
    }

    #[test]
    fn test_navigation_property_lookup() {
        let ty = EntityType::new("NS", "Customer")
            .with_navigation(NavigationProperty::new("Orders", "NS.Order"));

        assert!(ty.navigation_property("Orders").is_some());
        assert!(ty.navigation_property("Invoices").is_none());
    }
}
