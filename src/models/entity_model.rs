//! Aggregate entity model

use super::entity_type::EntityType;
use super::navigation::NavigationSource;
use super::operation::BoundOperation;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The aggregate metadata model
///
/// Holds the entity types, navigation sources and bound operations of one
/// service, and answers the structural queries link generation needs: type
/// lookup, the subtype partial order, and declared-key resolution.
///
/// The subtype relation is an explicit walk of the base-type chain; no
/// runtime type introspection is involved.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EntityModel {
    pub namespace: String,
    #[serde(default)]
    pub entity_types: Vec<EntityType>,
    #[serde(default)]
    pub navigation_sources: Vec<NavigationSource>,
    #[serde(default)]
    pub operations: Vec<BoundOperation>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl EntityModel {
    pub fn new(namespace: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            namespace: namespace.into(),
            entity_types: Vec::new(),
            navigation_sources: Vec::new(),
            operations: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn add_entity_type(&mut self, entity_type: EntityType) {
        self.entity_types.push(entity_type);
        self.updated_at = Utc::now();
    }

    pub fn add_navigation_source(&mut self, source: NavigationSource) {
        self.navigation_sources.push(source);
        self.updated_at = Utc::now();
    }

    pub fn add_operation(&mut self, operation: BoundOperation) {
        self.operations.push(operation);
        self.updated_at = Utc::now();
    }

    /// Look up an entity type by qualified name
    pub fn entity_type(&self, qualified_name: &str) -> Option<&EntityType> {
        self.entity_types
            .iter()
            .find(|t| t.qualified_name() == qualified_name)
    }

    /// Look up a navigation source by name
    pub fn navigation_source(&self, name: &str) -> Option<&NavigationSource> {
        self.navigation_sources.iter().find(|s| s.name == name)
    }

    /// Look up a bound operation by qualified name
    pub fn operation(&self, qualified_name: &str) -> Option<&BoundOperation> {
        self.operations
            .iter()
            .find(|o| o.qualified_name() == qualified_name)
    }

    /// Whether `sub` equals `base` or derives from it through the base chain
    ///
    /// Reflexive and transitive. Unknown types are not related to anything
    /// but themselves.
    pub fn is_subtype_of(&self, sub: &str, base: &str) -> bool {
        if sub == base {
            return true;
        }
        let mut visited: HashSet<&str> = HashSet::new();
        let mut current = sub;
        while let Some(ty) = self.entity_type(current) {
            if !visited.insert(current) {
                // inheritance cycle; validation reports these separately
                return false;
            }
            match ty.base_type.as_deref() {
                Some(parent) if parent == base => return true,
                Some(parent) => current = parent,
                None => return false,
            }
        }
        false
    }

    /// Whether `sub` strictly derives from `base` (subtype and not equal)
    pub fn is_strict_subtype_of(&self, sub: &str, base: &str) -> bool {
        sub != base && self.is_subtype_of(sub, base)
    }

    /// Declared key property names for a type, in declared key order
    ///
    /// Keys are declared on root types; derived types resolve to the nearest
    /// ancestor that declares them. Returns an empty slice for unknown types
    /// or key-less hierarchies.
    pub fn key_properties(&self, qualified_name: &str) -> &[String] {
        let mut visited: HashSet<&str> = HashSet::new();
        let mut current = qualified_name;
        while let Some(ty) = self.entity_type(current) {
            if !visited.insert(current) {
                break;
            }
            if !ty.key_properties.is_empty() {
                return &ty.key_properties;
            }
            match ty.base_type.as_deref() {
                Some(parent) => current = parent,
                None => break,
            }
        }
        &[]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_model() -> EntityModel {
        let mut model = EntityModel::new("NS");
        model.add_entity_type(EntityType::new("NS", "Customer").with_key("ID"));
        model.add_entity_type(EntityType::new("NS", "SpecialCustomer").with_base("NS.Customer"));
        model.add_entity_type(
            EntityType::new("NS", "VerySpecialCustomer").with_base("NS.SpecialCustomer"),
        );
        model.add_entity_type(EntityType::new("NS", "Order").with_key("ID"));
        model
    }

    #[test]
    fn test_subtype_is_reflexive() {
        let model = sample_model();
        assert!(model.is_subtype_of("NS.Customer", "NS.Customer"));
        assert!(!model.is_strict_subtype_of("NS.Customer", "NS.Customer"));
    }

    #[test]
    fn test_subtype_is_transitive() {
        let model = sample_model();
        assert!(model.is_subtype_of("NS.VerySpecialCustomer", "NS.Customer"));
        assert!(model.is_strict_subtype_of("NS.SpecialCustomer", "NS.Customer"));
    }

    #[test]
    fn test_unrelated_types_are_not_subtypes() {
        let model = sample_model();
        assert!(!model.is_subtype_of("NS.Order", "NS.Customer"));
        assert!(!model.is_subtype_of("NS.Customer", "NS.SpecialCustomer"));
    }

    #[test]
    fn test_unknown_type_is_only_its_own_subtype() {
        let model = sample_model();
        assert!(model.is_subtype_of("NS.Ghost", "NS.Ghost"));
        assert!(!model.is_subtype_of("NS.Ghost", "NS.Customer"));
    }

    #[test]
    fn test_key_properties_are_inherited() {
        let model = sample_model();
        assert_eq!(model.key_properties("NS.Customer"), ["ID".to_string()]);
        assert_eq!(
            model.key_properties("NS.VerySpecialCustomer"),
            ["ID".to_string()]
        );
        assert!(model.key_properties("NS.Ghost").is_empty());
    }
}
