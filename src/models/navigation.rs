//! Navigation properties and navigation sources

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Navigation property declared on an entity type
///
/// Points at a target entity type. When `contains_target` is set the target
/// entities live inside their parent and have no independent top-level
/// address; they are reachable only through the parent's path.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NavigationProperty {
    pub name: String,
    /// Qualified name of the target entity type
    pub target_type: String,
    #[serde(default)]
    pub contains_target: bool,
}

impl NavigationProperty {
    pub fn new(name: impl Into<String>, target_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target_type: target_type.into(),
            contains_target: false,
        }
    }

    /// Navigation property whose target is contained in the parent
    pub fn contained(name: impl Into<String>, target_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target_type: target_type.into(),
            contains_target: true,
        }
    }
}

/// Kind of navigation source
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum NavigationSourceKind {
    EntitySet,
    Singleton,
    ContainedEntitySet,
}

/// Parent anchor of a contained navigation source
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContainedParent {
    /// Name of the navigation source the container entity lives in
    pub source: String,
    /// Name of the containment navigation property on the container type
    pub navigation_property: String,
}

/// Navigation source descriptor (entity set, singleton, or contained set)
///
/// Anchors a top-level or nested URL path. Entity sets and singletons are
/// addressable directly under the service root; contained sets are only
/// addressable through their parent's path.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NavigationSource {
    pub id: Uuid,
    pub name: String,
    pub kind: NavigationSourceKind,
    /// Qualified name of the declared element type
    pub entity_type: String,
    /// Parent anchor; present for contained sources only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<ContainedParent>,
}

impl NavigationSource {
    pub fn entity_set(name: impl Into<String>, entity_type: impl Into<String>) -> Self {
        let name = name.into();
        let id = Self::generate_id(&name);
        Self {
            id,
            name,
            kind: NavigationSourceKind::EntitySet,
            entity_type: entity_type.into(),
            parent: None,
        }
    }

    pub fn singleton(name: impl Into<String>, entity_type: impl Into<String>) -> Self {
        let name = name.into();
        let id = Self::generate_id(&name);
        Self {
            id,
            name,
            kind: NavigationSourceKind::Singleton,
            entity_type: entity_type.into(),
            parent: None,
        }
    }

    pub fn contained(
        name: impl Into<String>,
        entity_type: impl Into<String>,
        parent_source: impl Into<String>,
        navigation_property: impl Into<String>,
    ) -> Self {
        let name = name.into();
        let id = Self::generate_id(&name);
        Self {
            id,
            name,
            kind: NavigationSourceKind::ContainedEntitySet,
            entity_type: entity_type.into(),
            parent: Some(ContainedParent {
                source: parent_source.into(),
                navigation_property: navigation_property.into(),
            }),
        }
    }

    pub fn is_contained(&self) -> bool {
        self.kind == NavigationSourceKind::ContainedEntitySet
    }

    /// Generate a deterministic UUID v5 for a navigation source based on its name
    pub fn generate_id(name: &str) -> Uuid {
        let key = format!("navigation-source:{}", name);
        Uuid::new_v5(&Uuid::NAMESPACE_DNS, key.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_set_is_not_contained() {
        let set = NavigationSource::entity_set("Customers", "NS.Customer");
        assert_eq!(set.kind, NavigationSourceKind::EntitySet);
        assert!(!set.is_contained());
        assert!(set.parent.is_none());
    }

    #[test]
    fn test_contained_source_carries_parent() {
        let lines = NavigationSource::contained("OrderLines", "NS.OrderLine", "MyOrders", "OrderLines");
        assert!(lines.is_contained());
        let parent = lines.parent.expect("parent anchor");
        assert_eq!(parent.source, "MyOrders");
        assert_eq!(parent.navigation_property, "OrderLines");
    }
}
