//! Bound operations (actions and functions)

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Whether an operation is an action (side-effecting) or a function (composable)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum OperationKind {
    Action,
    Function,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Action => write!(f, "action"),
            Self::Function => write!(f, "function"),
        }
    }
}

/// Reference to a parameter or binding type
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum TypeReference {
    /// A single entity of the qualified type
    Entity(String),
    /// A collection of entities of the qualified element type
    Collection(String),
    /// A primitive type, e.g. `Edm.String`
    Primitive(String),
}

impl TypeReference {
    pub fn entity(qualified_name: impl Into<String>) -> Self {
        Self::Entity(qualified_name.into())
    }

    pub fn collection(element_type: impl Into<String>) -> Self {
        Self::Collection(element_type.into())
    }

    pub fn primitive(name: impl Into<String>) -> Self {
        Self::Primitive(name.into())
    }

    /// Qualified entity type name if this is a single-entity reference
    pub fn entity_name(&self) -> Option<&str> {
        match self {
            Self::Entity(name) => Some(name),
            _ => None,
        }
    }

    /// Qualified element type name if this is a collection reference
    pub fn collection_element(&self) -> Option<&str> {
        match self {
            Self::Collection(name) => Some(name),
            _ => None,
        }
    }
}

/// Declared operation parameter
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OperationParameter {
    pub name: String,
    pub parameter_type: TypeReference,
}

impl OperationParameter {
    pub fn new(name: impl Into<String>, parameter_type: TypeReference) -> Self {
        Self {
            name: name.into(),
            parameter_type,
        }
    }
}

/// Bound operation descriptor
///
/// The first declared parameter is the binding parameter: it designates the
/// receiver (an entity or a collection of entities) the operation applies to.
/// An operation without parameters is not bound to anything and cannot be
/// linked.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BoundOperation {
    pub id: Uuid,
    pub name: String,
    pub namespace: String,
    pub kind: OperationKind,
    /// Declared parameters, binding parameter first
    #[serde(default)]
    pub parameters: Vec<OperationParameter>,
}

impl BoundOperation {
    pub fn action(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(namespace, name, OperationKind::Action)
    }

    pub fn function(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(namespace, name, OperationKind::Function)
    }

    fn new(namespace: impl Into<String>, name: impl Into<String>, kind: OperationKind) -> Self {
        let namespace = namespace.into();
        let name = name.into();
        let id = Self::generate_id(&namespace, &name);
        Self {
            id,
            name,
            namespace,
            kind,
            parameters: Vec::new(),
        }
    }

    /// Set the binding parameter; must be called before other parameters
    pub fn bound_to(mut self, binding_type: TypeReference) -> Self {
        self.parameters
            .insert(0, OperationParameter::new("bindingParameter", binding_type));
        self
    }

    pub fn with_parameter(mut self, name: impl Into<String>, parameter_type: TypeReference) -> Self {
        self.parameters
            .push(OperationParameter::new(name, parameter_type));
        self
    }

    /// Namespace-qualified name, e.g. `NS.UpgradeAll`
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.namespace, self.name)
    }

    /// The binding (receiver) parameter, if any
    pub fn binding_parameter(&self) -> Option<&OperationParameter> {
        self.parameters.first()
    }

    /// URL template for the non-binding parameters
    ///
    /// Functions render their parameters as template placeholders, e.g.
    /// `(city=@city)`; a function with only the binding parameter renders
    /// `()`. Actions carry no template.
    pub fn parameter_template(&self) -> Option<String> {
        match self.kind {
            OperationKind::Action => None,
            OperationKind::Function => {
                let placeholders: Vec<String> = self
                    .parameters
                    .iter()
                    .skip(1)
                    .map(|p| format!("{}=@{}", p.name, p.name))
                    .collect();
                Some(format!("({})", placeholders.join(",")))
            }
        }
    }

    /// Generate a deterministic UUID v5 for an operation based on its qualified name
    pub fn generate_id(namespace: &str, name: &str) -> Uuid {
        let key = format!("operation:{}.{}", namespace, name);
        Uuid::new_v5(&Uuid::NAMESPACE_DNS, key.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binding_parameter_is_first() {
        let op = BoundOperation::function("NS", "IsUpgraded")
            .bound_to(TypeReference::entity("NS.Customer"))
            .with_parameter("city", TypeReference::primitive("Edm.String"));

        let binding = op.binding_parameter().expect("binding parameter");
        assert_eq!(binding.parameter_type.entity_name(), Some("NS.Customer"));
    }

    #[test]
    fn test_unbound_operation_has_no_binding() {
        let op = BoundOperation::action("NS", "SomeAction");
        assert!(op.binding_parameter().is_none());
    }

    #[test]
    fn test_function_parameter_template() {
        let op = BoundOperation::function("NS", "IsUpgradedWithParam")
            .bound_to(TypeReference::entity("NS.Customer"))
            .with_parameter("city", TypeReference::primitive("Edm.String"));

        assert_eq!(op.parameter_template().as_deref(), Some("(city=@city)"));
    }

    #[test]
    fn test_function_without_parameters_renders_empty_template() {
        let op = BoundOperation::function("NS", "IsSpecialUpgraded")
            .bound_to(TypeReference::entity("NS.SpecialCustomer"));

        assert_eq!(op.parameter_template().as_deref(), Some("()"));
    }

    #[test]
    fn test_action_has_no_template() {
        let op = BoundOperation::action("NS", "upgrade").bound_to(TypeReference::entity("NS.Customer"));
        assert!(op.parameter_template().is_none());
    }
}
