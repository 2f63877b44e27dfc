//! Whole-model validation
//!
//! Cross-reference checks over an assembled entity model: name uniqueness,
//! reference resolution, key declarations, operation binding shape, and the
//! hierarchy cycle checks.

use super::hierarchy::{ContainmentCycle, HierarchyValidator, InheritanceCycle};
use super::naming::{
    NamingError, validate_namespace, validate_operation_name, validate_property_name,
    validate_source_name, validate_type_name,
};
use crate::models::{EntityModel, NavigationSourceKind, TypeReference};
use std::collections::HashMap;

/// Duplicate element name
#[derive(Debug, Clone, PartialEq)]
pub struct DuplicateName {
    /// What kind of element collides ("entity type", "navigation source", "operation")
    pub kind: &'static str,
    pub name: String,
}

/// Reference to an element the model does not declare
#[derive(Debug, Clone, PartialEq)]
pub struct UnknownReference {
    /// Element holding the reference
    pub referrer: String,
    /// The dangling reference
    pub reference: String,
    /// Where the reference appears ("base type", "navigation target", ...)
    pub context: &'static str,
}

/// Key declaration violation
#[derive(Debug, Clone, PartialEq)]
pub struct KeyViolation {
    pub entity_type: String,
    pub message: String,
}

/// Invalid identifier on a model element
#[derive(Debug, Clone, PartialEq)]
pub struct NamingViolation {
    pub element: String,
    pub error: NamingError,
}

/// Result of model validation
#[derive(Debug, Default)]
pub struct ModelValidationResult {
    pub duplicate_names: Vec<DuplicateName>,
    pub unknown_references: Vec<UnknownReference>,
    pub key_violations: Vec<KeyViolation>,
    pub naming_violations: Vec<NamingViolation>,
    pub inheritance_cycles: Vec<InheritanceCycle>,
    pub containment_cycles: Vec<ContainmentCycle>,
}

impl ModelValidationResult {
    /// Total number of findings
    pub fn findings(&self) -> usize {
        self.duplicate_names.len()
            + self.unknown_references.len()
            + self.key_violations.len()
            + self.naming_violations.len()
            + self.inheritance_cycles.len()
            + self.containment_cycles.len()
    }

    pub fn is_valid(&self) -> bool {
        self.findings() == 0
    }
}

/// Model validator
pub struct ModelValidator;

impl Default for ModelValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelValidator {
    /// Create a new model validator
    pub fn new() -> Self {
        Self
    }

    /// Run all structural checks over the model.
    pub fn validate(&self, model: &EntityModel) -> ModelValidationResult {
        let mut result = ModelValidationResult::default();

        self.check_naming(model, &mut result);
        self.check_duplicates(model, &mut result);
        self.check_references(model, &mut result);
        self.check_keys(model, &mut result);

        let hierarchy = HierarchyValidator::new().validate(&model.entity_types);
        result.inheritance_cycles = hierarchy.inheritance_cycles;
        result.containment_cycles = hierarchy.containment_cycles;

        result
    }

    fn check_naming(&self, model: &EntityModel, result: &mut ModelValidationResult) {
        if let Err(error) = validate_namespace(&model.namespace) {
            result.naming_violations.push(NamingViolation {
                element: model.namespace.clone(),
                error,
            });
        }
        for ty in &model.entity_types {
            if let Err(error) = validate_type_name(&ty.name) {
                result.naming_violations.push(NamingViolation {
                    element: ty.qualified_name(),
                    error,
                });
            }
            for nav in &ty.navigation_properties {
                if let Err(error) = validate_property_name(&nav.name) {
                    result.naming_violations.push(NamingViolation {
                        element: format!("{}/{}", ty.qualified_name(), nav.name),
                        error,
                    });
                }
            }
        }
        for source in &model.navigation_sources {
            if let Err(error) = validate_source_name(&source.name) {
                result.naming_violations.push(NamingViolation {
                    element: source.name.clone(),
                    error,
                });
            }
        }
        for operation in &model.operations {
            if let Err(error) = validate_operation_name(&operation.name) {
                result.naming_violations.push(NamingViolation {
                    element: operation.qualified_name(),
                    error,
                });
            }
        }
    }

    /// Duplicate detection.
    ///
    /// Contained navigation sources are scoped by their parent path rather
    /// than the service root, so they only collide with each other, keyed by
    /// (parent source, navigation property).
    fn check_duplicates(&self, model: &EntityModel, result: &mut ModelValidationResult) {
        let mut type_names: HashMap<String, usize> = HashMap::new();
        for ty in &model.entity_types {
            *type_names.entry(ty.qualified_name()).or_insert(0) += 1;
        }
        for (name, count) in type_names {
            if count > 1 {
                result.duplicate_names.push(DuplicateName {
                    kind: "entity type",
                    name,
                });
            }
        }

        let mut source_names: HashMap<String, usize> = HashMap::new();
        for source in model
            .navigation_sources
            .iter()
            .filter(|s| s.kind != NavigationSourceKind::ContainedEntitySet)
        {
            *source_names.entry(source.name.clone()).or_insert(0) += 1;
        }
        let mut contained_keys: HashMap<String, usize> = HashMap::new();
        for source in model
            .navigation_sources
            .iter()
            .filter(|s| s.kind == NavigationSourceKind::ContainedEntitySet)
        {
            let key = source
                .parent
                .as_ref()
                .map(|p| format!("{}/{}", p.source, p.navigation_property))
                .unwrap_or_else(|| source.name.clone());
            *contained_keys.entry(key).or_insert(0) += 1;
        }
        for (name, count) in source_names.into_iter().chain(contained_keys) {
            if count > 1 {
                result.duplicate_names.push(DuplicateName {
                    kind: "navigation source",
                    name,
                });
            }
        }

        let mut operation_names: HashMap<String, usize> = HashMap::new();
        for operation in &model.operations {
            *operation_names
                .entry(operation.qualified_name())
                .or_insert(0) += 1;
        }
        for (name, count) in operation_names {
            if count > 1 {
                result.duplicate_names.push(DuplicateName {
                    kind: "operation",
                    name,
                });
            }
        }
    }

    fn check_references(&self, model: &EntityModel, result: &mut ModelValidationResult) {
        for ty in &model.entity_types {
            if let Some(base) = ty.base_type.as_deref() {
                if model.entity_type(base).is_none() {
                    result.unknown_references.push(UnknownReference {
                        referrer: ty.qualified_name(),
                        reference: base.to_string(),
                        context: "base type",
                    });
                }
            }
            for nav in &ty.navigation_properties {
                if model.entity_type(&nav.target_type).is_none() {
                    result.unknown_references.push(UnknownReference {
                        referrer: format!("{}/{}", ty.qualified_name(), nav.name),
                        reference: nav.target_type.clone(),
                        context: "navigation target",
                    });
                }
            }
        }

        for source in &model.navigation_sources {
            if model.entity_type(&source.entity_type).is_none() {
                result.unknown_references.push(UnknownReference {
                    referrer: source.name.clone(),
                    reference: source.entity_type.clone(),
                    context: "source element type",
                });
            }
            if let Some(parent) = source.parent.as_ref() {
                if model.navigation_source(&parent.source).is_none() {
                    result.unknown_references.push(UnknownReference {
                        referrer: source.name.clone(),
                        reference: parent.source.clone(),
                        context: "contained parent source",
                    });
                }
            }
        }

        for operation in &model.operations {
            let binding_type = operation.binding_parameter().and_then(|binding| {
                match &binding.parameter_type {
                    TypeReference::Entity(name) | TypeReference::Collection(name) => {
                        Some(name.as_str())
                    }
                    TypeReference::Primitive(_) => None,
                }
            });
            if let Some(binding_type) = binding_type {
                if model.entity_type(binding_type).is_none() {
                    result.unknown_references.push(UnknownReference {
                        referrer: operation.qualified_name(),
                        reference: binding_type.to_string(),
                        context: "operation binding type",
                    });
                }
            }
        }
    }

    /// Keys are declared on root types and inherited; a root without keys is
    /// unaddressable and a derived type redeclaring keys shadows its root.
    fn check_keys(&self, model: &EntityModel, result: &mut ModelValidationResult) {
        for ty in &model.entity_types {
            match ty.base_type {
                None if ty.key_properties.is_empty() => {
                    result.key_violations.push(KeyViolation {
                        entity_type: ty.qualified_name(),
                        message: "root type declares no key properties".to_string(),
                    });
                }
                Some(_) if !ty.key_properties.is_empty() => {
                    result.key_violations.push(KeyViolation {
                        entity_type: ty.qualified_name(),
                        message: "derived type must not redeclare key properties".to_string(),
                    });
                }
                _ => {}
            }
        }
    }
}
