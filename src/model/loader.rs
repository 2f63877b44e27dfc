//! Model loading functionality
//!
//! Parses entity models from JSON or YAML and validates them before use.
//! Structurally broken models (cycles, dangling references, key violations)
//! are rejected so link generation never runs over an inconsistent model.

use crate::models::EntityModel;
use crate::validation::{ModelValidationResult, ModelValidator};
use thiserror::Error;
use tracing::{debug, warn};

/// Error type for model loading
#[derive(Debug, Error)]
pub enum ModelLoadError {
    #[error("failed to parse model: {0}")]
    Parse(String),
    #[error("model is structurally invalid ({findings} findings)")]
    Invalid {
        findings: usize,
        result: ModelValidationResult,
    },
}

/// Model loader
///
/// # Example
///
/// ```rust
/// use odata_link_sdk::model::ModelLoader;
///
/// let json = r#"{
///     "namespace": "NS",
///     "entity_types": [
///         { "id": "00000000-0000-0000-0000-000000000000",
///           "name": "Customer", "namespace": "NS", "key_properties": ["ID"] }
///     ],
///     "created_at": "2024-01-01T00:00:00Z",
///     "updated_at": "2024-01-01T00:00:00Z"
/// }"#;
/// let model = ModelLoader::new().from_json(json).unwrap();
/// assert!(model.entity_type("NS.Customer").is_some());
/// ```
pub struct ModelLoader;

impl Default for ModelLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelLoader {
    /// Create a new model loader
    pub fn new() -> Self {
        Self
    }

    /// Parse and validate a model from a JSON document
    pub fn from_json(&self, content: &str) -> Result<EntityModel, ModelLoadError> {
        let model: EntityModel =
            serde_json::from_str(content).map_err(|e| ModelLoadError::Parse(e.to_string()))?;
        self.validated(model)
    }

    /// Parse and validate a model from a YAML document
    pub fn from_yaml(&self, content: &str) -> Result<EntityModel, ModelLoadError> {
        let model: EntityModel =
            serde_yaml::from_str(content).map_err(|e| ModelLoadError::Parse(e.to_string()))?;
        self.validated(model)
    }

    fn validated(&self, model: EntityModel) -> Result<EntityModel, ModelLoadError> {
        let result = ModelValidator::new().validate(&model);
        if !result.is_valid() {
            for duplicate in &result.duplicate_names {
                warn!(kind = duplicate.kind, name = %duplicate.name, "duplicate element name");
            }
            for reference in &result.unknown_references {
                warn!(
                    referrer = %reference.referrer,
                    reference = %reference.reference,
                    context = reference.context,
                    "dangling reference"
                );
            }
            for violation in &result.key_violations {
                warn!(entity_type = %violation.entity_type, message = %violation.message, "key violation");
            }
            for violation in &result.naming_violations {
                warn!(element = %violation.element, error = %violation.error, "invalid identifier");
            }
            for cycle in &result.inheritance_cycles {
                warn!(entity_type = %cycle.entity_type, "inheritance cycle");
            }
            for cycle in &result.containment_cycles {
                warn!(
                    entity_type = %cycle.entity_type,
                    navigation_property = %cycle.navigation_property,
                    "containment cycle"
                );
            }
            return Err(ModelLoadError::Invalid {
                findings: result.findings(),
                result,
            });
        }

        debug!(
            namespace = %model.namespace,
            entity_types = model.entity_types.len(),
            navigation_sources = model.navigation_sources.len(),
            operations = model.operations.len(),
            "loaded entity model"
        );
        Ok(model)
    }
}
