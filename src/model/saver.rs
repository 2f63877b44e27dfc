//! Model saving functionality
//!
//! Serializes entity models to JSON or YAML documents.

use crate::models::EntityModel;
use thiserror::Error;
use tracing::debug;

/// Error type for model saving
#[derive(Debug, Error)]
pub enum ModelSaveError {
    #[error("failed to serialize model: {0}")]
    Serialize(String),
}

/// Model saver
pub struct ModelSaver;

impl Default for ModelSaver {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelSaver {
    /// Create a new model saver
    pub fn new() -> Self {
        Self
    }

    /// Serialize a model to pretty-printed JSON
    pub fn to_json(&self, model: &EntityModel) -> Result<String, ModelSaveError> {
        let content = serde_json::to_string_pretty(model)
            .map_err(|e| ModelSaveError::Serialize(e.to_string()))?;
        debug!(namespace = %model.namespace, bytes = content.len(), "serialized entity model to JSON");
        Ok(content)
    }

    /// Serialize a model to YAML
    pub fn to_yaml(&self, model: &EntityModel) -> Result<String, ModelSaveError> {
        let content =
            serde_yaml::to_string(model).map_err(|e| ModelSaveError::Serialize(e.to_string()))?;
        debug!(namespace = %model.namespace, bytes = content.len(), "serialized entity model to YAML");
        Ok(content)
    }
}
