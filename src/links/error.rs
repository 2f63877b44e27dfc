//! Error type for link generation

use crate::models::OperationKind;
use thiserror::Error;

/// Errors that can occur while generating a link.
///
/// Structurally unreachable targets (contained sources, unrelated binding
/// types) are not errors; those cases yield an absent link so the caller can
/// omit it.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LinkError {
    /// A required context field is absent
    #[error("the resource context is missing required property '{0}'")]
    MissingContextProperty(&'static str),

    /// The operation has no binding parameter
    #[error(
        "the {kind} '{name}' is not bound to an entity; only operations bound to entities can have operation links"
    )]
    NotBoundToEntity { kind: OperationKind, name: String },

    /// The operation's binding parameter is not a collection of entity
    #[error(
        "the {kind} '{name}' is not bound to the collection of entity; only operations bound to entity collections can have operation links"
    )]
    NotBoundToCollection { kind: OperationKind, name: String },

    /// The entity instance carries no value for a declared key property
    #[error("entity instance has no value for key property '{property}' of type '{entity_type}'")]
    MissingKeyProperty {
        entity_type: String,
        property: String,
    },

    /// A context or operation references a type the model does not declare
    #[error("the model does not declare type '{0}'")]
    UnknownType(String),

    /// The recorded path has no entity-set or singleton anchor to walk to
    #[error("resource path cannot be anchored to a top-level navigation source: {0}")]
    UnanchoredPath(String),

    /// The assembled segments do not form a valid absolute URL
    #[error("failed to construct URL: {0}")]
    UrlConstruction(String),
}

/// Result type for link generation operations.
pub type LinkResult<T> = Result<T, LinkError>;
