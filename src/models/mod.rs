//! Models module for the SDK
//!
//! Defines the metadata model descriptors used by link generation: entity
//! types, navigation properties and sources, bound operations, entity
//! instances, and resolved path segments.

pub mod entity_model;
pub mod entity_type;
pub mod instance;
pub mod navigation;
pub mod operation;
pub mod path;

pub use entity_model::EntityModel;
pub use entity_type::EntityType;
pub use instance::{EntityInstance, KeyValue};
pub use navigation::{ContainedParent, NavigationProperty, NavigationSource, NavigationSourceKind};
pub use operation::{BoundOperation, OperationKind, OperationParameter, TypeReference};
pub use path::PathSegment;
