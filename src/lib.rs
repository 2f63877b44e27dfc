//! OData Link SDK - entity models and hypermedia link generation
//!
//! Provides unified types for:
//! - Entity metadata models (types, navigation properties and sources, bound operations)
//! - Link generation (self links, navigation links, action/function links)
//! - Model validation (hierarchy cycles, dangling references, key rules)
//! - Model loading/saving (JSON, YAML)
//!
//! All link-generation operations are pure, synchronous functions over
//! immutable contexts; they are safe for unbounded parallel invocation.

pub mod links;
pub mod model;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use links::{
    LinkError, LinkResult, ResourceContext, ResourceSetContext, ServiceRootUrlBuilder, UrlBuilder,
    generate_action_link, generate_action_link_for_set, generate_function_link,
    generate_function_link_for_set, generate_navigation_property_link, generate_self_link,
};

pub use model::{ModelLoadError, ModelLoader, ModelSaveError, ModelSaver};

pub use validation::{
    HierarchyValidationResult, HierarchyValidator, ModelValidationResult, ModelValidator,
    NamingError,
};

// Re-export models
pub use models::{
    BoundOperation, EntityInstance, EntityModel, EntityType, KeyValue, NavigationProperty,
    NavigationSource, NavigationSourceKind, OperationKind, OperationParameter, PathSegment,
    TypeReference,
};
