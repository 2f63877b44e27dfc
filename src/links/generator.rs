//! Link generation
//!
//! Pure functions computing self, navigation and operation links for a
//! resource or resource-set context. Each call is a total function over its
//! validated inputs: absent context fields and unbound operations fail,
//! structurally unreachable targets yield `Ok(None)`.

use super::context::{ResourceContext, ResourceSetContext};
use super::error::{LinkError, LinkResult};
use crate::models::path::PathSegment;
use crate::models::{
    BoundOperation, EntityModel, KeyValue, NavigationProperty, NavigationSource,
    NavigationSourceKind,
};
use tracing::debug;
use url::Url;

/// Generate the self link of the entity described by `context`.
///
/// Singletons link as `<root>/<Name>`, entity sets as `<root>/<Name>(key)`
/// with key values taken from the instance in declared key order. Entities
/// under a contained navigation source link through their parent's path,
/// anchored at the nearest non-contained ancestor. With `include_cast`, a
/// type-cast segment is appended when the runtime type strictly derives
/// from the source's declared element type.
pub fn generate_self_link(context: &ResourceContext<'_>, include_cast: bool) -> LinkResult<Url> {
    let builder = context
        .url_builder
        .ok_or(LinkError::MissingContextProperty("url_builder"))?;
    let segments = self_link_segments(context, include_cast)?;
    builder.build_url(&segments)
}

/// Generate the link to `navigation_property` on the entity described by
/// `context`: the self link (honoring `include_cast`) with the property name
/// appended.
pub fn generate_navigation_property_link(
    context: &ResourceContext<'_>,
    navigation_property: &NavigationProperty,
    include_cast: bool,
) -> LinkResult<Url> {
    let builder = context
        .url_builder
        .ok_or(LinkError::MissingContextProperty("url_builder"))?;
    let mut segments = self_link_segments(context, include_cast)?;
    segments.push(PathSegment::navigation(
        navigation_property.name.clone(),
        navigation_property.contains_target,
    ));
    builder.build_url(&segments)
}

/// Generate the invocation link for an action bound to the entity described
/// by `context`. Returns `Ok(None)` when the action is structurally
/// unreachable from this context.
pub fn generate_action_link(
    context: &ResourceContext<'_>,
    action: &BoundOperation,
) -> LinkResult<Option<Url>> {
    bound_operation_link(context, action)
}

/// Generate the invocation link for a function bound to the entity described
/// by `context`. The link carries the function's parameter template, e.g.
/// `(city=@city)`. Returns `Ok(None)` when the function is structurally
/// unreachable from this context.
pub fn generate_function_link(
    context: &ResourceContext<'_>,
    function: &BoundOperation,
) -> LinkResult<Option<Url>> {
    bound_operation_link(context, function)
}

/// Generate the invocation link for an action bound to the collection
/// described by `context`.
pub fn generate_action_link_for_set(
    context: &ResourceSetContext<'_>,
    action: &BoundOperation,
) -> LinkResult<Option<Url>> {
    collection_operation_link(context, action)
}

/// Generate the invocation link for a function bound to the collection
/// described by `context`.
pub fn generate_function_link_for_set(
    context: &ResourceSetContext<'_>,
    function: &BoundOperation,
) -> LinkResult<Option<Url>> {
    collection_operation_link(context, function)
}

fn self_link_segments(
    context: &ResourceContext<'_>,
    include_cast: bool,
) -> LinkResult<Vec<PathSegment>> {
    let model = context
        .model
        .ok_or(LinkError::MissingContextProperty("model"))?;
    let source = context
        .navigation_source
        .ok_or(LinkError::MissingContextProperty("navigation_source"))?;

    let mut segments = base_path_segments(context, model, source)?;
    if include_cast {
        if let Some(cast) = cast_segment(model, context, &source.entity_type) {
            segments.push(cast);
        }
    }
    Ok(segments)
}

/// Cast segment naming the runtime type, when it strictly derives from the
/// declared element type. Matching or unrelated types emit nothing.
fn cast_segment(
    model: &EntityModel,
    context: &ResourceContext<'_>,
    declared_type: &str,
) -> Option<PathSegment> {
    let runtime = context.structured_type?;
    let qualified = runtime.qualified_name();
    if model.is_strict_subtype_of(&qualified, declared_type) {
        debug!(runtime = %qualified, declared = declared_type, "appending type-cast segment");
        Some(PathSegment::type_cast(qualified))
    } else {
        None
    }
}

fn base_path_segments(
    context: &ResourceContext<'_>,
    model: &EntityModel,
    source: &NavigationSource,
) -> LinkResult<Vec<PathSegment>> {
    match source.kind {
        NavigationSourceKind::Singleton => Ok(vec![PathSegment::singleton(source.name.clone())]),
        NavigationSourceKind::EntitySet => {
            let values = declared_key_values(context, model, &source.entity_type)?;
            Ok(vec![
                PathSegment::entity_set(source.name.clone()),
                PathSegment::Key { values },
            ])
        }
        NavigationSourceKind::ContainedEntitySet => containment_path_segments(context),
    }
}

/// Key values for the instance, in the declared key order of the element
/// type's hierarchy.
fn declared_key_values(
    context: &ResourceContext<'_>,
    model: &EntityModel,
    entity_type: &str,
) -> LinkResult<Vec<(String, KeyValue)>> {
    let instance = context
        .instance
        .ok_or(LinkError::MissingContextProperty("instance"))?;
    if model.entity_type(entity_type).is_none() {
        return Err(LinkError::UnknownType(entity_type.to_string()));
    }
    model
        .key_properties(entity_type)
        .iter()
        .map(|property| {
            instance
                .get(property)
                .cloned()
                .map(|value| (property.clone(), value))
                .ok_or_else(|| LinkError::MissingKeyProperty {
                    entity_type: entity_type.to_string(),
                    property: property.clone(),
                })
        })
        .collect()
}

/// Rebuild the path of a contained entity from the recorded segments.
///
/// Walks the path outward from the current entity until it reaches a
/// top-level anchor: an entity-set or singleton segment is kept as-is, and a
/// navigation segment whose target source is non-contained is replaced by
/// that entity set's own segment. Everything inside the anchor is kept, so
/// the link resolves back down to the current entity.
fn containment_path_segments(context: &ResourceContext<'_>) -> LinkResult<Vec<PathSegment>> {
    let path = context
        .path
        .ok_or(LinkError::MissingContextProperty("path"))?;

    let mut kept: Vec<PathSegment> = Vec::new();
    let mut anchored = false;
    for segment in path.iter().rev() {
        match segment {
            PathSegment::EntitySet { .. } | PathSegment::Singleton { .. } => {
                kept.push(segment.clone());
                anchored = true;
                break;
            }
            PathSegment::Navigation {
                contained: false,
                target_source: Some(target),
                ..
            } => {
                debug!(anchor = %target, "anchoring contained path at non-contained navigation target");
                kept.push(PathSegment::entity_set(target.clone()));
                anchored = true;
                break;
            }
            PathSegment::Navigation {
                contained: false,
                target_source: None,
                property,
            } => {
                return Err(LinkError::UnanchoredPath(format!(
                    "navigation property '{property}' has no resolved target source"
                )));
            }
            other => kept.push(other.clone()),
        }
    }
    if !anchored {
        return Err(LinkError::UnanchoredPath(
            "no entity set or singleton segment in the recorded path".to_string(),
        ));
    }
    kept.reverse();
    Ok(kept)
}

/// Shared core of the entity-level operation links.
fn bound_operation_link(
    context: &ResourceContext<'_>,
    operation: &BoundOperation,
) -> LinkResult<Option<Url>> {
    // Binding shape is checked before the context: an unbound operation can
    // never be linked, whatever it is invoked on.
    let binding = operation
        .binding_parameter()
        .ok_or_else(|| LinkError::NotBoundToEntity {
            kind: operation.kind,
            name: operation.name.clone(),
        })?;

    let builder = context
        .url_builder
        .ok_or(LinkError::MissingContextProperty("url_builder"))?;
    let model = context
        .model
        .ok_or(LinkError::MissingContextProperty("model"))?;
    let source = context
        .navigation_source
        .ok_or(LinkError::MissingContextProperty("navigation_source"))?;

    // Operations are not linkable through containment.
    if source.is_contained() {
        debug!(operation = %operation.qualified_name(), "skipping operation link for contained source");
        return Ok(None);
    }

    // A collection-bound operation is unreachable from a single entity.
    let Some(binding_type) = binding.parameter_type.entity_name() else {
        return Ok(None);
    };

    let mut segments = base_path_segments(context, model, source)?;
    match operation_cast(model, binding_type, &source.entity_type) {
        OperationCast::None => {}
        OperationCast::Cast(segment) => segments.push(segment),
        OperationCast::Unreachable => {
            debug!(
                operation = %operation.qualified_name(),
                binding = binding_type,
                declared = %source.entity_type,
                "operation binding type unrelated to navigation source"
            );
            return Ok(None);
        }
    }
    segments.push(operation_segment(operation));
    builder.build_url(&segments).map(Some)
}

/// Shared core of the collection-level operation links.
fn collection_operation_link(
    context: &ResourceSetContext<'_>,
    operation: &BoundOperation,
) -> LinkResult<Option<Url>> {
    // Binding shape first: the receiver must be a collection of entity.
    let element_type = operation
        .binding_parameter()
        .and_then(|binding| binding.parameter_type.collection_element())
        .ok_or_else(|| LinkError::NotBoundToCollection {
            kind: operation.kind,
            name: operation.name.clone(),
        })?;

    let builder = context
        .url_builder
        .ok_or(LinkError::MissingContextProperty("url_builder"))?;
    let model = context
        .model
        .ok_or(LinkError::MissingContextProperty("model"))?;
    let set = context
        .entity_set
        .ok_or(LinkError::MissingContextProperty("entity_set"))?;

    if set.is_contained() {
        debug!(operation = %operation.qualified_name(), "skipping operation link for contained set");
        return Ok(None);
    }

    let mut segments = vec![PathSegment::entity_set(set.name.clone())];
    match operation_cast(model, element_type, &set.entity_type) {
        OperationCast::None => {}
        OperationCast::Cast(segment) => segments.push(segment),
        OperationCast::Unreachable => {
            debug!(
                operation = %operation.qualified_name(),
                binding = element_type,
                declared = %set.entity_type,
                "operation element type unrelated to entity set"
            );
            return Ok(None);
        }
    }
    segments.push(operation_segment(operation));
    builder.build_url(&segments).map(Some)
}

enum OperationCast {
    None,
    Cast(PathSegment),
    Unreachable,
}

/// Decide the cast segment between an operation's binding type and the
/// declared element type of the navigation source.
///
/// Equal types need no cast. A binding type that is a strict ancestor of the
/// element type gets a down-cast segment, exposing the operation through the
/// more derived source; a strict descendant gets an up-cast segment. Both
/// name the binding type. Unrelated types make the operation unreachable.
fn operation_cast(model: &EntityModel, binding_type: &str, declared_type: &str) -> OperationCast {
    if binding_type == declared_type {
        OperationCast::None
    } else if model.is_subtype_of(declared_type, binding_type)
        || model.is_subtype_of(binding_type, declared_type)
    {
        OperationCast::Cast(PathSegment::type_cast(binding_type))
    } else {
        OperationCast::Unreachable
    }
}

fn operation_segment(operation: &BoundOperation) -> PathSegment {
    PathSegment::Operation {
        qualified_name: operation.qualified_name(),
        parameter_template: operation.parameter_template(),
    }
}
