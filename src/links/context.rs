//! Link-generation contexts
//!
//! Contexts are per-call value objects binding an entity (or feed) to the
//! model and the URL-building capability. Every field is optional: a
//! default-constructed context is the zero-value sentinel whose absent
//! fields surface as invalid-argument errors instead of undefined behavior.

use super::error::LinkResult;
use super::generator;
use super::url::UrlBuilder;
use crate::models::path::PathSegment;
use crate::models::{
    BoundOperation, EntityInstance, EntityModel, EntityType, NavigationProperty, NavigationSource,
};
use url::Url;

/// Context for links attached to a single entity
#[derive(Clone, Copy, Default)]
pub struct ResourceContext<'a> {
    pub model: Option<&'a EntityModel>,
    pub navigation_source: Option<&'a NavigationSource>,
    /// Runtime type of the instance; may equal or derive from the source's
    /// declared element type
    pub structured_type: Option<&'a EntityType>,
    pub instance: Option<&'a EntityInstance>,
    pub url_builder: Option<&'a dyn UrlBuilder>,
    /// Already-resolved path segments leading to the current entity;
    /// required when the navigation source is contained
    pub path: Option<&'a [PathSegment]>,
}

impl<'a> ResourceContext<'a> {
    pub fn new(
        model: &'a EntityModel,
        navigation_source: &'a NavigationSource,
        structured_type: &'a EntityType,
        instance: &'a EntityInstance,
        url_builder: &'a dyn UrlBuilder,
    ) -> Self {
        Self {
            model: Some(model),
            navigation_source: Some(navigation_source),
            structured_type: Some(structured_type),
            instance: Some(instance),
            url_builder: Some(url_builder),
            path: None,
        }
    }

    pub fn with_path(mut self, path: &'a [PathSegment]) -> Self {
        self.path = Some(path);
        self
    }

    /// Self link of the entity this context describes
    pub fn generate_self_link(&self, include_cast: bool) -> LinkResult<Url> {
        generator::generate_self_link(self, include_cast)
    }

    /// Link to a navigation property of the entity
    pub fn generate_navigation_property_link(
        &self,
        navigation_property: &NavigationProperty,
        include_cast: bool,
    ) -> LinkResult<Url> {
        generator::generate_navigation_property_link(self, navigation_property, include_cast)
    }

    /// Invocation link for an action bound to the entity
    pub fn generate_action_link(&self, action: &BoundOperation) -> LinkResult<Option<Url>> {
        generator::generate_action_link(self, action)
    }

    /// Invocation link for a function bound to the entity
    pub fn generate_function_link(&self, function: &BoundOperation) -> LinkResult<Option<Url>> {
        generator::generate_function_link(self, function)
    }
}

/// Context for links attached to a feed (entity collection)
#[derive(Clone, Copy, Default)]
pub struct ResourceSetContext<'a> {
    pub model: Option<&'a EntityModel>,
    pub entity_set: Option<&'a NavigationSource>,
    pub url_builder: Option<&'a dyn UrlBuilder>,
}

impl<'a> ResourceSetContext<'a> {
    pub fn new(
        model: &'a EntityModel,
        entity_set: &'a NavigationSource,
        url_builder: &'a dyn UrlBuilder,
    ) -> Self {
        Self {
            model: Some(model),
            entity_set: Some(entity_set),
            url_builder: Some(url_builder),
        }
    }

    /// Invocation link for an action bound to the collection
    pub fn generate_action_link(&self, action: &BoundOperation) -> LinkResult<Option<Url>> {
        generator::generate_action_link_for_set(self, action)
    }

    /// Invocation link for a function bound to the collection
    pub fn generate_function_link(&self, function: &BoundOperation) -> LinkResult<Option<Url>> {
        generator::generate_function_link_for_set(self, function)
    }
}
