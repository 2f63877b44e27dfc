//! Link generation
//!
//! Computes hypermedia links (self links, navigation links, action and
//! function links) for entities and feeds, including the type-cast segments
//! needed to address derived types through a more general navigation source.

pub mod context;
pub mod error;
pub mod generator;
pub mod url;

pub use context::{ResourceContext, ResourceSetContext};
pub use error::{LinkError, LinkResult};
pub use generator::{
    generate_action_link, generate_action_link_for_set, generate_function_link,
    generate_function_link_for_set, generate_navigation_property_link, generate_self_link,
};
pub use url::{ServiceRootUrlBuilder, UrlBuilder};
