//! URL assembly over resolved path segments
//!
//! The URL builder is the seam between link generation and the hosting
//! routing stack: callers hand in an ordered segment sequence and get back
//! an absolute URL. `ServiceRootUrlBuilder` is the plain implementation
//! rooted at a fixed service URL.

use super::error::{LinkError, LinkResult};
use crate::models::instance::KeyValue;
use crate::models::path::PathSegment;
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use url::Url;

/// Characters escaped inside a single path segment. Parentheses, quotes and
/// dots stay literal; they carry key and cast syntax.
const SEGMENT_ESCAPES: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Capability for turning path segments into an absolute URL
pub trait UrlBuilder {
    fn build_url(&self, segments: &[PathSegment]) -> LinkResult<Url>;
}

/// URL builder rooted at a fixed service root
///
/// # Example
///
/// ```rust
/// use odata_link_sdk::links::{ServiceRootUrlBuilder, UrlBuilder};
/// use odata_link_sdk::models::PathSegment;
///
/// let builder = ServiceRootUrlBuilder::parse("http://localhost").unwrap();
/// let url = builder
///     .build_url(&[PathSegment::entity_set("Customers"), PathSegment::key("ID", 42)])
///     .unwrap();
/// assert_eq!(url.as_str(), "http://localhost/Customers(42)");
/// ```
#[derive(Debug, Clone)]
pub struct ServiceRootUrlBuilder {
    root: Url,
}

impl ServiceRootUrlBuilder {
    pub fn new(root: Url) -> Self {
        Self { root }
    }

    pub fn parse(root: &str) -> LinkResult<Self> {
        let root = Url::parse(root).map_err(|e| LinkError::UrlConstruction(e.to_string()))?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Url {
        &self.root
    }
}

impl UrlBuilder for ServiceRootUrlBuilder {
    fn build_url(&self, segments: &[PathSegment]) -> LinkResult<Url> {
        let path = render_path(segments);
        let mut absolute = self.root.as_str().trim_end_matches('/').to_string();
        if !path.is_empty() {
            absolute.push('/');
            absolute.push_str(&path);
        }
        Url::parse(&absolute).map_err(|e| LinkError::UrlConstruction(e.to_string()))
    }
}

/// Render segments into a relative path string
///
/// Key segments attach to the previous segment as `(...)`; everything else
/// joins with `/`.
pub fn render_path(segments: &[PathSegment]) -> String {
    let mut parts: Vec<String> = Vec::new();
    for segment in segments {
        match segment {
            PathSegment::EntitySet { name } | PathSegment::Singleton { name } => {
                parts.push(encode_segment(name));
            }
            PathSegment::Navigation { property, .. } => {
                parts.push(encode_segment(property));
            }
            PathSegment::TypeCast { qualified_name } => {
                parts.push(encode_segment(qualified_name));
            }
            PathSegment::Operation {
                qualified_name,
                parameter_template,
            } => {
                let mut rendered = encode_segment(qualified_name);
                if let Some(template) = parameter_template {
                    rendered.push_str(template);
                }
                parts.push(rendered);
            }
            PathSegment::Key { values } => {
                let literal = render_key(values);
                match parts.last_mut() {
                    Some(last) => {
                        last.push('(');
                        last.push_str(&literal);
                        last.push(')');
                    }
                    None => parts.push(format!("({literal})")),
                }
            }
        }
    }
    parts.join("/")
}

fn render_key(values: &[(String, KeyValue)]) -> String {
    match values {
        [(_, value)] => value.to_literal(),
        many => many
            .iter()
            .map(|(name, value)| format!("{}={}", name, value.to_literal()))
            .collect::<Vec<_>>()
            .join(","),
    }
}

fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, SEGMENT_ESCAPES).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_singleton_path_has_no_key() {
        let path = render_path(&[PathSegment::singleton("Mary")]);
        assert_eq!(path, "Mary");
    }

    #[test]
    fn test_key_attaches_to_previous_segment() {
        let path = render_path(&[PathSegment::entity_set("Customers"), PathSegment::key("ID", 42)]);
        assert_eq!(path, "Customers(42)");
    }

    #[test]
    fn test_composite_key_renders_named_pairs() {
        let path = render_path(&[
            PathSegment::entity_set("OrderDetails"),
            PathSegment::composite_key(vec![
                ("OrderId".to_string(), KeyValue::Int64(1)),
                ("ProductId".to_string(), KeyValue::Int64(2)),
            ]),
        ]);
        assert_eq!(path, "OrderDetails(OrderId=1,ProductId=2)");
    }

    #[test]
    fn test_cast_and_operation_segments() {
        let path = render_path(&[
            PathSegment::entity_set("Customers"),
            PathSegment::key("ID", 42),
            PathSegment::type_cast("NS.SpecialCustomer"),
            PathSegment::Operation {
                qualified_name: "NS.IsUpgradedWithParam".to_string(),
                parameter_template: Some("(city=@city)".to_string()),
            },
        ]);
        assert_eq!(path, "Customers(42)/NS.SpecialCustomer/NS.IsUpgradedWithParam(city=@city)");
    }

    #[test]
    fn test_segment_encoding() {
        let path = render_path(&[PathSegment::entity_set("My Customers")]);
        assert_eq!(path, "My%20Customers");
    }

    #[test]
    fn test_service_root_trailing_slash() {
        let builder = ServiceRootUrlBuilder::parse("http://localhost/").unwrap();
        let url = builder
            .build_url(&[PathSegment::entity_set("Customers"), PathSegment::key("ID", 42)])
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost/Customers(42)");
    }

    #[test]
    fn test_invalid_root_is_rejected() {
        assert!(matches!(
            ServiceRootUrlBuilder::parse("not a url"),
            Err(LinkError::UrlConstruction(_))
        ));
    }
}
