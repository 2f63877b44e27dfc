//! Identifier validation
//!
//! Validates the names used by model elements before a model is accepted.
//! These checks keep generated URLs well-formed and reject identifiers that
//! would collide with path syntax.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum length for element names (types, properties, sources)
pub const MAX_NAME_LENGTH: usize = 255;

/// Maximum length for namespaces
pub const MAX_NAMESPACE_LENGTH: usize = 512;

static NAMESPACE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\p{L}_][\p{L}\p{N}_]*(\.[\p{L}_][\p{L}\p{N}_]*)*$").unwrap());

/// Errors that can occur during identifier validation.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq)]
pub enum NamingError {
    /// Input is empty when a value is required
    #[error("{0} cannot be empty")]
    Empty(&'static str),

    /// Input exceeds maximum allowed length
    #[error("{field} exceeds maximum length (max: {max}, got: {actual})")]
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },

    /// Input contains invalid characters
    #[error("{field} contains invalid characters: {reason}")]
    InvalidCharacters { field: &'static str, reason: String },

    /// Input has invalid format
    #[error("{0}: {1}")]
    InvalidFormat(&'static str, String),
}

/// Result type for identifier validation.
pub type NamingResult<T> = Result<T, NamingError>;

/// Validate an entity type name.
///
/// # Rules
///
/// - Must not be empty
/// - Must not exceed 255 characters
/// - Must start with a letter or underscore
/// - May contain letters, digits, and underscores
///
/// # Examples
///
/// ```
/// use odata_link_sdk::validation::naming::validate_type_name;
///
/// assert!(validate_type_name("Customer").is_ok());
/// assert!(validate_type_name("_Internal").is_ok());
/// assert!(validate_type_name("").is_err());
/// assert!(validate_type_name("123Customer").is_err());
/// ```
pub fn validate_type_name(name: &str) -> NamingResult<()> {
    validate_identifier(name, "type name")
}

/// Validate a property name (structural or navigation).
pub fn validate_property_name(name: &str) -> NamingResult<()> {
    validate_identifier(name, "property name")
}

/// Validate a navigation source name (entity set or singleton).
pub fn validate_source_name(name: &str) -> NamingResult<()> {
    validate_identifier(name, "navigation source name")
}

/// Validate an operation name.
pub fn validate_operation_name(name: &str) -> NamingResult<()> {
    validate_identifier(name, "operation name")
}

/// Validate a namespace: one or more dot-separated identifiers.
///
/// # Examples
///
/// ```
/// use odata_link_sdk::validation::naming::validate_namespace;
///
/// assert!(validate_namespace("NS").is_ok());
/// assert!(validate_namespace("Com.Contoso.Sales").is_ok());
/// assert!(validate_namespace("Com..Sales").is_err());
/// ```
pub fn validate_namespace(namespace: &str) -> NamingResult<()> {
    if namespace.is_empty() {
        return Err(NamingError::Empty("namespace"));
    }
    if namespace.len() > MAX_NAMESPACE_LENGTH {
        return Err(NamingError::TooLong {
            field: "namespace",
            max: MAX_NAMESPACE_LENGTH,
            actual: namespace.len(),
        });
    }
    if !NAMESPACE_REGEX.is_match(namespace) {
        return Err(NamingError::InvalidFormat(
            "namespace",
            "must be dot-separated identifiers".to_string(),
        ));
    }
    Ok(())
}

/// Validate a namespace-qualified name such as `NS.Customer`.
pub fn validate_qualified_name(qualified_name: &str) -> NamingResult<()> {
    if qualified_name.is_empty() {
        return Err(NamingError::Empty("qualified name"));
    }
    if !qualified_name.contains('.') {
        return Err(NamingError::InvalidFormat(
            "qualified name",
            "must carry a namespace prefix".to_string(),
        ));
    }
    if !NAMESPACE_REGEX.is_match(qualified_name) {
        return Err(NamingError::InvalidFormat(
            "qualified name",
            "must be dot-separated identifiers".to_string(),
        ));
    }
    Ok(())
}

fn validate_identifier(name: &str, field: &'static str) -> NamingResult<()> {
    if name.is_empty() {
        return Err(NamingError::Empty(field));
    }

    if name.len() > MAX_NAME_LENGTH {
        return Err(NamingError::TooLong {
            field,
            max: MAX_NAME_LENGTH,
            actual: name.len(),
        });
    }

    // Must start with a letter or underscore
    let first_char = match name.chars().next() {
        Some(c) => c,
        None => return Err(NamingError::Empty(field)),
    };
    if !first_char.is_alphabetic() && first_char != '_' {
        return Err(NamingError::InvalidFormat(
            field,
            "must start with a letter or underscore".to_string(),
        ));
    }

    // May contain letters, digits, and underscores
    for c in name.chars() {
        if !c.is_alphanumeric() && c != '_' {
            return Err(NamingError::InvalidCharacters {
                field,
                reason: format!("character '{c}' is not allowed"),
            });
        }
    }

    Ok(())
}
