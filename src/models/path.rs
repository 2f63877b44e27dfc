//! Resolved URL path segments

use super::instance::KeyValue;
use serde::{Deserialize, Serialize};

/// One segment of a resolved resource path
///
/// A link is an ordered sequence of segments. Key segments attach to the
/// segment before them as a parenthesized suffix (`Customers(42)`); every
/// other segment occupies its own slash-separated position.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum PathSegment {
    EntitySet {
        name: String,
    },
    Singleton {
        name: String,
    },
    /// Key values in declared key order
    Key {
        values: Vec<(String, KeyValue)>,
    },
    Navigation {
        property: String,
        /// Name of the navigation source the target entities live in, when
        /// resolved; non-contained targets anchor nested paths here
        #[serde(skip_serializing_if = "Option::is_none")]
        target_source: Option<String>,
        #[serde(default)]
        contained: bool,
    },
    /// Type-cast segment, e.g. `NS.SpecialCustomer`
    TypeCast {
        qualified_name: String,
    },
    /// Operation segment, e.g. `NS.IsUpgradedWithParam(city=@city)`
    Operation {
        qualified_name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        parameter_template: Option<String>,
    },
}

impl PathSegment {
    pub fn entity_set(name: impl Into<String>) -> Self {
        Self::EntitySet { name: name.into() }
    }

    pub fn singleton(name: impl Into<String>) -> Self {
        Self::Singleton { name: name.into() }
    }

    /// Single-property key segment
    pub fn key(property: impl Into<String>, value: impl Into<KeyValue>) -> Self {
        Self::Key {
            values: vec![(property.into(), value.into())],
        }
    }

    pub fn composite_key(values: Vec<(String, KeyValue)>) -> Self {
        Self::Key { values }
    }

    /// Navigation segment with an unresolved target source
    pub fn navigation(property: impl Into<String>, contained: bool) -> Self {
        Self::Navigation {
            property: property.into(),
            target_source: None,
            contained,
        }
    }

    /// Navigation segment whose target navigation source is known
    pub fn navigation_to(
        property: impl Into<String>,
        target_source: impl Into<String>,
        contained: bool,
    ) -> Self {
        Self::Navigation {
            property: property.into(),
            target_source: Some(target_source.into()),
            contained,
        }
    }

    pub fn type_cast(qualified_name: impl Into<String>) -> Self {
        Self::TypeCast {
            qualified_name: qualified_name.into(),
        }
    }
}
