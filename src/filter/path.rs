//! Attribute paths (RFC 7644 Section 3.10).
//!
//! A path is an optional schema namespace followed by a chain of attribute
//! elements, each of which may carry a value selection filter:
//! `urn:ietf:params:scim:schemas:core:2.0:User:emails[type eq "work"].value`.

use super::{Filter, parser};
use crate::error::{ScimError, ScimResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Whether `value` looks like a schema URN.
pub fn is_namespace(value: &str) -> bool {
    value.len() > 4
        && value
            .get(..4)
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case("urn:"))
}

/// One step of a [`Path`].
#[derive(Debug, Clone)]
pub struct Element {
    attribute: String,
    filter: Option<Box<Filter>>,
}

impl Element {
    pub fn new(attribute: impl Into<String>, filter: Option<Filter>) -> Self {
        Self {
            attribute: attribute.into(),
            filter: filter.map(Box::new),
        }
    }

    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    pub fn filter(&self) -> Option<&Filter> {
        self.filter.as_deref()
    }
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        self.attribute.eq_ignore_ascii_case(&other.attribute) && self.filter == other.filter
    }
}

impl Eq for Element {}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.attribute)?;
        if let Some(filter) = &self.filter {
            write!(f, "[{}]", filter)?;
        }
        Ok(())
    }
}

/// An attribute path, optionally qualified by a schema namespace.
///
/// Attribute names and namespaces compare case-insensitively.
///
/// ```rust
/// use uid_scim::filter::Path;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let path: Path = "name.givenName".parse()?;
/// assert_eq!(path.len(), 2);
/// assert_eq!(path, "NAME.givenname".parse()?);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Path {
    namespace: Option<String>,
    elements: Vec<Element>,
}

impl Path {
    /// The empty path without namespace.
    pub fn root() -> Self {
        Self::default()
    }

    /// The empty path within a schema namespace.
    pub fn with_namespace(namespace: impl Into<String>) -> ScimResult<Self> {
        let namespace = namespace.into();
        if !is_namespace(&namespace) {
            return Err(ScimError::invalid_path(format!(
                "Invalid extension schema URN: {}",
                namespace
            )));
        }
        Ok(Self {
            namespace: Some(namespace),
            elements: Vec::new(),
        })
    }

    /// A single-element path.
    pub fn of(attribute: impl Into<String>) -> Self {
        Self::root().attribute(attribute)
    }

    /// Parse a path expression.
    pub fn parse(expression: &str) -> ScimResult<Self> {
        parser::parse_path(expression)
    }

    pub fn is_root(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty() && self.namespace.is_none()
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn element(&self, index: usize) -> Option<&Element> {
        self.elements.get(index)
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn first(&self) -> Option<&Element> {
        self.elements.first()
    }

    pub fn last(&self) -> Option<&Element> {
        self.elements.last()
    }

    /// The first `index` elements, keeping the namespace.
    pub fn sub(&self, index: usize) -> Self {
        Self {
            namespace: self.namespace.clone(),
            elements: self.elements[..index.min(self.elements.len())].to_vec(),
        }
    }

    /// Append an attribute element.
    pub fn attribute(self, attribute: impl Into<String>) -> Self {
        self.attribute_with(attribute, None)
    }

    /// Append an attribute element carrying a value filter.
    pub fn attribute_with(mut self, attribute: impl Into<String>, filter: Option<Filter>) -> Self {
        self.elements.push(Element::new(attribute, filter));
        self
    }

    /// Append all elements of `other`; the namespace of `self` is kept.
    pub fn append(&self, other: &Path) -> Self {
        let mut elements = self.elements.clone();
        elements.extend(other.elements.iter().cloned());
        Self {
            namespace: self.namespace.clone(),
            elements,
        }
    }

    /// Rename the element at `index`, keeping its filter.
    pub fn replace_attribute(&self, index: usize, attribute: impl Into<String>) -> Self {
        let mut copy = self.clone();
        if let Some(element) = copy.elements.get_mut(index) {
            element.attribute = attribute.into();
        }
        copy
    }

    /// Replace the filter of the element at `index`.
    pub fn replace_filter(&self, index: usize, filter: Option<Filter>) -> Self {
        let mut copy = self.clone();
        if let Some(element) = copy.elements.get_mut(index) {
            element.filter = filter.map(Box::new);
        }
        copy
    }

    /// The same path with every value filter removed.
    pub fn without_filters(&self) -> Self {
        Self {
            namespace: self.namespace.clone(),
            elements: self
                .elements
                .iter()
                .map(|e| Element::new(e.attribute.clone(), None))
                .collect(),
        }
    }

    /// The same elements without the schema namespace.
    pub fn without_namespace(&self) -> Self {
        Self {
            namespace: None,
            elements: self.elements.clone(),
        }
    }

    /// Whether any element carries a value filter.
    pub fn has_filter(&self) -> bool {
        self.elements.iter().any(|e| e.filter.is_some())
    }

    /// Whether `self` starts with the attribute chain of `prefix`.
    pub fn starts_with(&self, prefix: &Path) -> bool {
        let same_namespace = match (&self.namespace, &prefix.namespace) {
            (Some(a), Some(b)) => a.eq_ignore_ascii_case(b),
            (None, None) => true,
            _ => false,
        };
        same_namespace
            && prefix.elements.len() <= self.elements.len()
            && prefix
                .elements
                .iter()
                .zip(&self.elements)
                .all(|(a, b)| a.attribute.eq_ignore_ascii_case(&b.attribute))
    }
}

impl PartialEq for Path {
    fn eq(&self, other: &Self) -> bool {
        let same_namespace = match (&self.namespace, &other.namespace) {
            (Some(a), Some(b)) => a.eq_ignore_ascii_case(b),
            (None, None) => true,
            _ => false,
        };
        same_namespace && self.elements == other.elements
    }
}

impl Eq for Path {}

impl Hash for Path {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.namespace.as_ref().map(|n| n.to_ascii_lowercase()).hash(state);
        for element in &self.elements {
            element.attribute.to_ascii_lowercase().hash(state);
        }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(namespace) = &self.namespace {
            f.write_str(namespace)?;
            if !self.elements.is_empty() {
                f.write_str(":")?;
            }
        }
        for (i, element) in self.elements.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", element)?;
        }
        Ok(())
    }
}

impl FromStr for Path {
    type Err = ScimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Path {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Path {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(serde::de::Error::custom)
    }
}
