//! Attribute characteristics and schema documents (RFC 7643, section 7).

use serde::{Deserialize, Serialize};
use std::fmt;

/// The `type` characteristic.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "camelCase")]
pub enum AttributeType {
    #[default]
    String,
    Boolean,
    Decimal,
    Integer,
    /// An `xsd:dateTime`, written as RFC 3339
    DateTime,
    /// Base64 with padding
    Binary,
    Reference,
    Complex,
}

impl AttributeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Decimal => "decimal",
            Self::Integer => "integer",
            Self::DateTime => "dateTime",
            Self::Binary => "binary",
            Self::Reference => "reference",
            Self::Complex => "complex",
        }
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether and how an attribute can be modified.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "camelCase")]
pub enum Mutability {
    /// Managed by the service provider
    ReadOnly,
    /// May be updated and read at any time
    #[default]
    ReadWrite,
    /// May be set once, never modified
    Immutable,
    /// May be updated but is never returned
    WriteOnly,
}

/// When an attribute is returned in a response.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "camelCase")]
pub enum Returned {
    /// Always returned, regardless of attribute selection
    Always,
    /// Never returned
    Never,
    /// Returned unless excluded
    #[default]
    Default,
    /// Returned only when explicitly requested
    Request,
}

/// Scope in which values must not repeat.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "camelCase")]
pub enum Uniqueness {
    #[default]
    None,
    /// Unique within one service provider
    Server,
    Global,
}

/// One attribute of a schema and its characteristics.
///
/// Characteristics missing from a schema document take the RFC 7643
/// defaults: `string`, single-valued, optional, case-insensitive,
/// `readWrite`, returned by `default`, no uniqueness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeDefinition {
    pub name: String,
    #[serde(rename = "type", default)]
    pub data_type: AttributeType,
    #[serde(default)]
    pub multi_valued: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub required: bool,
    /// Compare string values respecting case
    #[serde(default)]
    pub case_exact: bool,
    /// Suggested values; compared ignoring case unless `case_exact`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub canonical_values: Vec<String>,
    /// Resource types a reference may point to
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reference_types: Vec<String>,
    /// Present on complex attributes only
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sub_attributes: Vec<AttributeDefinition>,
    #[serde(default)]
    pub mutability: Mutability,
    #[serde(default)]
    pub returned: Returned,
    #[serde(default)]
    pub uniqueness: Uniqueness,
}

impl AttributeDefinition {
    /// Start a builder seeded with the RFC 7643 defaults.
    pub fn builder(name: impl Into<String>) -> super::builder::AttributeBuilder {
        super::builder::AttributeBuilder::new(name)
    }

    /// Find a sub-attribute ignoring case.
    pub fn sub_attribute(&self, name: &str) -> Option<&AttributeDefinition> {
        self.sub_attributes
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
    }

    pub fn is_complex(&self) -> bool {
        self.data_type == AttributeType::Complex
    }

    pub fn is_read_only(&self) -> bool {
        self.mutability == Mutability::ReadOnly
    }

    /// Whether `value` is one of the canonical values, honoring `caseExact`.
    pub fn is_canonical(&self, value: &str) -> bool {
        self.canonical_values.is_empty()
            || self.canonical_values.iter().any(|c| {
                if self.case_exact {
                    c == value
                } else {
                    c.eq_ignore_ascii_case(value)
                }
            })
    }

    fn fmt_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let indent = "  ".repeat(depth);
        writeln!(f, "{}Name        : {}", indent, self.name)?;
        writeln!(
            f,
            "{}Description : {}",
            indent,
            self.description.as_deref().unwrap_or("")
        )?;
        writeln!(f, "{}Type        : {}", indent, self.data_type)?;
        writeln!(f, "{}Required    : {}", indent, self.required)?;
        writeln!(f, "{}Case Exact  : {}", indent, self.case_exact)?;
        for sub in &self.sub_attributes {
            sub.fmt_indented(f, depth + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for AttributeDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_indented(f, 0)
    }
}

/// A schema document: URN, name and top-level attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaDefinition {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub attributes: Vec<AttributeDefinition>,
}

impl SchemaDefinition {
    /// Find a top-level attribute ignoring case.
    pub fn attribute(&self, name: &str) -> Option<&AttributeDefinition> {
        self.attributes
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
    }
}
