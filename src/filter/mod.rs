//! SCIM filter expressions and attribute paths.
//!
//! The grammar follows RFC 7644 Section 3.4.2.2:
//!
//! ```text
//! FILTER    = attrExp / logExp / valuePath / *1"not" "(" FILTER ")"
//! valuePath = attrPath "[" valFilter "]"
//! attrExp   = (attrPath SP "pr") / (attrPath SP compareOp SP compValue)
//! logExp    = FILTER SP ("and" / "or") SP FILTER
//! ```
//!
//! ```rust
//! use uid_scim::filter::Filter;
//! use serde_json::json;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let filter: Filter = r#"userName sw "b" and emails[type eq "work"]"#.parse()?;
//! let user = json!({
//!     "userName": "bjensen",
//!     "emails": [{"value": "bjensen@example.com", "type": "work"}]
//! });
//! assert!(filter.matches(&user)?);
//! # Ok(())
//! # }
//! ```

mod evaluator;
mod parser;
mod path;

pub use path::{Element, Path, is_namespace};

use crate::error::{ScimError, ScimResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Attribute comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    Eq,
    Ne,
    Co,
    Sw,
    Ew,
    Gt,
    Ge,
    Lt,
    Le,
}

impl CompareOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Ne => "ne",
            Self::Co => "co",
            Self::Sw => "sw",
            Self::Ew => "ew",
            Self::Gt => "gt",
            Self::Ge => "ge",
            Self::Lt => "lt",
            Self::Le => "le",
        }
    }

    /// Case-insensitive operator lookup; `pr` is not a comparison.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.to_ascii_lowercase().as_str() {
            "eq" => Some(Self::Eq),
            "ne" => Some(Self::Ne),
            "co" => Some(Self::Co),
            "sw" => Some(Self::Sw),
            "ew" => Some(Self::Ew),
            "gt" => Some(Self::Gt),
            "ge" => Some(Self::Ge),
            "lt" => Some(Self::Lt),
            "le" => Some(Self::Le),
            _ => None,
        }
    }

    /// Whether the operator imposes an ordering.
    pub fn is_ordering(&self) -> bool {
        matches!(self, Self::Gt | Self::Ge | Self::Lt | Self::Le)
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed filter expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// All components match
    And(Vec<Filter>),
    /// At least one component matches
    Or(Vec<Filter>),
    /// The component does not match
    Not(Box<Filter>),
    /// The attribute has a non-empty value
    Present(Path),
    /// The attribute compares to a literal
    Compare {
        op: CompareOp,
        path: Path,
        value: Value,
    },
    /// A value filter applied to a multi-valued complex attribute
    Complex { path: Path, filter: Box<Filter> },
}

impl Filter {
    /// Parse a filter expression.
    pub fn parse(expression: &str) -> ScimResult<Self> {
        parser::parse_filter(expression).inspect_err(|e| {
            log::debug!("Rejected filter '{}': {}", expression, e.detail());
        })
    }

    pub fn compare(op: CompareOp, path: Path, value: impl Into<Value>) -> Self {
        Self::Compare {
            op,
            path,
            value: value.into(),
        }
    }

    pub fn eq(path: Path, value: impl Into<Value>) -> Self {
        Self::compare(CompareOp::Eq, path, value)
    }

    pub fn present(path: Path) -> Self {
        Self::Present(path)
    }

    pub fn complex(path: Path, filter: Filter) -> Self {
        Self::Complex {
            path,
            filter: Box::new(filter),
        }
    }

    pub fn and(components: Vec<Filter>) -> Self {
        Self::And(components)
    }

    pub fn or(components: Vec<Filter>) -> Self {
        Self::Or(components)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(filter: Filter) -> Self {
        Self::Not(Box::new(filter))
    }

    /// Evaluate against a JSON resource, comparing strings case-insensitively.
    pub fn matches(&self, resource: &Value) -> ScimResult<bool> {
        self.matches_with(resource, &|_| false)
    }

    /// Evaluate against a JSON resource; `case_exact` decides per attribute
    /// path whether string comparisons are case-sensitive.
    pub fn matches_with(
        &self,
        resource: &Value,
        case_exact: &dyn Fn(&Path) -> bool,
    ) -> ScimResult<bool> {
        evaluator::evaluate(self, resource, case_exact)
    }

    /// Walk every attribute reference in the tree.
    ///
    /// Attributes inside a complex filter are reported with the path of the
    /// enclosing multi-valued attribute as `parent`.
    pub fn visit<V: FilterVisitor + ?Sized>(&self, visitor: &mut V) {
        self.walk(visitor, None);
    }

    fn walk<V: FilterVisitor + ?Sized>(&self, visitor: &mut V, parent: Option<&Path>) {
        match self {
            Self::And(components) | Self::Or(components) => {
                for component in components {
                    component.walk(visitor, parent);
                }
            }
            Self::Not(inner) => inner.walk(visitor, parent),
            Self::Present(path) | Self::Compare { path, .. } => visitor.attribute(path, parent),
            Self::Complex { path, filter } => {
                visitor.attribute(path, parent);
                let nested = match parent {
                    Some(p) => p.append(path),
                    None => path.clone(),
                };
                filter.walk(visitor, Some(&nested));
            }
        }
    }

    fn fmt_component(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::And(_) | Self::Or(_) => write!(f, "({})", self),
            _ => write!(f, "{}", self),
        }
    }
}

/// Callback interface for [`Filter::visit`].
pub trait FilterVisitor {
    /// Called for each attribute path, in document order.
    fn attribute(&mut self, path: &Path, parent: Option<&Path>);
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::And(components) | Self::Or(components) => {
                let keyword = if matches!(self, Self::And(_)) {
                    " and "
                } else {
                    " or "
                };
                for (i, component) in components.iter().enumerate() {
                    if i > 0 {
                        f.write_str(keyword)?;
                    }
                    component.fmt_component(f)?;
                }
                Ok(())
            }
            Self::Not(inner) => write!(f, "not ({})", inner),
            Self::Present(path) => write!(f, "{} pr", path),
            Self::Compare { op, path, value } => write!(f, "{} {} {}", path, op, value),
            Self::Complex { path, filter } => write!(f, "{}[{}]", path, filter),
        }
    }
}

impl FromStr for Filter {
    type Err = ScimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Filter {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Filter {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(serde::de::Error::custom)
    }
}
