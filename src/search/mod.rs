//! Search parameter handling (RFC 7644 Section 3.4.2).
//!
//! [`SearchControl`] collects the query parameters of a GET request or the
//! body of a POST `.search` request into validated, normalised form and
//! applies them to result sets: filtering, sorting, paging and attribute
//! projection.

mod control;
mod projection;
mod request;

pub use control::SearchControl;
pub use request::{ListResponse, SearchRequest};

use crate::error::{ScimError, ScimResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 1-based index of the first result when `startIndex` is absent.
pub const DEFAULT_START: usize = 1;
/// Page size when `count` is absent.
pub const DEFAULT_COUNT: usize = 500;
/// Upper bound `count` is clamped to.
pub const MAXIMUM_COUNT: usize = 1000;

pub const START_INDEX: &str = "startIndex";
pub const COUNT: &str = "count";
pub const FILTER: &str = "filter";
pub const ATTRIBUTES: &str = "attributes";
pub const EXCLUDED_ATTRIBUTES: &str = "excludedAttributes";
pub const SORT_ORDER: &str = "sortOrder";
pub const SORT_BY: &str = "sortBy";

/// Schema URN of the POST search request body.
pub const SEARCH_REQUEST_SCHEMA: &str = "urn:ietf:params:scim:api:messages:2.0:SearchRequest";
/// Schema URN of the list response.
pub const LIST_RESPONSE_SCHEMA: &str = "urn:ietf:params:scim:api:messages:2.0:ListResponse";

/// Result ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ascending => "ascending",
            Self::Descending => "descending",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = ScimError;

    /// Only the exact keywords are accepted.
    fn from_str(value: &str) -> ScimResult<Self> {
        match value {
            "ascending" => Ok(Self::Ascending),
            "descending" => Ok(Self::Descending),
            other => Err(ScimError::invalid_value(format!(
                "Invalid {} value '{}': must be 'ascending' or 'descending'",
                SORT_ORDER, other
            ))),
        }
    }
}
