//! Error types for SCIM protocol processing.
//!
//! Every failure a SCIM service provider reports maps onto exactly one HTTP
//! status code (RFC 7644 Section 3.12). [`ScimError`] models that mapping, and
//! [`ErrorResponse`] is the wire representation exchanged with clients and
//! remote providers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Schema URN of the SCIM error message.
pub const ERROR_SCHEMA: &str = "urn:ietf:params:scim:api:messages:2.0:Error";

/// The `scimType` keyword attached to `400 Bad Request` responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScimType {
    /// The filter syntax was invalid or the attribute/operator combination unsupported
    InvalidFilter,
    /// The filter yields more results than the provider is willing to process
    TooMany,
    /// One or more attribute values are already in use or reserved
    Uniqueness,
    /// The attempted modification is not compatible with the attribute's mutability
    Mutability,
    /// The request body structure was invalid
    InvalidSyntax,
    /// The path attribute was invalid or malformed
    InvalidPath,
    /// The path did not yield an attribute that could be operated on
    NoTarget,
    /// A required value was missing or incompatible with the attribute
    InvalidValue,
    /// The protocol version is not supported
    #[serde(rename = "invalidVers")]
    InvalidVersion,
    /// The request cannot be completed because it would expose sensitive data
    Sensitive,
}

impl ScimType {
    /// The keyword as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidFilter => "invalidFilter",
            Self::TooMany => "tooMany",
            Self::Uniqueness => "uniqueness",
            Self::Mutability => "mutability",
            Self::InvalidSyntax => "invalidSyntax",
            Self::InvalidPath => "invalidPath",
            Self::NoTarget => "noTarget",
            Self::InvalidValue => "invalidValue",
            Self::InvalidVersion => "invalidVers",
            Self::Sensitive => "sensitive",
        }
    }

    /// Resolve a wire keyword. Unknown keywords yield `None`.
    pub fn from_keyword(value: &str) -> Option<Self> {
        match value {
            "invalidFilter" => Some(Self::InvalidFilter),
            "tooMany" => Some(Self::TooMany),
            "uniqueness" => Some(Self::Uniqueness),
            "mutability" => Some(Self::Mutability),
            "invalidSyntax" => Some(Self::InvalidSyntax),
            "invalidPath" => Some(Self::InvalidPath),
            "noTarget" => Some(Self::NoTarget),
            "invalidValue" => Some(Self::InvalidValue),
            "invalidVers" => Some(Self::InvalidVersion),
            "sensitive" => Some(Self::Sensitive),
            _ => None,
        }
    }
}

impl fmt::Display for ScimType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Main error type for SCIM processing.
///
/// Each variant corresponds to one HTTP status code; use [`ScimError::status`]
/// to obtain it and [`ErrorResponse::from`] to render the SCIM error body.
#[derive(Debug, thiserror::Error)]
pub enum ScimError {
    /// The request is unparsable, syntactically incorrect or violates schema
    #[error("Bad request ({scim_type}): {detail}")]
    BadRequest { scim_type: ScimType, detail: String },

    /// Authorization failure
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The operation is not permitted for the authenticated principal
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The specified endpoint or resource does not exist
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// The HTTP method is not supported for the endpoint
    #[error("Method not allowed: {0}")]
    NotAllowed(String),

    /// The resource already exists or the service provider refused to create a duplicate
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The resource version did not match
    #[error("Precondition failed: {0}")]
    PreconditionFailed(String),

    /// The request payload exceeds the service provider's limits
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    /// An internal error in the service provider
    #[error("Internal server error: {0}")]
    ServerError(String),

    /// The requested operation is not supported
    #[error("Not implemented: {0}")]
    NotImplemented(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// Convenience methods for creating common errors
impl ScimError {
    /// Create a bad request error of the given kind.
    pub fn bad_request(scim_type: ScimType, detail: impl Into<String>) -> Self {
        Self::BadRequest {
            scim_type,
            detail: detail.into(),
        }
    }

    pub fn invalid_filter(detail: impl Into<String>) -> Self {
        Self::bad_request(ScimType::InvalidFilter, detail)
    }

    pub fn invalid_path(detail: impl Into<String>) -> Self {
        Self::bad_request(ScimType::InvalidPath, detail)
    }

    pub fn invalid_value(detail: impl Into<String>) -> Self {
        Self::bad_request(ScimType::InvalidValue, detail)
    }

    pub fn invalid_syntax(detail: impl Into<String>) -> Self {
        Self::bad_request(ScimType::InvalidSyntax, detail)
    }

    pub fn invalid_version(detail: impl Into<String>) -> Self {
        Self::bad_request(ScimType::InvalidVersion, detail)
    }

    pub fn mutability(detail: impl Into<String>) -> Self {
        Self::bad_request(ScimType::Mutability, detail)
    }

    pub fn uniqueness(detail: impl Into<String>) -> Self {
        Self::bad_request(ScimType::Uniqueness, detail)
    }

    pub fn too_many(detail: impl Into<String>) -> Self {
        Self::bad_request(ScimType::TooMany, detail)
    }

    pub fn no_target(detail: impl Into<String>) -> Self {
        Self::bad_request(ScimType::NoTarget, detail)
    }

    pub fn sensitive(detail: impl Into<String>) -> Self {
        Self::bad_request(ScimType::Sensitive, detail)
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::NotFound(detail.into())
    }

    pub fn conflict(detail: impl Into<String>) -> Self {
        Self::Conflict(detail.into())
    }

    pub fn precondition_failed(detail: impl Into<String>) -> Self {
        Self::PreconditionFailed(detail.into())
    }

    pub fn server_error(detail: impl Into<String>) -> Self {
        Self::ServerError(detail.into())
    }

    pub fn not_implemented(detail: impl Into<String>) -> Self {
        Self::NotImplemented(detail.into())
    }

    /// The HTTP status code this error is reported with.
    pub fn status(&self) -> u16 {
        match self {
            Self::BadRequest { .. } | Self::Json(_) => 400,
            Self::Unauthorized(_) => 401,
            Self::Forbidden(_) => 403,
            Self::NotFound(_) => 404,
            Self::NotAllowed(_) => 405,
            Self::Conflict(_) => 409,
            Self::PreconditionFailed(_) => 412,
            Self::PayloadTooLarge(_) => 413,
            Self::ServerError(_) => 500,
            Self::NotImplemented(_) => 501,
        }
    }

    /// The `scimType` keyword, present for bad requests only.
    pub fn scim_type(&self) -> Option<ScimType> {
        match self {
            Self::BadRequest { scim_type, .. } => Some(*scim_type),
            Self::Json(_) => Some(ScimType::InvalidSyntax),
            _ => None,
        }
    }

    /// Human-readable detail without the category prefix.
    pub fn detail(&self) -> String {
        match self {
            Self::BadRequest { detail, .. } => detail.clone(),
            Self::Unauthorized(d)
            | Self::Forbidden(d)
            | Self::NotFound(d)
            | Self::NotAllowed(d)
            | Self::Conflict(d)
            | Self::PreconditionFailed(d)
            | Self::PayloadTooLarge(d)
            | Self::ServerError(d)
            | Self::NotImplemented(d) => d.clone(),
            Self::Json(e) => e.to_string(),
        }
    }
}

/// SCIM error message body.
///
/// ```rust
/// use uid_scim::error::{ErrorResponse, ScimError};
///
/// let response = ErrorResponse::from(&ScimError::invalid_filter("unexpected ')'"));
/// assert_eq!(response.status, "400");
/// assert_eq!(response.scim_type.as_deref(), Some("invalidFilter"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub schemas: Vec<String>,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scim_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ErrorResponse {
    /// Create an error body for an arbitrary status.
    pub fn new(status: u16, scim_type: Option<ScimType>, detail: impl Into<String>) -> Self {
        Self {
            schemas: vec![ERROR_SCHEMA.to_string()],
            status: status.to_string(),
            scim_type: scim_type.map(|t| t.as_str().to_string()),
            detail: Some(detail.into()),
        }
    }

    /// Turn an error body received from a remote provider back into a typed error.
    ///
    /// Bad requests without a recognised `scimType` become `invalidValue`,
    /// except for details that announce an invalid filter.
    pub fn into_error(self) -> ScimError {
        let detail = self.detail.unwrap_or_default();
        let status: u16 = self.status.trim().parse().unwrap_or(500);
        match status {
            400 => {
                let scim_type = match self.scim_type.as_deref().and_then(ScimType::from_keyword) {
                    Some(kind) => kind,
                    None if detail.starts_with("Invalid filter") => ScimType::InvalidFilter,
                    None => ScimType::InvalidValue,
                };
                ScimError::bad_request(scim_type, detail)
            }
            401 => ScimError::Unauthorized(detail),
            403 => ScimError::Forbidden(detail),
            404 => ScimError::NotFound(detail),
            405 => ScimError::NotAllowed(detail),
            409 => ScimError::Conflict(detail),
            412 => ScimError::PreconditionFailed(detail),
            413 => ScimError::PayloadTooLarge(detail),
            501 => ScimError::NotImplemented(detail),
            _ => ScimError::ServerError(detail),
        }
    }
}

impl From<&ScimError> for ErrorResponse {
    fn from(error: &ScimError) -> Self {
        Self::new(error.status(), error.scim_type(), error.detail())
    }
}

impl From<ScimError> for ErrorResponse {
    fn from(error: ScimError) -> Self {
        Self::from(&error)
    }
}

// Result type aliases for convenience
pub type ScimResult<T> = Result<T, ScimError>;
