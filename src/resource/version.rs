//! Weak entity tags for resource versioning (RFC 7644 Section 3.14).
//!
//! A tag is derived from the resource content, so two representations that
//! serialise to the same JSON always carry the same version. The opaque part
//! is the base64 encoding of the first eight bytes of a SHA-256 digest.

use crate::error::ScimError;
use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

/// Failure to read an entity tag from its textual form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EntityTagError {
    #[error("Entity tag cannot be empty")]
    Empty,
    #[error("Malformed entity tag: {0}")]
    Malformed(String),
}

impl From<EntityTagError> for ScimError {
    fn from(err: EntityTagError) -> Self {
        ScimError::invalid_value(err.to_string())
    }
}

/// An opaque resource version, rendered as a weak ETag `W/"..."`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityTag {
    opaque: String,
}

impl EntityTag {
    /// Hash arbitrary bytes into a tag.
    pub fn from_content(content: &[u8]) -> Self {
        let hash = Sha256::digest(content);
        Self {
            opaque: BASE64.encode(&hash[..8]),
        }
    }

    /// Hash the serialised form of a JSON document.
    ///
    /// Object keys serialise in sorted order, so the tag does not depend on
    /// the order in which attributes were inserted.
    pub fn from_value(value: &Value) -> Self {
        Self::from_content(value.to_string().as_bytes())
    }

    /// Tag any serialisable resource.
    pub fn of<T: Serialize>(resource: &T) -> Result<Self, ScimError> {
        let value = serde_json::to_value(resource)?;
        Ok(Self::from_value(&value))
    }

    /// Wrap an opaque value produced elsewhere, such as a sequence number.
    pub fn from_opaque(opaque: impl Into<String>) -> Result<Self, EntityTagError> {
        let opaque = opaque.into();
        if opaque.is_empty() {
            return Err(EntityTagError::Empty);
        }
        if opaque.contains('"') {
            return Err(EntityTagError::Malformed(opaque));
        }
        Ok(Self { opaque })
    }

    pub fn as_str(&self) -> &str {
        &self.opaque
    }

    /// Whether the header value of an `If-Match` request names this tag.
    ///
    /// Weak comparison is used, and `*` matches any tag.
    pub fn matches(&self, header: &str) -> bool {
        header.split(',').map(str::trim).any(|candidate| {
            candidate == "*"
                || candidate
                    .parse::<EntityTag>()
                    .map(|tag| tag == *self)
                    .unwrap_or(false)
        })
    }
}

impl fmt::Display for EntityTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "W/\"{}\"", self.opaque)
    }
}

impl FromStr for EntityTag {
    type Err = EntityTagError;

    /// Accepts both weak `W/"..."` and strong `"..."` forms.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(EntityTagError::Empty);
        }
        let quoted = trimmed.strip_prefix("W/").unwrap_or(trimmed);
        let opaque = quoted
            .strip_prefix('"')
            .and_then(|rest| rest.strip_suffix('"'))
            .ok_or_else(|| EntityTagError::Malformed(value.to_string()))?;
        if opaque.is_empty() || opaque.contains('"') {
            return Err(EntityTagError::Malformed(value.to_string()));
        }
        Ok(Self {
            opaque: opaque.to_string(),
        })
    }
}

impl Serialize for EntityTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for EntityTag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
