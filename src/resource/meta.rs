//! The `meta` complex attribute shared by every resource.

use super::version::EntityTag;
use crate::error::{ScimError, ScimResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Resource metadata (RFC 7643 Section 3.1).
///
/// Instances are validated on construction and on deserialization:
/// the resource type is not empty, `lastModified` does not precede
/// `created` and the version, when present, is a well formed entity tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "MetaRecord")]
pub struct Meta {
    resource_type: String,
    created: DateTime<Utc>,
    last_modified: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<EntityTag>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MetaRecord {
    resource_type: String,
    created: DateTime<Utc>,
    last_modified: Option<DateTime<Utc>>,
    location: Option<String>,
    version: Option<EntityTag>,
}

impl TryFrom<MetaRecord> for Meta {
    type Error = ScimError;

    fn try_from(record: MetaRecord) -> ScimResult<Self> {
        let mut meta = Meta::new(
            record.resource_type,
            record.created,
            record.last_modified.unwrap_or(record.created),
        )?;
        if let Some(location) = record.location {
            meta = meta.with_location(location)?;
        }
        meta.version = record.version;
        Ok(meta)
    }
}

impl Meta {
    pub fn new(
        resource_type: impl Into<String>,
        created: DateTime<Utc>,
        last_modified: DateTime<Utc>,
    ) -> ScimResult<Self> {
        let resource_type = resource_type.into();
        if resource_type.trim().is_empty() {
            return Err(ScimError::invalid_value("Resource type cannot be empty"));
        }
        if last_modified < created {
            return Err(ScimError::invalid_value(format!(
                "Last modified timestamp {} is before created timestamp {}",
                last_modified.to_rfc3339(),
                created.to_rfc3339()
            )));
        }
        Ok(Self {
            resource_type,
            created,
            last_modified,
            location: None,
            version: None,
        })
    }

    /// Metadata of a resource created right now.
    pub fn created_now(resource_type: impl Into<String>) -> ScimResult<Self> {
        let now = Utc::now();
        Self::new(resource_type, now, now)
    }

    pub fn with_location(mut self, location: impl Into<String>) -> ScimResult<Self> {
        let location = location.into();
        if location.trim().is_empty() {
            return Err(ScimError::invalid_value("Location cannot be empty"));
        }
        self.location = Some(location);
        Ok(self)
    }

    pub fn with_version(mut self, version: EntityTag) -> Self {
        self.version = Some(version);
        self
    }

    /// Record a modification. Timestamps earlier than `created` are raised to it.
    pub fn touch(&mut self, at: DateTime<Utc>, version: EntityTag) {
        self.last_modified = at.max(self.created);
        self.version = Some(version);
    }

    pub fn resource_type(&self) -> &str {
        &self.resource_type
    }

    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }

    pub fn last_modified(&self) -> DateTime<Utc> {
        self.last_modified
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn version(&self) -> Option<&EntityTag> {
        self.version.as_ref()
    }
}

impl fmt::Display for Meta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} created {} modified {}",
            self.resource_type,
            self.created.to_rfc3339(),
            self.last_modified.to_rfc3339()
        )?;
        if let Some(version) = &self.version {
            write!(f, " version {}", version)?;
        }
        Ok(())
    }
}
