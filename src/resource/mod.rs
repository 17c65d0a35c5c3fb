//! Resources served by the unique identifier SCIM endpoints.
//!
//! Each resource is a plain serde data type whose JSON names follow the
//! schemas in [`crate::schema::embedded`]. The [`ScimResource`] trait ties a
//! type to its resource type, endpoint and schema URNs and provides the
//! JSON conversions and version stamping shared by all of them.

mod claim;
mod meta;
mod role;
mod tenant;
mod user;
pub mod version;

pub use claim::Claim;
pub use meta::Meta;
pub use role::Role;
pub use tenant::{MemberType, Tenant, TenantRole};
pub use user::{Account, Email, Name, User};
pub use version::{EntityTag, EntityTagError};

use crate::error::{ScimError, ScimResult};
use chrono::Utc;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Behaviour common to all resources.
pub trait ScimResource: Serialize + DeserializeOwned {
    /// Name of the resource type, also used as `meta.resourceType`.
    const RESOURCE_TYPE: &'static str;
    /// Endpoint relative to the service base URL.
    const ENDPOINT: &'static str;

    /// Schema URNs the representation uses, core schema first.
    fn schemas(&self) -> Vec<&str>;

    /// Identifier of the resource, if it has been assigned one.
    fn id(&self) -> Option<String>;

    fn meta(&self) -> Option<&Meta>;

    fn meta_mut(&mut self) -> &mut Option<Meta>;

    fn to_value(&self) -> ScimResult<Value> {
        Ok(serde_json::to_value(self)?)
    }

    fn from_value(value: Value) -> ScimResult<Self> {
        serde_json::from_value(value).map_err(|e| {
            ScimError::invalid_syntax(format!("Invalid {} resource: {}", Self::RESOURCE_TYPE, e))
        })
    }

    /// Absolute location of the resource below `base_url`.
    fn location(&self, base_url: &str) -> Option<String> {
        self.id().map(|id| {
            format!(
                "{}{}/{}",
                base_url.trim_end_matches('/'),
                Self::ENDPOINT,
                id
            )
        })
    }

    /// Record a write: create or update `meta` and derive a new version
    /// from the content without its metadata.
    fn stamp(&mut self, base_url: Option<&str>) -> ScimResult<()> {
        let previous = self.meta_mut().take();
        let tag = match EntityTag::of(&*self) {
            Ok(tag) => tag,
            Err(err) => {
                *self.meta_mut() = previous;
                return Err(err);
            }
        };
        let now = Utc::now();
        let mut meta = match previous {
            Some(meta) => meta,
            None => Meta::new(Self::RESOURCE_TYPE, now, now)?,
        };
        meta.touch(now, tag);
        if let Some(location) = base_url.and_then(|base| self.location(base)) {
            meta = meta.with_location(location)?;
        }
        log::trace!("Stamped {} {:?} as {}", Self::RESOURCE_TYPE, self.id(), meta);
        *self.meta_mut() = Some(meta);
        Ok(())
    }
}
