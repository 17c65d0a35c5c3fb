use super::{Meta, ScimResource};
use crate::error::{ScimError, ScimResult};
use crate::schema::embedded::CLAIM_SCHEMA;
use serde::{Deserialize, Serialize};

const SEPARATOR: char = '#';

fn claim_schemas() -> Vec<String> {
    vec![CLAIM_SCHEMA.to_string()]
}

/// Grant of a role to a user within a tenant.
///
/// A claim has no identifier of its own; it is identified by the
/// composite `tenant#user#role`. None of the three parts may contain `#`,
/// so [`Claim::try_new`] and [`Claim::from_id`] reject such parts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    #[serde(default = "claim_schemas")]
    pub schemas: Vec<String>,
    pub tenant: String,
    pub user: String,
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
}

impl Claim {
    pub fn new(tenant: impl Into<String>, user: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            schemas: claim_schemas(),
            tenant: tenant.into(),
            user: user.into(),
            role: role.into(),
            meta: None,
        }
    }

    /// Like [`Claim::new`], but fails unless the key can be parsed back.
    pub fn try_new(
        tenant: impl Into<String>,
        user: impl Into<String>,
        role: impl Into<String>,
    ) -> ScimResult<Self> {
        let claim = Self::new(tenant, user, role);
        claim.validate()?;
        Ok(claim)
    }

    /// Rebuild a claim from its composite identifier.
    pub fn from_id(id: &str) -> ScimResult<Self> {
        let parts: Vec<&str> = id.split(SEPARATOR).collect();
        match parts.as_slice() {
            [tenant, user, role] if !tenant.is_empty() && !user.is_empty() && !role.is_empty() => {
                Ok(Self::new(*tenant, *user, *role))
            }
            _ => Err(ScimError::invalid_value(format!(
                "Claim identifier '{}' must have the form tenant{}user{}role",
                id, SEPARATOR, SEPARATOR
            ))),
        }
    }

    /// Check that every part is non-empty and free of the separator.
    pub fn validate(&self) -> ScimResult<()> {
        for (name, part) in [("tenant", &self.tenant), ("user", &self.user), ("role", &self.role)] {
            if part.is_empty() || part.contains(SEPARATOR) {
                return Err(ScimError::invalid_value(format!(
                    "Claim {} '{}' must be non-empty and must not contain '{}'",
                    name, part, SEPARATOR
                )));
            }
        }
        Ok(())
    }

    pub fn key(&self) -> String {
        format!(
            "{}{}{}{}{}",
            self.tenant, SEPARATOR, self.user, SEPARATOR, self.role
        )
    }
}

impl ScimResource for Claim {
    const RESOURCE_TYPE: &'static str = "Claim";
    const ENDPOINT: &'static str = "/Claims";

    fn schemas(&self) -> Vec<&str> {
        self.schemas.iter().map(String::as_str).collect()
    }

    fn id(&self) -> Option<String> {
        Some(self.key())
    }

    fn meta(&self) -> Option<&Meta> {
        self.meta.as_ref()
    }

    fn meta_mut(&mut self) -> &mut Option<Meta> {
        &mut self.meta
    }
}
