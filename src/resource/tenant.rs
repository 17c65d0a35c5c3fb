use super::{Meta, ScimResource};
use crate::schema::embedded::TENANT_SCHEMA;
use serde::{Deserialize, Serialize};
use std::fmt;

fn tenant_schemas() -> Vec<String> {
    vec![TENANT_SCHEMA.to_string()]
}

/// Kind of member a tenant role is claimed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MemberType {
    #[default]
    User,
    Group,
}

impl fmt::Display for MemberType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => f.write_str("User"),
            Self::Group => f.write_str("Group"),
        }
    }
}

/// A role claimed by a member of the tenant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantRole {
    pub value: String,
    #[serde(rename = "type", default)]
    pub member_type: MemberType,
    pub scope: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
    #[serde(rename = "$ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl TenantRole {
    pub fn new(value: impl Into<String>, scope: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            member_type: MemberType::User,
            scope: scope.into(),
            display: None,
            reference: None,
        }
    }

    pub fn member_type(mut self, member_type: MemberType) -> Self {
        self.member_type = member_type;
        self
    }

    pub fn display(mut self, display: impl Into<String>) -> Self {
        self.display = Some(display.into());
        self
    }

    pub fn reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }
}

/// A tenant of the unique identifier service.
///
/// The `id` is assigned by the client, not the service provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
    #[serde(default = "tenant_schemas")]
    pub schemas: Vec<String>,
    pub id: String,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<TenantRole>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
}

impl Tenant {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            schemas: tenant_schemas(),
            id: id.into(),
            display_name: display_name.into(),
            active: None,
            roles: Vec::new(),
            meta: None,
        }
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }

    pub fn role(mut self, role: TenantRole) -> Self {
        self.roles.push(role);
        self
    }

    pub fn is_active(&self) -> bool {
        self.active.unwrap_or(false)
    }
}

impl ScimResource for Tenant {
    const RESOURCE_TYPE: &'static str = "Tenant";
    const ENDPOINT: &'static str = "/Tenants";

    fn schemas(&self) -> Vec<&str> {
        self.schemas.iter().map(String::as_str).collect()
    }

    fn id(&self) -> Option<String> {
        Some(self.id.clone())
    }

    fn meta(&self) -> Option<&Meta> {
        self.meta.as_ref()
    }

    fn meta_mut(&mut self) -> &mut Option<Meta> {
        &mut self.meta
    }
}
