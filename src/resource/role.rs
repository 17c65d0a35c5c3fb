use super::{Meta, ScimResource};
use crate::schema::embedded::ROLE_SCHEMA;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

fn role_schemas() -> Vec<String> {
    vec![ROLE_SCHEMA.to_string()]
}

/// A role that can be claimed by users within a tenant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    #[serde(default = "role_schemas")]
    pub schemas: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
}

impl Role {
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            schemas: role_schemas(),
            id: None,
            display_name: display_name.into(),
            description: None,
            meta: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// The service assigned identifier, generated on first use.
    pub fn assign_id(&mut self) -> &str {
        self.id.get_or_insert_with(|| Uuid::new_v4().to_string())
    }
}

impl ScimResource for Role {
    const RESOURCE_TYPE: &'static str = "Role";
    const ENDPOINT: &'static str = "/Roles";

    fn schemas(&self) -> Vec<&str> {
        self.schemas.iter().map(String::as_str).collect()
    }

    fn id(&self) -> Option<String> {
        self.id.clone()
    }

    fn meta(&self) -> Option<&Meta> {
        self.meta.as_ref()
    }

    fn meta_mut(&mut self) -> &mut Option<Meta> {
        &mut self.meta
    }
}
