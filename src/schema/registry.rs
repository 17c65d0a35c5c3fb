//! Schema registry for loading, managing, and accessing SCIM schemas and
//! resource types.

use super::embedded;
use super::resource_type::ResourceTypeDefinition;
use super::types::SchemaDefinition;
use crate::error::{ScimError, ScimResult};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Registry of schemas and the resource types built from them.
///
/// Schema lookups ignore the case of the URN.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: HashMap<String, SchemaDefinition>,
    resource_types: Vec<ResourceTypeDefinition>,
}

impl SchemaRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry of the unique identifier service: `Users` (core User
    /// with the optional Account extension), `Tenants`, `Roles` and `Claims`.
    pub fn with_embedded_schemas() -> ScimResult<Self> {
        let mut registry = Self::new();
        for content in embedded::all() {
            registry.add_schema(Self::load_schema_from_str(content)?);
        }

        let users = ResourceTypeDefinition::builder("User", "/Users")
            .description("User Account")
            .core(registry.require(embedded::USER_SCHEMA)?)
            .extension(registry.require(embedded::ACCOUNT_SCHEMA)?, false)
            .build()?;
        let tenants = ResourceTypeDefinition::builder("Tenant", "/Tenants")
            .description("Unique Identifier Tenant")
            .core(registry.require(embedded::TENANT_SCHEMA)?)
            .build()?;
        let roles = ResourceTypeDefinition::builder("Role", "/Roles")
            .description("Unique Identifier Role")
            .core(registry.require(embedded::ROLE_SCHEMA)?)
            .build()?;
        let claims = ResourceTypeDefinition::builder("Claim", "/Claims")
            .description("Unique Identifier Claim")
            .core(registry.require(embedded::CLAIM_SCHEMA)?)
            .build()?;

        for resource_type in [users, tenants, roles, claims] {
            registry.add_resource_type(resource_type);
        }
        log::debug!(
            "Schema registry initialised with {} schemas and {} resource types",
            registry.schemas.len(),
            registry.resource_types.len()
        );
        Ok(registry)
    }

    /// Parse a schema from its JSON representation.
    pub fn load_schema_from_str(content: &str) -> ScimResult<SchemaDefinition> {
        let schema: SchemaDefinition = serde_json::from_str(content)?;
        if schema.id.trim().is_empty() {
            return Err(ScimError::invalid_syntax("Schema id must not be empty"));
        }
        Ok(schema)
    }

    /// Read and parse a schema file.
    pub fn load_schema_from_file<P: AsRef<Path>>(path: P) -> ScimResult<SchemaDefinition> {
        let content = fs::read_to_string(&path).map_err(|e| {
            ScimError::server_error(format!(
                "Failed to read schema file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::load_schema_from_str(&content)
    }

    /// Add or replace a schema.
    pub fn add_schema(&mut self, schema: SchemaDefinition) {
        log::trace!("Registering schema {}", schema.id);
        self.schemas.insert(schema.id.to_ascii_lowercase(), schema);
    }

    /// Add or replace a resource type, matched by name.
    pub fn add_resource_type(&mut self, resource_type: ResourceTypeDefinition) {
        self.resource_types
            .retain(|r| !r.name().eq_ignore_ascii_case(resource_type.name()));
        self.resource_types.push(resource_type);
    }

    pub fn schema(&self, urn: &str) -> Option<&SchemaDefinition> {
        self.schemas.get(&urn.to_ascii_lowercase())
    }

    pub fn schemas(&self) -> Vec<&SchemaDefinition> {
        let mut schemas: Vec<_> = self.schemas.values().collect();
        schemas.sort_by(|a, b| a.id.cmp(&b.id));
        schemas
    }

    pub fn resource_type(&self, name: &str) -> Option<&ResourceTypeDefinition> {
        self.resource_types
            .iter()
            .find(|r| r.name().eq_ignore_ascii_case(name))
    }

    /// Find the resource type served at `endpoint`, with or without the
    /// leading slash.
    pub fn resource_type_by_endpoint(&self, endpoint: &str) -> Option<&ResourceTypeDefinition> {
        let wanted = endpoint.trim_start_matches('/');
        self.resource_types
            .iter()
            .find(|r| r.endpoint().trim_start_matches('/').eq_ignore_ascii_case(wanted))
    }

    pub fn resource_types(&self) -> &[ResourceTypeDefinition] {
        &self.resource_types
    }

    fn require(&self, urn: &str) -> ScimResult<SchemaDefinition> {
        self.schema(urn)
            .cloned()
            .ok_or_else(|| ScimError::server_error(format!("Schema {} is not registered", urn)))
    }
}
