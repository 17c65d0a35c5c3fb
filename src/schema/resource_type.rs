//! Resource type definitions (RFC 7643 Section 6).
//!
//! A resource type binds an endpoint to a core schema and any number of
//! schema extensions, and resolves attribute paths to their definitions.

use super::builder::common_attributes;
use super::embedded::RESOURCE_TYPE_SCHEMA;
use super::types::{AttributeDefinition, SchemaDefinition};
use crate::error::{ScimError, ScimResult};
use crate::filter::Path;
use serde_json::{Value, json};

/// A resource type with its core schema and extensions.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceTypeDefinition {
    name: String,
    description: Option<String>,
    endpoint: String,
    core: SchemaDefinition,
    extensions: Vec<(SchemaDefinition, bool)>,
    common: Vec<AttributeDefinition>,
}

impl ResourceTypeDefinition {
    /// Start a builder for the resource type `name` served at `endpoint`.
    pub fn builder(name: impl Into<String>, endpoint: impl Into<String>) -> ResourceTypeBuilder {
        ResourceTypeBuilder {
            name: name.into(),
            endpoint: endpoint.into(),
            description: None,
            core: None,
            extensions: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn core(&self) -> &SchemaDefinition {
        &self.core
    }

    /// Extension schemas paired with their required flag.
    pub fn extensions(&self) -> impl Iterator<Item = (&SchemaDefinition, bool)> {
        self.extensions.iter().map(|(schema, required)| (schema, *required))
    }

    /// The extension schema with the given URN, ignoring case.
    pub fn extension(&self, urn: &str) -> Option<&SchemaDefinition> {
        self.extensions
            .iter()
            .map(|(schema, _)| schema)
            .find(|schema| schema.id.eq_ignore_ascii_case(urn))
    }

    pub fn is_core(&self, urn: &str) -> bool {
        self.core.id.eq_ignore_ascii_case(urn)
    }

    /// The core URN followed by the extension URNs.
    pub fn schema_urns(&self) -> Vec<&str> {
        std::iter::once(self.core.id.as_str())
            .chain(self.extensions.iter().map(|(schema, _)| schema.id.as_str()))
            .collect()
    }

    /// Top-level attributes of the core schema plus the common attributes it
    /// does not redefine.
    pub fn attributes(&self) -> impl Iterator<Item = &AttributeDefinition> {
        self.core.attributes.iter().chain(
            self.common
                .iter()
                .filter(|common| self.core.attribute(&common.name).is_none()),
        )
    }

    /// Strip the namespace from paths qualified with the core schema URN.
    pub fn normalize_path(&self, path: &Path) -> Path {
        match path.namespace() {
            Some(namespace) if self.is_core(namespace) => path.without_namespace(),
            _ => path.clone(),
        }
    }

    /// Resolve a path to its attribute definition, ignoring value filters
    /// and case.
    pub fn attribute_definition(&self, path: &Path) -> Option<&AttributeDefinition> {
        let first = path.first()?;
        let mut definition = match path.namespace() {
            Some(namespace) if !self.is_core(namespace) => {
                self.extension(namespace)?.attribute(first.attribute())?
            }
            _ => self.top_level(first.attribute())?,
        };
        for element in &path.elements()[1..] {
            definition = definition.sub_attribute(element.attribute())?;
        }
        Some(definition)
    }

    fn top_level(&self, name: &str) -> Option<&AttributeDefinition> {
        self.core.attribute(name).or_else(|| {
            self.common
                .iter()
                .find(|a| a.name.eq_ignore_ascii_case(name))
        })
    }

    /// The SCIM `ResourceType` representation.
    pub fn to_json(&self) -> Value {
        let extensions: Vec<Value> = self
            .extensions
            .iter()
            .map(|(schema, required)| json!({"schema": schema.id, "required": required}))
            .collect();

        let mut value = json!({
            "schemas": [RESOURCE_TYPE_SCHEMA],
            "id": self.name,
            "name": self.name,
            "endpoint": self.endpoint,
            "schema": self.core.id,
            "meta": {
                "resourceType": "ResourceType",
                "location": format!("/ResourceTypes/{}", self.name)
            }
        });
        if let Some(description) = &self.description {
            value["description"] = json!(description);
        }
        if !extensions.is_empty() {
            value["schemaExtensions"] = Value::Array(extensions);
        }
        value
    }
}

/// Builder for [`ResourceTypeDefinition`].
#[derive(Debug, Clone)]
pub struct ResourceTypeBuilder {
    name: String,
    endpoint: String,
    description: Option<String>,
    core: Option<SchemaDefinition>,
    extensions: Vec<(SchemaDefinition, bool)>,
}

impl ResourceTypeBuilder {
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn core(mut self, schema: SchemaDefinition) -> Self {
        self.core = Some(schema);
        self
    }

    pub fn extension(mut self, schema: SchemaDefinition, required: bool) -> Self {
        self.extensions.push((schema, required));
        self
    }

    /// Fails when no core schema was supplied.
    pub fn build(self) -> ScimResult<ResourceTypeDefinition> {
        let core = self.core.ok_or_else(|| {
            ScimError::server_error(format!(
                "Resource type {} requires a core schema",
                self.name
            ))
        })?;
        Ok(ResourceTypeDefinition {
            name: self.name,
            description: self.description,
            endpoint: self.endpoint,
            core,
            extensions: self.extensions,
            common: common_attributes(),
        })
    }
}
