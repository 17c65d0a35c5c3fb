//! Schema enforcement for SCIM requests.
//!
//! A [`SchemaValidator`] checks search filters, attribute selections and
//! request bodies against a [`ResourceTypeDefinition`]. Every check collects
//! its findings into a [`ValidationReport`]; the caller decides whether to
//! raise them with [`ValidationReport::throw_violation`].

use super::resource_type::ResourceTypeDefinition;
use super::types::{AttributeDefinition, AttributeType, Mutability};
use crate::config::ServiceConfig;
use crate::error::{ScimError, ScimResult};
use crate::filter::{Filter, FilterVisitor, Path, is_namespace};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, FixedOffset};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Switches relaxing the strictness of a [`SchemaValidator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationOption {
    /// Ignore attributes the schemas do not define
    Relax,
    /// Ignore sub-attributes the schemas do not define
    Weak,
}

/// Issues found by a validation pass, grouped by the `scimType` they raise.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    path: Vec<String>,
    syntax: Vec<String>,
    filter: Vec<String>,
    mutability: Vec<String>,
}

impl ValidationReport {
    pub fn path_issues(&self) -> &[String] {
        &self.path
    }

    pub fn syntax_issues(&self) -> &[String] {
        &self.syntax
    }

    pub fn filter_issues(&self) -> &[String] {
        &self.filter
    }

    pub fn mutability_issues(&self) -> &[String] {
        &self.mutability
    }

    /// Whether no issue was found.
    pub fn is_valid(&self) -> bool {
        self.path.is_empty()
            && self.syntax.is_empty()
            && self.filter.is_empty()
            && self.mutability.is_empty()
    }

    /// Raise the first non-empty category, in the order syntax, mutability,
    /// path, filter, as the matching bad request.
    pub fn throw_violation(&self) -> ScimResult<()> {
        if !self.syntax.is_empty() {
            return Err(ScimError::invalid_syntax(self.syntax.join(" ")));
        }
        if !self.mutability.is_empty() {
            return Err(ScimError::mutability(self.mutability.join(" ")));
        }
        if !self.path.is_empty() {
            return Err(ScimError::invalid_path(self.path.join(" ")));
        }
        if !self.filter.is_empty() {
            return Err(ScimError::invalid_filter(self.filter.join(" ")));
        }
        Ok(())
    }
}

/// Enforces the schemas of one resource type.
#[derive(Debug, Clone)]
pub struct SchemaValidator<'a> {
    resource: &'a ResourceTypeDefinition,
    options: HashSet<ValidationOption>,
}

impl<'a> SchemaValidator<'a> {
    /// A strict validator for `resource`.
    pub fn of(resource: &'a ResourceTypeDefinition) -> Self {
        Self {
            resource,
            options: HashSet::new(),
        }
    }

    /// A validator with the options enabled in `config`.
    pub fn from_config(resource: &'a ResourceTypeDefinition, config: &ServiceConfig) -> Self {
        let mut validator = Self::of(resource);
        if config.relax {
            validator = validator.with_option(ValidationOption::Relax);
        }
        if config.weak {
            validator = validator.with_option(ValidationOption::Weak);
        }
        validator
    }

    pub fn with_option(mut self, option: ValidationOption) -> Self {
        self.options.insert(option);
        self
    }

    pub fn is_enabled(&self, option: ValidationOption) -> bool {
        self.options.contains(&option)
    }

    /// Check that every attribute referenced by a search filter is defined.
    pub fn on_search(&self, filter: &Filter) -> ValidationReport {
        let mut verifier = FilterVerifier {
            validator: self,
            issues: Vec::new(),
        };
        filter.visit(&mut verifier);
        let report = ValidationReport {
            filter: verifier.issues,
            ..Default::default()
        };
        log::trace!(
            "Search filter on {} validated with {} issues",
            self.resource.name(),
            report.filter.len()
        );
        report
    }

    /// Check that attribute selections and sort paths are defined.
    pub fn on_attributes<'p>(&self, paths: impl IntoIterator<Item = &'p Path>) -> ValidationReport {
        let mut report = ValidationReport::default();
        for path in paths {
            if self.resource.attribute_definition(path).is_none() {
                self.undefined(path, &mut report.path);
            }
        }
        report
    }

    /// Check a resource submitted with POST.
    pub fn on_create(&self, resource: &Value) -> ValidationReport {
        let mut report = ValidationReport::default();
        self.verify_resource(resource, None, &mut report);
        log::debug!(
            "Create request for {} validated: {}",
            self.resource.name(),
            if report.is_valid() { "ok" } else { "rejected" }
        );
        report
    }

    /// Check a resource submitted with PUT against its current state.
    pub fn on_replace(&self, resource: &Value, current: &Value) -> ValidationReport {
        let mut report = ValidationReport::default();
        self.verify_resource(resource, Some(current), &mut report);
        log::debug!(
            "Replace request for {} validated: {}",
            self.resource.name(),
            if report.is_valid() { "ok" } else { "rejected" }
        );
        report
    }

    /// A copy of `resource` without read-only attributes.
    pub fn remove_read_only(&self, resource: &Value) -> Value {
        let Some(object) = resource.as_object() else {
            return resource.clone();
        };
        let mut result = Map::new();
        for (key, value) in object {
            if key == "schemas" {
                result.insert(key.clone(), value.clone());
                continue;
            }
            if let Some(extension) = self.resource.extension(key) {
                let stripped = match value {
                    Value::Object(inner) => {
                        Value::Object(strip_read_only(extension.attributes.iter(), inner))
                    }
                    other => other.clone(),
                };
                result.insert(key.clone(), stripped);
                continue;
            }
            match find(self.resource.attributes(), key) {
                Some(definition) if definition.is_read_only() => {}
                Some(definition) => {
                    result.insert(key.clone(), strip_value(definition, value));
                }
                None => {
                    result.insert(key.clone(), value.clone());
                }
            }
        }
        Value::Object(result)
    }

    fn verify_resource(&self, resource: &Value, current: Option<&Value>, report: &mut ValidationReport) {
        let Some(object) = resource.as_object() else {
            report.syntax.push("Resource must be a JSON object".to_string());
            return;
        };
        let mut object = object.clone();
        let declared = self.verify_schemas(&mut object, report);

        let current = current.and_then(Value::as_object);

        // Extension objects are checked against their own schema.
        let mut extensions = Vec::new();
        for (schema, _) in self.resource.extensions() {
            if let Some(value) = take(&mut object, &schema.id) {
                extensions.push((schema, value));
            }
        }

        self.verify_node(
            &Path::root(),
            self.resource.attributes(),
            &mut object,
            current,
            report,
        );

        for (schema, value) in extensions {
            if !declared.contains(&schema.id.to_ascii_lowercase()) {
                report.syntax.push(format!(
                    "Extended attributes namespace {} must be included in the schemas attribute",
                    schema.id
                ));
            }
            match value {
                Value::Null => {}
                Value::Object(mut inner) => {
                    let namespace = match Path::with_namespace(&schema.id) {
                        Ok(path) => path,
                        Err(e) => {
                            report.syntax.push(e.detail());
                            continue;
                        }
                    };
                    let current = current
                        .and_then(|c| lookup(c, &schema.id))
                        .and_then(Value::as_object);
                    self.verify_node(
                        &namespace,
                        schema.attributes.iter(),
                        &mut inner,
                        current,
                        report,
                    );
                }
                _ => report.syntax.push(format!(
                    "Extended attributes namespace {} must be a JSON object",
                    schema.id
                )),
            }
        }
    }

    /// Remove and check `schemas`; returns the declared URNs in lower case.
    fn verify_schemas(&self, object: &mut Map<String, Value>, report: &mut ValidationReport) -> Vec<String> {
        let mut declared = Vec::new();
        match take(object, "schemas") {
            Some(Value::Array(values)) if !values.is_empty() => {
                for value in values {
                    match value.as_str() {
                        Some(urn) if self.resource.schema_urns().iter().any(|u| u.eq_ignore_ascii_case(urn)) => {
                            declared.push(urn.to_ascii_lowercase());
                        }
                        Some(urn) => report.syntax.push(format!(
                            "Schema URI {} is not a valid value for attribute schemas because it is undefined as a core or schema extension for this resource type",
                            urn
                        )),
                        None => report
                            .syntax
                            .push("Value for attribute schemas must be a JSON string".to_string()),
                    }
                }
            }
            Some(Value::Array(_)) | None | Some(Value::Null) => {
                report
                    .syntax
                    .push("Attribute schemas is required and must have a value".to_string());
                return declared;
            }
            Some(_) => {
                report
                    .syntax
                    .push("Value for multi-valued attribute schemas must be a JSON array".to_string());
                return declared;
            }
        }

        let core = &self.resource.core().id;
        if !declared.contains(&core.to_ascii_lowercase()) {
            report.syntax.push(format!(
                "Value for attribute schemas must contain schema URI {} because it is the core schema for this resource type",
                core
            ));
        }
        for (schema, required) in self.resource.extensions() {
            if required && !declared.contains(&schema.id.to_ascii_lowercase()) {
                report.syntax.push(format!(
                    "Value for attribute schemas must contain schema URI {} because it is a required schema extension for this resource type",
                    schema.id
                ));
            }
        }
        declared
    }

    fn verify_node<'d>(
        &self,
        parent: &Path,
        definitions: impl Iterator<Item = &'d AttributeDefinition>,
        object: &mut Map<String, Value>,
        current: Option<&Map<String, Value>>,
        report: &mut ValidationReport,
    ) {
        for definition in definitions {
            let path = parent.clone().attribute(definition.name.as_str());
            let value = take(object, &definition.name);
            // Read-only values are assigned by the service provider.
            if definition.is_read_only() {
                continue;
            }

            let absent = match &value {
                None | Some(Value::Null) => true,
                Some(Value::Array(items)) => items.is_empty(),
                Some(_) => false,
            };
            if absent {
                if definition.required {
                    report
                        .syntax
                        .push(format!("Attribute {} is required and must have a value", path));
                }
                continue;
            }
            let Some(value) = value else { continue };

            let existing = current.and_then(|c| lookup(c, &definition.name));
            if definition.mutability == Mutability::Immutable {
                if let Some(existing) = existing.filter(|e| !e.is_null()) {
                    if existing != &value {
                        report.mutability.push(format!(
                            "Attribute {} is immutable and it already has a value",
                            path
                        ));
                    }
                }
            }
            let nested = if definition.multi_valued {
                None
            } else {
                existing.and_then(Value::as_object)
            };
            self.verify_values(&path, definition, &value, nested, report);
        }

        for undefined in object.keys() {
            if parent.is_empty() && is_namespace(undefined) {
                report
                    .syntax
                    .push(format!("Undefined extended attributes namespace {}", undefined));
            } else if parent.is_root() {
                if !self.is_enabled(ValidationOption::Relax) {
                    report.syntax.push(match parent.namespace() {
                        Some(namespace) => format!(
                            "Extended attribute {} is undefined for schema {}",
                            undefined, namespace
                        ),
                        None => format!(
                            "Core attribute {} is undefined for schema {}",
                            undefined,
                            self.resource.core().id
                        ),
                    });
                }
            } else if !self.is_enabled(ValidationOption::Weak) {
                report.syntax.push(format!(
                    "Sub-attribute {} is undefined for attribute {}",
                    undefined, parent
                ));
            }
        }
    }

    fn verify_values(
        &self,
        path: &Path,
        definition: &AttributeDefinition,
        value: &Value,
        current: Option<&Map<String, Value>>,
        report: &mut ValidationReport,
    ) {
        match (definition.multi_valued, value) {
            (true, Value::Array(items)) => {
                for item in items {
                    self.verify_value(path, definition, item, None, report);
                }
            }
            (true, _) => report.syntax.push(format!(
                "Value for multi-valued attribute {} must be a JSON array",
                path
            )),
            (false, Value::Array(_)) => report.syntax.push(format!(
                "Value for single-valued attribute {} must not be a JSON array",
                path
            )),
            (false, single) => self.verify_value(path, definition, single, current, report),
        }
    }

    fn verify_value(
        &self,
        path: &Path,
        definition: &AttributeDefinition,
        value: &Value,
        current: Option<&Map<String, Value>>,
        report: &mut ValidationReport,
    ) {
        if value.is_null() {
            return;
        }
        let issue = match definition.data_type {
            AttributeType::String => match value.as_str() {
                Some(text) if !definition.is_canonical(text) => Some(format!(
                    "Value {} is not valid for attribute {} because it is not one of the canonical types: {}",
                    text,
                    path,
                    definition.canonical_values.join(", ")
                )),
                Some(_) => None,
                None => Some(format!("Value for attribute {} must be a JSON string", path)),
            },
            AttributeType::Boolean => (!value.is_boolean())
                .then(|| format!("Value for attribute {} must be a JSON boolean", path)),
            AttributeType::Decimal => (!value.is_number())
                .then(|| format!("Value for attribute {} must be a JSON number", path)),
            AttributeType::Integer => match value {
                Value::Number(n) if n.is_i64() || n.is_u64() => None,
                Value::Number(_) => Some(format!("Value for attribute {} is not an integral number", path)),
                _ => Some(format!("Value for attribute {} must be a JSON number", path)),
            },
            AttributeType::DateTime => match value.as_str() {
                Some(text) if DateTime::<FixedOffset>::parse_from_rfc3339(text).is_ok() => None,
                Some(_) => Some(format!(
                    "Value for attribute {} is not a valid xsd:dateTime formatted string",
                    path
                )),
                None => Some(format!("Value for attribute {} must be a JSON string", path)),
            },
            AttributeType::Binary => match value.as_str() {
                Some(text) if STANDARD.decode(text).is_ok() => None,
                Some(_) => Some(format!(
                    "Value for attribute {} is not a valid base64 encoded string",
                    path
                )),
                None => Some(format!("Value for attribute {} must be a JSON string", path)),
            },
            AttributeType::Reference => match value.as_str() {
                Some(text) if !text.is_empty() && !text.chars().any(char::is_whitespace) => None,
                Some(_) => Some(format!("Value for attribute {} is not a valid URI string", path)),
                None => Some(format!("Value for attribute {} must be a JSON string", path)),
            },
            AttributeType::Complex => match value {
                Value::Object(inner) => {
                    let mut inner = inner.clone();
                    self.verify_node(
                        path,
                        definition.sub_attributes.iter(),
                        &mut inner,
                        current,
                        report,
                    );
                    None
                }
                _ => Some(format!("Value for attribute {} must be a JSON object", path)),
            },
        };
        if let Some(issue) = issue {
            report.syntax.push(issue);
        }
    }

    /// Report an undefined path; top-level attributes are subject to
    /// `Relax`, sub-attributes to `Weak`.
    fn undefined(&self, path: &Path, issues: &mut Vec<String>) {
        let Some(first) = path.first() else {
            return;
        };
        let top = path.sub(1);
        if self.resource.attribute_definition(&top).is_none() {
            if !self.is_enabled(ValidationOption::Relax) {
                issues.push(format!(
                    "Attribute {} in path {} is undefined",
                    first.attribute(),
                    path
                ));
            }
            return;
        }
        if self.is_enabled(ValidationOption::Weak) {
            return;
        }
        for index in 2..=path.len() {
            if self.resource.attribute_definition(&path.sub(index)).is_none() {
                if let Some(element) = path.element(index - 1) {
                    issues.push(format!(
                        "Sub-attribute {} in path {} is undefined",
                        element.attribute(),
                        path
                    ));
                }
                return;
            }
        }
    }
}

struct FilterVerifier<'v, 'a> {
    validator: &'v SchemaValidator<'a>,
    issues: Vec<String>,
}

impl FilterVisitor for FilterVerifier<'_, '_> {
    fn attribute(&mut self, path: &Path, parent: Option<&Path>) {
        let resource = self.validator.resource;
        match parent {
            Some(parent) => {
                // Simple multi-valued attributes expose their values as "value".
                let simple = resource
                    .attribute_definition(parent)
                    .is_some_and(|d| d.multi_valued && d.sub_attributes.is_empty());
                let implicit = path
                    .first()
                    .is_some_and(|e| e.attribute().eq_ignore_ascii_case("value"));
                if simple && implicit {
                    return;
                }
                let full = parent.append(&path.without_namespace());
                if resource.attribute_definition(&full).is_none() {
                    let name = path.first().map(|e| e.attribute()).unwrap_or_default();
                    self.issues.push(format!(
                        "Sub-attribute {} in value filter for path {} is undefined",
                        name, parent
                    ));
                }
            }
            None => {
                if resource.attribute_definition(path).is_none() {
                    self.validator.undefined(path, &mut self.issues);
                }
            }
        }
    }
}

fn find<'d>(
    mut definitions: impl Iterator<Item = &'d AttributeDefinition>,
    name: &str,
) -> Option<&'d AttributeDefinition> {
    definitions.find(|d| d.name.eq_ignore_ascii_case(name))
}

fn lookup<'m>(object: &'m Map<String, Value>, name: &str) -> Option<&'m Value> {
    object.get(name).or_else(|| {
        object
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value)
    })
}

fn take(object: &mut Map<String, Value>, name: &str) -> Option<Value> {
    let key = object
        .keys()
        .find(|key| key.eq_ignore_ascii_case(name))?
        .clone();
    object.remove(&key)
}

fn strip_read_only<'d>(
    definitions: impl Iterator<Item = &'d AttributeDefinition> + Clone,
    object: &Map<String, Value>,
) -> Map<String, Value> {
    let mut result = Map::new();
    for (key, value) in object {
        match find(definitions.clone(), key) {
            Some(definition) if definition.is_read_only() => {}
            Some(definition) => {
                result.insert(key.clone(), strip_value(definition, value));
            }
            None => {
                result.insert(key.clone(), value.clone());
            }
        }
    }
    result
}

fn strip_value(definition: &AttributeDefinition, value: &Value) -> Value {
    if !definition.is_complex() {
        return value.clone();
    }
    match value {
        Value::Object(inner) => Value::Object(strip_read_only(definition.sub_attributes.iter(), inner)),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| match item {
                    Value::Object(inner) => {
                        Value::Object(strip_read_only(definition.sub_attributes.iter(), inner))
                    }
                    other => other.clone(),
                })
                .collect(),
        ),
        other => other.clone(),
    }
}
