//! Fluent construction of attribute definitions.

use super::types::{AttributeDefinition, AttributeType, Mutability, Returned, Uniqueness};

/// Builder for [`AttributeDefinition`].
///
/// A builder can be reused: [`AttributeBuilder::clear`] resets every
/// characteristic to its default while keeping nothing from the previous
/// definition.
///
/// ```rust
/// use uid_scim::schema::{AttributeDefinition, AttributeType, Mutability};
///
/// let emails = AttributeDefinition::builder("emails")
///     .data_type(AttributeType::Complex)
///     .multi_valued(true)
///     .sub(AttributeDefinition::builder("value").build())
///     .sub(
///         AttributeDefinition::builder("type")
///             .canonical("work")
///             .canonical("home")
///             .build(),
///     )
///     .build();
/// assert_eq!(emails.mutability, Mutability::ReadWrite);
/// assert!(emails.sub_attribute("TYPE").is_some());
/// ```
#[derive(Debug, Clone)]
pub struct AttributeBuilder {
    definition: AttributeDefinition,
}

impl AttributeBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            definition: defaults(name.into()),
        }
    }

    /// Reset to defaults; the name becomes empty.
    pub fn clear(mut self) -> Self {
        self.definition = defaults(String::new());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.definition.name = name.into();
        self
    }

    pub fn data_type(mut self, data_type: AttributeType) -> Self {
        self.definition.data_type = data_type;
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.definition.description = Some(description.into());
        self
    }

    pub fn multi_valued(mut self, value: bool) -> Self {
        self.definition.multi_valued = value;
        self
    }

    pub fn required(mut self, value: bool) -> Self {
        self.definition.required = value;
        self
    }

    pub fn case_exact(mut self, value: bool) -> Self {
        self.definition.case_exact = value;
        self
    }

    pub fn mutability(mut self, mutability: Mutability) -> Self {
        self.definition.mutability = mutability;
        self
    }

    pub fn returned(mut self, returned: Returned) -> Self {
        self.definition.returned = returned;
        self
    }

    pub fn uniqueness(mut self, uniqueness: Uniqueness) -> Self {
        self.definition.uniqueness = uniqueness;
        self
    }

    /// Add a canonical value; duplicates are ignored.
    pub fn canonical(mut self, value: impl Into<String>) -> Self {
        let value = value.into();
        if !self.definition.canonical_values.contains(&value) {
            self.definition.canonical_values.push(value);
        }
        self
    }

    /// Add a reference type; duplicates are ignored.
    pub fn reference(mut self, value: impl Into<String>) -> Self {
        let value = value.into();
        if !self.definition.reference_types.contains(&value) {
            self.definition.reference_types.push(value);
        }
        self
    }

    /// Append a sub-attribute.
    pub fn sub(mut self, attribute: AttributeDefinition) -> Self {
        self.definition.sub_attributes.push(attribute);
        self
    }

    pub fn build(self) -> AttributeDefinition {
        self.definition
    }
}

fn defaults(name: String) -> AttributeDefinition {
    AttributeDefinition {
        name,
        data_type: AttributeType::String,
        multi_valued: false,
        description: None,
        required: false,
        case_exact: false,
        canonical_values: Vec::new(),
        reference_types: Vec::new(),
        sub_attributes: Vec::new(),
        mutability: Mutability::ReadWrite,
        returned: Returned::Default,
        uniqueness: Uniqueness::None,
    }
}

/// The attributes every resource type carries: `id`, `externalId` and `meta`.
pub fn common_attributes() -> Vec<AttributeDefinition> {
    let read_only = |name: &str, data_type: AttributeType| {
        AttributeDefinition::builder(name)
            .data_type(data_type)
            .mutability(Mutability::ReadOnly)
    };

    vec![
        read_only("id", AttributeType::String)
            .description("Unique identifier for the SCIM resource as defined by the service provider")
            .case_exact(true)
            .returned(Returned::Always)
            .uniqueness(Uniqueness::Server)
            .build(),
        AttributeDefinition::builder("externalId")
            .description("Identifier for the resource as defined by the provisioning client")
            .case_exact(true)
            .build(),
        read_only("meta", AttributeType::Complex)
            .description("A complex attribute containing resource metadata")
            .sub(
                read_only("resourceType", AttributeType::String)
                    .case_exact(true)
                    .build(),
            )
            .sub(read_only("created", AttributeType::DateTime).build())
            .sub(read_only("lastModified", AttributeType::DateTime).build())
            .sub(
                read_only("location", AttributeType::Reference)
                    .case_exact(true)
                    .reference("uri")
                    .build(),
            )
            .sub(
                read_only("version", AttributeType::String)
                    .case_exact(true)
                    .build(),
            )
            .build(),
    ]
}
