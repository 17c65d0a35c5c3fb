//! Embedded schemas of the unique identifier administration.
//!
//! The core User schema is trimmed to the attributes the UID service stores;
//! the UID schemas describe tenants, roles, claims and the account extension.
//! Common attributes (`id`, `externalId`, `meta`) are not repeated here, see
//! [`common_attributes`](super::builder::common_attributes).

/// URN of the core User schema.
pub const USER_SCHEMA: &str = "urn:ietf:params:scim:schemas:core:2.0:User";
/// URN of the UID Tenant schema.
pub const TENANT_SCHEMA: &str = "urn:p20:scim:schemas:uid:1.0:Tenant";
/// URN of the UID Role schema.
pub const ROLE_SCHEMA: &str = "urn:p20:scim:schemas:uid:1.0:Role";
/// URN of the UID Claim schema.
pub const CLAIM_SCHEMA: &str = "urn:p20:scim:schemas:uid:1.0:Claim";
/// URN of the UID Account extension of the core User.
pub const ACCOUNT_SCHEMA: &str = "urn:p20:scim:schemas:uid:1.0:Account";
/// URN of the ResourceType representation.
pub const RESOURCE_TYPE_SCHEMA: &str = "urn:ietf:params:scim:schemas:core:2.0:ResourceType";

/// Returns the core User schema as a JSON string.
pub fn core_user_schema() -> &'static str {
    r#"{
  "id": "urn:ietf:params:scim:schemas:core:2.0:User",
  "name": "User",
  "description": "User Account",
  "attributes": [
    {
      "name": "userName",
      "type": "string",
      "required": true,
      "caseExact": false,
      "mutability": "readWrite",
      "returned": "default",
      "uniqueness": "server",
      "description": "Unique identifier for the User, typically used by the user to directly authenticate to the service provider."
    },
    {
      "name": "name",
      "type": "complex",
      "description": "The components of the user's real name.",
      "subAttributes": [
        { "name": "formatted", "type": "string", "description": "The full name, including all middle names, titles, and suffixes as appropriate, formatted for display." },
        { "name": "familyName", "type": "string", "description": "The family name of the User." },
        { "name": "givenName", "type": "string", "description": "The given name of the User." }
      ]
    },
    {
      "name": "displayName",
      "type": "string",
      "description": "The name of the User, suitable for display to end-users."
    },
    {
      "name": "title",
      "type": "string",
      "description": "The user's title, such as \"Vice President\"."
    },
    {
      "name": "active",
      "type": "boolean",
      "description": "A Boolean value indicating the User's administrative status."
    },
    {
      "name": "password",
      "type": "string",
      "caseExact": true,
      "mutability": "writeOnly",
      "returned": "never",
      "description": "The User's cleartext password."
    },
    {
      "name": "emails",
      "type": "complex",
      "multiValued": true,
      "description": "Email addresses for the user.",
      "subAttributes": [
        { "name": "value", "type": "string", "description": "Email addresses for the user." },
        {
          "name": "type",
          "type": "string",
          "canonicalValues": ["work", "home", "other"],
          "description": "A label indicating the attribute's function, e.g., 'work' or 'home'."
        },
        { "name": "primary", "type": "boolean", "description": "A Boolean value indicating the 'primary' or preferred attribute value for this attribute." }
      ]
    }
  ]
}"#
}

/// Returns the UID Account extension schema as a JSON string.
pub fn account_schema() -> &'static str {
    r#"{
  "id": "urn:p20:scim:schemas:uid:1.0:Account",
  "name": "Account",
  "description": "Unique Identifier Account Extension",
  "attributes": [
    {
      "name": "tenant",
      "type": "string",
      "caseExact": true,
      "mutability": "immutable",
      "description": "The tenant the account is registered for."
    },
    {
      "name": "participant",
      "type": "string",
      "caseExact": true,
      "description": "The participant the account belongs to."
    },
    {
      "name": "participantType",
      "type": "string",
      "caseExact": true,
      "description": "The type of the participant the account belongs to."
    }
  ]
}"#
}

/// Returns the UID Tenant schema as a JSON string.
///
/// Unlike other resources a tenant carries a client-assigned `id`.
pub fn tenant_schema() -> &'static str {
    r#"{
  "id": "urn:p20:scim:schemas:uid:1.0:Tenant",
  "name": "Tenant",
  "description": "Unique Identifier Tenant",
  "attributes": [
    {
      "name": "id",
      "type": "string",
      "required": true,
      "caseExact": true,
      "mutability": "readWrite",
      "returned": "always",
      "uniqueness": "server",
      "description": "The primary identifier for a tenant typically used to identify the tenant at the service provider."
    },
    {
      "name": "displayName",
      "type": "string",
      "required": true,
      "description": "The unique identifier for a tenant typically used as a human-readable name for a tenant."
    },
    {
      "name": "active",
      "type": "boolean",
      "description": "A Boolean value indicating a tenant's administrative status."
    },
    {
      "name": "roles",
      "type": "complex",
      "multiValued": true,
      "description": "A collection of roles claimed by users in a Tenant.",
      "subAttributes": [
        {
          "name": "value",
          "type": "string",
          "required": true,
          "mutability": "readOnly",
          "description": "The identifier of the user."
        },
        {
          "name": "type",
          "type": "string",
          "required": true,
          "canonicalValues": ["User", "Group"],
          "mutability": "readOnly",
          "description": "A label indicating the attribute's membership; e.g., 'User' or 'Group'."
        },
        {
          "name": "scope",
          "type": "string",
          "required": true,
          "description": "The scope that a user belongs to in a tenant."
        },
        {
          "name": "display",
          "type": "string",
          "mutability": "readOnly",
          "description": "A human readable name, primarily used for display purposes."
        },
        {
          "name": "$ref",
          "type": "reference",
          "referenceTypes": ["Tenant", "Claim"],
          "mutability": "immutable",
          "description": "The URI of the user resource in the tenant's claim."
        }
      ]
    }
  ]
}"#
}

/// Returns the UID Role schema as a JSON string.
pub fn role_schema() -> &'static str {
    r#"{
  "id": "urn:p20:scim:schemas:uid:1.0:Role",
  "name": "Role",
  "description": "Unique Identifier Role",
  "attributes": [
    {
      "name": "displayName",
      "type": "string",
      "required": true,
      "uniqueness": "server",
      "description": "The human-readable name of the role."
    },
    {
      "name": "description",
      "type": "string",
      "description": "A description of the role."
    }
  ]
}"#
}

/// Returns the UID Claim schema as a JSON string.
pub fn claim_schema() -> &'static str {
    r#"{
  "id": "urn:p20:scim:schemas:uid:1.0:Claim",
  "name": "Claim",
  "description": "Unique Identifier Claim",
  "attributes": [
    {
      "name": "tenant",
      "type": "reference",
      "required": true,
      "caseExact": true,
      "mutability": "immutable",
      "referenceTypes": ["Tenant"],
      "description": "The tenant the claim is granted in."
    },
    {
      "name": "user",
      "type": "reference",
      "required": true,
      "caseExact": true,
      "mutability": "immutable",
      "referenceTypes": ["User"],
      "description": "The user the claim is granted to."
    },
    {
      "name": "role",
      "type": "reference",
      "required": true,
      "caseExact": true,
      "mutability": "immutable",
      "referenceTypes": ["Role"],
      "description": "The role the claim grants."
    }
  ]
}"#
}

/// All embedded schemas in registration order.
pub fn all() -> [&'static str; 5] {
    [
        core_user_schema(),
        account_schema(),
        tenant_schema(),
        role_schema(),
        claim_schema(),
    ]
}
