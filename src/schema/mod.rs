//! Schema definitions and validation for SCIM resources.
//!
//! This module provides attribute metadata (RFC 7643 Section 7), resource type
//! definitions, the schema registry of the unique identifier service and the
//! validator enforcing schemas on requests.
//!
//! # Key Types
//!
//! - [`AttributeDefinition`] - Individual attribute characteristics
//! - [`SchemaDefinition`] - A schema URN with its attributes
//! - [`ResourceTypeDefinition`] - Core schema plus extensions served at an endpoint
//! - [`SchemaRegistry`] - Registry for managing and accessing schemas
//! - [`SchemaValidator`] - Request validation against a resource type
//!
//! # Examples
//!
//! ```rust
//! use uid_scim::schema::SchemaRegistry;
//! use uid_scim::filter::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = SchemaRegistry::with_embedded_schemas()?;
//! let users = registry.resource_type("User").ok_or("missing")?;
//! let path = Path::parse("urn:ietf:params:scim:schemas:core:2.0:User:userName")?;
//! assert_eq!(users.normalize_path(&path).to_string(), "userName");
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod embedded;
pub mod registry;
pub mod resource_type;
pub mod types;
pub mod validation;


// Re-export the main types for convenience
pub use builder::{AttributeBuilder, common_attributes};
pub use registry::SchemaRegistry;
pub use resource_type::{ResourceTypeBuilder, ResourceTypeDefinition};
pub use types::{
    AttributeDefinition, AttributeType, Mutability, Returned, SchemaDefinition, Uniqueness,
};
pub use validation::{SchemaValidator, ValidationOption, ValidationReport};
