//! SCIM 2.0 support for unique identifier administration.
//!
//! Provides the protocol pieces a SCIM service provider for tenants, users,
//! roles and claims is built from, plus the administration model of the
//! console that manages them.
//!
//! # Core Components
//!
//! - [`schema`] - Attribute metadata, resource types, registry and request validation
//! - [`filter`] - Attribute paths and the filter expression language
//! - [`SearchControl`] - Paging, sorting, filtering and projection of query results
//! - [`resource`] - Tenant, User, Role and Claim resources with versioning
//! - [`apigee`] - Data transfer objects of the API gateway connector
//! - [`uid`] - Administration facade, staging lists and the tenant editor
//!
//! # Quick Start
//!
//! ```rust
//! use uid_scim::{SchemaRegistry, SearchControl};
//! use serde_json::json;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = SchemaRegistry::with_embedded_schemas()?;
//! let tenants = registry.resource_type("Tenant").ok_or("missing")?;
//! let control = SearchControl::from_query(
//!     tenants,
//!     [("filter", "active eq true"), ("count", "10")],
//! )?;
//! let page = control.execute(
//!     vec![
//!         json!({"id": "acme", "displayName": "Acme", "active": true}),
//!         json!({"id": "globex", "displayName": "Globex", "active": false}),
//!     ],
//!     tenants,
//! )?;
//! assert_eq!(page.total_results, 1);
//! # Ok(())
//! # }
//! ```

pub mod apigee;
pub mod config;
pub mod error;
pub mod filter;
pub mod resource;
pub mod schema;
pub mod search;
pub mod uid;

// Re-export commonly used types for convenience
pub use config::{ConfigError, ServiceConfig};
pub use error::{ErrorResponse, ScimError, ScimResult, ScimType};
pub use filter::{CompareOp, Filter, Path};
pub use resource::{EntityTag, Meta, ScimResource};
pub use schema::{
    AttributeDefinition, ResourceTypeDefinition, SchemaDefinition, SchemaRegistry,
    SchemaValidator, ValidationOption,
};
pub use search::{ListResponse, SearchControl, SearchRequest, SortOrder};
