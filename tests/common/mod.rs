//! Common test utilities.

use uid_scim::schema::{ResourceTypeDefinition, SchemaRegistry};

pub mod fixtures;

/// Route library logging to the test output; repeated calls are harmless.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// The registry every service starts with.
pub fn registry() -> SchemaRegistry {
    init_logging();
    SchemaRegistry::with_embedded_schemas().expect("embedded schemas must load")
}

/// Look up a resource type that must exist.
pub fn resource_type<'r>(registry: &'r SchemaRegistry, name: &str) -> &'r ResourceTypeDefinition {
    registry
        .resource_type(name)
        .unwrap_or_else(|| panic!("resource type {} is not registered", name))
}

/// Assert that a fallible operation failed with the given `scimType`.
#[macro_export]
macro_rules! assert_scim_type {
    ($result:expr, $scim_type:expr) => {
        match $result {
            Err(err) => assert_eq!(
                err.scim_type(),
                Some($scim_type),
                "unexpected error: {}",
                err
            ),
            Ok(_) => panic!("expected a {} error, but the operation succeeded", $scim_type),
        }
    };
}
