//! Data transfer objects of the Apigee Edge management API.
//!
//! The gateway connector exchanges these with the management endpoints.
//! Timestamps are milliseconds since the epoch as the gateway sends them;
//! custom attributes are name/value [`Pair`]s.

mod application;
mod company;
mod developer;
mod organization;
mod user;

pub use application::{Application, ApplicationList, Credential};
pub use company::Company;
pub use developer::{Developer, DeveloperList};
pub use organization::Organization;
pub use user::User;

use serde::{Deserialize, Serialize};

/// Status the gateway assigns to newly registered entities.
pub const ACTIVE: &str = "active";
pub const INACTIVE: &str = "inactive";

pub(crate) fn active() -> String {
    ACTIVE.to_string()
}

/// A custom attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pair {
    pub name: String,
    pub value: String,
}

impl Pair {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Look up a custom attribute by name.
pub fn attribute<'a>(attributes: &'a [Pair], name: &str) -> Option<&'a str> {
    attributes
        .iter()
        .find(|pair| pair.name == name)
        .map(|pair| pair.value.as_str())
}

/// Set a custom attribute, replacing an existing value of the same name.
pub fn set_attribute(attributes: &mut Vec<Pair>, name: impl Into<String>, value: impl Into<String>) {
    let name = name.into();
    let value = value.into();
    match attributes.iter_mut().find(|pair| pair.name == name) {
        Some(pair) => pair.value = value,
        None => attributes.push(Pair { name, value }),
    }
}
