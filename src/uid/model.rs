//! Records managed by the administration console.

use super::Entity;
use serde::{Deserialize, Serialize};

/// A tenant with the claims granted in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tenant {
    pub id: String,
    pub name: String,
    pub active: bool,
    #[serde(default)]
    pub claims: Vec<Claim>,
}

impl Tenant {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            active: true,
            claims: Vec::new(),
        }
    }
}

impl Entity for Tenant {
    const KIND: &'static str = "Tenant";

    fn key(&self) -> String {
        self.id.clone()
    }

    fn display(&self) -> String {
        self.name.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantType {
    pub id: String,
    pub name: String,
}

impl Entity for ParticipantType {
    const KIND: &'static str = "ParticipantType";

    fn key(&self) -> String {
        self.id.clone()
    }

    fn display(&self) -> String {
        self.name.clone()
    }
}

/// An organisation taking part in the identifier scheme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: String,
    pub name: String,
    /// Key of the [`ParticipantType`].
    #[serde(rename = "type")]
    pub participant_type: String,
}

impl Entity for Participant {
    const KIND: &'static str = "Participant";

    fn key(&self) -> String {
        self.id.clone()
    }

    fn display(&self) -> String {
        format!("{} ({})", self.name, self.participant_type)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Entity for Role {
    const KIND: &'static str = "Role";

    fn key(&self) -> String {
        self.id.clone()
    }

    fn display(&self) -> String {
        self.name.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participant: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant: Option<String>,
}

impl Entity for User {
    const KIND: &'static str = "User";

    fn key(&self) -> String {
        self.id.clone()
    }

    fn display(&self) -> String {
        self.name.clone()
    }
}

/// A role granted to a user within a tenant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Claim {
    pub tenant: String,
    pub user: String,
    pub role: String,
}

impl Claim {
    pub fn new(tenant: impl Into<String>, user: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            tenant: tenant.into(),
            user: user.into(),
            role: role.into(),
        }
    }
}

impl Entity for Claim {
    const KIND: &'static str = "Claim";

    fn key(&self) -> String {
        format!("{}#{}#{}", self.tenant, self.user, self.role)
    }

    fn display(&self) -> String {
        format!("{} as {} in {}", self.user, self.role, self.tenant)
    }
}
