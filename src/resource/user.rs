use super::{Meta, ScimResource};
use crate::schema::embedded::{ACCOUNT_SCHEMA, USER_SCHEMA};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

fn user_schemas() -> Vec<String> {
    vec![USER_SCHEMA.to_string()]
}

/// Components of a user's name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Name {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub given_name: Option<String>,
}

impl Name {
    pub fn new(given_name: impl Into<String>, family_name: impl Into<String>) -> Self {
        let given_name = given_name.into();
        let family_name = family_name.into();
        Self {
            formatted: Some(format!("{} {}", given_name, family_name)),
            family_name: Some(family_name),
            given_name: Some(given_name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email {
    pub value: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary: Option<bool>,
}

impl Email {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            kind: None,
            primary: None,
        }
    }

    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn primary(mut self) -> Self {
        self.primary = Some(true);
        self
    }
}

/// The account extension binding a user to a tenant and participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub tenant: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participant: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participant_type: Option<String>,
}

impl Account {
    pub fn new(tenant: impl Into<String>) -> Self {
        Self {
            tenant: tenant.into(),
            participant: None,
            participant_type: None,
        }
    }

    pub fn participant(
        mut self,
        participant: impl Into<String>,
        participant_type: impl Into<String>,
    ) -> Self {
        self.participant = Some(participant.into());
        self.participant_type = Some(participant_type.into());
        self
    }
}

/// A core SCIM user with the optional account extension.
///
/// The password is accepted on input only and never written back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default = "user_schemas")]
    pub schemas: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    pub user_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<Name>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(default, skip_serializing)]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub emails: Vec<Email>,
    #[serde(
        rename = "urn:p20:scim:schemas:uid:1.0:Account",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub account: Option<Account>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
}

impl User {
    pub fn new(user_name: impl Into<String>) -> Self {
        Self {
            schemas: user_schemas(),
            id: None,
            external_id: None,
            user_name: user_name.into(),
            name: None,
            display_name: None,
            active: None,
            password: None,
            emails: Vec::new(),
            account: None,
            meta: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Generate an identifier unless the user already has one.
    pub fn assign_id(&mut self) -> &str {
        self.id.get_or_insert_with(|| Uuid::new_v4().to_string())
    }

    pub fn external_id(mut self, external_id: impl Into<String>) -> Self {
        self.external_id = Some(external_id.into());
        self
    }

    pub fn name(mut self, name: Name) -> Self {
        if self.display_name.is_none() {
            self.display_name = name.formatted.clone();
        }
        self.name = Some(name);
        self
    }

    pub fn display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }

    pub fn email(mut self, email: Email) -> Self {
        self.emails.push(email);
        self
    }

    /// Attach the account extension and declare its schema.
    pub fn account(mut self, account: Account) -> Self {
        if !self.schemas.iter().any(|s| s == ACCOUNT_SCHEMA) {
            self.schemas.push(ACCOUNT_SCHEMA.to_string());
        }
        self.account = Some(account);
        self
    }

    /// The primary email, or the first one when none is flagged.
    pub fn primary_email(&self) -> Option<&Email> {
        self.emails
            .iter()
            .find(|e| e.primary == Some(true))
            .or_else(|| self.emails.first())
    }
}

impl ScimResource for User {
    const RESOURCE_TYPE: &'static str = "User";
    const ENDPOINT: &'static str = "/Users";

    fn schemas(&self) -> Vec<&str> {
        self.schemas.iter().map(String::as_str).collect()
    }

    fn id(&self) -> Option<String> {
        self.id.clone()
    }

    fn meta(&self) -> Option<&Meta> {
        self.meta.as_ref()
    }

    fn meta_mut(&mut self) -> &mut Option<Meta> {
        &mut self.meta
    }
}
