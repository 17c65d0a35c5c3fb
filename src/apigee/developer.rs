use super::{Pair, active, attribute};
use serde::{Deserialize, Serialize};

/// A developer registered with an organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Developer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub developer_id: Option<String>,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_name: Option<String>,
    #[serde(default = "active")]
    pub status: String,
    pub user_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified_by: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub companies: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub apps: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<Pair>,
}

impl Developer {
    pub fn new(email: impl Into<String>, user_name: impl Into<String>) -> Self {
        Self {
            developer_id: None,
            email: email.into(),
            organization_name: None,
            status: active(),
            user_name: user_name.into(),
            first_name: None,
            last_name: None,
            created_at: None,
            created_by: None,
            last_modified_at: None,
            last_modified_by: None,
            companies: Vec::new(),
            apps: Vec::new(),
            attributes: Vec::new(),
        }
    }

    pub fn name(mut self, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self.last_name = Some(last_name.into());
        self
    }

    pub fn organization(mut self, organization: impl Into<String>) -> Self {
        self.organization_name = Some(organization.into());
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        attribute(&self.attributes, name)
    }

    pub fn is_active(&self) -> bool {
        self.status == super::ACTIVE
    }
}

/// Envelope of `GET /developers?expand=true`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeveloperList {
    #[serde(default)]
    pub developer: Vec<Developer>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_gateway_payload() {
        let developer: Developer = serde_json::from_value(json!({
            "developerId": "d-1",
            "email": "ahamilton@example.com",
            "organizationName": "acme-prod",
            "userName": "ahamilton",
            "firstName": "Alex",
            "lastName": "Hamilton",
            "createdAt": 1_700_000_000_000_i64,
            "createdBy": "admin@example.com",
            "apps": ["weather"],
            "attributes": [{"name": "tier", "value": "gold"}]
        }))
        .unwrap();
        assert!(developer.is_active());
        assert_eq!(developer.attribute("tier"), Some("gold"));
        assert_eq!(developer.created_at, Some(1_700_000_000_000));
        assert_eq!(developer.apps, vec!["weather".to_string()]);
    }

    #[test]
    fn test_list_envelope() {
        let list: DeveloperList = serde_json::from_value(json!({
            "developer": [
                {"email": "a@example.com", "userName": "a"},
                {"email": "b@example.com", "userName": "b", "status": "inactive"}
            ]
        }))
        .unwrap();
        assert_eq!(list.developer.len(), 2);
        assert!(!list.developer[1].is_active());

        let empty: DeveloperList = serde_json::from_value(json!({})).unwrap();
        assert!(empty.developer.is_empty());
    }

    #[test]
    fn test_new_developer_payload() {
        let value = serde_json::to_value(
            Developer::new("c@example.com", "c")
                .name("Chris", "Doe")
                .organization("acme"),
        )
        .unwrap();
        assert_eq!(value["status"], "active");
        assert_eq!(value["firstName"], "Chris");
        assert!(value.get("developerId").is_none());
        assert!(value.get("apps").is_none());
    }
}
