//! Resource collections used across the suite.

use serde_json::{Value, json};
use uid_scim::schema::embedded::{ACCOUNT_SCHEMA, TENANT_SCHEMA, USER_SCHEMA};

pub fn tenants() -> Vec<Value> {
    vec![
        json!({
            "schemas": [TENANT_SCHEMA],
            "id": "acme",
            "displayName": "Acme Corporation",
            "active": true,
            "roles": [
                {"value": "bkraus", "type": "User", "scope": "admin", "display": "Bernd Kraus"},
                {"value": "ops", "type": "Group", "scope": "read"}
            ],
            "meta": {
                "resourceType": "Tenant",
                "created": "2024-01-10T08:00:00Z",
                "lastModified": "2024-03-01T08:00:00Z"
            }
        }),
        json!({
            "schemas": [TENANT_SCHEMA],
            "id": "globex",
            "displayName": "Globex",
            "active": false,
            "meta": {
                "resourceType": "Tenant",
                "created": "2023-06-01T08:00:00Z",
                "lastModified": "2023-06-01T08:00:00Z"
            }
        }),
        json!({
            "schemas": [TENANT_SCHEMA],
            "id": "initech",
            "displayName": "initech",
            "active": true,
            "roles": [
                {"value": "pgibbons", "type": "User", "scope": "read"}
            ],
            "meta": {
                "resourceType": "Tenant",
                "created": "2024-05-20T08:00:00Z",
                "lastModified": "2024-05-21T08:00:00Z"
            }
        }),
        json!({
            "schemas": [TENANT_SCHEMA],
            "id": "umbrella",
            "displayName": "Umbrella",
            "meta": {
                "resourceType": "Tenant",
                "created": "2022-02-02T08:00:00Z",
                "lastModified": "2022-02-02T08:00:00Z"
            }
        }),
    ]
}

pub fn users() -> Vec<Value> {
    vec![
        json!({
            "schemas": [USER_SCHEMA, ACCOUNT_SCHEMA],
            "id": "u1",
            "userName": "bkraus",
            "name": {"givenName": "Bernd", "familyName": "Kraus"},
            "displayName": "Bernd Kraus",
            "active": true,
            "emails": [
                {"value": "bernd@home.example.com", "type": "home"},
                {"value": "bkraus@acme.example.com", "type": "work", "primary": true}
            ],
            ACCOUNT_SCHEMA: {"tenant": "acme", "participant": "p-1", "participantType": "broker"}
        }),
        json!({
            "schemas": [USER_SCHEMA, ACCOUNT_SCHEMA],
            "id": "u2",
            "userName": "pgibbons",
            "name": {"givenName": "Peter", "familyName": "Gibbons"},
            "active": false,
            "emails": [
                {"value": "peter@initech.example.com", "type": "work"}
            ],
            ACCOUNT_SCHEMA: {"tenant": "initech"}
        }),
        json!({
            "schemas": [USER_SCHEMA],
            "id": "u3",
            "userName": "alopez",
            "displayName": "Ana Lopez",
            "active": true,
            "emails": [
                {"value": "ana@lopez.example.org", "type": "home", "primary": true}
            ]
        }),
    ]
}
