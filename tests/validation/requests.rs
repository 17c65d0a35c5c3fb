//! Create and replace request bodies.

use crate::assert_scim_type;
use crate::common::{fixtures, registry, resource_type};
use serde_json::json;
use uid_scim::config::ServiceConfig;
use uid_scim::error::ScimType;
use uid_scim::resource::{Account, Email, Name, ScimResource, Tenant, TenantRole, User};
use uid_scim::schema::SchemaValidator;
use uid_scim::schema::embedded::{ACCOUNT_SCHEMA, TENANT_SCHEMA, USER_SCHEMA};

#[test]
fn test_fixtures_are_valid() {
    let registry = registry();
    let tenants = resource_type(&registry, "Tenant");
    let users = resource_type(&registry, "User");
    for tenant in fixtures::tenants() {
        let report = SchemaValidator::of(tenants).on_create(&tenant);
        assert!(report.is_valid(), "{:?}", report);
    }
    for user in fixtures::users() {
        let report = SchemaValidator::of(users).on_create(&user);
        assert!(report.is_valid(), "{:?}", report);
    }
}

#[test]
fn test_typed_resources_are_valid() {
    let registry = registry();
    let mut tenant = Tenant::new("acme", "Acme").active(true).role(TenantRole::new("u1", "admin"));
    tenant.stamp(Some("https://uid.example.com")).unwrap();
    let report = SchemaValidator::of(resource_type(&registry, "Tenant"))
        .on_create(&tenant.to_value().unwrap());
    assert!(report.is_valid(), "{:?}", report);

    let user = User::new("bkraus")
        .name(Name::new("Bernd", "Kraus"))
        .email(Email::new("bkraus@example.com").kind("work").primary())
        .account(Account::new("acme"));
    let report = SchemaValidator::of(resource_type(&registry, "User"))
        .on_create(&user.to_value().unwrap());
    assert!(report.is_valid(), "{:?}", report);
}

#[test]
fn test_create_reports_every_problem() {
    let registry = registry();
    let tenants = resource_type(&registry, "Tenant");
    let report = SchemaValidator::of(tenants).on_create(&json!({
        "schemas": [TENANT_SCHEMA],
        "displayName": 42,
        "active": "yes",
        "region": "emea",
        "roles": [{"scope": "read", "level": 3}]
    }));
    let issues = report.syntax_issues();
    assert!(issues.iter().any(|i| i.contains("Attribute id is required")), "{:?}", issues);
    assert!(issues.iter().any(|i| i.contains("displayName must be a JSON string")));
    assert!(issues.iter().any(|i| i.contains("active must be a JSON boolean")));
    assert!(issues.iter().any(|i| i.contains("Core attribute region is undefined")));
    assert!(issues.iter().any(|i| i.contains("Sub-attribute level is undefined")));
    assert_scim_type!(report.throw_violation(), ScimType::InvalidSyntax);
}

#[test]
fn test_configured_leniency() {
    let registry = registry();
    let tenants = resource_type(&registry, "Tenant");
    let config = ServiceConfig::builder().relax().weak().build().unwrap();
    let report = SchemaValidator::from_config(tenants, &config).on_create(&json!({
        "schemas": [TENANT_SCHEMA],
        "id": "acme",
        "displayName": "Acme",
        "region": "emea",
        "roles": [{"scope": "read", "level": 3}]
    }));
    assert!(report.is_valid(), "{:?}", report);
}

#[test]
fn test_extension_must_be_declared() {
    let registry = registry();
    let users = resource_type(&registry, "User");
    let report = SchemaValidator::of(users).on_create(&json!({
        "schemas": [USER_SCHEMA],
        "userName": "bkraus",
        ACCOUNT_SCHEMA: {"tenant": "acme"}
    }));
    assert!(
        report
            .syntax_issues()
            .iter()
            .any(|i| i.contains("must be included in the schemas attribute")),
        "{:?}",
        report
    );

    let report = SchemaValidator::of(users).on_create(&json!({
        "schemas": [USER_SCHEMA, "urn:example:Unknown"],
        "userName": "bkraus"
    }));
    assert!(!report.is_valid());
}

#[test]
fn test_replace_keeps_immutable_values() {
    let registry = registry();
    let users = resource_type(&registry, "User");
    let current = fixtures::users().remove(0);

    let mut moved = current.clone();
    moved[ACCOUNT_SCHEMA]["tenant"] = json!("globex");
    let report = SchemaValidator::of(users).on_replace(&moved, &current);
    assert_eq!(report.mutability_issues().len(), 1, "{:?}", report);
    assert_scim_type!(report.throw_violation(), ScimType::Mutability);

    let mut renamed = current.clone();
    renamed["displayName"] = json!("B. Kraus");
    let report = SchemaValidator::of(users).on_replace(&renamed, &current);
    assert!(report.is_valid(), "{:?}", report);
}

#[test]
fn test_read_only_values_are_stripped() {
    let registry = registry();
    let tenants = resource_type(&registry, "Tenant");
    let stored = fixtures::tenants().remove(0);
    let writable = SchemaValidator::of(tenants).remove_read_only(&stored);
    assert!(writable.get("meta").is_none());
    assert_eq!(writable["id"], "acme");
    let role = &writable["roles"][0];
    assert_eq!(role["scope"], "admin");
    assert!(role.get("value").is_none());
    assert!(role.get("display").is_none());
}
