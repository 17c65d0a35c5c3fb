//! Filters and attribute selections checked against the schemas.

use crate::assert_scim_type;
use crate::common::{registry, resource_type};
use uid_scim::error::ScimType;
use uid_scim::filter::{Filter, Path};
use uid_scim::schema::{SchemaValidator, ValidationOption};

#[test]
fn test_defined_filter_attributes() {
    let registry = registry();
    let users = resource_type(&registry, "User");
    let filter = Filter::parse(
        "userName sw \"b\" and emails[type eq \"work\"] and \
         urn:p20:scim:schemas:uid:1.0:Account:tenant eq \"acme\" and meta.created pr",
    )
    .unwrap();
    let report = SchemaValidator::of(users).on_search(&filter);
    assert!(report.is_valid(), "{:?}", report);
}

#[test]
fn test_undefined_filter_attributes() {
    let registry = registry();
    let users = resource_type(&registry, "User");
    let filter = Filter::parse("nickName eq \"b\" or emails[kind eq \"work\"]").unwrap();
    let report = SchemaValidator::of(users).on_search(&filter);
    assert_eq!(report.filter_issues().len(), 2, "{:?}", report);
    assert_scim_type!(report.throw_violation(), ScimType::InvalidFilter);

    let relaxed = SchemaValidator::of(users)
        .with_option(ValidationOption::Relax)
        .on_search(&Filter::parse("nickName eq \"b\"").unwrap());
    assert!(relaxed.is_valid());
}

#[test]
fn test_attribute_selection() {
    let registry = registry();
    let tenants = resource_type(&registry, "Tenant");
    let paths = [
        Path::parse("displayName").unwrap(),
        Path::parse("roles.scope").unwrap(),
        Path::parse("roles.level").unwrap(),
    ];
    let report = SchemaValidator::of(tenants).on_attributes(&paths);
    assert_eq!(report.path_issues().len(), 1, "{:?}", report);
    assert!(report.path_issues()[0].contains("level"));
    assert_scim_type!(report.throw_violation(), ScimType::InvalidPath);

    let weak = SchemaValidator::of(tenants)
        .with_option(ValidationOption::Weak)
        .on_attributes(&paths);
    assert!(weak.is_valid());
}
