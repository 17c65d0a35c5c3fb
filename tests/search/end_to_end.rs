//! Query parameters and search requests through to the list response.

use crate::assert_scim_type;
use crate::common::{fixtures, registry, resource_type};
use serde_json::Value;
use uid_scim::error::ScimType;
use uid_scim::search::{LIST_RESPONSE_SCHEMA, SearchControl, SearchRequest};

fn ids(resources: &[Value]) -> Vec<&str> {
    resources
        .iter()
        .filter_map(|r| r["id"].as_str())
        .collect()
}

#[test]
fn test_query_filter_sort_and_page() {
    let registry = registry();
    let tenants = resource_type(&registry, "Tenant");
    let control = SearchControl::from_query(
        tenants,
        [
            ("filter", "active eq true or displayName sw \"G\""),
            ("sortBy", "displayName"),
            ("sortOrder", "descending"),
            ("startIndex", "1"),
            ("count", "2"),
        ],
    )
    .unwrap();

    let page = control.execute(fixtures::tenants(), tenants).unwrap();
    assert_eq!(page.schemas, vec![LIST_RESPONSE_SCHEMA.to_string()]);
    assert_eq!(page.total_results, 3);
    assert_eq!(page.items_per_page, 2);
    assert_eq!(page.start_index, 1);
    // displayName is case-insensitive: "initech" sorts before "Globex" descending
    assert_eq!(ids(&page.resources), vec!["initech", "globex"]);
}

#[test]
fn test_second_page() {
    let registry = registry();
    let tenants = resource_type(&registry, "Tenant");
    let control = SearchControl::from_query(
        tenants,
        [("sortBy", "id"), ("startIndex", "3"), ("count", "10")],
    )
    .unwrap();
    let page = control.execute(fixtures::tenants(), tenants).unwrap();
    assert_eq!(page.total_results, 4);
    assert_eq!(page.start_index, 3);
    assert_eq!(ids(&page.resources), vec!["initech", "umbrella"]);
}

#[test]
fn test_count_zero_returns_totals_only() {
    let registry = registry();
    let tenants = resource_type(&registry, "Tenant");
    let control = SearchControl::from_query(tenants, [("count", "-5")]).unwrap();
    let page = control.execute(fixtures::tenants(), tenants).unwrap();
    assert_eq!(page.total_results, 4);
    assert!(page.resources.is_empty());
    assert_eq!(page.items_per_page, 0);
}

#[test]
fn test_search_request_body() {
    let registry = registry();
    let users = resource_type(&registry, "User");
    let request = SearchRequest::new()
        .with_filter("emails[type eq \"work\"].value ew \"example.com\"")
        .with_sort("userName", "ascending")
        .with_attributes(["userName", "emails.value"]);
    let control = SearchControl::from_request(users, &request).unwrap();
    let page = control.execute(fixtures::users(), users).unwrap();

    assert_eq!(page.total_results, 2);
    assert_eq!(ids(&page.resources), vec!["u1", "u2"]);
    let first = &page.resources[0];
    assert_eq!(first["userName"], "bkraus");
    assert!(first.get("displayName").is_none());
    assert!(first.get("schemas").is_some());
    // emails keep only the requested sub-attribute
    assert_eq!(first["emails"][1]["value"], "bkraus@acme.example.com");
    assert!(first["emails"][1].get("type").is_none());
}

#[test]
fn test_sort_by_multi_valued_uses_primary() {
    let registry = registry();
    let users = resource_type(&registry, "User");
    let control = SearchControl::from_query(users, [("sortBy", "emails.value")]).unwrap();
    let page = control.execute(fixtures::users(), users).unwrap();
    // ana@..., bkraus@... (primary), peter@...
    assert_eq!(ids(&page.resources), vec!["u3", "u1", "u2"]);
}

#[test]
fn test_extension_attributes_in_filter_and_projection() {
    let registry = registry();
    let users = resource_type(&registry, "User");
    let control = SearchControl::from_query(
        users,
        [
            ("filter", "urn:p20:scim:schemas:uid:1.0:Account:tenant eq \"acme\""),
            ("excludedAttributes", "emails,name"),
        ],
    )
    .unwrap();
    let page = control.execute(fixtures::users(), users).unwrap();
    assert_eq!(ids(&page.resources), vec!["u1"]);
    let user = &page.resources[0];
    assert!(user.get("emails").is_none());
    assert!(user.get("name").is_none());
    assert_eq!(user["urn:p20:scim:schemas:uid:1.0:Account"]["tenant"], "acme");
}

#[test]
fn test_password_is_never_returned() {
    let registry = registry();
    let users = resource_type(&registry, "User");
    let mut collection = fixtures::users();
    collection[0]["password"] = Value::from("t1meMa$heen");
    let control = SearchControl::from_query(users, [("attributes", "password,userName")]).unwrap();
    let page = control.execute(collection, users).unwrap();
    assert!(page.resources.iter().all(|r| r.get("password").is_none()));
    // id is always returned
    assert_eq!(page.resources[0]["id"], "u1");
}

#[test]
fn test_invalid_parameters() {
    let registry = registry();
    let tenants = resource_type(&registry, "Tenant");
    assert_scim_type!(
        SearchControl::from_query(tenants, [("filter", "displayName eq")]),
        ScimType::InvalidFilter
    );
    assert_scim_type!(
        SearchControl::from_query(tenants, [("sortOrder", "up")]),
        ScimType::InvalidValue
    );
    assert_scim_type!(
        SearchControl::from_query(tenants, [("attributes", "roles[")]),
        ScimType::InvalidPath
    );
}

#[test]
fn test_ordering_on_boolean_is_rejected_at_evaluation() {
    let registry = registry();
    let tenants = resource_type(&registry, "Tenant");
    let control = SearchControl::from_query(tenants, [("filter", "active gt true")]).unwrap();
    assert_scim_type!(
        control.execute(fixtures::tenants(), tenants),
        ScimType::InvalidFilter
    );
}
