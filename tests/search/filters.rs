//! Filter expressions evaluated against the fixture collections.

use crate::common::{fixtures, init_logging};
use serde_json::Value;
use uid_scim::filter::Filter;

fn matching(expression: &str, collection: &[Value]) -> Vec<String> {
    init_logging();
    let filter = Filter::parse(expression).unwrap();
    collection
        .iter()
        .filter(|resource| filter.matches(resource).unwrap())
        .filter_map(|resource| resource["id"].as_str().map(str::to_string))
        .collect()
}

#[test]
fn test_presence_and_negation() {
    let tenants = fixtures::tenants();
    assert_eq!(matching("roles pr", &tenants), vec!["acme", "initech"]);
    assert_eq!(matching("not (roles pr)", &tenants), vec!["globex", "umbrella"]);
    assert_eq!(matching("active eq null", &tenants), vec!["umbrella"]);
    assert_eq!(
        matching("active ne true", &tenants),
        vec!["globex", "umbrella"]
    );
}

#[test]
fn test_complex_value_filters() {
    let tenants = fixtures::tenants();
    assert_eq!(
        matching("roles[type eq \"Group\" and scope eq \"read\"]", &tenants),
        vec!["acme"]
    );
    assert_eq!(
        matching("roles[scope eq \"read\"] and active eq true", &tenants),
        vec!["acme", "initech"]
    );
    assert_eq!(matching("roles.scope eq \"ADMIN\"", &tenants), vec!["acme"]);
}

#[test]
fn test_date_comparison() {
    let tenants = fixtures::tenants();
    assert_eq!(
        matching("meta.created ge \"2024-01-01T00:00:00Z\"", &tenants),
        vec!["acme", "initech"]
    );
    assert_eq!(
        matching("meta.lastModified lt \"2023-06-01T10:00:00+01:00\"", &tenants),
        vec!["globex", "umbrella"]
    );
}

#[test]
fn test_precedence() {
    let users = fixtures::users();
    // and binds tighter than or
    assert_eq!(
        matching(
            "userName eq \"alopez\" or active eq true and userName sw \"b\"",
            &users
        ),
        vec!["u1", "u3"]
    );
    assert_eq!(
        matching(
            "(userName eq \"alopez\" or active eq true) and userName sw \"b\"",
            &users
        ),
        vec!["u1"]
    );
}

#[test]
fn test_display_reparses_to_same_filter() {
    let expressions = [
        "userName eq \"bkraus\"",
        "not (active eq false) and emails[type eq \"work\" or primary eq true]",
        "(a eq 1 or b pr) and c lt 2.5",
        "urn:p20:scim:schemas:uid:1.0:Account:tenant co \"ac\"",
    ];
    for expression in expressions {
        let filter = Filter::parse(expression).unwrap();
        let reparsed = Filter::parse(&filter.to_string()).unwrap();
        assert_eq!(reparsed, filter, "{}", expression);
    }
}
