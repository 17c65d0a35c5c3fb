//! Search Parsing Benchmarks
//!
//! Measures filter and path parsing, query parameter handling and the
//! evaluation of a search over growing tenant collections.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use serde_json::{Value, json};
use uid_scim::filter::{Filter, Path};
use uid_scim::schema::SchemaRegistry;
use uid_scim::search::SearchControl;

const FILTERS: [(&str, &str); 4] = [
    ("simple", "userName eq \"bjensen\""),
    ("logical", "title pr and (userName sw \"J\" or active eq true)"),
    (
        "value_filter",
        "emails[type eq \"work\" and value co \"@example.com\"] or not (active eq false)",
    ),
    (
        "extension",
        "urn:p20:scim:schemas:uid:1.0:Account:tenant eq \"acme\" and meta.lastModified gt \"2024-01-01T00:00:00Z\"",
    ),
];

fn create_tenant(id: usize) -> Value {
    json!({
        "schemas": ["urn:p20:scim:schemas:uid:1.0:Tenant"],
        "id": format!("tenant-{:05}", id),
        "displayName": format!("Tenant {}", id),
        "active": id % 3 != 0,
        "roles": [
            {"value": format!("user-{}", id), "type": "User", "scope": "admin"},
            {"value": "ops", "type": "Group", "scope": if id % 2 == 0 { "read" } else { "write" }}
        ],
        "meta": {
            "resourceType": "Tenant",
            "created": "2024-01-10T08:00:00Z",
            "lastModified": "2024-03-01T08:00:00Z"
        }
    })
}

fn bench_filter_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_parsing");
    for (name, expression) in FILTERS {
        group.bench_with_input(BenchmarkId::from_parameter(name), expression, |b, expression| {
            b.iter(|| Filter::parse(black_box(expression)).unwrap())
        });
    }
    group.finish();
}

fn bench_path_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("path_parsing");
    for expression in [
        "userName",
        "name.givenName",
        "emails[type eq \"work\"].value",
        "urn:p20:scim:schemas:uid:1.0:Account:tenant",
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(expression), expression, |b, expression| {
            b.iter(|| Path::parse(black_box(expression)).unwrap())
        });
    }
    group.finish();
}

fn bench_query_parameters(c: &mut Criterion) {
    let registry = SchemaRegistry::with_embedded_schemas().unwrap();
    let users = registry.resource_type("User").unwrap();
    let params = [
        ("filter", FILTERS[2].1),
        ("sortBy", "userName"),
        ("sortOrder", "descending"),
        ("startIndex", "11"),
        ("count", "25"),
        ("attributes", "userName,emails.value,name.familyName"),
    ];
    c.bench_function("query_parameters", |b| {
        b.iter(|| SearchControl::from_query(users, black_box(params)).unwrap())
    });
}

fn bench_search_execution(c: &mut Criterion) {
    let registry = SchemaRegistry::with_embedded_schemas().unwrap();
    let tenants = registry.resource_type("Tenant").unwrap();
    let control = SearchControl::from_query(
        tenants,
        [
            ("filter", "active eq true and roles[type eq \"Group\" and scope eq \"read\"]"),
            ("sortBy", "displayName"),
            ("count", "50"),
            ("excludedAttributes", "meta"),
        ],
    )
    .unwrap();

    let mut group = c.benchmark_group("search_execution");
    for size in [100, 1_000, 10_000] {
        let collection: Vec<Value> = (0..size).map(create_tenant).collect();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &collection, |b, collection| {
            b.iter(|| control.execute(black_box(collection.clone()), tenants).unwrap())
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_filter_parsing,
    bench_path_parsing,
    bench_query_parameters,
    bench_search_execution
);
criterion_main!(benches);
