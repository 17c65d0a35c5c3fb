//! # Schema Validator
//!
//! Checks SCIM schema documents before they are registered with a
//! [`SchemaRegistry`] and prints a summary of their attributes.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin schema-validator schemas/Tenant.json
//! cargo run --bin schema-validator schemas/
//! cargo run --bin schema-validator --embedded
//! ```
//!
//! With `--embedded` the schemas compiled into the library are checked and
//! the resource types of the default registry are listed.
//!
//! A schema passes when it has a URI `id`, a non-empty `name` and at least
//! one attribute; every attribute is named, only string attributes carry
//! canonical values and exactly the complex attributes have sub-attributes.
//!
//! The process exits with status 1 if any document fails.

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use uid_scim::schema::{
    AttributeDefinition, AttributeType, SchemaDefinition, SchemaRegistry, embedded,
};

type CheckResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Outcome of checking one document.
struct Checked {
    label: String,
    result: CheckResult<SchemaDefinition>,
}

fn main() -> ExitCode {
    let Some(target) = env::args().nth(1) else {
        let program = env::args().next().unwrap_or_else(|| "schema-validator".to_string());
        eprintln!("usage: {} <schema.json | directory | --embedded>", program);
        return ExitCode::FAILURE;
    };

    let checked: Vec<Checked> = if target == "--embedded" {
        embedded::all()
            .into_iter()
            .enumerate()
            .map(|(index, content)| Checked {
                label: format!("embedded #{}", index + 1),
                result: SchemaRegistry::load_schema_from_str(content)
                    .map_err(Into::into)
                    .and_then(verified),
            })
            .collect()
    } else {
        let path = Path::new(&target);
        match documents(path) {
            Ok(files) => files
                .into_iter()
                .map(|file| Checked {
                    label: file.display().to_string(),
                    result: SchemaRegistry::load_schema_from_file(&file)
                        .map_err(Into::into)
                        .and_then(verified),
                })
                .collect(),
            Err(e) => {
                eprintln!("cannot read {}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        }
    };

    let mut failed = report(checked);
    if target == "--embedded" {
        failed |= !list_resource_types();
    }
    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// The JSON documents named by `path`, sorted by file name.
fn documents(path: &Path) -> std::io::Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    let mut files: Vec<PathBuf> = fs::read_dir(path)?
        .flatten()
        .map(|entry| entry.path())
        .filter(|file| file.extension().and_then(|e| e.to_str()) == Some("json"))
        .collect();
    files.sort();
    Ok(files)
}

/// Print every outcome; returns whether any document failed.
fn report(checked: Vec<Checked>) -> bool {
    let mut valid = SchemaRegistry::new();
    let mut failures = 0;
    for Checked { label, result } in checked {
        match result {
            Ok(schema) => {
                println!("[ok]   {}", label);
                summarize(&schema);
                valid.add_schema(schema);
            }
            Err(e) => {
                println!("[fail] {}: {}", label, e);
                failures += 1;
            }
        }
    }
    println!();
    println!("{} valid, {} invalid", valid.schemas().len(), failures);
    failures > 0
}

fn list_resource_types() -> bool {
    match SchemaRegistry::with_embedded_schemas() {
        Ok(registry) => {
            println!();
            println!("resource types:");
            for resource_type in registry.resource_types() {
                println!(
                    "  {:<8} {:<10} {}",
                    resource_type.name(),
                    resource_type.endpoint(),
                    resource_type.schema_urns().join(" + ")
                );
            }
            true
        }
        Err(e) => {
            println!("[fail] embedded registry: {}", e);
            false
        }
    }
}

fn verified(schema: SchemaDefinition) -> CheckResult<SchemaDefinition> {
    if !(schema.id.starts_with("urn:") || schema.id.starts_with("http")) {
        return Err(format!("id {} is not a URI", schema.id).into());
    }
    if schema.name.trim().is_empty() {
        return Err(format!("{} has no name", schema.id).into());
    }
    if schema.attributes.is_empty() {
        return Err(format!("{} defines no attributes", schema.id).into());
    }
    for attribute in &schema.attributes {
        check_attribute(attribute, "")?;
    }
    Ok(schema)
}

fn check_attribute(attribute: &AttributeDefinition, parent: &str) -> CheckResult<()> {
    let path = if parent.is_empty() {
        attribute.name.clone()
    } else {
        format!("{}.{}", parent, attribute.name)
    };
    if attribute.name.trim().is_empty() {
        return Err(format!("unnamed attribute below '{}'", parent).into());
    }
    if attribute.data_type != AttributeType::String && !attribute.canonical_values.is_empty() {
        return Err(format!("{}: canonical values on a {} attribute", path, attribute.data_type).into());
    }
    match (attribute.is_complex(), attribute.sub_attributes.is_empty()) {
        (true, true) => Err(format!("{}: complex attribute without sub-attributes", path).into()),
        (false, false) => Err(format!("{}: sub-attributes on a {} attribute", path, attribute.data_type).into()),
        _ => attribute
            .sub_attributes
            .iter()
            .try_for_each(|sub| check_attribute(sub, &path)),
    }
}

fn summarize(schema: &SchemaDefinition) {
    let mut by_type: BTreeMap<String, usize> = BTreeMap::new();
    for attribute in &schema.attributes {
        *by_type.entry(attribute.data_type.to_string()).or_default() += 1;
    }
    let nested: usize = schema.attributes.iter().map(|a| a.sub_attributes.len()).sum();
    let required: Vec<&str> = schema
        .attributes
        .iter()
        .filter(|a| a.required)
        .map(|a| a.name.as_str())
        .collect();
    let types: Vec<String> = by_type
        .into_iter()
        .map(|(data_type, count)| format!("{} {}", count, data_type))
        .collect();

    println!("       {} ({})", schema.name, schema.id);
    println!(
        "       {} attributes ({}), {} sub-attributes",
        schema.attributes.len(),
        types.join(", "),
        nested
    );
    if !required.is_empty() {
        println!("       required: {}", required.join(", "));
    }
}
