//! Applying a [`SearchControl`] to result sets.

use super::{ListResponse, SearchControl, SortOrder};
use crate::error::ScimResult;
use crate::filter::Path;
use crate::schema::{AttributeDefinition, ResourceTypeDefinition, Returned};
use chrono::{DateTime, FixedOffset};
use serde_json::{Map, Value};
use std::cmp::Ordering;

impl SearchControl {
    /// Slice an already filtered and sorted result set into the requested page.
    pub fn paginate<T>(&self, items: Vec<T>) -> ListResponse<T> {
        let total = items.len();
        let page: Vec<T> = items
            .into_iter()
            .skip(self.start.saturating_sub(1))
            .take(self.count)
            .collect();
        ListResponse::new(page, total, self.start)
    }

    /// Filter, sort, page and project JSON resources of `resource`.
    pub fn execute(
        &self,
        items: Vec<Value>,
        resource: &ResourceTypeDefinition,
    ) -> ScimResult<ListResponse<Value>> {
        let mut selected = match &self.filter {
            Some(filter) => {
                let case_exact = |path: &Path| {
                    resource
                        .attribute_definition(&resource.normalize_path(path))
                        .is_some_and(|d| d.case_exact)
                };
                let mut kept = Vec::with_capacity(items.len());
                for item in items {
                    if filter.matches_with(&item, &case_exact)? {
                        kept.push(item);
                    }
                }
                kept
            }
            None => items,
        };
        self.sort_resources(&mut selected, resource);
        let page = self.paginate(selected);
        log::trace!(
            "Search on {} matched {} resources, returning {}",
            resource.name(),
            page.total_results,
            page.items_per_page
        );
        Ok(page.map(|item| self.project(&item, resource)))
    }

    /// Apply attribute selection and the `returned` characteristic.
    ///
    /// `never` attributes are dropped, `always` attributes kept, `request`
    /// attributes kept only when explicitly requested and `default`
    /// attributes follow the attribute list. `schemas` is always kept.
    pub fn project(&self, resource: &Value, definition: &ResourceTypeDefinition) -> Value {
        let Some(object) = resource.as_object() else {
            return resource.clone();
        };
        let mut result = Map::new();
        for (key, value) in object {
            if key == "schemas" {
                result.insert(key.clone(), value.clone());
                continue;
            }
            if let Some(extension) = definition.extension(key) {
                let Ok(container) = Path::with_namespace(&extension.id) else {
                    continue;
                };
                if let Value::Object(inner) = value {
                    let projected =
                        self.project_map(&container, inner, |name| extension.attribute(name));
                    if !projected.is_empty() {
                        result.insert(key.clone(), Value::Object(projected));
                    }
                }
                continue;
            }
            let path = Path::of(key.as_str());
            let attribute = definition.attribute_definition(&path);
            if let Some(projected) = self.project_value(&path, attribute, value) {
                result.insert(key.clone(), projected);
            }
        }
        Value::Object(result)
    }

    fn project_map<'d>(
        &self,
        parent: &Path,
        object: &Map<String, Value>,
        lookup: impl Fn(&str) -> Option<&'d AttributeDefinition>,
    ) -> Map<String, Value> {
        let mut result = Map::new();
        for (key, value) in object {
            let path = parent.clone().attribute(key.as_str());
            if let Some(projected) = self.project_value(&path, lookup(key), value) {
                result.insert(key.clone(), projected);
            }
        }
        result
    }

    fn project_value(
        &self,
        path: &Path,
        attribute: Option<&AttributeDefinition>,
        value: &Value,
    ) -> Option<Value> {
        let returned = attribute.map_or(Returned::Default, |a| a.returned);
        let requested = !self.exclude
            && self
                .attributes
                .iter()
                .any(|a| path.starts_with(a) || a.starts_with(path));
        let keep = match returned {
            Returned::Never => false,
            Returned::Always => true,
            Returned::Request => requested,
            Returned::Default if self.attributes.is_empty() => true,
            Returned::Default if self.exclude => {
                !self.attributes.iter().any(|a| path.starts_with(a))
            }
            Returned::Default => requested,
        };
        if !keep {
            return None;
        }

        let Some(attribute) = attribute.filter(|a| a.is_complex()) else {
            return Some(value.clone());
        };
        let lookup = |name: &str| attribute.sub_attribute(name);
        Some(match value {
            Value::Object(inner) => Value::Object(self.project_map(path, inner, lookup)),
            Value::Array(items) => Value::Array(
                items
                    .iter()
                    .map(|item| match item {
                        Value::Object(inner) => Value::Object(self.project_map(path, inner, lookup)),
                        other => other.clone(),
                    })
                    .collect(),
            ),
            other => other.clone(),
        })
    }

    /// The value a resource is sorted by: the sort attribute, or for
    /// multi-valued attributes the primary (else first) value.
    pub fn sort_key<'v>(&self, resource: &'v Value) -> Option<&'v Value> {
        let sort = self.sort.as_ref()?;
        let mut current = match sort.namespace() {
            Some(namespace) => field(resource, namespace).unwrap_or(resource),
            None => resource,
        };
        for element in sort.elements() {
            current = field(pick(current)?, element.attribute())?;
        }
        let key = pick(current)?;
        (!key.is_null()).then_some(key)
    }

    /// Order two resources by their sort keys; resources without a key
    /// sort last in either direction.
    pub fn compare(&self, a: &Value, b: &Value, resource: &ResourceTypeDefinition) -> Ordering {
        let case_exact = self
            .sort
            .as_ref()
            .and_then(|sort| resource.attribute_definition(sort))
            .is_some_and(|d| d.case_exact);
        match (self.sort_key(a), self.sort_key(b)) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(x), Some(y)) => {
                let ordering = compare_values(x, y, case_exact);
                match self.order {
                    SortOrder::Ascending => ordering,
                    SortOrder::Descending => ordering.reverse(),
                }
            }
        }
    }

    /// Stable sort by [`compare`](Self::compare); a no-op without `sortBy`.
    pub fn sort_resources(&self, items: &mut [Value], resource: &ResourceTypeDefinition) {
        if self.sort.is_some() {
            items.sort_by(|a, b| self.compare(a, b, resource));
        }
    }
}

fn field<'v>(value: &'v Value, name: &str) -> Option<&'v Value> {
    let object = value.as_object()?;
    object.get(name).or_else(|| {
        object
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, v)| v)
    })
}

/// Reduce a multi-valued attribute to its primary or first value.
fn pick(value: &Value) -> Option<&Value> {
    match value {
        Value::Array(items) => items
            .iter()
            .find(|item| field(item, "primary").and_then(Value::as_bool) == Some(true))
            .or_else(|| items.first()),
        other => Some(other),
    }
}

fn compare_values(a: &Value, b: &Value, case_exact: bool) -> Ordering {
    match (a, b) {
        (Value::String(x), Value::String(y)) => {
            let dates = (
                DateTime::<FixedOffset>::parse_from_rfc3339(x),
                DateTime::<FixedOffset>::parse_from_rfc3339(y),
            );
            if let (Ok(x), Ok(y)) = dates {
                return x.cmp(&y);
            }
            if case_exact {
                x.cmp(y)
            } else {
                x.to_lowercase().cmp(&y.to_lowercase())
            }
        }
        (Value::Number(x), Value::Number(y)) => match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
            _ => Ordering::Equal,
        },
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => Ordering::Equal,
    }
}
