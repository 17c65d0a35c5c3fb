//! In-memory evaluation of filters against JSON resources.

use super::{CompareOp, Filter, Path};
use crate::error::{ScimError, ScimResult};
use chrono::{DateTime, FixedOffset};
use serde_json::{Map, Value};
use std::cmp::Ordering;

pub(super) fn evaluate(
    filter: &Filter,
    resource: &Value,
    case_exact: &dyn Fn(&Path) -> bool,
) -> ScimResult<bool> {
    let context = Context {
        root: resource,
        case_exact,
    };
    context.eval(filter, resource, None)
}

struct Context<'a> {
    root: &'a Value,
    case_exact: &'a dyn Fn(&Path) -> bool,
}

impl<'a> Context<'a> {
    fn eval(&self, filter: &Filter, scope: &'a Value, parent: Option<&Path>) -> ScimResult<bool> {
        match filter {
            Filter::And(components) => {
                for component in components {
                    if !self.eval(component, scope, parent)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            Filter::Or(components) => {
                for component in components {
                    if self.eval(component, scope, parent)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
            Filter::Not(inner) => Ok(!self.eval(inner, scope, parent)?),
            Filter::Present(path) => {
                let values = self.resolve(scope, path, parent)?;
                Ok(values.into_iter().any(is_present))
            }
            Filter::Compare { op, path, value } => {
                if op.is_ordering() && (value.is_boolean() || value.is_null()) {
                    return Err(ScimError::invalid_filter(format!(
                        "Operator '{}' cannot be applied to {} in filter '{}'",
                        op, value, filter
                    )));
                }
                let full = qualified(path, parent);
                let exact = (self.case_exact)(&full);
                let values = self.resolve(scope, path, parent)?;
                Ok(compare_all(*op, &values, value, exact))
            }
            Filter::Complex { path, filter } => {
                let full = qualified(path, parent);
                for item in self.resolve(scope, path, parent)? {
                    if self.eval(filter, item, Some(&full))? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
        }
    }

    /// All values addressed by `path`, with multi-valued attributes flattened.
    fn resolve(
        &self,
        scope: &'a Value,
        path: &Path,
        parent: Option<&Path>,
    ) -> ScimResult<Vec<&'a Value>> {
        let start = match path.namespace() {
            Some(namespace) if parent.is_none() => match self.namespaced(namespace) {
                Some(value) => value,
                None => return Ok(Vec::new()),
            },
            _ => scope,
        };

        let mut current = vec![start];
        for (index, element) in path.elements().iter().enumerate() {
            let mut next = Vec::new();
            for value in current.iter().flat_map(|v| flatten(*v)) {
                match value {
                    Value::Object(map) => {
                        if let Some(found) = lookup(map, element.attribute()) {
                            next.push(found);
                        }
                    }
                    Value::Null | Value::Array(_) => {}
                    scalar => {
                        if element.attribute().eq_ignore_ascii_case("value") {
                            next.push(scalar);
                        }
                    }
                }
            }
            if let Some(filter) = element.filter() {
                let scope_path = path.sub(index + 1);
                let mut kept = Vec::new();
                for item in next.iter().flat_map(|v| flatten(*v)) {
                    if self.eval(filter, item, Some(&scope_path))? {
                        kept.push(item);
                    }
                }
                next = kept;
            }
            current = next;
        }
        Ok(current.into_iter().flat_map(flatten).collect())
    }

    /// The object holding attributes of `namespace`: an extension object, or
    /// the resource itself when the namespace is its core schema.
    fn namespaced(&self, namespace: &str) -> Option<&'a Value> {
        let map = self.root.as_object()?;
        if let Some(extension) = lookup(map, namespace) {
            return Some(extension);
        }
        let core = map
            .get("schemas")
            .and_then(Value::as_array)
            .and_then(|schemas| schemas.first())
            .and_then(Value::as_str);
        match core {
            Some(urn) if urn.eq_ignore_ascii_case(namespace) => Some(self.root),
            _ => None,
        }
    }
}

fn qualified(path: &Path, parent: Option<&Path>) -> Path {
    match parent {
        Some(p) => p.without_filters().append(&path.without_namespace()),
        None => path.without_filters(),
    }
}

fn lookup<'a>(map: &'a Map<String, Value>, attribute: &str) -> Option<&'a Value> {
    map.get(attribute).or_else(|| {
        map.iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(attribute))
            .map(|(_, value)| value)
    })
}

fn flatten(value: &Value) -> Vec<&Value> {
    match value {
        Value::Array(items) => items.iter().collect(),
        other => vec![other],
    }
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        Value::Object(map) => !map.is_empty(),
        _ => true,
    }
}

fn compare_all(op: CompareOp, values: &[&Value], expected: &Value, exact: bool) -> bool {
    match (op, expected) {
        (CompareOp::Eq, Value::Null) => values.iter().all(|v| v.is_null()),
        (CompareOp::Ne, Value::Null) => values.iter().any(|v| !v.is_null()),
        (CompareOp::Ne, _) => !values
            .iter()
            .any(|v| compare_one(CompareOp::Eq, v, expected, exact)),
        _ => values.iter().any(|v| compare_one(op, v, expected, exact)),
    }
}

fn compare_one(op: CompareOp, actual: &Value, expected: &Value, exact: bool) -> bool {
    match (actual, expected) {
        (Value::String(a), Value::String(b)) => {
            if let (Some(a), Some(b)) = (parse_date(a), parse_date(b)) {
                return ordered(op, a.cmp(&b));
            }
            let (a, b) = if exact {
                (a.clone(), b.clone())
            } else {
                (a.to_lowercase(), b.to_lowercase())
            };
            match op {
                CompareOp::Co => a.contains(&b),
                CompareOp::Sw => a.starts_with(&b),
                CompareOp::Ew => a.ends_with(&b),
                _ => ordered(op, a.cmp(&b)),
            }
        }
        (Value::Number(a), Value::Number(b)) => match (a.as_f64(), b.as_f64()) {
            (Some(a), Some(b)) => a.partial_cmp(&b).is_some_and(|o| ordered(op, o)),
            _ => false,
        },
        (Value::Bool(a), Value::Bool(b)) => op == CompareOp::Eq && a == b,
        _ => false,
    }
}

fn ordered(op: CompareOp, ordering: Ordering) -> bool {
    match op {
        CompareOp::Eq => ordering == Ordering::Equal,
        CompareOp::Ne => ordering != Ordering::Equal,
        CompareOp::Gt => ordering == Ordering::Greater,
        CompareOp::Ge => ordering != Ordering::Less,
        CompareOp::Lt => ordering == Ordering::Less,
        CompareOp::Le => ordering != Ordering::Greater,
        CompareOp::Co | CompareOp::Sw | CompareOp::Ew => false,
    }
}

fn parse_date(value: &str) -> Option<DateTime<FixedOffset>> {
    // Cheap pre-check keeps plain strings off the chrono parser.
    if value.len() < 20 || !value.as_bytes()[0].is_ascii_digit() {
        return None;
    }
    DateTime::parse_from_rfc3339(value).ok()
}

#[cfg(test)]
mod tests {
    use crate::error::ScimType;
    use crate::filter::{Filter, Path};
    use serde_json::{Value, json};

    fn user() -> Value {
        json!({
            "schemas": [
                "urn:ietf:params:scim:schemas:core:2.0:User",
                "urn:p20:scim:schemas:uid:1.0:Account"
            ],
            "id": "2819c223",
            "userName": "BJensen",
            "active": true,
            "name": {"familyName": "Jensen", "givenName": "Barbara"},
            "emails": [
                {"value": "bjensen@example.com", "type": "work", "primary": true},
                {"value": "babs@jensen.org", "type": "home"}
            ],
            "groups": ["admins", "staff"],
            "loginCount": 42,
            "meta": {"lastModified": "2011-05-13T04:42:34Z"},
            "urn:p20:scim:schemas:uid:1.0:Account": {"tenant": "acme"}
        })
    }

    fn check(expression: &str) -> bool {
        Filter::parse(expression).unwrap().matches(&user()).unwrap()
    }

    #[test]
    fn test_string_operators() {
        assert!(check("userName eq \"bjensen\""));
        assert!(check("userName sw \"bj\""));
        assert!(check("userName ew \"SEN\""));
        assert!(check("name.familyName co \"ens\""));
        assert!(!check("userName eq \"jdoe\""));
        assert!(check("userName ne \"jdoe\""));
    }

    #[test]
    fn test_case_exact_callback() {
        let filter = Filter::parse("userName eq \"bjensen\"").unwrap();
        let exact = |path: &Path| path == &Path::of("userName");
        assert!(!filter.matches_with(&user(), &exact).unwrap());
    }

    #[test]
    fn test_multi_valued_any_semantics() {
        assert!(check("emails.type eq \"home\""));
        assert!(check("emails[type eq \"work\" and primary eq true]"));
        assert!(!check("emails[type eq \"home\" and primary eq true]"));
        assert!(check("groups[value eq \"staff\"]"));
    }

    #[test]
    fn test_value_path_selects_sub_attribute() {
        assert!(check("emails[type eq \"home\"].value ew \"jensen.org\""));
        assert!(!check("emails[type eq \"home\"].value ew \"example.com\""));
    }

    #[test]
    fn test_numbers_and_dates() {
        assert!(check("loginCount gt 40"));
        assert!(check("loginCount le 42"));
        assert!(check("meta.lastModified gt \"2011-01-01T00:00:00Z\""));
        assert!(!check("meta.lastModified lt \"2011-05-13T04:42:34+01:00\""));
    }

    #[test]
    fn test_presence_and_null() {
        assert!(check("title eq null"));
        assert!(!check("userName eq null"));
        assert!(check("name pr"));
        assert!(!check("title pr"));
        assert!(check("not (title pr)"));
    }

    #[test]
    fn test_namespaced_attributes() {
        assert!(check("urn:p20:scim:schemas:uid:1.0:Account:tenant eq \"ACME\""));
        assert!(check("urn:ietf:params:scim:schemas:core:2.0:User:userName pr"));
        assert!(!check("urn:p20:scim:schemas:uid:1.0:Other:tenant pr"));
    }

    #[test]
    fn test_ordering_on_boolean_is_rejected() {
        let filter = Filter::parse("active gt true").unwrap();
        let err = filter.matches(&user()).unwrap_err();
        assert_eq!(err.scim_type(), Some(ScimType::InvalidFilter));
    }
}
