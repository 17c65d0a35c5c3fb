//! Construction and accessors of [`SearchControl`].

use super::{
    ATTRIBUTES, COUNT, EXCLUDED_ATTRIBUTES, FILTER, SORT_BY, SORT_ORDER, START_INDEX,
    SearchRequest, SortOrder,
};
use crate::config::ServiceConfig;
use crate::error::{ScimError, ScimResult};
use crate::filter::{Filter, Path};
use crate::schema::ResourceTypeDefinition;
use std::collections::HashMap;
use std::num::IntErrorKind;

/// Validated search parameters for one resource type.
///
/// `start` is 1-based and at least 1; `count` lies within
/// `[0, maximum_count]`. Attribute paths are normalised against the resource
/// type, stripped of value filters and free of duplicates.
///
/// ```rust
/// use uid_scim::schema::SchemaRegistry;
/// use uid_scim::search::SearchControl;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let registry = SchemaRegistry::with_embedded_schemas()?;
/// let users = registry.resource_type("User").ok_or("missing")?;
/// let control = SearchControl::from_query(
///     users,
///     [("startIndex", "0"), ("count", "5000"), ("attributes", "userName, name.givenName")],
/// )?;
/// assert_eq!(control.start(), 1);
/// assert_eq!(control.count(), 1000);
/// assert_eq!(control.attributes().len(), 2);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SearchControl {
    pub(super) start: usize,
    pub(super) count: usize,
    pub(super) filter: Option<Filter>,
    pub(super) exclude: bool,
    pub(super) attributes: Vec<Path>,
    pub(super) sort: Option<Path>,
    pub(super) order: SortOrder,
}

/// Raw parameters before validation.
#[derive(Debug, Default)]
struct Parameters<'p> {
    start: Option<i64>,
    count: Option<i64>,
    filter: Option<&'p str>,
    sort_by: Option<&'p str>,
    sort_order: Option<&'p str>,
    emitted: Vec<&'p str>,
    omitted: Vec<&'p str>,
}

impl SearchControl {
    /// Read the query parameters of a GET request using the default limits.
    pub fn from_query<I, K, V>(resource: &ResourceTypeDefinition, params: I) -> ScimResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        Self::from_query_with(resource, params, &ServiceConfig::default())
    }

    /// Read the query parameters of a GET request. The first occurrence of a
    /// parameter wins.
    pub fn from_query_with<I, K, V>(
        resource: &ResourceTypeDefinition,
        params: I,
        config: &ServiceConfig,
    ) -> ScimResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut first: HashMap<String, String> = HashMap::new();
        for (key, value) in params {
            first
                .entry(key.as_ref().to_string())
                .or_insert_with(|| value.as_ref().to_string());
        }

        let parameters = Parameters {
            start: number(first.get(START_INDEX), START_INDEX)?,
            count: number(first.get(COUNT), COUNT)?,
            filter: first.get(FILTER).map(String::as_str),
            sort_by: first.get(SORT_BY).map(String::as_str),
            sort_order: first.get(SORT_ORDER).map(String::as_str),
            emitted: split(first.get(ATTRIBUTES)),
            omitted: split(first.get(EXCLUDED_ATTRIBUTES)),
        };
        Self::assemble(resource, parameters, config)
    }

    /// Read the body of a POST `.search` request using the default limits.
    pub fn from_request(resource: &ResourceTypeDefinition, request: &SearchRequest) -> ScimResult<Self> {
        Self::from_request_with(resource, request, &ServiceConfig::default())
    }

    /// Read the body of a POST `.search` request.
    pub fn from_request_with(
        resource: &ResourceTypeDefinition,
        request: &SearchRequest,
        config: &ServiceConfig,
    ) -> ScimResult<Self> {
        let parameters = Parameters {
            start: request.start_index,
            count: request.count,
            filter: request.filter.as_deref(),
            sort_by: request.sort_by.as_deref(),
            sort_order: request.sort_order.as_deref(),
            emitted: trimmed(&request.attributes),
            omitted: trimmed(&request.excluded_attributes),
        };
        Self::assemble(resource, parameters, config)
    }

    /// Build from individual values. Emitted attributes take precedence
    /// over omitted ones.
    #[allow(clippy::too_many_arguments)]
    pub fn build<S: AsRef<str>>(
        resource: &ResourceTypeDefinition,
        start: Option<i64>,
        count: Option<i64>,
        filter: Option<&str>,
        sort_by: Option<&str>,
        sort_order: Option<&str>,
        emitted: &[S],
        omitted: &[S],
    ) -> ScimResult<Self> {
        let parameters = Parameters {
            start,
            count,
            filter,
            sort_by,
            sort_order,
            emitted: emitted.iter().map(AsRef::as_ref).collect(),
            omitted: omitted.iter().map(AsRef::as_ref).collect(),
        };
        Self::assemble(resource, parameters, &ServiceConfig::default())
    }

    fn assemble(
        resource: &ResourceTypeDefinition,
        parameters: Parameters<'_>,
        config: &ServiceConfig,
    ) -> ScimResult<Self> {
        let start = match parameters.start {
            Some(value) if value < 1 => 1,
            Some(value) => usize::try_from(value).unwrap_or(usize::MAX),
            None => config.default_start,
        };
        let count = match parameters.count {
            Some(value) if value < 0 => 0,
            Some(value) => usize::try_from(value)
                .unwrap_or(usize::MAX)
                .min(config.maximum_count),
            None => config.default_count.min(config.maximum_count),
        };

        let filter = parameters
            .filter
            .filter(|f| !f.trim().is_empty())
            .map(Filter::parse)
            .transpose()?;

        let sort = parameters
            .sort_by
            .filter(|s| !s.trim().is_empty())
            .map(|s| {
                Path::parse(s)
                    .map(|path| resource.normalize_path(&path))
                    .map_err(|e| {
                        ScimError::invalid_value(format!("Invalid {} value '{}': {}", SORT_BY, s, e.detail()))
                    })
            })
            .transpose()?;

        let order = match parameters.sort_order {
            Some(value) if !value.trim().is_empty() => value.parse()?,
            _ => SortOrder::default(),
        };

        let (exclude, selected) = if !parameters.emitted.is_empty() {
            (false, parameters.emitted)
        } else if !parameters.omitted.is_empty() {
            (true, parameters.omitted)
        } else {
            (false, Vec::new())
        };
        let mut attributes: Vec<Path> = Vec::with_capacity(selected.len());
        for expression in selected {
            let path = resource
                .normalize_path(&Path::parse(expression)?)
                .without_filters();
            if !attributes.contains(&path) {
                attributes.push(path);
            }
        }

        let control = Self {
            start,
            count,
            filter,
            exclude,
            attributes,
            sort,
            order,
        };
        log::debug!(
            "Search control for {}: start={} count={} filter={:?} sort={:?} {} exclude={} attributes={}",
            resource.name(),
            control.start,
            control.count,
            control.filter.as_ref().map(ToString::to_string),
            control.sort.as_ref().map(ToString::to_string),
            control.order,
            control.exclude,
            control.attributes.len()
        );
        Ok(control)
    }

    /// 1-based index of the first result.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Maximum number of results per page.
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn filter(&self) -> Option<&Filter> {
        self.filter.as_ref()
    }

    /// Whether [`attributes`](Self::attributes) lists excluded rather than
    /// requested attributes.
    pub fn exclude(&self) -> bool {
        self.exclude
    }

    pub fn attributes(&self) -> &[Path] {
        &self.attributes
    }

    pub fn sort(&self) -> Option<&Path> {
        self.sort.as_ref()
    }

    pub fn order(&self) -> SortOrder {
        self.order
    }
}

fn number(value: Option<&String>, name: &str) -> ScimResult<Option<i64>> {
    value
        .map(|v| {
            // Out of range values are clamped later on.
            v.trim().parse::<i64>().or_else(|e| match e.kind() {
                IntErrorKind::PosOverflow => Ok(i64::MAX),
                IntErrorKind::NegOverflow => Ok(i64::MIN),
                _ => Err(ScimError::invalid_value(format!(
                    "Invalid {} value '{}': must be an integer",
                    name, v
                ))),
            })
        })
        .transpose()
}

fn split(value: Option<&String>) -> Vec<&str> {
    value
        .map(|v| v.split(',').map(str::trim).filter(|s| !s.is_empty()).collect())
        .unwrap_or_default()
}

fn trimmed(values: &[String]) -> Vec<&str> {
    values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .collect()
}
