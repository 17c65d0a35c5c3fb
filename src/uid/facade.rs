//! Typed access to one kind of record.

use super::Entity;
use super::store::{InMemoryUidStore, Replaced, StoredRecord, UidStore};
use crate::config::ServiceConfig;
use crate::error::{ScimError, ScimResult};
use crate::resource::EntityTag;
use crate::search::{ListResponse, SortOrder};
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::marker::PhantomData;

/// A record together with the version of its last write.
#[derive(Debug, Clone, PartialEq)]
pub struct Versioned<E> {
    pub entity: E,
    pub version: EntityTag,
}

/// Field filters: every named field must contain its value, ignoring case.
pub type FieldFilter = BTreeMap<String, String>;

/// A page of records as requested by a list view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// 0-based offset of the first record.
    pub start: usize,
    pub size: usize,
    pub filter: FieldFilter,
    pub sort: Option<(String, SortOrder)>,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first(&ServiceConfig::default())
    }
}

impl PageRequest {
    pub fn new(start: usize, size: usize) -> Self {
        Self {
            start,
            size,
            filter: FieldFilter::new(),
            sort: None,
        }
    }

    /// The first page with the configured page size.
    pub fn first(config: &ServiceConfig) -> Self {
        Self::new(0, config.page_size)
    }

    /// The page following this one.
    pub fn next(&self) -> Self {
        Self {
            start: self.start.saturating_add(self.size),
            ..self.clone()
        }
    }

    pub fn contains(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.filter.insert(field.into(), value.into());
        self
    }

    pub fn sort(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sort = Some((field.into(), order));
        self
    }
}

/// Create, read, update and delete records of kind `E`.
pub struct Facade<E, S = InMemoryUidStore> {
    store: S,
    _entity: PhantomData<fn() -> E>,
}

impl<E, S: Clone> Clone for Facade<E, S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E: Entity, S: UidStore> Facade<E, S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            _entity: PhantomData,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Persist a new record. Fails with a conflict if the key is taken.
    pub async fn create(&self, entity: E) -> ScimResult<Versioned<E>> {
        let key = entity.key();
        let record = Self::encode(&entity)?;
        let version = record.version.clone();
        if !self.store.insert_if_absent(E::KIND, &key, record).await? {
            log::debug!("Refusing to create {} '{}': already exists", E::KIND, key);
            return Err(ScimError::conflict(format!(
                "{} '{}' already exists",
                E::KIND,
                key
            )));
        }
        log::info!("Created {} '{}'", E::KIND, key);
        Ok(Versioned { entity, version })
    }

    /// Replace an existing record.
    ///
    /// When `expected` is given the write only succeeds if the stored
    /// version still equals it.
    pub async fn modify(&self, entity: E, expected: Option<&EntityTag>) -> ScimResult<Versioned<E>> {
        let key = entity.key();
        let record = Self::encode(&entity)?;
        let version = record.version.clone();
        match self.store.replace_if(E::KIND, &key, record, expected).await? {
            Replaced::Done => {
                log::info!("Modified {} '{}'", E::KIND, key);
                Ok(Versioned { entity, version })
            }
            Replaced::Missing => Err(Self::missing(&key)),
            Replaced::Stale(current) => Err(ScimError::precondition_failed(format!(
                "{} '{}' was modified: expected version {}, found {}",
                E::KIND,
                key,
                expected.map(ToString::to_string).unwrap_or_default(),
                current
            ))),
        }
    }

    pub async fn delete(&self, key: &str) -> ScimResult<()> {
        if !self.store.delete(E::KIND, key).await? {
            return Err(Self::missing(key));
        }
        log::info!("Deleted {} '{}'", E::KIND, key);
        Ok(())
    }

    pub async fn lookup(&self, key: &str) -> ScimResult<Option<Versioned<E>>> {
        self.store
            .get(E::KIND, key)
            .await?
            .map(Self::decode)
            .transpose()
    }

    /// Number of records matching the filter.
    pub async fn count(&self, filter: &FieldFilter) -> ScimResult<usize> {
        Ok(self
            .store
            .all(E::KIND)
            .await?
            .iter()
            .filter(|(_, record)| matches(&record.data, filter))
            .count())
    }

    /// One page of the matching records. `startIndex` of the response is 1-based.
    pub async fn list(&self, request: &PageRequest) -> ScimResult<ListResponse<E>> {
        let mut records: Vec<StoredRecord> = self
            .store
            .all(E::KIND)
            .await?
            .into_iter()
            .map(|(_, record)| record)
            .filter(|record| matches(&record.data, &request.filter))
            .collect();
        if let Some((field, order)) = &request.sort {
            records.sort_by(|a, b| compare_field(&a.data, &b.data, field, *order));
        }
        let total = records.len();
        let page = records
            .into_iter()
            .skip(request.start)
            .take(request.size)
            .map(|record| Self::decode(record).map(|stored| stored.entity))
            .collect::<ScimResult<Vec<E>>>()?;
        log::debug!(
            "Listed {} of {} {} records from offset {}",
            page.len(),
            total,
            E::KIND,
            request.start
        );
        Ok(ListResponse::new(page, total, request.start.saturating_add(1)))
    }

    fn encode(entity: &E) -> ScimResult<StoredRecord> {
        let data = serde_json::to_value(entity)?;
        let version = EntityTag::from_value(&data);
        Ok(StoredRecord { data, version })
    }

    fn decode(record: StoredRecord) -> ScimResult<Versioned<E>> {
        let entity = serde_json::from_value(record.data).map_err(|e| {
            ScimError::server_error(format!("Stored {} record is unreadable: {}", E::KIND, e))
        })?;
        Ok(Versioned {
            entity,
            version: record.version,
        })
    }

    fn missing(key: &str) -> ScimError {
        ScimError::not_found(format!("{} '{}' does not exist", E::KIND, key))
    }
}

fn text(data: &Value, field: &str) -> Option<String> {
    match data.get(field)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn matches(data: &Value, filter: &FieldFilter) -> bool {
    filter.iter().all(|(field, needle)| {
        text(data, field)
            .map(|value| value.to_lowercase().contains(&needle.to_lowercase()))
            .unwrap_or(false)
    })
}

// Records without the field sort last in either order.
fn compare_field(a: &Value, b: &Value, field: &str, order: SortOrder) -> Ordering {
    match (text(a, field), text(b, field)) {
        (Some(a), Some(b)) => {
            let ordering = a.to_lowercase().cmp(&b.to_lowercase());
            match order {
                SortOrder::Ascending => ordering,
                SortOrder::Descending => ordering.reverse(),
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::uid::{Role, Tenant};

    fn facade() -> Facade<Role> {
        Facade::new(InMemoryUidStore::new())
    }

    fn role(id: &str, name: &str) -> Role {
        Role {
            id: id.into(),
            name: name.into(),
            description: None,
        }
    }

    #[tokio::test]
    async fn test_create_conflicts_on_existing_key() {
        let roles = facade();
        roles.create(role("r1", "Reader")).await.unwrap();
        let err = roles.create(role("r1", "Writer")).await.unwrap_err();
        assert!(matches!(err, ScimError::Conflict(_)));
        assert_eq!(err.status(), 409);
    }

    #[tokio::test]
    async fn test_modify_requires_existing_record() {
        let roles = facade();
        let err = roles.modify(role("r9", "Ghost"), None).await.unwrap_err();
        assert!(matches!(err, ScimError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_writes_stamp_new_versions() {
        let roles = facade();
        let created = roles.create(role("r1", "Reader")).await.unwrap();
        let modified = roles
            .modify(role("r1", "Auditor"), Some(&created.version))
            .await
            .unwrap();
        assert_ne!(created.version, modified.version);

        let stale = roles
            .modify(role("r1", "Writer"), Some(&created.version))
            .await
            .unwrap_err();
        assert_eq!(stale.status(), 412);

        let found = roles.lookup("r1").await.unwrap().unwrap();
        assert_eq!(found.entity.name, "Auditor");
        assert_eq!(found.version, modified.version);
    }

    #[tokio::test]
    async fn test_delete() {
        let roles = facade();
        roles.create(role("r1", "Reader")).await.unwrap();
        roles.delete("r1").await.unwrap();
        assert!(roles.lookup("r1").await.unwrap().is_none());
        assert!(matches!(
            roles.delete("r1").await.unwrap_err(),
            ScimError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn test_list_filters_sorts_and_pages() {
        let roles = facade();
        for (id, name) in [
            ("r1", "Reader"),
            ("r2", "Writer"),
            ("r3", "Read Auditor"),
            ("r4", "Administrator"),
        ] {
            roles.create(role(id, name)).await.unwrap();
        }

        let filter = FieldFilter::from([("name".to_string(), "READ".to_string())]);
        assert_eq!(roles.count(&filter).await.unwrap(), 2);
        assert_eq!(roles.count(&FieldFilter::new()).await.unwrap(), 4);

        let page = roles
            .list(&PageRequest::new(1, 2).sort("name", SortOrder::Descending))
            .await
            .unwrap();
        assert_eq!(page.total_results, 4);
        assert_eq!(page.start_index, 2);
        let names: Vec<&str> = page.resources.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Reader", "Read Auditor"]);

        let filtered = roles
            .list(&PageRequest::default().contains("name", "writ"))
            .await
            .unwrap();
        assert_eq!(filtered.total_results, 1);
        assert_eq!(filtered.resources[0].id, "r2");
    }

    #[test]
    fn test_page_request_follows_config() {
        let config = ServiceConfig::builder().with_page_size(3).build().unwrap();
        let first = PageRequest::first(&config).sort("name", SortOrder::Ascending);
        let second = first.next();
        assert_eq!((first.start, first.size), (0, 3));
        assert_eq!((second.start, second.size), (3, 3));
        assert_eq!(second.sort, first.sort);
        assert_eq!(PageRequest::default().size, ServiceConfig::default().page_size);
    }

    #[tokio::test]
    async fn test_records_without_sort_field_come_last() {
        let roles = facade();
        for (id, description) in [("r1", None), ("r2", Some("alpha")), ("r3", Some("beta"))] {
            let mut entity = role(id, id);
            entity.description = description.map(String::from);
            roles.create(entity).await.unwrap();
        }
        for (order, expected) in [
            (SortOrder::Ascending, ["r2", "r3", "r1"]),
            (SortOrder::Descending, ["r3", "r2", "r1"]),
        ] {
            let page = roles
                .list(&PageRequest::new(0, 10).sort("description", order))
                .await
                .unwrap();
            let ids: Vec<&str> = page.resources.iter().map(|r| r.id.as_str()).collect();
            assert_eq!(ids, expected, "{:?}", order);
        }
    }

    #[tokio::test]
    async fn test_last_possible_page() {
        let roles = facade();
        roles.create(role("r1", "Reader")).await.unwrap();
        let request = PageRequest::new(usize::MAX, 10);
        assert_eq!(request.next().start, usize::MAX);
        let page = roles.list(&request).await.unwrap();
        assert_eq!(page.start_index, usize::MAX);
        assert_eq!(page.total_results, 1);
        assert!(page.resources.is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_racing_writes_have_one_winner() {
        let roles = facade();
        let creates = (0..16).map(|i| {
            let roles = roles.clone();
            tokio::spawn(async move { roles.create(role("r1", &format!("Role {}", i))).await })
        });
        let created: Vec<ScimResult<Versioned<Role>>> = futures::future::join_all(creates)
            .await
            .into_iter()
            .map(|joined| joined.unwrap())
            .collect();
        assert_eq!(created.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(
            created
                .iter()
                .filter_map(|r| r.as_ref().err())
                .all(|e| e.status() == 409)
        );

        let base = roles.lookup("r1").await.unwrap().unwrap().version;
        let modifications = (0..16).map(|i| {
            let roles = roles.clone();
            let base = base.clone();
            tokio::spawn(async move {
                roles
                    .modify(role("r1", &format!("Renamed {}", i)), Some(&base))
                    .await
            })
        });
        let modified: Vec<ScimResult<Versioned<Role>>> = futures::future::join_all(modifications)
            .await
            .into_iter()
            .map(|joined| joined.unwrap())
            .collect();
        let winners: Vec<&Versioned<Role>> = modified.iter().filter_map(|r| r.as_ref().ok()).collect();
        assert_eq!(winners.len(), 1);
        assert!(
            modified
                .iter()
                .filter_map(|r| r.as_ref().err())
                .all(|e| e.status() == 412)
        );
        let stored = roles.lookup("r1").await.unwrap().unwrap();
        assert_eq!(stored.entity.name, winners[0].entity.name);
    }

    #[tokio::test]
    async fn test_filter_on_missing_field_matches_nothing() {
        let roles = facade();
        roles.create(role("r1", "Reader")).await.unwrap();
        let page = roles
            .list(&PageRequest::default().contains("description", "x"))
            .await
            .unwrap();
        assert!(page.resources.is_empty());
    }

    #[tokio::test]
    async fn test_facades_share_a_store() {
        let store = InMemoryUidStore::new();
        let roles: Facade<Role> = Facade::new(store.clone());
        let tenants: Facade<Tenant> = Facade::new(store.clone());
        roles.create(role("acme", "Reader")).await.unwrap();
        tenants.create(Tenant::new("acme", "Acme")).await.unwrap();
        assert_eq!(store.stats().await.len(), 2);
        let err = tenants.create(Tenant::new("acme", "Other")).await.unwrap_err();
        assert!(matches!(err, ScimError::Conflict(_)));
    }
}
