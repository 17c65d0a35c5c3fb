//! Persistence of administration records.
//!
//! Records are kept as JSON together with the version of their last write,
//! in one namespace per record kind.

use crate::error::ScimResult;
use crate::resource::EntityTag;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A record as held by a store.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredRecord {
    pub data: Value,
    pub version: EntityTag,
}

/// Outcome of [`UidStore::replace_if`].
#[derive(Debug, Clone, PartialEq)]
pub enum Replaced {
    Done,
    Missing,
    /// The stored record carries another version.
    Stale(EntityTag),
}

/// Async persistence of records grouped by kind.
///
/// `insert_if_absent` and `replace_if` check and write in one step; callers
/// racing on the same key observe exactly one winner.
pub trait UidStore: Send + Sync {
    /// Insert or replace the record under `key`.
    fn put(
        &self,
        kind: &str,
        key: &str,
        record: StoredRecord,
    ) -> impl Future<Output = ScimResult<()>> + Send;

    /// Insert `record` unless `key` is taken; reports whether it was written.
    fn insert_if_absent(
        &self,
        kind: &str,
        key: &str,
        record: StoredRecord,
    ) -> impl Future<Output = ScimResult<bool>> + Send;

    /// Replace an existing record, provided its version equals `expected`
    /// when one is given.
    fn replace_if(
        &self,
        kind: &str,
        key: &str,
        record: StoredRecord,
        expected: Option<&EntityTag>,
    ) -> impl Future<Output = ScimResult<Replaced>> + Send;

    fn get(&self, kind: &str, key: &str) -> impl Future<Output = ScimResult<Option<StoredRecord>>> + Send;

    /// Remove a record, reporting whether it existed.
    fn delete(&self, kind: &str, key: &str) -> impl Future<Output = ScimResult<bool>> + Send;

    /// All records of a kind ordered by key.
    fn all(&self, kind: &str) -> impl Future<Output = ScimResult<Vec<(String, StoredRecord)>>> + Send;

    fn exists(&self, kind: &str, key: &str) -> impl Future<Output = ScimResult<bool>> + Send {
        async move { Ok(self.get(kind, key).await?.is_some()) }
    }
}

/// Store keeping every record in process memory.
#[derive(Clone, Default)]
pub struct InMemoryUidStore {
    // kind -> key -> record
    data: Arc<RwLock<HashMap<String, BTreeMap<String, StoredRecord>>>>,
}

impl InMemoryUidStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records per kind.
    pub async fn stats(&self) -> BTreeMap<String, usize> {
        let guard = self.data.read().await;
        guard
            .iter()
            .map(|(kind, records)| (kind.clone(), records.len()))
            .collect()
    }

    pub async fn clear(&self) {
        self.data.write().await.clear();
    }
}

impl UidStore for InMemoryUidStore {
    async fn put(&self, kind: &str, key: &str, record: StoredRecord) -> ScimResult<()> {
        let mut guard = self.data.write().await;
        guard
            .entry(kind.to_string())
            .or_default()
            .insert(key.to_string(), record);
        Ok(())
    }

    async fn insert_if_absent(&self, kind: &str, key: &str, record: StoredRecord) -> ScimResult<bool> {
        let mut guard = self.data.write().await;
        let records = guard.entry(kind.to_string()).or_default();
        if records.contains_key(key) {
            return Ok(false);
        }
        records.insert(key.to_string(), record);
        Ok(true)
    }

    async fn replace_if(
        &self,
        kind: &str,
        key: &str,
        record: StoredRecord,
        expected: Option<&EntityTag>,
    ) -> ScimResult<Replaced> {
        let mut guard = self.data.write().await;
        let Some(current) = guard.get_mut(kind).and_then(|records| records.get_mut(key)) else {
            return Ok(Replaced::Missing);
        };
        if let Some(expected) = expected {
            if *expected != current.version {
                return Ok(Replaced::Stale(current.version.clone()));
            }
        }
        *current = record;
        Ok(Replaced::Done)
    }

    async fn get(&self, kind: &str, key: &str) -> ScimResult<Option<StoredRecord>> {
        let guard = self.data.read().await;
        Ok(guard.get(kind).and_then(|records| records.get(key)).cloned())
    }

    async fn delete(&self, kind: &str, key: &str) -> ScimResult<bool> {
        let mut guard = self.data.write().await;
        Ok(guard
            .get_mut(kind)
            .map(|records| records.remove(key).is_some())
            .unwrap_or(false))
    }

    async fn all(&self, kind: &str) -> ScimResult<Vec<(String, StoredRecord)>> {
        let guard = self.data.read().await;
        Ok(guard
            .get(kind)
            .map(|records| {
                records
                    .iter()
                    .map(|(key, record)| (key.clone(), record.clone()))
                    .collect()
            })
            .unwrap_or_default())
    }
}
