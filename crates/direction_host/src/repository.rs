//! Persistence of direction records under a single storage key.

use std::{future::Future, pin::Pin, rc::Rc};

use leptos::logging;
use serde_json::Value;

use crate::{model::DirectionRecord, storage::StorageSelector};

/// Object-safe boxed future used by [`DirectionRepository`] async methods.
pub type RepositoryFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Record persistence contract shared by use cases and the direction applier.
///
/// Every method reads (and, for writes, rewrites) the whole record list. Storage failures never
/// surface here: they degrade to an empty list or a dropped write.
pub trait DirectionRepository {
    /// Upserts by id: replaces the entry in place when present, appends otherwise.
    fn save<'a>(&'a self, record: &'a DirectionRecord) -> RepositoryFuture<'a, ()>;

    /// Record with `id`, if stored.
    fn find_by_id<'a>(&'a self, id: &'a str) -> RepositoryFuture<'a, Option<DirectionRecord>>;

    /// All records in storage order.
    fn find_all<'a>(&'a self) -> RepositoryFuture<'a, Vec<DirectionRecord>>;

    /// Removes the entry with `id`; absent ids are not an error.
    fn delete<'a>(&'a self, id: &'a str) -> RepositoryFuture<'a, ()>;

    /// First enabled record, in storage order, with a target contained in `url`.
    fn find_by_url<'a>(&'a self, url: &'a str) -> RepositoryFuture<'a, Option<DirectionRecord>>;

    /// Replaces the stored list with an empty one.
    fn clear_all<'a>(&'a self) -> RepositoryFuture<'a, ()>;
}

#[derive(Debug, Clone)]
/// [`DirectionRepository`] backed by a [`StorageSelector`], storing one JSON array.
pub struct StorageDirectionRepository {
    selector: Rc<StorageSelector>,
    storage_key: String,
}

impl StorageDirectionRepository {
    /// Creates a repository persisting under `storage_key`.
    pub fn new(selector: Rc<StorageSelector>, storage_key: impl Into<String>) -> Self {
        Self {
            selector,
            storage_key: storage_key.into(),
        }
    }

    /// Key holding the record array.
    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    async fn load_all(&self) -> Vec<DirectionRecord> {
        let Some(stored) = self.selector.get(&self.storage_key).await else {
            return Vec::new();
        };
        decode_records(&self.storage_key, stored)
    }

    async fn save_all(&self, records: &[DirectionRecord]) {
        match serde_json::to_value(records) {
            Ok(value) => self.selector.set(&self.storage_key, &value).await,
            Err(err) => logging::warn!("encoding `{}` failed: {err}", self.storage_key),
        }
    }
}

fn decode_records(key: &str, stored: Value) -> Vec<DirectionRecord> {
    let Value::Array(entries) = stored else {
        if !stored.is_null() {
            logging::warn!("stored `{key}` is not an array; treating it as empty");
        }
        return Vec::new();
    };

    entries
        .into_iter()
        .enumerate()
        .filter_map(
            |(index, entry)| match serde_json::from_value::<DirectionRecord>(entry) {
                Ok(record) => Some(record),
                Err(err) => {
                    logging::warn!("skipping malformed `{key}` entry {index}: {err}");
                    None
                }
            },
        )
        .collect()
}

impl DirectionRepository for StorageDirectionRepository {
    fn save<'a>(&'a self, record: &'a DirectionRecord) -> RepositoryFuture<'a, ()> {
        Box::pin(async move {
            let mut records = self.load_all().await;
            match records.iter().position(|r| r.id() == record.id()) {
                Some(index) => records[index] = record.clone(),
                None => records.push(record.clone()),
            }
            self.save_all(&records).await;
        })
    }

    fn find_by_id<'a>(&'a self, id: &'a str) -> RepositoryFuture<'a, Option<DirectionRecord>> {
        Box::pin(async move {
            self.load_all()
                .await
                .into_iter()
                .find(|record| record.id() == id)
        })
    }

    fn find_all<'a>(&'a self) -> RepositoryFuture<'a, Vec<DirectionRecord>> {
        Box::pin(async move { self.load_all().await })
    }

    fn delete<'a>(&'a self, id: &'a str) -> RepositoryFuture<'a, ()> {
        Box::pin(async move {
            let mut records = self.load_all().await;
            records.retain(|record| record.id() != id);
            self.save_all(&records).await;
        })
    }

    fn find_by_url<'a>(&'a self, url: &'a str) -> RepositoryFuture<'a, Option<DirectionRecord>> {
        Box::pin(async move {
            self.load_all()
                .await
                .into_iter()
                .find(|record| record.enabled() && record.matches_url(url))
        })
    }

    fn clear_all<'a>(&'a self) -> RepositoryFuture<'a, ()> {
        Box::pin(async move { self.save_all(&[]).await })
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::storage::{MemoryStorageProvider, StorageProvider};

    const KEY: &str = "direction-configs";

    fn repository() -> (StorageDirectionRepository, MemoryStorageProvider) {
        let provider = MemoryStorageProvider::default();
        let selector = StorageSelector::default().with_provider(provider.clone());
        (
            StorageDirectionRepository::new(Rc::new(selector), KEY),
            provider,
        )
    }

    fn record(id: &str, enabled: bool, urls: &[&str]) -> DirectionRecord {
        DirectionRecord::from_parts(
            id,
            false,
            enabled,
            urls.iter().map(|u| u.to_string()).collect(),
            1_000,
            2_000,
        )
    }

    #[test]
    fn saved_record_loads_back_equal() {
        let (repo, _) = repository();
        let saved = record("a", true, &["example.com"]);
        block_on(repo.save(&saved));
        assert_eq!(block_on(repo.find_by_id("a")), Some(saved));
        assert_eq!(block_on(repo.find_by_id("missing")), None);
    }

    #[test]
    fn save_upserts_in_place() {
        let (repo, _) = repository();
        block_on(repo.save(&record("a", true, &[])));
        block_on(repo.save(&record("b", true, &[])));

        let mut updated = record("a", true, &[]);
        updated.toggle_direction();
        block_on(repo.save(&updated));

        let all = block_on(repo.find_all());
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id(), "a");
        assert!(all[0].is_rtl());
        assert_eq!(all[1].id(), "b");
    }

    #[test]
    fn find_by_url_returns_first_enabled_match() {
        let (repo, _) = repository();
        block_on(repo.save(&record("disabled", false, &["example.com"])));
        block_on(repo.save(&record("first", true, &["example.com"])));
        block_on(repo.save(&record("second", true, &["example"])));

        let found = block_on(repo.find_by_url("https://example.com/page")).expect("match");
        assert_eq!(found.id(), "first");
        assert_eq!(block_on(repo.find_by_url("https://other.org/")), None);
    }

    #[test]
    fn delete_removes_and_ignores_missing_ids() {
        let (repo, _) = repository();
        block_on(repo.save(&record("a", true, &[])));
        block_on(repo.delete("missing"));
        assert_eq!(block_on(repo.find_all()).len(), 1);
        block_on(repo.delete("a"));
        assert!(block_on(repo.find_all()).is_empty());
    }

    #[test]
    fn clear_all_writes_empty_array() {
        let (repo, provider) = repository();
        block_on(repo.save(&record("a", true, &[])));
        block_on(repo.clear_all());
        assert!(block_on(repo.find_all()).is_empty());
        assert_eq!(provider.snapshot(KEY), Some(json!([])));
    }

    #[test]
    fn storage_failures_degrade_to_empty_results() {
        let (repo, provider) = repository();
        block_on(repo.save(&record("a", true, &["example.com"])));

        provider.set_fail_reads(true);
        assert!(block_on(repo.find_all()).is_empty());
        assert_eq!(block_on(repo.find_by_url("https://example.com")), None);

        provider.set_fail_reads(false);
        provider.set_fail_writes(true);
        block_on(repo.save(&record("b", true, &[])));
        assert_eq!(block_on(repo.find_all()).len(), 1);
    }

    #[test]
    fn malformed_entries_are_skipped_and_non_arrays_read_as_empty() {
        let (repo, provider) = repository();
        block_on(provider.set_value(
            KEY,
            &json!([
                {"id": "ok", "isRTL": true, "enabled": true, "targetUrls": [], "createdAt": 1, "updatedAt": 2},
                {"id": 42},
            ]),
        ))
        .expect("seed");
        let all = block_on(repo.find_all());
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id(), "ok");

        block_on(provider.set_value(KEY, &json!({"not": "an array"}))).expect("seed");
        assert!(block_on(repo.find_all()).is_empty());
    }
}
