//! Per-execution-context service wiring.
//!
//! A [`DirectionContext`] is built once by each popup or content-script instance and handed to
//! whatever needs it. Nothing is cached across calls: every operation goes back to storage.

use std::rc::Rc;

use leptos::logging;
use serde_json::Value;

use crate::{
    error::{DirectionError, Result},
    model::{generate_config_id, DirectionRecord, ExtensionStorage, ImportPayload},
    repository::{DirectionRepository, StorageDirectionRepository},
    settings::DirectionSettings,
    storage::StorageSelector,
    time::unix_time_ms_now,
    use_cases::{ManageUrlUseCase, RecordUpdate, ToggleDirectionUseCase},
};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Records as listed after first-run initialization, plus the one a UI should show first.
pub struct ConfigSnapshot {
    /// Every stored record in storage order.
    pub configs: Vec<DirectionRecord>,
    /// First stored record, or the freshly created default.
    pub current: DirectionRecord,
}

#[derive(Clone)]
/// Repository and use cases for one execution context.
pub struct DirectionContext {
    settings: Rc<DirectionSettings>,
    selector: Rc<StorageSelector>,
    repository: Rc<StorageDirectionRepository>,
    toggle_direction: ToggleDirectionUseCase,
    manage_url: ManageUrlUseCase,
}

impl DirectionContext {
    /// Wires the repository and use cases over `selector`.
    pub fn new(settings: DirectionSettings, selector: StorageSelector) -> Self {
        let selector = Rc::new(selector);
        let repository = Rc::new(StorageDirectionRepository::new(
            selector.clone(),
            settings.storage_key.clone(),
        ));
        let shared: Rc<dyn DirectionRepository> = repository.clone();
        Self {
            settings: Rc::new(settings),
            selector,
            toggle_direction: ToggleDirectionUseCase::new(shared.clone()),
            manage_url: ManageUrlUseCase::new(shared),
            repository,
        }
    }

    /// Settings this context was built with.
    pub fn settings(&self) -> &DirectionSettings {
        &self.settings
    }

    /// Provider chain shared by the repository and the version marker.
    pub fn selector(&self) -> &StorageSelector {
        &self.selector
    }

    /// Shared repository handle, e.g. for the direction applier.
    pub fn repository(&self) -> Rc<dyn DirectionRepository> {
        self.repository.clone()
    }

    /// Writes the storage-version marker when it differs from the configured version.
    ///
    /// Returns `true` when the marker was (re)written. The marker does not drive any migration.
    pub async fn stamp_storage_version(&self) -> bool {
        let expected = self.settings.storage_version.as_str();
        let stored = self.selector.get(&self.settings.version_key).await;
        if stored.as_ref().and_then(Value::as_str) == Some(expected) {
            return false;
        }
        self.selector
            .set(&self.settings.version_key, &Value::String(expected.to_string()))
            .await;
        true
    }

    /// Creates the reserved default record when storage holds no records.
    ///
    /// Returns the first stored record otherwise.
    pub async fn ensure_default_config(&self) -> DirectionRecord {
        if let Some(first) = self.repository.find_all().await.into_iter().next() {
            return first;
        }
        let default = DirectionRecord::new(
            self.settings.default_config_id.clone(),
            false,
            true,
            Vec::new(),
        );
        self.repository.save(&default).await;
        default
    }

    /// First-run initialization followed by a full listing.
    pub async fn load_configs(&self) -> ConfigSnapshot {
        if self.stamp_storage_version().await {
            logging::log!(
                "storage version marker set to {}",
                self.settings.storage_version
            );
        }
        let current = self.ensure_default_config().await;
        let mut configs = self.repository.find_all().await;
        if configs.is_empty() {
            // Storage dropped the default write; still show it.
            configs.push(current.clone());
        }
        ConfigSnapshot { configs, current }
    }

    /// Persists a new record under a generated id.
    pub async fn create_config(&self, is_rtl: bool, target_urls: Vec<String>) -> DirectionRecord {
        let record = DirectionRecord::new(generate_config_id(), is_rtl, true, target_urls);
        self.repository.save(&record).await;
        record
    }

    /// Flips the direction of `config_id`.
    ///
    /// # Errors
    ///
    /// Returns [`DirectionError::ConfigNotFound`] when no record has `config_id`.
    pub async fn toggle_direction(&self, config_id: &str) -> Result<RecordUpdate> {
        self.toggle_direction.execute(config_id).await
    }

    /// Flips the enabled flag of `config_id`.
    ///
    /// # Errors
    ///
    /// Returns [`DirectionError::ConfigNotFound`] when no record has `config_id`.
    pub async fn toggle_enabled(&self, config_id: &str) -> Result<RecordUpdate> {
        self.manage_url.toggle_enabled(config_id).await
    }

    /// Adds `url` to the targets of `config_id`.
    ///
    /// # Errors
    ///
    /// Returns [`DirectionError::ConfigNotFound`] when no record has `config_id`.
    pub async fn add_url(&self, config_id: &str, url: &str) -> Result<RecordUpdate> {
        self.manage_url.add_url(config_id, url).await
    }

    /// Removes `url` from the targets of `config_id`.
    ///
    /// # Errors
    ///
    /// Returns [`DirectionError::ConfigNotFound`] when no record has `config_id`.
    pub async fn remove_url(&self, config_id: &str, url: &str) -> Result<RecordUpdate> {
        self.manage_url.remove_url(config_id, url).await
    }

    /// Deletes `config_id`; absent ids are ignored.
    pub async fn delete_config(&self, config_id: &str) {
        self.repository.delete(config_id).await;
    }

    /// Renders every stored record as a pretty-printed backup envelope.
    ///
    /// # Errors
    ///
    /// Returns [`DirectionError::NothingToExport`] when storage holds no records.
    pub async fn export_configs(&self) -> Result<String> {
        let records = self.repository.find_all().await;
        if records.is_empty() {
            return Err(DirectionError::NothingToExport);
        }
        ExtensionStorage::from_records(&self.settings.storage_version, &records, unix_time_ms_now())
            .to_pretty_json()
    }

    /// Validates a backup and upserts one fresh record per entry.
    ///
    /// Entries are only saved once the whole payload validated. Returns the number of entries
    /// written, which can exceed the number of distinct records when ids collide.
    ///
    /// # Errors
    ///
    /// Returns [`DirectionError::InvalidImport`] when the payload shape is invalid.
    pub async fn import_configs(&self, payload: impl Into<ImportPayload>) -> Result<usize> {
        let states = payload.into().into_states()?;
        let count = states.len();
        for state in states {
            let record = state.into_record(&self.settings.default_config_id);
            self.repository.save(&record).await;
        }
        Ok(count)
    }

    /// Removes every stored record.
    pub async fn clear_configs(&self) {
        self.repository.clear_all().await;
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::storage::MemoryStorageProvider;

    fn context() -> (DirectionContext, MemoryStorageProvider) {
        let provider = MemoryStorageProvider::default();
        let selector = StorageSelector::default().with_provider(provider.clone());
        (
            DirectionContext::new(DirectionSettings::default(), selector),
            provider,
        )
    }

    #[test]
    fn load_configs_initializes_marker_and_default_record() {
        let (ctx, provider) = context();
        let snapshot = block_on(ctx.load_configs());
        assert_eq!(snapshot.current.id(), "default-config");
        assert_eq!(snapshot.configs, vec![snapshot.current.clone()]);
        assert_eq!(provider.snapshot("extensionVersion"), Some(json!("1.0.0")));

        assert!(!block_on(ctx.stamp_storage_version()));
        let again = block_on(ctx.load_configs());
        assert_eq!(again.configs.len(), 1);
    }

    #[test]
    fn ensure_default_returns_first_existing_record() {
        let (ctx, _) = context();
        let created = block_on(ctx.create_config(true, vec!["a.com".into()]));
        let current = block_on(ctx.ensure_default_config());
        assert_eq!(current, created);
        assert!(current.id().starts_with("config_"));
    }

    #[test]
    fn export_requires_records() {
        let (ctx, _) = context();
        assert_eq!(
            block_on(ctx.export_configs()),
            Err(DirectionError::NothingToExport)
        );
    }

    #[test]
    fn export_then_import_restores_states_under_derived_ids() {
        let (source, _) = context();
        let record = block_on(source.create_config(true, vec!["a.com".into(), "b.com".into()]));
        block_on(source.ensure_default_config());
        let exported = block_on(source.export_configs()).expect("export");
        let value: serde_json::Value = serde_json::from_str(&exported).expect("json");
        assert_eq!(value["version"], json!("1.0.0"));
        assert_eq!(value["directionConfigs"][0]["targetUrls"], json!(["a.com", "b.com"]));
        assert!(value.get("lastUpdated").is_some());

        let (target, _) = context();
        let imported = block_on(target.import_configs(exported.as_str())).expect("import");
        assert_eq!(imported, 1);
        let restored = block_on(target.repository().find_by_id("a.com,b.com")).expect("restored");
        assert_eq!(restored.is_rtl(), record.is_rtl());
        assert_eq!(restored.target_urls(), record.target_urls());
    }

    #[test]
    fn import_merges_entries_with_identical_targets() {
        let (ctx, _) = context();
        let written = block_on(ctx.import_configs(json!({"directionConfigs": [
            {"isRTL": false, "enabled": true, "targetUrls": ["a.com"]},
            {"isRTL": true, "enabled": true, "targetUrls": ["a.com"]},
            {"isRTL": true, "enabled": false, "targetUrls": []},
        ]})))
        .expect("import");
        assert_eq!(written, 3);

        let all = block_on(ctx.repository().find_all());
        assert_eq!(all.len(), 2);
        assert!(all[0].is_rtl());
        assert_eq!(all[1].id(), "default-config");
    }

    #[test]
    fn invalid_import_saves_nothing() {
        let (ctx, _) = context();
        let err = block_on(ctx.import_configs(json!({"version": "1.0.0"}))).expect_err("invalid");
        assert!(matches!(err, DirectionError::InvalidImport(_)));
        assert!(block_on(ctx.repository().find_all()).is_empty());
    }

    #[test]
    fn clear_configs_then_list_is_empty() {
        let (ctx, _) = context();
        block_on(ctx.load_configs());
        block_on(ctx.clear_configs());
        assert!(block_on(ctx.repository().find_all()).is_empty());
    }

    #[test]
    fn use_case_delegates_report_not_found() {
        let (ctx, _) = context();
        assert_eq!(
            block_on(ctx.toggle_direction("missing")),
            Err(DirectionError::ConfigNotFound)
        );
        assert_eq!(
            block_on(ctx.remove_url("missing", "a.com")),
            Err(DirectionError::ConfigNotFound)
        );
    }
}
