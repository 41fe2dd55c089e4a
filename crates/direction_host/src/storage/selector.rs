//! Priority-ordered storage provider chain.

use std::fmt;

use leptos::logging;
use serde_json::Value;

use super::StorageProvider;

/// Walks an ordered list of [`StorageProvider`]s and uses the first one that is present and
/// succeeds.
///
/// Failures are logged and fall through to the next provider. When no provider handles an
/// operation, reads yield `None` and writes are dropped; nothing is ever returned as an error,
/// so callers cannot crash the host page over storage.
pub struct StorageSelector {
    providers: Vec<Box<dyn StorageProvider>>,
}

impl fmt::Debug for StorageSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageSelector")
            .field("providers", &self.provider_names())
            .finish()
    }
}

impl Default for StorageSelector {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl StorageSelector {
    /// Creates a selector trying `providers` in the given order.
    pub fn new(providers: Vec<Box<dyn StorageProvider>>) -> Self {
        Self { providers }
    }

    /// Appends a lower-priority provider.
    pub fn with_provider(mut self, provider: impl StorageProvider + 'static) -> Self {
        self.providers.push(Box::new(provider));
        self
    }

    /// Names of all configured providers in priority order.
    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Name of the highest-priority provider present in the runtime.
    pub fn active_provider_name(&self) -> Option<&'static str> {
        self.available().next().map(|p| p.name())
    }

    fn available(&self) -> impl Iterator<Item = &dyn StorageProvider> {
        self.providers
            .iter()
            .map(|p| &**p)
            .filter(|p| p.is_available())
    }

    /// Reads `key` from the first provider that answers.
    pub async fn get(&self, key: &str) -> Option<Value> {
        for provider in self.available() {
            match provider.get_value(key).await {
                Ok(value) => return value,
                Err(err) => {
                    logging::warn!("storage read of `{key}` via {} failed: {err}", provider.name())
                }
            }
        }
        logging::warn!("no storage available to read `{key}`");
        None
    }

    /// Writes `key` to the first provider that accepts it.
    pub async fn set(&self, key: &str, value: &Value) {
        for provider in self.available() {
            match provider.set_value(key, value).await {
                Ok(()) => return,
                Err(err) => {
                    logging::warn!("storage write of `{key}` via {} failed: {err}", provider.name())
                }
            }
        }
        logging::warn!("no storage available to write `{key}`");
    }

    /// Removes `key` through the first provider that accepts it.
    pub async fn remove(&self, key: &str) {
        for provider in self.available() {
            match provider.remove_value(key).await {
                Ok(()) => return,
                Err(err) => logging::warn!(
                    "storage remove of `{key}` via {} failed: {err}",
                    provider.name()
                ),
            }
        }
        logging::warn!("no storage available to remove `{key}`");
    }

    /// Moves the value under `old_key` to `new_key`.
    ///
    /// Returns `false` when there was nothing to move.
    pub async fn migrate_key(&self, old_key: &str, new_key: &str) -> bool {
        let Some(value) = self.get(old_key).await else {
            return false;
        };
        self.set(new_key, &value).await;
        self.remove(old_key).await;
        true
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::storage::{MemoryStorageProvider, NoopStorageProvider};

    fn two_tier() -> (StorageSelector, MemoryStorageProvider, MemoryStorageProvider) {
        let primary = MemoryStorageProvider::default();
        let fallback = MemoryStorageProvider::default();
        let selector = StorageSelector::default()
            .with_provider(primary.clone())
            .with_provider(fallback.clone());
        (selector, primary, fallback)
    }

    #[test]
    fn first_available_provider_wins() {
        let (selector, primary, fallback) = two_tier();
        block_on(selector.set("k", &json!(1)));
        assert_eq!(primary.snapshot("k"), Some(json!(1)));
        assert_eq!(fallback.snapshot("k"), None);
        assert_eq!(block_on(selector.get("k")), Some(json!(1)));
    }

    #[test]
    fn unavailable_provider_is_skipped() {
        let (selector, primary, fallback) = two_tier();
        primary.set_available(false);
        block_on(selector.set("k", &json!("v")));
        assert_eq!(fallback.snapshot("k"), Some(json!("v")));
        assert_eq!(selector.active_provider_name(), Some("memory"));
    }

    #[test]
    fn failing_provider_falls_through() {
        let (selector, primary, fallback) = two_tier();
        block_on(fallback.set_value("k", &json!("from fallback"))).expect("seed");
        primary.set_fail_reads(true);
        assert_eq!(block_on(selector.get("k")), Some(json!("from fallback")));

        primary.set_fail_writes(true);
        block_on(selector.set("k", &json!("new")));
        assert_eq!(fallback.snapshot("k"), Some(json!("new")));
    }

    #[test]
    fn empty_chain_degrades_to_no_data() {
        let selector = StorageSelector::default().with_provider(NoopStorageProvider);
        assert_eq!(selector.active_provider_name(), None);
        assert_eq!(block_on(selector.get("k")), None);
        block_on(selector.set("k", &json!(1)));
        block_on(selector.remove("k"));
    }

    #[test]
    fn migrate_key_moves_value() {
        let (selector, primary, _) = two_tier();
        block_on(selector.set("old", &json!({"a": 1})));
        assert!(block_on(selector.migrate_key("old", "new")));
        assert_eq!(primary.snapshot("old"), None);
        assert_eq!(primary.snapshot("new"), Some(json!({"a": 1})));
        assert!(!block_on(selector.migrate_key("old", "newer")));
    }

    #[test]
    fn provider_names_preserve_priority_order() {
        let selector = StorageSelector::default()
            .with_provider(NoopStorageProvider)
            .with_provider(MemoryStorageProvider::default());
        assert_eq!(selector.provider_names(), vec!["noop", "memory"]);
        assert_eq!(
            format!("{selector:?}"),
            "StorageSelector { providers: [\"noop\", \"memory\"] }"
        );
    }
}
