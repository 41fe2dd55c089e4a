//! `localStorage`-backed provider for scripts running outside an extension context.
//!
//! The browser API stores strings, so values are serialized to JSON text on write and parsed
//! back on read.

use direction_host::{ProviderFuture, StorageProvider};
use serde_json::Value;

use crate::bridge;

#[derive(Debug, Clone, Copy, Default)]
/// Page-local storage fallback backed by `window.localStorage`.
pub struct LocalStorageProvider;

impl LocalStorageProvider {
    /// Parses a raw stored string.
    ///
    /// # Errors
    ///
    /// Returns an error when the stored text is not JSON.
    pub fn decode(raw: &str) -> Result<Value, String> {
        serde_json::from_str(raw).map_err(|e| format!("stored value is not JSON: {e}"))
    }
}

impl StorageProvider for LocalStorageProvider {
    fn name(&self) -> &'static str {
        "window.localStorage"
    }

    fn is_available(&self) -> bool {
        bridge::page_storage_present()
    }

    fn get_value<'a>(&'a self, key: &'a str) -> ProviderFuture<'a, Result<Option<Value>, String>> {
        Box::pin(async move {
            bridge::page_storage_get(key)?
                .map(|raw| Self::decode(&raw))
                .transpose()
        })
    }

    fn set_value<'a>(
        &'a self,
        key: &'a str,
        value: &'a Value,
    ) -> ProviderFuture<'a, Result<(), String>> {
        Box::pin(async move {
            let raw = serde_json::to_string(value).map_err(|e| e.to_string())?;
            bridge::page_storage_set(key, &raw)
        })
    }

    fn remove_value<'a>(&'a self, key: &'a str) -> ProviderFuture<'a, Result<(), String>> {
        Box::pin(async move { bridge::page_storage_remove(key) })
    }
}
