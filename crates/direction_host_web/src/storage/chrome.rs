//! `chrome.storage.local` provider (callback completion, `runtime.lastError` reporting).

use direction_host::{ProviderFuture, StorageProvider};
use serde_json::Value;

use crate::bridge::{self, ExtensionNamespace};

#[derive(Debug, Clone, Copy, Default)]
/// Extension storage reached through the `chrome` global.
pub struct ChromeStorageProvider;

impl StorageProvider for ChromeStorageProvider {
    fn name(&self) -> &'static str {
        "chrome.storage.local"
    }

    fn is_available(&self) -> bool {
        bridge::extension_storage_present(ExtensionNamespace::Chrome)
    }

    fn get_value<'a>(&'a self, key: &'a str) -> ProviderFuture<'a, Result<Option<Value>, String>> {
        Box::pin(async move { bridge::extension_storage_get(ExtensionNamespace::Chrome, key).await })
    }

    fn set_value<'a>(
        &'a self,
        key: &'a str,
        value: &'a Value,
    ) -> ProviderFuture<'a, Result<(), String>> {
        Box::pin(async move {
            bridge::extension_storage_set(ExtensionNamespace::Chrome, key, value).await
        })
    }

    fn remove_value<'a>(&'a self, key: &'a str) -> ProviderFuture<'a, Result<(), String>> {
        Box::pin(
            async move { bridge::extension_storage_remove(ExtensionNamespace::Chrome, key).await },
        )
    }
}
