//! `browser.storage.local` provider (promise-returning WebExtensions API).

use direction_host::{ProviderFuture, StorageProvider};
use serde_json::Value;

use crate::bridge::{self, ExtensionNamespace};

#[derive(Debug, Clone, Copy, Default)]
/// Extension storage reached through the `browser` global.
pub struct BrowserStorageProvider;

impl StorageProvider for BrowserStorageProvider {
    fn name(&self) -> &'static str {
        "browser.storage.local"
    }

    fn is_available(&self) -> bool {
        bridge::extension_storage_present(ExtensionNamespace::Browser)
    }

    fn get_value<'a>(&'a self, key: &'a str) -> ProviderFuture<'a, Result<Option<Value>, String>> {
        Box::pin(
            async move { bridge::extension_storage_get(ExtensionNamespace::Browser, key).await },
        )
    }

    fn set_value<'a>(
        &'a self,
        key: &'a str,
        value: &'a Value,
    ) -> ProviderFuture<'a, Result<(), String>> {
        Box::pin(async move {
            bridge::extension_storage_set(ExtensionNamespace::Browser, key, value).await
        })
    }

    fn remove_value<'a>(&'a self, key: &'a str) -> ProviderFuture<'a, Result<(), String>> {
        Box::pin(async move {
            bridge::extension_storage_remove(ExtensionNamespace::Browser, key).await
        })
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use futures::executor::block_on;

    #[test]
    fn browser_storage_is_absent_off_wasm() {
        let provider = BrowserStorageProvider;
        assert!(!provider.is_available());
        assert_eq!(block_on(provider.remove_value("direction-configs")), Ok(()));
    }
}
