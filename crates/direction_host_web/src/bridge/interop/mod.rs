//! Shared transport interop for browser bridge domains.
//!
//! This module routes calls to target-specific implementations while preserving a uniform API
//! for the storage, runtime, and page bridge modules.

use serde_json::Value;

use super::ExtensionNamespace;

#[cfg(not(target_arch = "wasm32"))]
mod non_wasm;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(not(target_arch = "wasm32"))]
use non_wasm as imp;
#[cfg(target_arch = "wasm32")]
use wasm as imp;

pub fn extension_runtime_present() -> bool {
    imp::extension_runtime_present()
}

pub fn extension_storage_present(namespace: ExtensionNamespace) -> bool {
    imp::extension_storage_present(namespace)
}

pub async fn extension_storage_get(
    namespace: ExtensionNamespace,
    key: &str,
) -> Result<Option<Value>, String> {
    imp::extension_storage_get(namespace, key).await
}

pub async fn extension_storage_set(
    namespace: ExtensionNamespace,
    key: &str,
    value: &Value,
) -> Result<(), String> {
    imp::extension_storage_set(namespace, key, value).await
}

pub async fn extension_storage_remove(namespace: ExtensionNamespace, key: &str) -> Result<(), String> {
    imp::extension_storage_remove(namespace, key).await
}

pub fn page_storage_present() -> bool {
    imp::page_storage_present()
}

pub fn page_storage_get(key: &str) -> Result<Option<String>, String> {
    imp::page_storage_get(key)
}

pub fn page_storage_set(key: &str, raw_json: &str) -> Result<(), String> {
    imp::page_storage_set(key, raw_json)
}

pub fn page_storage_remove(key: &str) -> Result<(), String> {
    imp::page_storage_remove(key)
}

pub fn add_runtime_message_listener(handler: Box<dyn FnMut(Value)>) -> Result<(), String> {
    imp::add_runtime_message_listener(handler)
}

pub async fn send_message_to_active_tab(message: &Value) -> Result<(), String> {
    imp::send_message_to_active_tab(message).await
}
