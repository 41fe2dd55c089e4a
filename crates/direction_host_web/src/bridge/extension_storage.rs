use serde_json::Value;

use super::ExtensionNamespace;

pub(crate) fn extension_storage_present(namespace: ExtensionNamespace) -> bool {
    super::interop::extension_storage_present(namespace)
}

pub(crate) async fn extension_storage_get(
    namespace: ExtensionNamespace,
    key: &str,
) -> Result<Option<Value>, String> {
    super::interop::extension_storage_get(namespace, key).await
}

pub(crate) async fn extension_storage_set(
    namespace: ExtensionNamespace,
    key: &str,
    value: &Value,
) -> Result<(), String> {
    super::interop::extension_storage_set(namespace, key, value).await
}

pub(crate) async fn extension_storage_remove(
    namespace: ExtensionNamespace,
    key: &str,
) -> Result<(), String> {
    super::interop::extension_storage_remove(namespace, key).await
}
