use super::*;

fn unsupported() -> String {
    "Extension runtime APIs are only available when compiled for wasm32".to_string()
}

pub fn extension_runtime_present() -> bool {
    false
}

pub fn extension_storage_present(_namespace: ExtensionNamespace) -> bool {
    false
}

pub async fn extension_storage_get(
    _namespace: ExtensionNamespace,
    _key: &str,
) -> Result<Option<Value>, String> {
    Ok(None)
}

pub async fn extension_storage_set(
    _namespace: ExtensionNamespace,
    _key: &str,
    _value: &Value,
) -> Result<(), String> {
    Ok(())
}

pub async fn extension_storage_remove(
    _namespace: ExtensionNamespace,
    _key: &str,
) -> Result<(), String> {
    Ok(())
}

pub fn page_storage_present() -> bool {
    false
}

pub fn page_storage_get(_key: &str) -> Result<Option<String>, String> {
    Ok(None)
}

pub fn page_storage_set(_key: &str, _raw_json: &str) -> Result<(), String> {
    Ok(())
}

pub fn page_storage_remove(_key: &str) -> Result<(), String> {
    Ok(())
}

pub fn add_runtime_message_listener(_handler: Box<dyn FnMut(Value)>) -> Result<(), String> {
    Err(unsupported())
}

pub async fn send_message_to_active_tab(_message: &Value) -> Result<(), String> {
    Err(unsupported())
}
