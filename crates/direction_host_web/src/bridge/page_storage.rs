/// `localStorage` is only a fallback for scripts running outside an extension; inside one it
/// would write into the host page's own storage.
pub(crate) fn page_storage_present() -> bool {
    super::interop::page_storage_present() && !super::interop::extension_runtime_present()
}

pub(crate) fn page_storage_get(key: &str) -> Result<Option<String>, String> {
    super::interop::page_storage_get(key)
}

pub(crate) fn page_storage_set(key: &str, raw_json: &str) -> Result<(), String> {
    super::interop::page_storage_set(key, raw_json)
}

pub(crate) fn page_storage_remove(key: &str) -> Result<(), String> {
    super::interop::page_storage_remove(key)
}
