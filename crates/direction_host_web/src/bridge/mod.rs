//! Browser capability bridge for `direction_host_web` adapters.
//!
//! This module is organized by host domain (`extension_storage`, `page_storage`, `runtime`)
//! while preserving a stable crate-internal API for the storage providers and the content
//! script wiring.

mod extension_storage;
mod interop;
mod page_storage;
mod runtime;

pub(crate) use extension_storage::{
    extension_storage_get, extension_storage_present, extension_storage_remove,
    extension_storage_set,
};
pub(crate) use page_storage::{
    page_storage_get, page_storage_present, page_storage_remove, page_storage_set,
};
pub(crate) use runtime::{add_runtime_message_listener, send_message_to_active_tab};

/// Global namespace an extension storage area is reached through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ExtensionNamespace {
    /// `chrome.*`, callback-style completion with `runtime.lastError`.
    Chrome,
    /// `browser.*`, promise-returning WebExtensions API.
    Browser,
}

impl ExtensionNamespace {
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    pub(crate) const fn as_str(self) -> &'static str {
        match self {
            Self::Chrome => "chrome",
            Self::Browser => "browser",
        }
    }
}
