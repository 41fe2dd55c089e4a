use direction_host::{DirectionContext, DirectionSettings, StorageProvider, StorageSelector};

use crate::{BrowserStorageProvider, ChromeStorageProvider, LocalStorageProvider};

#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Compile-time selected storage strategy for `direction_host_web` adapters.
pub enum StorageStrategy {
    /// Extension storage first (`chrome`, then `browser`), `localStorage` outside extensions.
    Extension,
    /// `localStorage` only, for bare-page development builds.
    PageOnly,
}

/// Returns the compile-time selected storage strategy for the active build.
pub const fn selected_storage_strategy() -> StorageStrategy {
    #[cfg(feature = "page-storage-only")]
    {
        StorageStrategy::PageOnly
    }

    #[cfg(not(feature = "page-storage-only"))]
    {
        StorageStrategy::Extension
    }
}

/// Returns the selected storage strategy as a stable string token.
pub fn storage_strategy_name() -> &'static str {
    match selected_storage_strategy() {
        StorageStrategy::Extension => "extension",
        StorageStrategy::PageOnly => "page-only",
    }
}

/// Provider chain for the selected strategy, in fallback order.
pub fn storage_providers() -> Vec<Box<dyn StorageProvider>> {
    match selected_storage_strategy() {
        StorageStrategy::Extension => vec![
            Box::new(ChromeStorageProvider),
            Box::new(BrowserStorageProvider),
            Box::new(LocalStorageProvider),
        ],
        StorageStrategy::PageOnly => vec![Box::new(LocalStorageProvider)],
    }
}

/// Builds the storage selector for the current execution context.
pub fn storage_selector() -> StorageSelector {
    StorageSelector::new(storage_providers())
}

/// Builds the per-context service wiring (popup or content script).
pub fn direction_context(settings: DirectionSettings) -> DirectionContext {
    DirectionContext::new(settings, storage_selector())
}
