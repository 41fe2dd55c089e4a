//! Storage backends and the fallback chain that selects among them.

mod provider;
mod selector;

pub use provider::{MemoryStorageProvider, NoopStorageProvider, ProviderFuture, StorageProvider};
pub use selector::StorageSelector;
