//! Browser (`wasm32`) implementations of [`direction_host`] contracts.
//!
//! This crate is the concrete extension-side wiring layer: extension and page storage
//! providers, the live document surface, page lifecycle guards, runtime messaging, and the
//! content-script entry point.
//!
//! Bridge bindings are split by domain under `bridge/`:
//! - `bridge::extension_storage`
//! - `bridge::page_storage`
//! - `bridge::runtime`
//! - `bridge::interop` (shared wasm/non-wasm transport glue)

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

/// Compile-time storage-strategy selection and concrete adapter factories for runtime wiring.
pub mod adapters;
mod bridge;
pub mod content_script;
pub mod dom;
pub mod messaging;
pub mod storage;

pub use adapters::{
    direction_context, selected_storage_strategy, storage_providers, storage_selector,
    storage_strategy_name, StorageStrategy,
};
pub use content_script::{install_lifecycle_guards, start_content_script};
pub use dom::WebDocument;
pub use messaging::{listen_for_direction_messages, send_change_direction};
pub use storage::browser::BrowserStorageProvider;
pub use storage::chrome::ChromeStorageProvider;
pub use storage::local::LocalStorageProvider;
