//! Target-independent core of the forced text-direction extension.
//!
//! This crate owns the direction record model, the storage provider capability and its fallback
//! chain, the record repository, the load-mutate-save use cases, the per-context service
//! wiring, and the page-side direction applier over an abstract document. Browser adapters live
//! in `direction_host_web`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod applier;
pub mod context;
pub mod error;
pub mod messages;
pub mod model;
pub mod repository;
pub mod settings;
pub mod storage;
pub mod time;
pub mod use_cases;

pub use applier::{
    reassert_direction, AddedElementsCallback, ApplierState, DirectionApplier, DocumentSurface,
    MemoryDocument, MemoryElementId, MutationSubscription, StyledNode,
};
pub use context::{ConfigSnapshot, DirectionContext};
pub use error::{DirectionError, Result};
pub use messages::RuntimeMessage;
pub use model::{
    generate_config_id, is_valid_url_pattern, normalize_url, should_apply_direction,
    DirectionChangeEvent, DirectionRecord, DirectionState, ExtensionStorage, ImportPayload,
    TextDirection,
};
pub use repository::{DirectionRepository, RepositoryFuture, StorageDirectionRepository};
pub use settings::{
    DirectionSettings, DEFAULT_CONFIG_ID, DIRECTION_CONFIGS_KEY, EXTENSION_VERSION_KEY,
    STORAGE_VERSION,
};
pub use storage::{
    MemoryStorageProvider, NoopStorageProvider, ProviderFuture, StorageProvider, StorageSelector,
};
pub use time::{creation_stamp_ms, mutation_stamp_ms, unix_time_ms_now};
pub use use_cases::{ManageUrlUseCase, RecordUpdate, ToggleDirectionUseCase};
