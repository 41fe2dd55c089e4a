//! Browser [`direction_host::StorageProvider`] implementations, in fallback order.

pub mod browser;
pub mod chrome;
pub mod local;
