//! Key-value storage provider capability and the target-independent providers.

use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
    future::Future,
    pin::Pin,
    rc::Rc,
};

use serde_json::Value;

/// Object-safe boxed future used by [`StorageProvider`] async methods.
pub type ProviderFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// One physical key-value storage mechanism available in an execution context.
///
/// Values are JSON documents; providers that only store text serialize them on write.
pub trait StorageProvider {
    /// Short stable name used in log lines.
    fn name(&self) -> &'static str;

    /// Reports whether the mechanism is present in the current runtime.
    fn is_available(&self) -> bool;

    /// Loads the value stored under `key`.
    fn get_value<'a>(&'a self, key: &'a str) -> ProviderFuture<'a, Result<Option<Value>, String>>;

    /// Replaces the value stored under `key`.
    fn set_value<'a>(
        &'a self,
        key: &'a str,
        value: &'a Value,
    ) -> ProviderFuture<'a, Result<(), String>>;

    /// Deletes `key`.
    fn remove_value<'a>(&'a self, key: &'a str) -> ProviderFuture<'a, Result<(), String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Provider that is never available; terminates chains on unsupported targets.
pub struct NoopStorageProvider;

impl StorageProvider for NoopStorageProvider {
    fn name(&self) -> &'static str {
        "noop"
    }

    fn is_available(&self) -> bool {
        false
    }

    fn get_value<'a>(&'a self, _key: &'a str) -> ProviderFuture<'a, Result<Option<Value>, String>> {
        Box::pin(async { Ok(None) })
    }

    fn set_value<'a>(
        &'a self,
        _key: &'a str,
        _value: &'a Value,
    ) -> ProviderFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }

    fn remove_value<'a>(&'a self, _key: &'a str) -> ProviderFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }
}

#[derive(Debug, Default)]
struct MemoryProviderState {
    values: RefCell<HashMap<String, Value>>,
    unavailable: Cell<bool>,
    fail_reads: Cell<bool>,
    fail_writes: Cell<bool>,
}

#[derive(Debug, Clone, Default)]
/// In-memory provider keyed by string.
///
/// Clones share the same map, so a test can keep a handle while a selector owns another. The
/// failure toggles let tests exercise fallback behavior.
pub struct MemoryStorageProvider {
    inner: Rc<MemoryProviderState>,
}

impl MemoryStorageProvider {
    /// Marks the provider as absent from the runtime.
    pub fn set_available(&self, available: bool) {
        self.inner.unavailable.set(!available);
    }

    /// Makes every read fail with an error.
    pub fn set_fail_reads(&self, fail: bool) {
        self.inner.fail_reads.set(fail);
    }

    /// Makes every write and remove fail with an error.
    pub fn set_fail_writes(&self, fail: bool) {
        self.inner.fail_writes.set(fail);
    }

    /// Returns the raw stored value without going through the async API.
    pub fn snapshot(&self, key: &str) -> Option<Value> {
        self.inner.values.borrow().get(key).cloned()
    }
}

impl StorageProvider for MemoryStorageProvider {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn is_available(&self) -> bool {
        !self.inner.unavailable.get()
    }

    fn get_value<'a>(&'a self, key: &'a str) -> ProviderFuture<'a, Result<Option<Value>, String>> {
        Box::pin(async move {
            if self.inner.fail_reads.get() {
                return Err("simulated read failure".to_string());
            }
            Ok(self.inner.values.borrow().get(key).cloned())
        })
    }

    fn set_value<'a>(
        &'a self,
        key: &'a str,
        value: &'a Value,
    ) -> ProviderFuture<'a, Result<(), String>> {
        Box::pin(async move {
            if self.inner.fail_writes.get() {
                return Err("simulated write failure".to_string());
            }
            self.inner
                .values
                .borrow_mut()
                .insert(key.to_string(), value.clone());
            Ok(())
        })
    }

    fn remove_value<'a>(&'a self, key: &'a str) -> ProviderFuture<'a, Result<(), String>> {
        Box::pin(async move {
            if self.inner.fail_writes.get() {
                return Err("simulated write failure".to_string());
            }
            self.inner.values.borrow_mut().remove(key);
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use serde_json::json;

    use super::*;

    #[test]
    fn memory_provider_round_trip_and_remove() {
        let provider = MemoryStorageProvider::default();
        let provider_obj: &dyn StorageProvider = &provider;

        block_on(provider_obj.set_value("k", &json!([1, 2]))).expect("set");
        assert_eq!(
            block_on(provider_obj.get_value("k")).expect("get"),
            Some(json!([1, 2]))
        );
        block_on(provider_obj.remove_value("k")).expect("remove");
        assert_eq!(block_on(provider_obj.get_value("k")).expect("get"), None);
    }

    #[test]
    fn memory_provider_clones_share_state() {
        let provider = MemoryStorageProvider::default();
        let handle = provider.clone();
        block_on(provider.set_value("k", &json!("v"))).expect("set");
        assert_eq!(handle.snapshot("k"), Some(json!("v")));
    }

    #[test]
    fn memory_provider_failure_toggles() {
        let provider = MemoryStorageProvider::default();
        provider.set_fail_reads(true);
        assert!(block_on(provider.get_value("k")).is_err());
        provider.set_fail_writes(true);
        assert!(block_on(provider.set_value("k", &json!(1))).is_err());
        assert!(block_on(provider.remove_value("k")).is_err());

        provider.set_available(false);
        assert!(!provider.is_available());
    }

    #[test]
    fn noop_provider_is_unavailable_and_inert() {
        let provider = NoopStorageProvider;
        let provider_obj: &dyn StorageProvider = &provider;
        assert!(!provider_obj.is_available());
        assert_eq!(block_on(provider_obj.get_value("k")).expect("get"), None);
        block_on(provider_obj.set_value("k", &json!(1))).expect("set");
        block_on(provider_obj.remove_value("k")).expect("remove");
    }
}
