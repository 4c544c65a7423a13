//! The instrumented cache.
//!
//! [`Cache`] owns one store handle exclusively and exposes the write
//! path (`store`) plus typed reads (`get`, `get_raw`, `get_str`,
//! `get_int`). The write path is instrumented: every call flows through
//! a [`CallHistoryRecorder`] wrapping a [`CallCounter`], so the store
//! accumulates a counter and a full input/output transcript under the
//! [`STORE_OP`] identity.

use crate::error::Result;
use crate::instrument::{CallCounter, CallHistoryRecorder};
use crate::store::{KeyValueStore, MemoryStore};
use crate::types::{Key, OperationIdentity};
use crate::value::Value;

/// Identity of the instrumented `store` operation.
///
/// Declared statically so the counter and history namespaces never
/// depend on a call site.
pub const STORE_OP: OperationIdentity = OperationIdentity::new("Cache.store");

/// A cache over a key-value store, with an instrumented write path.
///
/// # Example
///
/// ```ignore
/// use retrace::prelude::*;
///
/// let cache = Cache::in_memory()?;
/// let key = cache.store("hello")?;
/// assert_eq!(cache.get_str(&key)?, Some("hello".to_string()));
/// ```
///
/// # Destructive construction
///
/// Construction flushes the backing store exactly once to establish a
/// clean namespace. Collaborators sharing the same store lose their
/// data; hand the cache a dedicated store.
pub struct Cache<S: KeyValueStore = MemoryStore> {
    backend: S,
    store_recorder: CallHistoryRecorder,
    store_counter: CallCounter,
}

impl Cache<MemoryStore> {
    /// Create a cache over a fresh in-memory store.
    pub fn in_memory() -> Result<Self> {
        Self::new(MemoryStore::new())
    }
}

impl<S: KeyValueStore> Cache<S> {
    /// Create a cache over the given store.
    ///
    /// Flushes the store (see the type-level note on destructive
    /// construction).
    pub fn new(backend: S) -> Result<Self> {
        backend.flush()?;
        tracing::debug!("cache constructed over a flushed store");
        Ok(Self {
            backend,
            store_recorder: CallHistoryRecorder::new(STORE_OP),
            store_counter: CallCounter::new(STORE_OP),
        })
    }

    /// Store a value under a freshly minted random key and return the
    /// key.
    ///
    /// Instrumented: the attempt is counted and, on success, the call
    /// is appended to the `Cache.store` history. A store failure
    /// propagates as `Err` with no partial history entry.
    pub fn store(&self, value: impl Into<Value>) -> Result<Key> {
        let args = [value.into()];
        self.store_recorder.around(&self.backend, &args, || {
            self.store_counter.around(&self.backend, || {
                let key = Key::generate();
                self.backend.set(key.as_str(), &args[0].to_bytes())?;
                tracing::debug!(key = %key, kind = args[0].type_name(), "stored value");
                Ok(key)
            })
        })
    }

    /// Read the bytes under a key and coerce them with `convert`.
    ///
    /// An absent key is `Ok(None)`, never an error. A converter failure
    /// propagates as `Err`; nothing validates stored content against
    /// the converter's expectations beforehand.
    pub fn get<T>(
        &self,
        key: &Key,
        convert: impl FnOnce(&[u8]) -> Result<T>,
    ) -> Result<Option<T>> {
        match self.backend.get(key.as_str())? {
            None => Ok(None),
            Some(raw) => convert(&raw).map(Some),
        }
    }

    /// Read the raw bytes under a key without coercion.
    pub fn get_raw(&self, key: &Key) -> Result<Option<Vec<u8>>> {
        self.backend.get(key.as_str())
    }

    /// Read the value under a key as UTF-8 text.
    pub fn get_str(&self, key: &Key) -> Result<Option<String>> {
        self.get(key, |raw| Ok(String::from_utf8(raw.to_vec())?))
    }

    /// Read the value under a key as a 64-bit integer.
    pub fn get_int(&self, key: &Key) -> Result<Option<i64>> {
        self.get(key, |raw| {
            let text = String::from_utf8(raw.to_vec())?;
            Ok(text.parse()?)
        })
    }

    /// Read-only handle to the backing store, for replay and
    /// inspection.
    pub fn backend(&self) -> &S {
        &self.backend
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction_flushes_once() {
        let store = MemoryStore::new();
        store.set("leftover", b"junk").unwrap();
        let cache = Cache::new(store).unwrap();
        assert!(cache.backend().is_empty());
    }

    #[test]
    fn test_store_returns_distinct_keys() {
        let cache = Cache::in_memory().unwrap();
        let k1 = cache.store("foo").unwrap();
        let k2 = cache.store("foo").unwrap();
        assert_ne!(k1, k2);
    }

    #[test]
    fn test_get_with_custom_converter() {
        let cache = Cache::in_memory().unwrap();
        let key = cache.store("abc").unwrap();
        let len = cache.get(&key, |raw| Ok(raw.len())).unwrap();
        assert_eq!(len, Some(3));
    }

    #[test]
    fn test_get_int_on_text_is_conversion_error() {
        let cache = Cache::in_memory().unwrap();
        let key = cache.store("not a number").unwrap();
        assert!(cache.get_int(&key).unwrap_err().is_conversion());
    }
}
