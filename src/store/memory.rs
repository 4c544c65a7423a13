//! In-memory store backend.
//!
//! # Design
//!
//! - DashMap: sharded by default, lock-free reads
//! - FxHash: fast non-crypto hash, O(1) lookups
//! - Entry-API mutation: each operation locks only its key's shard, so
//!   `incr` and `rpush` are atomic per key
//!
//! Scalars and lists live in separate maps but share one logical
//! namespace: an operation that finds its key in the other map fails
//! with a wrong-type error rather than silently shadowing it.

use dashmap::DashMap;
use rustc_hash::FxHasher;
use std::hash::BuildHasherDefault;

use crate::error::{Error, Result};

use super::KeyValueStore;

type FxBuild = BuildHasherDefault<FxHasher>;

/// Process-local key-value store.
///
/// Thread-safe: reads are lock-free, writes lock only the target
/// shard. Suitable as the default backend and as the store double in
/// tests.
pub struct MemoryStore {
    /// Scalar values (including counters, which are textual integers)
    scalars: DashMap<String, Vec<u8>, FxBuild>,
    /// Append-only lists
    lists: DashMap<String, Vec<Vec<u8>>, FxBuild>,
}

impl MemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            scalars: DashMap::with_hasher(FxBuild::default()),
            lists: DashMap::with_hasher(FxBuild::default()),
        }
    }

    /// Number of keys currently held (scalars and lists).
    pub fn len(&self) -> usize {
        self.scalars.len() + self.lists.len()
    }

    /// Check if the store holds no keys.
    pub fn is_empty(&self) -> bool {
        self.scalars.is_empty() && self.lists.is_empty()
    }

    fn wrong_type(expected: &str, actual: &str) -> Error {
        Error::WrongType {
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for MemoryStore {
    fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        // SET replaces whatever was there, list included
        self.lists.remove(key);
        self.scalars.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        if let Some(v) = self.scalars.get(key) {
            return Ok(Some(v.value().clone()));
        }
        if self.lists.contains_key(key) {
            return Err(Self::wrong_type("scalar", "list"));
        }
        Ok(None)
    }

    fn incr(&self, key: &str) -> Result<i64> {
        if self.lists.contains_key(key) {
            return Err(Self::wrong_type("integer", "list"));
        }
        // entry() holds the shard lock for the whole read-modify-write
        let mut entry = self
            .scalars
            .entry(key.to_string())
            .or_insert_with(|| b"0".to_vec());
        let current: i64 = std::str::from_utf8(entry.value())
            .ok()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| Self::wrong_type("integer", "non-integer bytes"))?;
        let next = current
            .checked_add(1)
            .ok_or_else(|| Error::Internal(format!("counter overflow on {}", key)))?;
        *entry.value_mut() = next.to_string().into_bytes();
        Ok(next)
    }

    fn rpush(&self, key: &str, value: &[u8]) -> Result<u64> {
        if self.scalars.contains_key(key) {
            return Err(Self::wrong_type("list", "scalar"));
        }
        let mut entry = self.lists.entry(key.to_string()).or_default();
        entry.value_mut().push(value.to_vec());
        Ok(entry.value().len() as u64)
    }

    fn lrange(&self, key: &str, start: i64, stop: i64) -> Result<Vec<Vec<u8>>> {
        if self.scalars.contains_key(key) {
            return Err(Self::wrong_type("list", "scalar"));
        }
        let entry = match self.lists.get(key) {
            Some(e) => e,
            None => return Ok(Vec::new()),
        };
        let len = entry.value().len() as i64;
        let from = if start < 0 { (len + start).max(0) } else { start };
        let to = if stop < 0 { len + stop } else { stop.min(len - 1) };
        if from > to || from >= len {
            return Ok(Vec::new());
        }
        Ok(entry.value()[from as usize..=to as usize].to_vec())
    }

    fn flush(&self) -> Result<()> {
        tracing::debug!(keys = self.len(), "flushing store");
        self.scalars.clear();
        self.lists.clear();
        Ok(())
    }
}
