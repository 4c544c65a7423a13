//! Key-value store collaborator interface.
//!
//! The cache delegates all persistence to a store behind the
//! [`KeyValueStore`] trait. The trait is Redis-shaped: scalar get/set,
//! an atomic integer counter, and append-only lists with ranged reads.
//!
//! The crate ships one backend, [`MemoryStore`], a process-local
//! sharded map. Remote backends implement the same trait; transport and
//! authentication are entirely their concern.

mod memory;

pub use memory::MemoryStore;

use crate::error::Result;

/// The consumed store interface.
///
/// Every method is synchronous and blocking; a blocked store call
/// blocks the caller indefinitely. Each individual operation is atomic
/// at the store level, but no multi-operation transaction exists —
/// callers composing several calls get no atomicity across them.
pub trait KeyValueStore: Send + Sync {
    /// Write raw bytes under a key, replacing any previous value.
    fn set(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Read the raw bytes under a key.
    ///
    /// Returns `Ok(None)` if the key is absent; absence is a
    /// first-class empty result, never an error.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Atomically increment the integer under a key by 1 and return the
    /// new value. An absent key starts from 0.
    ///
    /// Fails with a wrong-type error if the key holds non-integer bytes
    /// or a list.
    fn incr(&self, key: &str) -> Result<i64>;

    /// Append raw bytes to the tail of the list under a key, creating
    /// the list if absent. Returns the new list length.
    fn rpush(&self, key: &str, value: &[u8]) -> Result<u64>;

    /// Read an inclusive range of a list.
    ///
    /// Negative indices count from the tail, so `lrange(key, 0, -1)`
    /// reads the whole list. An absent list reads as empty.
    fn lrange(&self, key: &str, start: i64, stop: i64) -> Result<Vec<Vec<u8>>>;

    /// Reset the store to empty.
    ///
    /// Destructive and store-wide: every scalar, counter, and list is
    /// gone afterwards.
    fn flush(&self) -> Result<()>;
}
