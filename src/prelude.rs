//! Convenient imports for Retrace.
//!
//! Re-exports the most commonly used types so you can get started with
//! a single import:
//!
//! ```ignore
//! use retrace::prelude::*;
//!
//! let cache = Cache::in_memory()?;
//! let key = cache.store("value")?;
//! ```

// Main entry point
pub use crate::cache::{Cache, STORE_OP};

// Error handling
pub use crate::error::{Error, Result};

// Store collaborator
pub use crate::store::{KeyValueStore, MemoryStore};

// Instrumentation
pub use crate::instrument::{call_count, CallCounter, CallHistoryRecorder};

// Replay
pub use crate::replay::{replay, replay_stdout};

// Core types
pub use crate::types::{Key, OperationIdentity};
pub use crate::value::Value;
