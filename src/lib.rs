//! # Retrace
//!
//! A thin instrumentation layer over a key-value store.
//!
//! Retrace stores arbitrary scalar values under freshly generated
//! random keys, retrieves them with optional typed coercion, and
//! transparently records invocation statistics (call counts and full
//! input/output history) for instrumented operations. A replay facility
//! reconstructs a human-readable call transcript from the persisted
//! history.
//!
//! ## Quick Start
//!
//! ```ignore
//! use retrace::prelude::*;
//!
//! let cache = Cache::in_memory()?;
//!
//! let k1 = cache.store("foo")?;
//! let k2 = cache.store(42i64)?;
//!
//! assert_eq!(cache.get_str(&k1)?, Some("foo".to_string()));
//! assert_eq!(cache.get_int(&k2)?, Some(42));
//!
//! // Every store call was counted and recorded; print the transcript.
//! replay_stdout(cache.backend(), STORE_OP)?;
//! ```
//!
//! ## Architecture
//!
//! - [`KeyValueStore`] - the store collaborator trait (Redis-shaped:
//!   scalars, an atomic counter, append-only lists). [`MemoryStore`] is
//!   the in-process backend.
//! - [`Cache`] - owns one store handle; write path plus typed reads.
//! - [`CallCounter`] / [`CallHistoryRecorder`] - composable around-call
//!   observers; all their state lives in the store under keys derived
//!   from an [`OperationIdentity`].
//! - [`replay`] - reconstructs the ordered call transcript.

#![warn(missing_docs)]

mod cache;
mod error;
mod instrument;
mod replay;
mod store;
mod types;
mod value;

pub mod prelude;

pub use cache::{Cache, STORE_OP};
pub use error::{Error, Result};
pub use instrument::{call_count, render_args, CallCounter, CallHistoryRecorder};
pub use replay::{replay, replay_stdout};
pub use store::{KeyValueStore, MemoryStore};
pub use types::{Key, OperationIdentity};
pub use value::Value;
