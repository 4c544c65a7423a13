//! Composable call instrumentation.
//!
//! Two independent wrapping behaviors observe an operation without
//! altering its result:
//!
//! - [`CallCounter`] increments a store-backed counter once per
//!   attempted call.
//! - [`CallHistoryRecorder`] appends the call's rendered arguments and
//!   result to two store-backed lists, positionally aligned.
//!
//! Composition is explicit nesting of `around` calls. The required
//! order puts the recorder outside and the counter inside, so one
//! counter increment corresponds to exactly one history entry pair:
//!
//! ```ignore
//! recorder.around(&store, &args, || {
//!     counter.around(&store, || do_the_work())
//! })
//! ```
//!
//! Neither wrapper owns state: everything mutable lives in the store
//! under keys derived from the operation's [`OperationIdentity`], which
//! makes the wrappers pure pass-through observers.
//!
//! ## History commit policy
//!
//! The recorder buffers the rendered input and commits both history
//! entries only after the wrapped call succeeds (input first, then
//! output). A call that fails mid-flight appends neither entry, so
//! `len(inputs) == len(outputs)` holds after every call regardless of
//! outcome. The counter still records the attempt.

use std::fmt;

use crate::error::Result;
use crate::store::KeyValueStore;
use crate::types::OperationIdentity;
use crate::value::Value;

/// Counts attempted calls to one operation.
///
/// The increment happens unconditionally before the wrapped call runs,
/// so the counter reflects attempts, not only successes.
#[derive(Debug, Clone, Copy)]
pub struct CallCounter {
    op: OperationIdentity,
}

impl CallCounter {
    /// Create a counter for the given operation.
    pub const fn new(op: OperationIdentity) -> Self {
        Self { op }
    }

    /// Increment the operation's counter, then run the wrapped call and
    /// return its result unchanged.
    pub fn around<S, R>(&self, store: &S, call: impl FnOnce() -> Result<R>) -> Result<R>
    where
        S: KeyValueStore + ?Sized,
    {
        let count = store.incr(self.op.counter_key())?;
        tracing::trace!(op = %self.op, count, "counted call");
        call()
    }
}

/// Records the input/output history of one operation.
///
/// Inputs are rendered as a tuple of [`Value::repr`] forms; outputs are
/// rendered through `Display`. The original (non-rendered) result is
/// returned to the caller untouched.
#[derive(Debug, Clone, Copy)]
pub struct CallHistoryRecorder {
    op: OperationIdentity,
}

impl CallHistoryRecorder {
    /// Create a recorder for the given operation.
    pub const fn new(op: OperationIdentity) -> Self {
        Self { op }
    }

    /// Run the wrapped call, appending its rendered arguments and
    /// result to the operation's history on success.
    ///
    /// Buffer-then-commit: nothing is appended when the wrapped call
    /// fails, keeping the two lists positionally aligned (see module
    /// docs). The two appends are separate store operations, so a
    /// concurrent reader may transiently observe the input without its
    /// output; replay pairs defensively.
    pub fn around<S, R>(
        &self,
        store: &S,
        args: &[Value],
        call: impl FnOnce() -> Result<R>,
    ) -> Result<R>
    where
        S: KeyValueStore + ?Sized,
        R: fmt::Display,
    {
        let input = render_args(args);
        let result = call()?;
        store.rpush(&self.op.inputs_key(), input.as_bytes())?;
        store.rpush(&self.op.outputs_key(), result.to_string().as_bytes())?;
        tracing::trace!(op = %self.op, "recorded call");
        Ok(result)
    }
}

/// Read the current attempt count for an operation.
///
/// An operation that was never called reads as 0.
pub fn call_count<S>(store: &S, op: OperationIdentity) -> Result<i64>
where
    S: KeyValueStore + ?Sized,
{
    match store.get(op.counter_key())? {
        None => Ok(0),
        Some(raw) => {
            let text = String::from_utf8(raw)?;
            Ok(text.parse()?)
        }
    }
}

/// Render an argument list as a tuple of quoted values.
///
/// The one-element form carries a trailing comma (`('foo',)`) so every
/// arity stays visually distinct: `()`, `('a', 'b')`, `(42,)`.
pub fn render_args(args: &[Value]) -> String {
    match args {
        [] => "()".to_string(),
        [single] => format!("({},)", single.repr()),
        many => {
            let parts: Vec<String> = many.iter().map(Value::repr).collect();
            format!("({})", parts.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    const OP: OperationIdentity = OperationIdentity::new("test.op");

    #[test]
    fn test_render_args() {
        assert_eq!(render_args(&[]), "()");
        assert_eq!(render_args(&[Value::from("foo")]), "('foo',)");
        assert_eq!(
            render_args(&[Value::from("a"), Value::Int(2)]),
            "('a', 2)"
        );
        assert_eq!(render_args(&[Value::from(b"bar")]), "(b'bar',)");
    }

    #[test]
    fn test_counter_counts_attempts() {
        let store = MemoryStore::new();
        let counter = CallCounter::new(OP);

        counter.around(&store, || Ok(1)).unwrap();
        let failed: Result<i64> =
            counter.around(&store, || Err(crate::Error::Internal("boom".into())));
        assert!(failed.is_err());

        assert_eq!(call_count(&store, OP).unwrap(), 2);
    }

    #[test]
    fn test_recorder_aligns_inputs_and_outputs() {
        let store = MemoryStore::new();
        let recorder = CallHistoryRecorder::new(OP);

        recorder
            .around(&store, &[Value::from("x")], || Ok("r1".to_string()))
            .unwrap();
        recorder
            .around(&store, &[Value::Int(2)], || Ok("r2".to_string()))
            .unwrap();

        let inputs = store.lrange(&OP.inputs_key(), 0, -1).unwrap();
        let outputs = store.lrange(&OP.outputs_key(), 0, -1).unwrap();
        assert_eq!(inputs, vec![b"('x',)".to_vec(), b"(2,)".to_vec()]);
        assert_eq!(outputs, vec![b"r1".to_vec(), b"r2".to_vec()]);
    }

    #[test]
    fn test_recorder_skips_failed_calls() {
        let store = MemoryStore::new();
        let recorder = CallHistoryRecorder::new(OP);

        let failed: Result<String> = recorder.around(&store, &[Value::from("x")], || {
            Err(crate::Error::Unavailable("down".into()))
        });
        assert!(failed.is_err());

        assert!(store.lrange(&OP.inputs_key(), 0, -1).unwrap().is_empty());
        assert!(store.lrange(&OP.outputs_key(), 0, -1).unwrap().is_empty());
    }

    #[test]
    fn test_call_count_reads_zero_when_never_called() {
        let store = MemoryStore::new();
        assert_eq!(call_count(&store, OP).unwrap(), 0);
    }

    #[test]
    fn test_composition_one_increment_per_entry_pair() {
        let store = MemoryStore::new();
        let recorder = CallHistoryRecorder::new(OP);
        let counter = CallCounter::new(OP);

        for i in 0..3 {
            recorder
                .around(&store, &[Value::Int(i)], || {
                    counter.around(&store, || Ok(i * 10))
                })
                .unwrap();
        }

        assert_eq!(call_count(&store, OP).unwrap(), 3);
        assert_eq!(store.lrange(&OP.inputs_key(), 0, -1).unwrap().len(), 3);
        assert_eq!(store.lrange(&OP.outputs_key(), 0, -1).unwrap().len(), 3);
    }
}
