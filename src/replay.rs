//! Call transcript reconstruction.
//!
//! Reads the history recorded by the instrumentation layer for one
//! operation and renders it as an ordered, human-readable transcript:
//!
//! ```text
//! Cache.store was called 2 times:
//! Cache.store(*('foo',)) -> 3a3e8231-b2f6-450d-8092-61d6d454f3be
//! Cache.store(*(b'bar',)) -> 6f1c04c9-102a-40a2-9de8-8f33634c5c93
//! ```
//!
//! Pure read: replay mutates nothing and persists nothing.

use std::io::Write;

use crate::error::Result;
use crate::store::KeyValueStore;
use crate::types::OperationIdentity;

/// Write the call transcript for an operation to `out`.
///
/// The header reports the number of paired entries; one line follows
/// per recorded call, in call order. Zero recorded calls prints a count
/// of 0 and no call lines.
///
/// Defensive pairing: the two history lists are read with two separate
/// store calls, and an external writer (or a failure between the
/// recorder's two appends) can leave them momentarily unequal. Replay
/// pairs entries only up to the shorter length rather than failing.
pub fn replay<S, W>(store: &S, op: OperationIdentity, out: &mut W) -> Result<()>
where
    S: KeyValueStore + ?Sized,
    W: Write,
{
    let inputs = store.lrange(&op.inputs_key(), 0, -1)?;
    let outputs = store.lrange(&op.outputs_key(), 0, -1)?;
    let paired = inputs.len().min(outputs.len());

    writeln!(out, "{} was called {} times:", op, paired)?;
    for (input, output) in inputs.iter().zip(outputs.iter()).take(paired) {
        writeln!(
            out,
            "{}(*{}) -> {}",
            op,
            String::from_utf8_lossy(input),
            String::from_utf8_lossy(output)
        )?;
    }
    Ok(())
}

/// [`replay`] to standard output.
pub fn replay_stdout<S>(store: &S, op: OperationIdentity) -> Result<()>
where
    S: KeyValueStore + ?Sized,
{
    let stdout = std::io::stdout();
    let mut lock = stdout.lock();
    replay(store, op, &mut lock)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    const OP: OperationIdentity = OperationIdentity::new("test.op");

    fn transcript(store: &MemoryStore) -> String {
        let mut buf = Vec::new();
        replay(store, OP, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_zero_calls() {
        let store = MemoryStore::new();
        assert_eq!(transcript(&store), "test.op was called 0 times:\n");
    }

    #[test]
    fn test_ordered_lines() {
        let store = MemoryStore::new();
        store.rpush(&OP.inputs_key(), b"('a',)").unwrap();
        store.rpush(&OP.outputs_key(), b"r1").unwrap();
        store.rpush(&OP.inputs_key(), b"(2,)").unwrap();
        store.rpush(&OP.outputs_key(), b"r2").unwrap();

        assert_eq!(
            transcript(&store),
            "test.op was called 2 times:\n\
             test.op(*('a',)) -> r1\n\
             test.op(*(2,)) -> r2\n"
        );
    }

    #[test]
    fn test_mismatched_lists_pair_to_shorter() {
        let store = MemoryStore::new();
        store.rpush(&OP.inputs_key(), b"('a',)").unwrap();
        store.rpush(&OP.outputs_key(), b"r1").unwrap();
        // an input whose call never produced an output
        store.rpush(&OP.inputs_key(), b"('b',)").unwrap();

        assert_eq!(
            transcript(&store),
            "test.op was called 1 times:\n\
             test.op(*('a',)) -> r1\n"
        );
    }
}
