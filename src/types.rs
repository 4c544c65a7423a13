//! Public identifier types for Retrace.
//!
//! Two identifiers live here: [`Key`], naming one stored value, and
//! [`OperationIdentity`], naming one instrumented operation and deriving
//! the store keys for its counter and history lists.

use std::fmt;
use uuid::Uuid;

/// A globally unique identifier naming one stored value.
///
/// Keys are minted fresh on every `store` call from a 128-bit random
/// UUID (version 4), so concurrent callers never collide. Keys are never
/// reused, never enumerated, and never deleted explicitly; their
/// lifecycle ends only at the store-wide flush performed once at cache
/// construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Key(String);

impl Key {
    /// Mint a fresh random key.
    ///
    /// Uses UUID v4 (cryptographically random 128 bits), so generation
    /// is collision-free under concurrent callers.
    pub fn generate() -> Self {
        Key(Uuid::new_v4().to_string())
    }

    /// The textual form of the key, as used in the store.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Key {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<Key> for String {
    fn from(k: Key) -> String {
        k.0
    }
}

/// The stable name of an instrumented operation (e.g. `"Cache.store"`).
///
/// An identity namespaces one counter and two history lists in the
/// store. It is declared statically at operation definition time, never
/// derived from a call site, so distinct operations can never merge
/// their histories by accident.
///
/// ## Derived store keys
///
/// | Data | Store key |
/// |------|-----------|
/// | call counter | `<name>` |
/// | recorded inputs | `<name>:inputs` |
/// | recorded outputs | `<name>:outputs` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OperationIdentity(&'static str);

impl OperationIdentity {
    /// Declare an operation identity.
    pub const fn new(name: &'static str) -> Self {
        OperationIdentity(name)
    }

    /// The operation name.
    pub fn name(&self) -> &'static str {
        self.0
    }

    /// Store key holding the call counter.
    pub fn counter_key(&self) -> &'static str {
        self.0
    }

    /// Store key holding the recorded inputs list.
    pub fn inputs_key(&self) -> String {
        format!("{}:inputs", self.0)
    }

    /// Store key holding the recorded outputs list.
    pub fn outputs_key(&self) -> String {
        format!("{}:outputs", self.0)
    }
}

impl fmt::Display for OperationIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_unique() {
        let a = Key::generate();
        let b = Key::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn test_key_textual_form_is_uuid_shaped() {
        let key = Key::generate();
        // 32 hex digits + 4 hyphens
        assert_eq!(key.as_str().len(), 36);
        assert_eq!(key.as_str().matches('-').count(), 4);
    }

    #[test]
    fn test_identity_derived_store_keys() {
        let op = OperationIdentity::new("Cache.store");
        assert_eq!(op.counter_key(), "Cache.store");
        assert_eq!(op.inputs_key(), "Cache.store:inputs");
        assert_eq!(op.outputs_key(), "Cache.store:outputs");
        assert_eq!(op.to_string(), "Cache.store");
    }

    #[test]
    fn test_distinct_identities_do_not_collide() {
        let a = OperationIdentity::new("Cache.store");
        let b = OperationIdentity::new("Cache.get");
        assert_ne!(a, b);
        assert_ne!(a.inputs_key(), b.inputs_key());
    }
}
