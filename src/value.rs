//! Value types for Retrace.
//!
//! This module defines the canonical `Value` type: the unit stored and
//! retrieved by the cache. The enum has exactly 4 variants, matching the
//! scalar kinds the store accepts.
//!
//! ## The Four Types
//!
//! 1. `Str` - UTF-8 encoded text
//! 2. `Bytes` - Arbitrary binary data (distinct from `Str`)
//! 3. `Int` - 64-bit signed integer
//! 4. `Float` - 64-bit IEEE-754 floating point
//!
//! ## At-rest representation
//!
//! The store is value-type-agnostic: everything persists as raw bytes.
//! Text and numbers persist as their textual bytes, blobs persist raw
//! (see [`Value::to_bytes`]). Typed retrieval is a client-side coercion,
//! not a stored attribute.
//!
//! ## History rendering
//!
//! Call history needs a deterministic textual form for arguments and
//! results. [`Value::repr`] is the quoted form used for recorded inputs
//! (`'foo'`, `b'bar'`, `42`, `3.14`); `Display` is the plain form used
//! for recorded outputs.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A stored scalar value.
///
/// This is the only value model the cache accepts. Different types are
/// never equal: `Int(1) != Float(1.0)`, `Str("abc") != Bytes(b"abc")`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// UTF-8 encoded text
    Str(String),

    /// Arbitrary binary data
    /// NOT equivalent to Str - distinct type
    Bytes(Vec<u8>),

    /// 64-bit signed integer
    Int(i64),

    /// 64-bit IEEE-754 floating point
    Float(f64),
}

impl Value {
    /// Returns the type name as a string (for error messages)
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Str(_) => "Str",
            Value::Bytes(_) => "Bytes",
            Value::Int(_) => "Int",
            Value::Float(_) => "Float",
        }
    }

    /// Try to get as text
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get as binary data
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Try to get as integer
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get as float
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// The at-rest byte representation.
    ///
    /// Text and numbers persist as their textual bytes, blobs persist
    /// raw. `get_str`/`get_int` on the cache invert this for the
    /// corresponding types.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            Value::Str(s) => s.as_bytes().to_vec(),
            Value::Bytes(b) => b.clone(),
            Value::Int(i) => i.to_string().into_bytes(),
            Value::Float(f) => format_float(*f).into_bytes(),
        }
    }

    /// Deterministic quoted rendering, used for recorded call inputs.
    ///
    /// Text renders single-quoted with `\`, `'`, and control characters
    /// escaped; blobs render as `b'...'` with non-printable bytes as
    /// `\xNN`; numbers render as their textual form (floats always carry
    /// a decimal point, so `1.0` stays distinguishable from `1`).
    pub fn repr(&self) -> String {
        match self {
            Value::Str(s) => {
                let mut out = String::with_capacity(s.len() + 2);
                out.push('\'');
                for c in s.chars() {
                    match c {
                        '\\' => out.push_str("\\\\"),
                        '\'' => out.push_str("\\'"),
                        '\n' => out.push_str("\\n"),
                        '\r' => out.push_str("\\r"),
                        '\t' => out.push_str("\\t"),
                        _ => out.push(c),
                    }
                }
                out.push('\'');
                out
            }
            Value::Bytes(b) => {
                let mut out = String::with_capacity(b.len() + 3);
                out.push_str("b'");
                for &byte in b {
                    match byte {
                        b'\\' => out.push_str("\\\\"),
                        b'\'' => out.push_str("\\'"),
                        b'\n' => out.push_str("\\n"),
                        b'\r' => out.push_str("\\r"),
                        b'\t' => out.push_str("\\t"),
                        0x20..=0x7e => out.push(byte as char),
                        _ => out.push_str(&format!("\\x{:02x}", byte)),
                    }
                }
                out.push('\'');
                out
            }
            Value::Int(i) => i.to_string(),
            Value::Float(f) => format_float(*f),
        }
    }
}

/// Float rendering: whole values keep a trailing `.0` so the textual
/// form never collides with an integer's.
fn format_float(f: f64) -> String {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e16 {
        format!("{:.1}", f)
    } else {
        format!("{}", f)
    }
}

impl fmt::Display for Value {
    /// Plain rendering, used for recorded call outputs.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => write!(f, "{}", s),
            Value::Bytes(b) => write!(f, "{}", String::from_utf8_lossy(b)),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", format_float(*x)),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Value::Bytes(b)
    }
}

impl From<&[u8]> for Value {
    fn from(b: &[u8]) -> Self {
        Value::Bytes(b.to_vec())
    }
}

impl<const N: usize> From<&[u8; N]> for Value {
    fn from(b: &[u8; N]) -> Self {
        Value::Bytes(b.to_vec())
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}
