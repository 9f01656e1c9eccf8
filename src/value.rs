//! Canonical scalar value representation shared between predicates and the
//! host traversal pipeline.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use xxhash_rust::xxh64::xxh64;

use crate::error::{PredicateError, Result};

/// Typed value tagged with explicit type information so the representation
/// remains unambiguous across language bindings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "t", content = "v")]
pub enum Value {
    /// Null literal.
    Null,
    /// Boolean literal.
    Bool(bool),
    /// Signed 64-bit integer literal.
    Int(i64),
    /// 64-bit floating point literal.
    Float(f64),
    /// UTF-8 string literal.
    String(String),
    /// Arbitrary binary payload.
    Bytes(Vec<u8>),
    /// Nanoseconds since Unix epoch in UTC.
    DateTime(i64),
}

impl Value {
    /// Human-readable type name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Bytes(_) => "bytes",
            Value::DateTime(_) => "datetime",
        }
    }

    /// Returns true for the null literal.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Total comparison across comparable type families.
    ///
    /// `Int`, `Float`, and `DateTime` compare numerically across tags;
    /// strings, bytes, and booleans compare within their own family. Any
    /// other pairing is a [`PredicateError::TypeMismatch`].
    pub fn compare(&self, other: &Value) -> Result<Ordering> {
        match (self, other) {
            (Value::Null, Value::Null) => Ok(Ordering::Equal),
            (Value::Bool(a), Value::Bool(b)) => Ok(a.cmp(b)),
            (Value::String(a), Value::String(b)) => Ok(a.cmp(b)),
            (Value::Bytes(a), Value::Bytes(b)) => Ok(a.cmp(b)),
            _ => {
                let mismatch = PredicateError::TypeMismatch {
                    candidate: self.type_name(),
                    reference: other.type_name(),
                };
                let (Some(a), Some(b)) = (self.as_number(), other.as_number()) else {
                    return Err(mismatch);
                };
                a.partial_cmp(&b).ok_or(mismatch)
            }
        }
    }

    /// Equality used by predicate `equals` semantics: both-null is equal,
    /// null never equals non-null, and values from incomparable type
    /// families are unequal rather than an error.
    pub fn equals_value(&self, other: &Value) -> bool {
        match (self.is_null(), other.is_null()) {
            (true, true) => true,
            (true, false) | (false, true) => false,
            (false, false) => self
                .compare(other)
                .map(|ord| ord == Ordering::Equal)
                .unwrap_or(false),
        }
    }

    /// Deterministic 64-bit hash consistent with [`Value::equals_value`].
    ///
    /// Numeric values hash through their canonical f64 bits so `Int(5)` and
    /// `Float(5.0)` collide deliberately; `-0.0` normalises to `0.0`.
    pub fn hash_code(&self) -> u64 {
        let mut buf = Vec::with_capacity(16);
        match self {
            Value::Null => buf.push(0u8),
            Value::Bool(v) => {
                buf.push(1);
                buf.push(u8::from(*v));
            }
            Value::Int(v) => {
                buf.push(2);
                buf.extend_from_slice(&canonical_bits(*v as f64).to_le_bytes());
            }
            Value::Float(v) => {
                buf.push(2);
                buf.extend_from_slice(&canonical_bits(*v).to_le_bytes());
            }
            Value::DateTime(v) => {
                buf.push(2);
                buf.extend_from_slice(&canonical_bits(*v as f64).to_le_bytes());
            }
            Value::String(v) => {
                buf.push(3);
                buf.extend_from_slice(v.as_bytes());
            }
            Value::Bytes(v) => {
                buf.push(4);
                buf.extend_from_slice(v);
            }
        }
        xxh64(&buf, 0)
    }

    fn as_number(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            Value::DateTime(v) => Some(*v as f64),
            _ => None,
        }
    }
}

fn canonical_bits(value: f64) -> u64 {
    // Collapse -0.0 into 0.0 so equal numbers hash alike.
    let value = if value == 0.0 { 0.0 } else { value };
    value.to_bits()
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::String(v) => write!(f, "{v}"),
            Value::Bytes(v) => {
                for byte in v {
                    write!(f, "{byte:02x}")?;
                }
                Ok(())
            }
            Value::DateTime(v) => write!(f, "{v}ns"),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Value::Bytes(value)
    }
}

impl From<&[u8]> for Value {
    fn from(value: &[u8]) -> Self {
        Value::Bytes(value.to_vec())
    }
}
