//! Fixed catalog of binary comparison operators paired with reference
//! values by the base predicates.

use std::fmt;
use xxhash_rust::xxh64::xxh64;

use crate::error::Result;
use crate::value::Value;

/// Ordering/equality comparators over a single reference value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Compare {
    /// Candidate equals the reference.
    Eq,
    /// Candidate does not equal the reference.
    Neq,
    /// Candidate is strictly less than the reference.
    Lt,
    /// Candidate is less than or equal to the reference.
    Lte,
    /// Candidate is strictly greater than the reference.
    Gt,
    /// Candidate is greater than or equal to the reference.
    Gte,
}

impl Compare {
    /// Applies the operator to `(candidate, reference)`.
    ///
    /// Equality operators treat both-null as equal and null-vs-non-null as
    /// unequal without error; ordering operators surface a type-mismatch
    /// error on a null or incomparable operand.
    pub fn test(self, candidate: &Value, reference: &Value) -> Result<bool> {
        match self {
            Compare::Eq => Ok(candidate.equals_value(reference)),
            Compare::Neq => Ok(!candidate.equals_value(reference)),
            Compare::Lt => Ok(candidate.compare(reference)?.is_lt()),
            Compare::Lte => Ok(candidate.compare(reference)?.is_le()),
            Compare::Gt => Ok(candidate.compare(reference)?.is_gt()),
            Compare::Gte => Ok(candidate.compare(reference)?.is_ge()),
        }
    }

    /// Logical complement: eq↔neq, lt↔gte, lte↔gt.
    pub const fn complement(self) -> Self {
        match self {
            Compare::Eq => Compare::Neq,
            Compare::Neq => Compare::Eq,
            Compare::Lt => Compare::Gte,
            Compare::Lte => Compare::Gt,
            Compare::Gt => Compare::Lte,
            Compare::Gte => Compare::Lt,
        }
    }

    /// Lowercase operator name.
    pub const fn name(self) -> &'static str {
        match self {
            Compare::Eq => "eq",
            Compare::Neq => "neq",
            Compare::Lt => "lt",
            Compare::Lte => "lte",
            Compare::Gt => "gt",
            Compare::Gte => "gte",
        }
    }

    /// Deterministic operator hash combined into predicate hash codes.
    pub fn hash_code(self) -> u64 {
        xxh64(self.name().as_bytes(), 0)
    }
}

impl fmt::Display for Compare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Set-membership comparators over a reference set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Contains {
    /// Candidate equals at least one element of the reference set.
    Within,
    /// Candidate equals no element of the reference set.
    Without,
}

impl Contains {
    /// Applies the operator with per-element equality semantics.
    ///
    /// Membership tests are infallible: elements from incomparable type
    /// families simply do not match.
    pub fn test(self, candidate: &Value, reference: &[Value]) -> bool {
        let found = reference.iter().any(|value| candidate.equals_value(value));
        match self {
            Contains::Within => found,
            Contains::Without => !found,
        }
    }

    /// Logical complement: within↔without.
    pub const fn complement(self) -> Self {
        match self {
            Contains::Within => Contains::Without,
            Contains::Without => Contains::Within,
        }
    }

    /// Lowercase operator name.
    pub const fn name(self) -> &'static str {
        match self {
            Contains::Within => "within",
            Contains::Without => "without",
        }
    }

    /// Deterministic operator hash combined into predicate hash codes.
    pub fn hash_code(self) -> u64 {
        xxh64(self.name().as_bytes(), 0)
    }
}

impl fmt::Display for Contains {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
