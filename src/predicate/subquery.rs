//! Existence tests backed by an owned nested traversal.

use std::fmt;

use tracing::trace;

use crate::error::{PredicateError, Result};
use crate::traversal::Traversal;
use crate::value::Value;

const NEGATED_HASH: u64 = 1231;
const PLAIN_HASH: u64 = 1237;

/// Predicate whose truth is "the nested traversal yields at least one
/// output for the seeded candidate", XORed with a negation flag.
///
/// The predicate exclusively owns its traversal, cursor state included.
/// Cloning is always deep so parallel executions of one compiled plan
/// never share a cursor.
#[derive(Clone, Debug)]
pub struct SubQueryPredicate {
    traversal: Box<dyn Traversal>,
    negate: bool,
    pending: Option<Value>,
}

impl SubQueryPredicate {
    /// Takes ownership of `traversal`; `negate` inverts the existence test.
    pub fn new(traversal: Box<dyn Traversal>, negate: bool) -> Self {
        Self {
            traversal,
            negate,
            pending: None,
        }
    }

    /// Whether the existence result is inverted.
    pub fn is_negated(&self) -> bool {
        self.negate
    }

    /// Read access to the nested traversal for compile-time rewriting.
    pub fn traversal(&self) -> &dyn Traversal {
        self.traversal.as_ref()
    }

    /// Mutable access to the nested traversal for compile-time rewriting.
    pub fn traversal_mut(&mut self) -> &mut Box<dyn Traversal> {
        &mut self.traversal
    }

    /// Returns a **new** predicate wrapping a deep clone of the traversal
    /// with the flag flipped. Unlike conjunction's in-place option, the
    /// receiver is never mutated.
    pub fn negated(&self) -> Self {
        Self {
            traversal: self.traversal.clone_box(),
            negate: !self.negate,
            pending: None,
        }
    }

    /// Hash over the traversal's structural hash and the negation flag.
    pub fn hash_code(&self) -> u64 {
        self.traversal.hash_code() ^ if self.negate { NEGATED_HASH } else { PLAIN_HASH }
    }

    pub(crate) fn seed(&mut self, candidate: Value) {
        // Reset first so re-seeding never leaks a prior run's cursor.
        self.traversal.reset();
        self.traversal.seed_start(candidate.clone());
        self.pending = Some(candidate);
    }

    pub(crate) fn has_next(&mut self) -> Result<bool> {
        if self.pending.is_none() {
            return Err(PredicateError::MissingCandidate);
        }
        trace!(negated = self.negate, "driving nested traversal");
        let produced = self.traversal.has_next()?;
        Ok(produced != self.negate)
    }

    pub(crate) fn test(&mut self, candidate: &Value) -> Result<bool> {
        self.seed(candidate.clone());
        self.has_next()
    }

    pub(crate) fn pending(&self) -> Option<&Value> {
        self.pending.as_ref()
    }

    pub(crate) fn reset(&mut self) {
        self.pending = None;
        self.traversal.reset();
    }
}

/// Equality over the traversal's structural equality and the negation
/// flag; pending candidate slots are excluded.
impl PartialEq for SubQueryPredicate {
    fn eq(&self, other: &Self) -> bool {
        self.negate == other.negate && self.traversal.dyn_eq(other.traversal.as_ref())
    }
}

impl fmt::Display for SubQueryPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negate {
            f.write_str("!")?;
        }
        write!(f, "matches({:?})", self.traversal)
    }
}
