//! Structured errors surfaced by predicate construction and evaluation.
//!
//! These errors bubble up synchronously to the immediate caller; there are
//! no retries or partial-failure semantics. Sequence exhaustion is not an
//! error: [`Predicate::take`](crate::predicate::Predicate::take) reports it
//! as `Ok(None)`.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PredicateError>;

/// Errors raised while building or evaluating predicates.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PredicateError {
    /// Candidate and reference values are not comparable under the
    /// requested operator. This is a caller contract violation and is
    /// never silently coerced.
    #[error("cannot compare {candidate} candidate with {reference} reference")]
    TypeMismatch {
        /// Type name of the candidate value.
        candidate: &'static str,
        /// Type name of the reference value.
        reference: &'static str,
    },
    /// A conjunction was constructed with fewer than two children.
    #[error("conjunction requires at least two child predicates (got {got})")]
    ConjunctionArity {
        /// Number of children supplied.
        got: usize,
    },
    /// A sub-query predicate was evaluated without a seeded candidate.
    #[error("sub-query predicate requires a seeded candidate")]
    MissingCandidate,
}

impl PredicateError {
    /// Returns a machine-readable code for the error variant.
    pub fn code(&self) -> &'static str {
        match self {
            PredicateError::TypeMismatch { .. } => "TypeMismatch",
            PredicateError::ConjunctionArity { .. } => "ConjunctionArity",
            PredicateError::MissingCandidate => "MissingCandidate",
        }
    }
}
