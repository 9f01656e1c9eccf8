//! Boolean filter predicates evaluated against values flowing through a
//! traversal pipeline.
//!
//! A [`Predicate`] is built once at query-compile time, optionally combined
//! into conjunctions or negated, deep-cloned whenever the owning plan is
//! cloned for a concurrent execution, and discarded with the plan. Every
//! predicate also doubles as a one-element lazy sequence (see
//! [`Predicate::seed`]) so the pipeline can splice it directly into a step
//! sequence as a filter stage.

mod conjunction;
mod subquery;

pub use conjunction::{Conjunction, Connective};
pub use subquery::SubQueryPredicate;

use std::fmt;

use crate::compare::{Compare, Contains};
use crate::error::Result;
use crate::traversal::Traversal;
use crate::value::Value;

/// Closed set of predicate variants.
///
/// `test` is pure in `(operator, reference, candidate)`: the only mutable
/// state is the pending-candidate slot of the lazy protocol and the cursor
/// of an owned nested traversal. Equality and hashing ignore both.
#[derive(Clone, Debug)]
pub enum Predicate {
    /// Binary comparison against a single reference value.
    Comparison {
        /// The comparison operator.
        op: Compare,
        /// Immutable held reference value.
        reference: Value,
        /// Single-slot candidate state for the lazy protocol.
        pending: Option<Value>,
    },
    /// Set-membership test against a reference set.
    Membership {
        /// The membership operator.
        op: Contains,
        /// Deduplicated reference set; insertion order affects display
        /// only.
        reference: Vec<Value>,
        /// Single-slot candidate state for the lazy protocol.
        pending: Option<Value>,
    },
    /// AND/OR combination of child predicates.
    Conjunction(Conjunction),
    /// Existence test over a nested traversal.
    SubQuery(SubQueryPredicate),
}

impl Predicate {
    // ---- factory surface -------------------------------------------------

    /// Candidate equals `value`.
    pub fn eq(value: impl Into<Value>) -> Self {
        Self::comparison(Compare::Eq, value.into())
    }

    /// Candidate does not equal `value`.
    pub fn neq(value: impl Into<Value>) -> Self {
        Self::comparison(Compare::Neq, value.into())
    }

    /// Candidate is strictly less than `value`.
    pub fn lt(value: impl Into<Value>) -> Self {
        Self::comparison(Compare::Lt, value.into())
    }

    /// Candidate is less than or equal to `value`.
    pub fn lte(value: impl Into<Value>) -> Self {
        Self::comparison(Compare::Lte, value.into())
    }

    /// Candidate is strictly greater than `value`.
    pub fn gt(value: impl Into<Value>) -> Self {
        Self::comparison(Compare::Gt, value.into())
    }

    /// Candidate is greater than or equal to `value`.
    pub fn gte(value: impl Into<Value>) -> Self {
        Self::comparison(Compare::Gte, value.into())
    }

    /// Candidate is a member of `values`.
    pub fn within<I>(values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        Self::membership(Contains::Within, values)
    }

    /// Candidate is not a member of `values`.
    pub fn without<I>(values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        Self::membership(Contains::Without, values)
    }

    /// Open interval: `gt(low) AND lt(high)`.
    pub fn inside(low: impl Into<Value>, high: impl Into<Value>) -> Self {
        Self::gt(low).and(Self::lt(high))
    }

    /// Complement of the closed interval: `lt(low) OR gt(high)`.
    pub fn outside(low: impl Into<Value>, high: impl Into<Value>) -> Self {
        Self::lt(low).or(Self::gt(high))
    }

    /// Low-inclusive, high-exclusive interval: `gte(low) AND lt(high)`.
    pub fn between(low: impl Into<Value>, high: impl Into<Value>) -> Self {
        Self::gte(low).and(Self::lt(high))
    }

    /// AND over `children`; fails fast with fewer than two.
    pub fn and_all(children: Vec<Predicate>) -> Result<Self> {
        Conjunction::new(Connective::And, children).map(Predicate::Conjunction)
    }

    /// OR over `children`; fails fast with fewer than two.
    pub fn or_all(children: Vec<Predicate>) -> Result<Self> {
        Conjunction::new(Connective::Or, children).map(Predicate::Conjunction)
    }

    /// Logical complement of `predicate` as a new value.
    pub fn not(predicate: &Predicate) -> Self {
        predicate.negated()
    }

    /// Existence test: the nested traversal yields at least one output.
    pub fn matches(traversal: Box<dyn Traversal>) -> Self {
        Predicate::SubQuery(SubQueryPredicate::new(traversal, false))
    }

    /// Non-existence test: the nested traversal yields no output.
    pub fn not_matches(traversal: Box<dyn Traversal>) -> Self {
        Predicate::SubQuery(SubQueryPredicate::new(traversal, true))
    }

    fn comparison(op: Compare, reference: Value) -> Self {
        Predicate::Comparison {
            op,
            reference,
            pending: None,
        }
    }

    fn membership<I>(op: Contains, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        Predicate::Membership {
            op,
            reference: dedup_values(values),
            pending: None,
        }
    }

    // ---- evaluation ------------------------------------------------------

    /// Applies the predicate to `candidate`.
    ///
    /// Takes `&mut self` because a sub-query variant drives its owned
    /// traversal's cursor; the result is nonetheless a pure function of
    /// the operator, reference value, and candidate.
    pub fn test(&mut self, candidate: &Value) -> Result<bool> {
        match self {
            Predicate::Comparison { op, reference, .. } => op.test(candidate, reference),
            Predicate::Membership { op, reference, .. } => Ok(op.test(candidate, reference)),
            Predicate::Conjunction(conjunction) => conjunction.test(candidate),
            Predicate::SubQuery(subquery) => subquery.test(candidate),
        }
    }

    // ---- structural operations -------------------------------------------

    /// Logical complement as a new value; the receiver is untouched.
    ///
    /// Base predicates swap the operator for its complement with the same
    /// reference, conjunctions apply De Morgan, and sub-queries wrap a
    /// clone of their traversal with the flag flipped.
    pub fn negated(&self) -> Predicate {
        match self {
            Predicate::Comparison { op, reference, .. } => Predicate::Comparison {
                op: op.complement(),
                reference: reference.clone(),
                pending: None,
            },
            Predicate::Membership { op, reference, .. } => Predicate::Membership {
                op: op.complement(),
                reference: reference.clone(),
                pending: None,
            },
            Predicate::Conjunction(conjunction) => {
                Predicate::Conjunction(conjunction.negated())
            }
            Predicate::SubQuery(subquery) => Predicate::SubQuery(subquery.negated()),
        }
    }

    /// Logical complement applied **in place**.
    ///
    /// For conjunctions this is the historical mutating rewrite (see
    /// [`Conjunction::negate_in_place`]); other variants simply replace
    /// themselves with [`Predicate::negated`].
    pub fn negate_in_place(&mut self) {
        match self {
            Predicate::Conjunction(conjunction) => conjunction.negate_in_place(),
            other => *other = other.negated(),
        }
    }

    /// Wraps the receiver and `other` in a new outer AND conjunction with
    /// exactly those two ordered children; existing conjunctions are never
    /// flattened into.
    pub fn and(self, other: Predicate) -> Predicate {
        Predicate::Conjunction(Conjunction::pair(Connective::And, self, other))
    }

    /// Wraps the receiver and `other` in a new outer OR conjunction.
    pub fn or(self, other: Predicate) -> Predicate {
        Predicate::Conjunction(Conjunction::pair(Connective::Or, self, other))
    }

    /// All transitively-owned nested sub-query traversals, in child order.
    ///
    /// Compile-time rewriting uses this to recurse into sub-queries
    /// without knowing concrete predicate variants.
    pub fn nested_queries(&self) -> Vec<&dyn Traversal> {
        match self {
            Predicate::Comparison { .. } | Predicate::Membership { .. } => Vec::new(),
            Predicate::Conjunction(conjunction) => conjunction.nested_queries(),
            Predicate::SubQuery(subquery) => vec![subquery.traversal()],
        }
    }

    /// Mutable access to all transitively-owned nested traversals.
    pub fn nested_queries_mut(&mut self) -> Vec<&mut Box<dyn Traversal>> {
        match self {
            Predicate::Comparison { .. } | Predicate::Membership { .. } => Vec::new(),
            Predicate::Conjunction(conjunction) => conjunction.nested_queries_mut(),
            Predicate::SubQuery(subquery) => vec![subquery.traversal_mut()],
        }
    }

    /// Reference value of a comparison predicate, if any.
    pub fn reference_value(&self) -> Option<&Value> {
        match self {
            Predicate::Comparison { reference, .. } => Some(reference),
            _ => None,
        }
    }

    /// Reference set of a membership predicate, if any, in insertion
    /// order.
    pub fn reference_set(&self) -> Option<&[Value]> {
        match self {
            Predicate::Membership { reference, .. } => Some(reference),
            _ => None,
        }
    }

    /// Replaces the reference value on a comparison predicate; used by
    /// rewrite passes. Returns `false` and leaves the receiver untouched
    /// for any other variant, so callers learn the write did not land.
    pub fn set_reference_value(&mut self, value: Value) -> bool {
        if let Predicate::Comparison { reference, .. } = self {
            *reference = value;
            true
        } else {
            false
        }
    }

    /// Replaces the reference set on a membership predicate, deduplicating
    /// the way construction does. Returns `false` and leaves the receiver
    /// untouched for any other variant.
    pub fn set_reference_set<I>(&mut self, values: I) -> bool
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        if let Predicate::Membership { reference, .. } = self {
            *reference = dedup_values(values);
            true
        } else {
            false
        }
    }

    /// Deterministic structural hash consistent with `==`.
    pub fn hash_code(&self) -> u64 {
        match self {
            Predicate::Comparison { op, reference, .. } => {
                op.hash_code().wrapping_add(reference.hash_code())
            }
            Predicate::Membership { op, reference, .. } => {
                // Order-insensitive combine, matching set equality.
                let elements = reference
                    .iter()
                    .fold(0u64, |acc, value| acc ^ value.hash_code());
                op.hash_code().wrapping_add(elements)
            }
            Predicate::Conjunction(conjunction) => conjunction.hash_code(),
            Predicate::SubQuery(subquery) => subquery.hash_code(),
        }
    }

    // ---- lazy evaluation adapter ----------------------------------------

    /// Primes the predicate with a candidate, making it a one-element
    /// sequence for the pipeline. Conjunctions recursively seed their
    /// children; sub-queries forward the candidate as their traversal's
    /// start input.
    pub fn seed(&mut self, candidate: Value) {
        match self {
            Predicate::Comparison { pending, .. } | Predicate::Membership { pending, .. } => {
                *pending = Some(candidate);
            }
            Predicate::Conjunction(conjunction) => conjunction.seed(candidate),
            Predicate::SubQuery(subquery) => subquery.seed(candidate),
        }
    }

    /// Whether the seeded candidate passes. Side-effect-free on the
    /// predicate's own state and repeatable without re-seeding.
    ///
    /// An unseeded base predicate or conjunction evaluates against `Null`;
    /// an unseeded sub-query is a
    /// [`MissingCandidate`](crate::error::PredicateError::MissingCandidate)
    /// contract violation.
    pub fn has_next(&mut self) -> Result<bool> {
        match self {
            Predicate::Comparison {
                op,
                reference,
                pending,
            } => {
                let candidate = pending.clone().unwrap_or(Value::Null);
                op.test(&candidate, reference)
            }
            Predicate::Membership {
                op,
                reference,
                pending,
            } => {
                let candidate = pending.clone().unwrap_or(Value::Null);
                Ok(op.test(&candidate, reference))
            }
            Predicate::Conjunction(conjunction) => conjunction.has_next(),
            Predicate::SubQuery(subquery) => subquery.has_next(),
        }
    }

    /// Yields the seeded candidate exactly when [`Predicate::has_next`] is
    /// true; `Ok(None)` signals sequence exhaustion (an expected outcome,
    /// not a bug condition).
    pub fn take(&mut self) -> Result<Option<Value>> {
        if self.has_next()? {
            Ok(Some(
                self.pending_candidate().cloned().unwrap_or(Value::Null),
            ))
        } else {
            Ok(None)
        }
    }

    /// Clears the pending-candidate slot (recursively) and resets any
    /// owned nested traversal so re-seeding does not leak prior state.
    pub fn reset(&mut self) {
        match self {
            Predicate::Comparison { pending, .. } | Predicate::Membership { pending, .. } => {
                *pending = None;
            }
            Predicate::Conjunction(conjunction) => conjunction.reset(),
            Predicate::SubQuery(subquery) => subquery.reset(),
        }
    }

    fn pending_candidate(&self) -> Option<&Value> {
        match self {
            Predicate::Comparison { pending, .. } | Predicate::Membership { pending, .. } => {
                pending.as_ref()
            }
            Predicate::Conjunction(conjunction) => conjunction.pending(),
            Predicate::SubQuery(subquery) => subquery.pending(),
        }
    }
}

/// Structural equality: same variant, same operator, equal reference
/// values (both-null equal, membership sets order-insensitive,
/// conjunction children order-sensitive). Pending candidate slots are
/// excluded.
impl PartialEq for Predicate {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Predicate::Comparison {
                    op: a_op,
                    reference: a_ref,
                    ..
                },
                Predicate::Comparison {
                    op: b_op,
                    reference: b_ref,
                    ..
                },
            ) => a_op == b_op && a_ref.equals_value(b_ref),
            (
                Predicate::Membership {
                    op: a_op,
                    reference: a_ref,
                    ..
                },
                Predicate::Membership {
                    op: b_op,
                    reference: b_ref,
                    ..
                },
            ) => a_op == b_op && set_equal(a_ref, b_ref),
            (Predicate::Conjunction(a), Predicate::Conjunction(b)) => a == b,
            (Predicate::SubQuery(a), Predicate::SubQuery(b)) => a == b,
            _ => false,
        }
    }
}

/// Collapses duplicates (by value equality) while preserving insertion
/// order for display.
fn dedup_values<I>(values: I) -> Vec<Value>
where
    I: IntoIterator,
    I::Item: Into<Value>,
{
    let mut reference: Vec<Value> = Vec::new();
    for value in values {
        let value = value.into();
        if !reference.iter().any(|existing| existing.equals_value(&value)) {
            reference.push(value);
        }
    }
    reference
}

/// Both sides are deduplicated at construction, so equal lengths plus a
/// one-way subset check give set equality.
fn set_equal(a: &[Value], b: &[Value]) -> bool {
    a.len() == b.len()
        && a.iter()
            .all(|value| b.iter().any(|other| value.equals_value(other)))
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Comparison { op, reference, .. } => write!(f, "{op}({reference})"),
            Predicate::Membership { op, reference, .. } => {
                write!(f, "{op}([")?;
                for (index, value) in reference.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{value}")?;
                }
                f.write_str("])")
            }
            Predicate::Conjunction(conjunction) => write!(f, "{conjunction}"),
            Predicate::SubQuery(subquery) => write!(f, "{subquery}"),
        }
    }
}
