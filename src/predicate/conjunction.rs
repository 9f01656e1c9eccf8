//! AND/OR composition of two or more child predicates.

use std::fmt;

use tracing::debug;

use crate::error::{PredicateError, Result};
use crate::predicate::Predicate;
use crate::traversal::Traversal;
use crate::value::Value;

/// Discriminant selecting how child results combine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Connective {
    /// All children must pass.
    And,
    /// At least one child must pass.
    Or,
}

impl Connective {
    /// De Morgan dual: and↔or.
    pub const fn complement(self) -> Self {
        match self {
            Connective::And => Connective::Or,
            Connective::Or => Connective::And,
        }
    }

    /// Lowercase connective name.
    pub const fn name(self) -> &'static str {
        match self {
            Connective::And => "and",
            Connective::Or => "or",
        }
    }
}

/// Boolean combination of an ordered list of child predicates.
///
/// Children are evaluated strictly in list order with short-circuiting and
/// must never be reordered or parallelized: a child may own a nested
/// sub-query with observable side effects.
#[derive(Clone, Debug)]
pub struct Conjunction {
    op: Connective,
    children: Vec<Predicate>,
    pending: Option<Value>,
}

impl Conjunction {
    /// Builds a conjunction over `children`, rejecting fewer than two.
    pub fn new(op: Connective, children: Vec<Predicate>) -> Result<Self> {
        if children.len() < 2 {
            return Err(PredicateError::ConjunctionArity {
                got: children.len(),
            });
        }
        Ok(Self {
            op,
            children,
            pending: None,
        })
    }

    /// Internal two-child constructor used by `and`/`or` combinators,
    /// which always satisfy the arity contract.
    pub(crate) fn pair(op: Connective, left: Predicate, right: Predicate) -> Self {
        Self {
            op,
            children: vec![left, right],
            pending: None,
        }
    }

    /// The AND/OR discriminant.
    pub fn connective(&self) -> Connective {
        self.op
    }

    /// Ordered child predicates.
    pub fn children(&self) -> &[Predicate] {
        &self.children
    }

    /// Evaluates the candidate against every child in list order.
    ///
    /// AND stops at the first false child, OR at the first true one.
    pub fn test(&mut self, candidate: &Value) -> Result<bool> {
        match self.op {
            Connective::And => {
                for child in &mut self.children {
                    if !child.test(candidate)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            Connective::Or => {
                for child in &mut self.children {
                    if child.test(candidate)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
        }
    }

    /// Returns the De Morgan complement as a new value: the connective
    /// flips and every child is negated. The receiver is untouched.
    pub fn negated(&self) -> Self {
        Self {
            op: self.op.complement(),
            children: self.children.iter().map(Predicate::negated).collect(),
            pending: None,
        }
    }

    /// Applies the De Morgan complement **in place**: the connective flips
    /// and every child is negated where it stands.
    ///
    /// This mutates the receiver rather than returning a fresh predicate.
    /// Strategy-rewriting passes that repeatedly rewrite a plan use it to
    /// avoid re-wrapping; everything else should prefer
    /// [`Conjunction::negated`].
    pub fn negate_in_place(&mut self) {
        debug!(
            connective = self.op.name(),
            children = self.children.len(),
            "negating conjunction in place"
        );
        self.op = self.op.complement();
        for child in &mut self.children {
            child.negate_in_place();
        }
    }

    /// Deterministic hash: each child's hash rotated left by its index,
    /// XOR-combined. Order-sensitive, matching equality.
    pub fn hash_code(&self) -> u64 {
        let mut acc = 0u64;
        for (index, child) in self.children.iter().enumerate() {
            acc ^= child.hash_code().rotate_left(index as u32);
        }
        acc
    }

    pub(crate) fn seed(&mut self, candidate: Value) {
        for child in &mut self.children {
            child.seed(candidate.clone());
        }
        self.pending = Some(candidate);
    }

    pub(crate) fn has_next(&mut self) -> Result<bool> {
        let candidate = self.pending.clone().unwrap_or(Value::Null);
        self.test(&candidate)
    }

    pub(crate) fn pending(&self) -> Option<&Value> {
        self.pending.as_ref()
    }

    pub(crate) fn reset(&mut self) {
        self.pending = None;
        for child in &mut self.children {
            child.reset();
        }
    }

    pub(crate) fn nested_queries(&self) -> Vec<&dyn Traversal> {
        self.children
            .iter()
            .flat_map(Predicate::nested_queries)
            .collect()
    }

    pub(crate) fn nested_queries_mut(&mut self) -> Vec<&mut Box<dyn Traversal>> {
        self.children
            .iter_mut()
            .flat_map(Predicate::nested_queries_mut)
            .collect()
    }
}

/// Order-sensitive: the same children in a different order are unequal
/// even though evaluation truth is order-independent. Pending candidate
/// slots are excluded.
impl PartialEq for Conjunction {
    fn eq(&self, other: &Self) -> bool {
        self.op == other.op && self.children == other.children
    }
}

impl fmt::Display for Conjunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.op.name())?;
        for (index, child) in self.children.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{child}")?;
        }
        f.write_str(")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_requires_two_children() {
        let err = Conjunction::new(Connective::And, vec![Predicate::eq(1)]).unwrap_err();
        assert_eq!(err, PredicateError::ConjunctionArity { got: 1 });
        assert!(Conjunction::new(Connective::Or, Vec::new()).is_err());
        assert!(Conjunction::new(Connective::And, vec![Predicate::eq(1), Predicate::gt(0)]).is_ok());
    }

    #[test]
    fn and_short_circuits_on_first_false() -> Result<()> {
        // The second child would raise a type mismatch if evaluated.
        let mut conj = Conjunction::new(
            Connective::And,
            vec![Predicate::eq(1), Predicate::lt("banana")],
        )?;
        assert!(!conj.test(&Value::Int(2))?);
        assert!(conj.test(&Value::Int(1)).is_err());
        Ok(())
    }

    #[test]
    fn or_short_circuits_on_first_true() -> Result<()> {
        let mut conj = Conjunction::new(
            Connective::Or,
            vec![Predicate::eq(1), Predicate::lt("banana")],
        )?;
        assert!(conj.test(&Value::Int(1))?);
        assert!(conj.test(&Value::Int(2)).is_err());
        Ok(())
    }

    #[test]
    fn negated_applies_de_morgan() -> Result<()> {
        let conj = Conjunction::new(Connective::And, vec![Predicate::gt(1), Predicate::lt(10)])?;
        let negated = conj.negated();
        assert_eq!(negated.connective(), Connective::Or);
        assert_eq!(negated.children()[0], Predicate::lte(1));
        assert_eq!(negated.children()[1], Predicate::gte(10));
        // Receiver untouched.
        assert_eq!(conj.connective(), Connective::And);
        Ok(())
    }

    #[test]
    fn negate_in_place_mutates_receiver() -> Result<()> {
        let mut conj =
            Conjunction::new(Connective::And, vec![Predicate::gt(1), Predicate::lt(10)])?;
        conj.negate_in_place();
        assert_eq!(conj.connective(), Connective::Or);
        assert!(conj.test(&Value::Int(0))?);
        assert!(!conj.test(&Value::Int(5))?);
        Ok(())
    }

    #[test]
    fn equality_is_order_sensitive() -> Result<()> {
        let a = Conjunction::new(Connective::And, vec![Predicate::gt(1), Predicate::lt(10)])?;
        let b = Conjunction::new(Connective::And, vec![Predicate::lt(10), Predicate::gt(1)])?;
        assert_ne!(a, b);
        assert_ne!(a.hash_code(), b.hash_code());

        let c = Conjunction::new(Connective::And, vec![Predicate::gt(1), Predicate::lt(10)])?;
        assert_eq!(a, c);
        assert_eq!(a.hash_code(), c.hash_code());
        Ok(())
    }

    #[test]
    fn truth_is_order_independent() -> Result<()> {
        let mut a = Conjunction::new(Connective::And, vec![Predicate::gt(1), Predicate::lt(10)])?;
        let mut b = Conjunction::new(Connective::And, vec![Predicate::lt(10), Predicate::gt(1)])?;
        for v in [0i64, 1, 5, 9, 10, 11] {
            assert_eq!(a.test(&Value::Int(v))?, b.test(&Value::Int(v))?);
        }
        Ok(())
    }

    #[test]
    fn displays_children_in_order() -> Result<()> {
        let conj = Conjunction::new(Connective::Or, vec![Predicate::lt(1), Predicate::gt(10)])?;
        assert_eq!(conj.to_string(), "or(lt(1), gt(10))");
        Ok(())
    }
}
