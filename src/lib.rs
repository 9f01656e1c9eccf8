//! Predicate-evaluation core for a graph traversal query engine.
//!
//! This crate expresses and evaluates boolean filter conditions against
//! values flowing through a pull-based traversal pipeline: simple value
//! comparisons, set-membership tests, AND/OR trees with correct negation
//! semantics, and existence tests over nested sub-queries. Predicate trees
//! compose recursively, act as single-step lazy pipeline stages, and
//! deep-clone structurally so one compiled plan can run in parallel
//! executions without sharing state.

#![warn(missing_docs)]

pub mod compare;
pub mod error;
pub mod predicate;
pub mod traversal;
pub mod value;

pub use compare::{Compare, Contains};
pub use error::{PredicateError, Result};
pub use predicate::{Conjunction, Connective, Predicate, SubQueryPredicate};
pub use traversal::Traversal;
pub use value::Value;
