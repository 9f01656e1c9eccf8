//! Interface consumed from the traversal pipeline collaborator.
//!
//! The host query engine pulls elements through a pipeline of steps; a
//! sub-query predicate owns one such nested pipeline and only needs the
//! narrow capability set below. Concrete traversals live with the host
//! engine, not in this crate.

use std::any::Any;
use std::fmt;

use crate::error::Result;
use crate::value::Value;

/// Capability set a nested traversal must expose to act as the body of a
/// sub-query predicate.
///
/// `has_next` must be idempotent: repeated calls without an intervening
/// `next` report the same answer. Equality and hashing participate in plan
/// cache keys, so they must ignore transient cursor state.
pub trait Traversal: fmt::Debug + Send {
    /// Injects the candidate as the traversal's start input.
    fn seed_start(&mut self, candidate: Value);

    /// Drives (or resumes) the traversal far enough to learn whether it
    /// produces at least one more output.
    fn has_next(&mut self) -> Result<bool>;

    /// Pulls the next output, or `Ok(None)` once exhausted.
    fn next(&mut self) -> Result<Option<Value>>;

    /// Clears cursor and side-effect state so the traversal can be
    /// re-seeded without leaking a prior run.
    fn reset(&mut self);

    /// Deep-clones the traversal, cursor state included.
    fn clone_box(&self) -> Box<dyn Traversal>;

    /// Upcast used by [`Traversal::dyn_eq`] implementations to downcast
    /// the other side.
    fn as_any(&self) -> &dyn Any;

    /// Structural equality across trait objects.
    fn dyn_eq(&self, other: &dyn Traversal) -> bool;

    /// Structural hash consistent with [`Traversal::dyn_eq`].
    fn hash_code(&self) -> u64;
}

impl Clone for Box<dyn Traversal> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}
