use thiserror::Error;

/// Errors surfaced by tree operations.
///
/// `DuplicateKey` and `KeyNotFound` are ordinary caller errors and leave the
/// tree exactly as it was.  `InvariantViolation` is different: it is only
/// produced by [`crate::RbTree::check_invariants`] and
/// [`crate::RbTree::from_parts`], and it reports a defect, not a
/// recoverable condition.  Nothing in this crate attempts repair.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("key already exists")]
    DuplicateKey,

    #[error("key not found")]
    KeyNotFound,

    #[error("red-black invariant violated: {0}")]
    InvariantViolation(String),
}
