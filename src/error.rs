//! The error type shared by fallible tree operations.

use thiserror::Error;

/// The ways a tree operation can refuse to do what was asked. Both leave the
/// tree untouched.
///
/// A missing element is not an error: lookups and deletes return `None`.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TreeError {
    /// An element comparing equal to the inserted one is already stored.
    #[error("an equal element is already in the tree")]
    DuplicateKey,
    /// The position handed to the tree points into a different tree.
    #[error("position does not belong to this tree")]
    InvalidPosition,
}
