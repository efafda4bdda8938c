//! Error types for list and queue operations.

use std::fmt;

/// Failure of a list, cursor or queue operation.
///
/// All variants are reported synchronously at the call that violated the
/// precondition; the list itself is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListError {
    /// Access or removal at the front or back of an empty list.
    EmptyContainer,
    /// Removal at the ghost node, or a position that does not belong to
    /// the list.
    InvalidIterator,
    /// Dereference of a cursor located at the ghost node.
    NullDereference,
    /// A non-cyclic cursor step that would pass through the ghost node.
    CrossedEnd,
}

impl fmt::Display for ListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListError::EmptyContainer => f.write_str("the list is empty"),
            ListError::InvalidIterator => {
                f.write_str("the position does not denote an element of this list")
            }
            ListError::NullDereference => f.write_str("cannot dereference the end position"),
            ListError::CrossedEnd => f.write_str("cursor step across the ghost boundary"),
        }
    }
}

impl std::error::Error for ListError {}
