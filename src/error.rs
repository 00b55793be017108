use std::fmt;

/// Misuse of a [`CursorMut`](crate::CursorMut). Returned before the tree is
/// touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorError {
    /// The cursor is before the first or after the last element, and has no
    /// element to act on.
    NotPositioned,
    /// The element under the cursor was already removed; move the cursor
    /// before removing or replacing again.
    AlreadyRemoved,
}

impl fmt::Display for CursorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CursorError::NotPositioned => write!(f, "invalid cursor state: not on an element"),
            CursorError::AlreadyRemoved => {
                write!(f, "invalid cursor state: element already removed")
            }
        }
    }
}

impl std::error::Error for CursorError {}

/// TreeError enumerates the broken invariants
/// [`Tree::validate`](crate::Tree::validate) can report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeError<K> {
    /// The root is red.
    RedRoot,
    /// A red node has a red child.
    ConsecutiveReds,
    /// Two paths below the same node cross a different number of black
    /// nodes.
    UnbalancedBlacks { left: usize, right: usize },
    /// In-order neighbours are not strictly increasing.
    SortError(K, K),
    /// A child does not point back at its parent.
    BrokenParent,
    /// The element count disagrees with the nodes reachable from the root.
    LengthMismatch { len: usize, counted: usize },
    /// The arena holds live nodes that are not linked into the tree.
    LeakedNodes { len: usize, live: usize },
}

impl<K: fmt::Debug> fmt::Display for TreeError<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeError::RedRoot => write!(f, "root is red"),
            TreeError::ConsecutiveReds => write!(f, "red node with a red child"),
            TreeError::UnbalancedBlacks { left, right } => {
                write!(f, "unbalanced blacks, left: {left} right: {right}")
            }
            TreeError::SortError(a, b) => write!(f, "keys out of order: {a:?} before {b:?}"),
            TreeError::BrokenParent => write!(f, "child does not link back to its parent"),
            TreeError::LengthMismatch { len, counted } => {
                write!(f, "length is {len} but {counted} nodes are reachable")
            }
            TreeError::LeakedNodes { len, live } => {
                write!(f, "length is {len} but the arena holds {live} live nodes")
            }
        }
    }
}

impl<K: fmt::Debug> std::error::Error for TreeError<K> {}
