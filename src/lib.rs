//! An ordered map and set backed by a red-black tree.
//!
//! Nodes live in an arena and refer to each other through [`Handle`]s, so
//! the parent links the rebalancing needs never fight the borrow checker.
//! The ordering is always supplied by the caller through a [`Comparator`];
//! [`Natural`] is the one to pick for keys that are already [`Ord`].
//!
//! ```
//! use rbindex::Tree;
//!
//! let mut tree = Tree::new();
//! for k in [5, 3, 8, 1, 4, 7, 9] {
//!     tree.insert(k, k * 10);
//! }
//! tree.remove(&5);
//! assert_eq!(tree.keys().copied().collect::<Vec<_>>(), [1, 3, 4, 7, 8, 9]);
//! assert_eq!(tree.floor(&6), Some((&4, &40)));
//! assert_eq!(tree.ceiling(&6), Some((&7, &70)));
//! ```
mod arena;
#[cfg(feature = "serde")]
mod codec;
mod compare;
mod cursor;
mod error;
mod iter;
mod navigate;
mod node;
mod root;
mod set;
mod tree;
mod validate;

pub use compare::{Comparator, Natural, Reverse};
pub use cursor::{CursorMut, SetCursorMut};
pub use error::{CursorError, TreeError};
pub use iter::set::{SetIntoIter, SetIter};
pub use iter::tree::{IntoIter, IntoKeys, IntoValues, Iter, IterMut, Keys, Values, ValuesMut};
pub use validate::Stats;

use arena::{Arena, Handle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Color {
    Red,
    Black,
}

/// A possibly absent child or parent. An absent node always reads as black.
pub(crate) type Link = Option<Handle>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    Left,
    Right,
}

#[derive(Clone)]
pub(crate) struct Node<K, V> {
    pub(crate) parent: Link,
    pub(crate) left: Link,
    pub(crate) right: Link,
    pub(crate) color: Color,
    pub(crate) key: K,
    pub(crate) value: V,
}

/// The structural half of a tree: node storage and the root link.
///
/// Everything in here is order agnostic; the comparator only matters when
/// choosing where a new node goes, which is [`Tree`]'s business.
#[derive(Clone)]
pub(crate) struct Root<K, V> {
    pub(crate) nodes: Arena<Node<K, V>>,
    pub(crate) root: Link,
}

/// An ordered map from `K` to `V`, ordered by the comparator `C`.
#[derive(Clone)]
pub struct Tree<K, V, C = Natural> {
    pub(crate) root: Root<K, V>,
    pub(crate) len: usize,
    pub(crate) cmp: C,
}

/// An ordered set of `T`, ordered by the comparator `C`.
#[derive(Clone)]
pub struct Set<T, C = Natural> {
    pub(crate) tree: Tree<T, (), C>,
}
