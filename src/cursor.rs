use std::{cmp::Ordering, mem};

use log::{debug, warn};

use crate::{Comparator, CursorError, Handle, Link, Natural, Set, Tree};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Position {
    BeforeFirst,
    At(Handle),
    /// The element the cursor was on is gone; its neighbours at the time of
    /// removal are kept so stepping resumes where it left off.
    Removed { prev: Link, next: Link },
    AfterLast,
}

/// A bidirectional cursor over a [`Tree`] that can remove the element under
/// it without losing its place.
///
/// A fresh cursor sits before the first element; call
/// [`move_next`](CursorMut::move_next) to reach it.
///
/// ```
/// use rbindex::Tree;
///
/// let mut tree: Tree<i32, ()> = (0..10).map(|k| (k, ())).collect();
/// let mut cursor = tree.cursor_mut();
/// while cursor.move_next() {
///     if cursor.key().is_some_and(|k| k % 3 != 0) {
///         cursor.remove().unwrap();
///     }
/// }
/// assert_eq!(tree.keys().copied().collect::<Vec<_>>(), [0, 3, 6, 9]);
/// ```
pub struct CursorMut<'a, K, V, C = Natural> {
    tree: &'a mut Tree<K, V, C>,
    position: Position,
}

impl<K, V, C> Tree<K, V, C> {
    pub fn cursor_mut(&mut self) -> CursorMut<'_, K, V, C> {
        CursorMut {
            tree: self,
            position: Position::BeforeFirst,
        }
    }
}

impl<K, V, C: Comparator<K>> Tree<K, V, C> {
    /// A cursor already on `key`, or `None` if `key` is absent.
    pub fn cursor_mut_at(&mut self, key: &K) -> Option<CursorMut<'_, K, V, C>> {
        let handle = self.find(key)?;
        Some(CursorMut {
            tree: self,
            position: Position::At(handle),
        })
    }
}

impl<'a, K, V, C> CursorMut<'a, K, V, C> {
    /// Steps to the next element, returning `false` once the cursor runs
    /// past the last one.
    pub fn move_next(&mut self) -> bool {
        let next = match self.position {
            Position::BeforeFirst => self.tree.root.first(),
            Position::At(handle) => self.tree.root.nodes.next(handle),
            Position::Removed { next, .. } => next,
            Position::AfterLast => None,
        };
        self.position = next.map_or(Position::AfterLast, Position::At);
        next.is_some()
    }

    /// Steps to the previous element, returning `false` once the cursor runs
    /// before the first one.
    pub fn move_prev(&mut self) -> bool {
        let prev = match self.position {
            Position::BeforeFirst => None,
            Position::At(handle) => self.tree.root.nodes.prev(handle),
            Position::Removed { prev, .. } => prev,
            Position::AfterLast => self.tree.root.last(),
        };
        self.position = prev.map_or(Position::BeforeFirst, Position::At);
        prev.is_some()
    }

    fn current(&self) -> Option<Handle> {
        match self.position {
            Position::At(handle) => Some(handle),
            _ => None,
        }
    }

    pub fn key(&self) -> Option<&K> {
        self.entry().map(|(k, _)| k)
    }

    pub fn value(&self) -> Option<&V> {
        self.entry().map(|(_, v)| v)
    }

    pub fn value_mut(&mut self) -> Option<&mut V> {
        let handle = self.current()?;
        Some(&mut self.tree.root.nodes.get_mut(handle).value)
    }

    pub fn entry(&self) -> Option<(&K, &V)> {
        self.current().map(|h| self.tree.entry(h))
    }

    /// The element under the cursor, or the reason there is none.
    fn positioned(&self, op: &str) -> Result<Handle, CursorError> {
        let err = match self.position {
            Position::At(handle) => return Ok(handle),
            Position::Removed { .. } => CursorError::AlreadyRemoved,
            Position::BeforeFirst | Position::AfterLast => CursorError::NotPositioned,
        };
        warn!("cursor {op}: {err}");
        Err(err)
    }

    /// Replaces the value under the cursor, returning the old one. The key,
    /// and so the order, is untouched.
    pub fn set_value(&mut self, value: V) -> Result<V, CursorError> {
        let handle = self.positioned("set_value")?;
        Ok(mem::replace(
            &mut self.tree.root.nodes.get_mut(handle).value,
            value,
        ))
    }

    /// Removes the element under the cursor and returns it.
    ///
    /// The cursor keeps its place: the next [`move_next`](Self::move_next)
    /// lands on the removed element's successor and the next
    /// [`move_prev`](Self::move_prev) on its predecessor. Removing again
    /// before moving fails with [`CursorError::AlreadyRemoved`].
    pub fn remove(&mut self) -> Result<(K, V), CursorError> {
        let handle = self.positioned("remove")?;
        let prev = self.tree.root.nodes.prev(handle);
        let next = self.tree.root.nodes.next(handle);
        // Erasing never moves another key to a different handle, so the
        // neighbours stay valid.
        let entry = self.tree.erase(handle);
        self.position = Position::Removed { prev, next };
        debug!("cursor: removed {handle:?}, {} left", self.tree.len);
        Ok(entry)
    }
}

/// A [`CursorMut`] over the elements of a [`Set`].
pub struct SetCursorMut<'a, T, C = Natural> {
    inner: CursorMut<'a, T, (), C>,
}

impl<T, C> Set<T, C> {
    pub fn cursor_mut(&mut self) -> SetCursorMut<'_, T, C> {
        SetCursorMut {
            inner: self.tree.cursor_mut(),
        }
    }
}

impl<T, C: Comparator<T>> Set<T, C> {
    /// A cursor already on `element`, or `None` if `element` is absent.
    pub fn cursor_mut_at(&mut self, element: &T) -> Option<SetCursorMut<'_, T, C>> {
        self.tree
            .cursor_mut_at(element)
            .map(|inner| SetCursorMut { inner })
    }
}

impl<'a, T, C> SetCursorMut<'a, T, C> {
    pub fn move_next(&mut self) -> bool {
        self.inner.move_next()
    }

    pub fn move_prev(&mut self) -> bool {
        self.inner.move_prev()
    }

    pub fn get(&self) -> Option<&T> {
        self.inner.key()
    }

    pub fn remove(&mut self) -> Result<T, CursorError> {
        self.inner.remove().map(|(element, _)| element)
    }
}

impl<'a, T, C: Comparator<T>> SetCursorMut<'a, T, C> {
    /// Replaces the element under the cursor with `element`, returning the
    /// old one.
    ///
    /// When `element` compares equal to the old one it takes its place in
    /// the tree. Otherwise the old element is removed and `element` inserted
    /// wherever it sorts; the cursor then behaves as after
    /// [`remove`](Self::remove). If an equal element is already stored
    /// elsewhere, that one is kept and `element` is dropped.
    pub fn replace(&mut self, element: T) -> Result<T, CursorError> {
        let handle = self.inner.positioned("replace")?;
        let tree = &mut *self.inner.tree;
        let node = tree.root.nodes.get_mut(handle);
        if tree.cmp.compare(&element, &node.key) == Ordering::Equal {
            return Ok(mem::replace(&mut node.key, element));
        }

        let (old, ()) = self.inner.remove()?;
        self.inner.tree.insert(element, ());
        debug!("cursor: element reinserted, {} in set", self.inner.tree.len);
        Ok(old)
    }
}
