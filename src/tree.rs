use std::{cmp::Ordering::*, fmt::Debug, mem};

use log::debug;

use crate::{Comparator, Direction, Handle, Link, Natural, Node, Root, Tree};

impl<K, V> Tree<K, V, Natural> {
    /// An empty tree ordered by `K`'s [`Ord`] implementation.
    pub const fn new() -> Self {
        Tree {
            root: Root::new(),
            len: 0,
            cmp: Natural,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_comparator(capacity, Natural)
    }
}

impl<K, V, C: Default> Default for Tree<K, V, C> {
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<K, V, C> Tree<K, V, C> {
    /// An empty tree ordered by `cmp`.
    pub const fn with_comparator(cmp: C) -> Self {
        Tree {
            root: Root::new(),
            len: 0,
            cmp,
        }
    }

    pub fn with_capacity_and_comparator(capacity: usize, cmp: C) -> Self {
        Tree {
            root: Root::with_capacity(capacity),
            len: 0,
            cmp,
        }
    }

    pub fn comparator(&self) -> &C {
        &self.cmp
    }

    /// Number of nodes the tree can hold without reallocating.
    pub fn capacity(&self) -> usize {
        self.root.nodes.capacity()
    }

    pub fn reserve(&mut self, additional: usize) {
        self.root.nodes.reserve(additional);
    }

    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn clear(&mut self) {
        self.root.clear();
        self.len = 0;
    }

    /// The entry with the smallest key.
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.root.first().map(|h| self.entry(h))
    }

    /// The entry with the greatest key.
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.root.last().map(|h| self.entry(h))
    }

    pub fn pop_first(&mut self) -> Option<(K, V)> {
        let first = self.root.first()?;
        Some(self.erase(first))
    }

    pub fn pop_last(&mut self) -> Option<(K, V)> {
        let last = self.root.last()?;
        Some(self.erase(last))
    }

    /// Calls `f` on every entry in ascending key order.
    pub fn each<F>(&self, mut f: F)
    where
        F: FnMut(&K, &V),
    {
        self.iter().for_each(|(k, v)| f(k, v));
    }

    /// Calls `f` on every entry in descending key order.
    pub fn each_rev<F>(&self, mut f: F)
    where
        F: FnMut(&K, &V),
    {
        self.iter().rev().for_each(|(k, v)| f(k, v));
    }

    /// Keeps only the entries for which `f` returns `true`, visiting them in
    /// ascending key order.
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&K, &mut V) -> bool,
    {
        let mut current = self.root.first();
        while let Some(handle) = current {
            current = self.root.nodes.next(handle);
            let node = self.root.nodes.get_mut(handle);
            if !f(&node.key, &mut node.value) {
                // Erasing never moves the surviving nodes, so `current` stays
                // valid.
                self.erase(handle);
            }
        }
    }

    #[inline]
    pub(crate) fn entry(&self, handle: Handle) -> (&K, &V) {
        let node = self.root.nodes.get(handle);
        (&node.key, &node.value)
    }

    pub(crate) fn erase(&mut self, handle: Handle) -> (K, V) {
        let node = self.root.erase(handle);
        self.len -= 1;
        (node.key, node.value)
    }
}

impl<K, V, C: Comparator<K>> Tree<K, V, C> {
    /// Descends from the root to the node holding `key`.
    pub(crate) fn find(&self, key: &K) -> Link {
        let mut link = self.root.root;
        while let Some(handle) = link {
            let node = self.root.nodes.get(handle);
            link = match self.cmp.compare(key, &node.key) {
                Equal => return Some(handle),
                Less => node.left,
                Greater => node.right,
            };
        }
        None
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// `true` when every key in `keys` is present. Vacuously `true` for no
    /// keys.
    pub fn contains_all<'k, I>(&self, keys: I) -> bool
    where
        I: IntoIterator<Item = &'k K>,
        K: 'k,
    {
        keys.into_iter().all(|k| self.contains_key(k))
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.get_key_value(key).map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let handle = self.find(key)?;
        Some(&mut self.root.nodes.get_mut(handle).value)
    }

    pub fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        self.find(key).map(|h| self.entry(h))
    }

    /// Inserts `value` under `key`.
    ///
    /// If the key was already present its value is replaced in place and the
    /// old value returned; the stored key is kept and the tree's shape does
    /// not change.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let mut link = self.root.root;
        let mut parent = None;
        let mut direction = Direction::Left;

        while let Some(candidate) = link {
            let node = self.root.nodes.get_mut(candidate);
            parent = link;
            match self.cmp.compare(&key, &node.key) {
                Equal => return Some(mem::replace(&mut node.value, value)),
                Less => {
                    direction = Direction::Left;
                    link = node.left;
                }
                Greater => {
                    direction = Direction::Right;
                    link = node.right;
                }
            }
        }

        self.root.link(Node::new(key, value), parent, direction);
        self.len += 1;
        None
    }

    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.remove_entry(key).map(|(_, v)| v)
    }

    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        let handle = self.find(key)?;
        Some(self.erase(handle))
    }

    /// Removes every key in `keys`, returning the value of the last one that
    /// was present.
    pub fn remove_all<'k, I>(&mut self, keys: I) -> Option<V>
    where
        I: IntoIterator<Item = &'k K>,
        K: 'k,
    {
        let mut removed = 0;
        let mut last = None;
        for key in keys {
            if let Some(value) = self.remove(key) {
                removed += 1;
                last = Some(value);
            }
        }
        debug!("remove_all: {removed} removed, {} left", self.len);
        last
    }
}

impl<K, V, C: Comparator<K>> Extend<(K, V)> for Tree<K, V, C> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<'a, K: Copy, V: Copy, C: Comparator<K>> Extend<(&'a K, &'a V)> for Tree<K, V, C> {
    fn extend<I: IntoIterator<Item = (&'a K, &'a V)>>(&mut self, iter: I) {
        self.extend(iter.into_iter().map(|(&k, &v)| (k, v)));
    }
}

impl<K, V, C: Comparator<K> + Default> FromIterator<(K, V)> for Tree<K, V, C> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = Tree::default();
        tree.extend(iter);
        tree
    }
}

impl<K, V, C: Comparator<K> + Default, const N: usize> From<[(K, V); N]> for Tree<K, V, C> {
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl<K: PartialEq, V: PartialEq, C> PartialEq for Tree<K, V, C> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq, C> Eq for Tree<K, V, C> {}

impl<K: Debug, V: Debug, C> Debug for Tree<K, V, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
