use std::iter::FusedIterator;

use crate::{Arena, Link, Node, Tree};

impl<K, V, C> Tree<K, V, C> {
    /// Gets an iterator over the entries of the map, sorted by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbindex::Tree;
    ///
    /// let mut a = Tree::new();
    /// a.insert(3, "c");
    /// a.insert(2, "b");
    /// a.insert(1, "a");
    ///
    /// let (first_key, first_value) = a.iter().next().unwrap();
    /// assert_eq!((*first_key, *first_value), (1, "a"));
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            nodes: &self.root.nodes,
            first: self.root.first(),
            last: self.root.last(),
            len: self.len,
        }
    }

    /// Gets a mutable iterator over the entries of the map, sorted by key.
    ///
    /// The entries are gathered up front, so creating the iterator costs
    /// O(n) time and memory even if only a few items are taken.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        let mut order = Vec::with_capacity(self.len);
        let mut current = self.root.first();
        while let Some(handle) = current {
            order.push(handle);
            current = self.root.nodes.next(handle);
        }

        // Split the arena into one disjoint borrow per slot, then hand them
        // out in key order.
        let mut slots: Vec<Option<(&K, &mut V)>> = self
            .root
            .nodes
            .slots_mut()
            .map(|slot| slot.map(|node| (&node.key, &mut node.value)))
            .collect();
        let entries: Vec<(&K, &mut V)> = order
            .into_iter()
            .filter_map(|h| slots[h.to_index()].take())
            .collect();

        IterMut {
            inner: entries.into_iter(),
        }
    }

    /// Gets an iterator over the keys of the map, in sorted order.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbindex::Tree;
    ///
    /// let mut a = Tree::new();
    /// a.insert(2, "b");
    /// a.insert(1, "a");
    ///
    /// let keys: Vec<_> = a.keys().cloned().collect();
    /// assert_eq!(keys, [1, 2]);
    /// ```
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Gets an iterator over the values of the map, in order by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbindex::Tree;
    ///
    /// let mut a = Tree::new();
    /// a.insert(1, "hello");
    /// a.insert(2, "goodbye");
    ///
    /// let values: Vec<&str> = a.values().cloned().collect();
    /// assert_eq!(values, ["hello", "goodbye"]);
    /// ```
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Gets a mutable iterator over the values of the map, in order by key.
    ///
    /// Like [`iter_mut`](Self::iter_mut), this gathers every entry up front.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbindex::Tree;
    ///
    /// let mut a = Tree::new();
    /// a.insert(1, String::from("hello"));
    /// a.insert(2, String::from("goodbye"));
    ///
    /// for value in a.values_mut() {
    ///     value.push_str("!");
    /// }
    ///
    /// let values: Vec<String> = a.values().cloned().collect();
    /// assert_eq!(values, [String::from("hello!"),
    ///                     String::from("goodbye!")]);
    /// ```
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut {
            inner: self.iter_mut(),
        }
    }

    /// Creates a consuming iterator visiting all the keys, in sorted order.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbindex::Tree;
    ///
    /// let mut a = Tree::new();
    /// a.insert(2, "b");
    /// a.insert(1, "a");
    ///
    /// let keys: Vec<i32> = a.into_keys().collect();
    /// assert_eq!(keys, [1, 2]);
    /// ```
    #[inline]
    pub fn into_keys(self) -> IntoKeys<K, V, C> {
        IntoKeys {
            inner: self.into_iter(),
        }
    }

    /// Creates a consuming iterator visiting all the values, in order by key.
    #[inline]
    pub fn into_values(self) -> IntoValues<K, V, C> {
        IntoValues {
            inner: self.into_iter(),
        }
    }
}

pub struct Iter<'a, K, V> {
    nodes: &'a Arena<Node<K, V>>,
    first: Link,
    last: Link,
    len: usize,
}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Iter { ..*self }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        let handle = self.first?;
        let node = self.nodes.get(handle);
        self.len -= 1;
        self.first = self.nodes.next(handle);
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }

    fn last(mut self) -> Option<(&'a K, &'a V)> {
        self.next_back()
    }

    fn min(mut self) -> Option<(&'a K, &'a V)>
    where
        (&'a K, &'a V): Ord,
    {
        self.next()
    }

    fn max(mut self) -> Option<(&'a K, &'a V)>
    where
        (&'a K, &'a V): Ord,
    {
        self.next_back()
    }
}

impl<'a, K, V> DoubleEndedIterator for Iter<'a, K, V> {
    fn next_back(&mut self) -> Option<(&'a K, &'a V)> {
        if self.len == 0 {
            return None;
        }
        let handle = self.last?;
        let node = self.nodes.get(handle);
        self.len -= 1;
        self.last = self.nodes.prev(handle);
        Some((&node.key, &node.value))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<'a, K, V, C> IntoIterator for &'a Tree<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

pub struct IterMut<'a, K, V> {
    inner: std::vec::IntoIter<(&'a K, &'a mut V)>,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IterMut<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}
impl<K, V> FusedIterator for IterMut<'_, K, V> {}

impl<'a, K, V, C> IntoIterator for &'a mut Tree<K, V, C> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> IterMut<'a, K, V> {
        self.iter_mut()
    }
}

pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<K, V> Clone for Keys<'_, K, V> {
    fn clone(&self) -> Self {
        Keys {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K, V> DoubleEndedIterator for Keys<'a, K, V> {
    fn next_back(&mut self) -> Option<&'a K> {
        self.inner.next_back().map(|(k, _)| k)
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}
impl<K, V> FusedIterator for Keys<'_, K, V> {}

pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K, V> DoubleEndedIterator for Values<'a, K, V> {
    fn next_back(&mut self) -> Option<&'a V> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}
impl<K, V> FusedIterator for Values<'_, K, V> {}

pub struct ValuesMut<'a, K, V> {
    inner: IterMut<'a, K, V>,
}

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<&'a mut V> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K, V> DoubleEndedIterator for ValuesMut<'a, K, V> {
    fn next_back(&mut self) -> Option<&'a mut V> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<K, V> ExactSizeIterator for ValuesMut<'_, K, V> {}
impl<K, V> FusedIterator for ValuesMut<'_, K, V> {}

pub struct IntoIter<K, V, C>(Tree<K, V, C>);

impl<K, V, C> IntoIterator for Tree<K, V, C> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V, C>;

    /// Gets an owning iterator over the entries of the map, sorted by key.
    fn into_iter(self) -> IntoIter<K, V, C> {
        IntoIter(self)
    }
}

impl<K, V, C> Iterator for IntoIter<K, V, C> {
    type Item = (K, V);

    fn next(&mut self) -> Option<(K, V)> {
        self.0.pop_first()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.0.len, Some(self.0.len))
    }

    fn last(mut self) -> Option<(K, V)> {
        self.next_back()
    }
}

impl<K, V, C> DoubleEndedIterator for IntoIter<K, V, C> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.0.pop_last()
    }
}

impl<K, V, C> ExactSizeIterator for IntoIter<K, V, C> {}
impl<K, V, C> FusedIterator for IntoIter<K, V, C> {}

pub struct IntoKeys<K, V, C> {
    inner: IntoIter<K, V, C>,
}

impl<K, V, C> Iterator for IntoKeys<K, V, C> {
    type Item = K;

    fn next(&mut self) -> Option<K> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V, C> DoubleEndedIterator for IntoKeys<K, V, C> {
    fn next_back(&mut self) -> Option<K> {
        self.inner.next_back().map(|(k, _)| k)
    }
}

impl<K, V, C> ExactSizeIterator for IntoKeys<K, V, C> {}
impl<K, V, C> FusedIterator for IntoKeys<K, V, C> {}

pub struct IntoValues<K, V, C> {
    inner: IntoIter<K, V, C>,
}

impl<K, V, C> Iterator for IntoValues<K, V, C> {
    type Item = V;

    fn next(&mut self) -> Option<V> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V, C> DoubleEndedIterator for IntoValues<K, V, C> {
    fn next_back(&mut self) -> Option<V> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<K, V, C> ExactSizeIterator for IntoValues<K, V, C> {}
impl<K, V, C> FusedIterator for IntoValues<K, V, C> {}

#[cfg(test)]
mod test {
    use crate::Tree;
    use pretty_assertions::assert_eq;

    fn tree(n: i32) -> Tree<i32, i32> {
        (0..n).rev().map(|k| (k, k * 10)).collect()
    }

    #[test]
    fn iter_is_sorted_both_ways() {
        let tree = tree(20);
        let forward: Vec<i32> = tree.iter().map(|(k, _)| *k).collect();
        let backward: Vec<i32> = tree.iter().rev().map(|(k, _)| *k).collect();
        assert_eq!((0..20).collect::<Vec<_>>(), forward);
        assert_eq!((0..20).rev().collect::<Vec<_>>(), backward);
    }

    #[test]
    fn iter_meets_in_the_middle() {
        let tree = tree(5);
        let mut iter = tree.iter();
        assert_eq!(5, iter.len());
        assert_eq!(Some((&0, &0)), iter.next());
        assert_eq!(Some((&4, &40)), iter.next_back());
        assert_eq!(Some((&1, &10)), iter.next());
        assert_eq!(Some((&3, &30)), iter.next_back());
        assert_eq!(Some((&2, &20)), iter.next());
        assert_eq!(0, iter.len());
        assert_eq!(None, iter.next());
        assert_eq!(None, iter.next_back());
    }

    #[test]
    fn iter_empty() {
        let tree: Tree<i32, i32> = Tree::new();
        assert_eq!(None, tree.iter().next());
        assert_eq!(None, tree.keys().next_back());
        assert_eq!(None, tree.iter().last());
    }

    #[test]
    fn iter_is_restartable() {
        let tree = tree(3);
        let keys = tree.keys();
        assert_eq!(vec![&0, &1, &2], keys.clone().collect::<Vec<_>>());
        assert_eq!(vec![&0, &1, &2], keys.collect::<Vec<_>>());
        assert_eq!(vec![&0, &10, &20], tree.values().collect::<Vec<_>>());
    }

    #[test]
    fn iter_mut_in_order() {
        let mut tree = tree(10);
        let mut seen = vec![];
        for (k, v) in tree.iter_mut() {
            seen.push(*k);
            *v = -*v;
        }
        assert_eq!((0..10).collect::<Vec<_>>(), seen);
        assert_eq!(
            (0..10).map(|k| -k * 10).collect::<Vec<_>>(),
            tree.values().copied().collect::<Vec<_>>()
        );

        for v in tree.values_mut().rev().take(2) {
            *v = 0;
        }
        assert_eq!(Some(&0), tree.get(&9));
        assert_eq!(Some(&0), tree.get(&8));
        assert_eq!(Some(&-70), tree.get(&7));
    }

    #[test]
    fn values_mut_taken_partially() {
        let mut tree = tree(100);
        let mut values = tree.values_mut();
        assert_eq!(100, values.len());
        if let Some(v) = values.next() {
            *v = 7;
        }
        assert_eq!(99, values.len());
        assert_eq!(Some(&7), tree.get(&0));
        assert_eq!(Some(&10), tree.get(&1));
    }

    #[test]
    fn iter_mut_after_removals() {
        let mut tree = tree(10);
        tree.retain(|k, _| k % 3 != 0);
        // Freed slots are skipped and reused ones come out in key order.
        tree.insert(100, 0);
        tree.insert(-1, 0);
        let keys: Vec<i32> = (&mut tree).into_iter().map(|(k, _)| *k).collect();
        assert_eq!(vec![-1, 1, 2, 4, 5, 7, 8, 100], keys);
    }

    #[test]
    fn into_iter_both_ends() {
        let tree = tree(4);
        let mut iter = tree.into_iter();
        assert_eq!(4, iter.len());
        assert_eq!(Some((3, 30)), iter.next_back());
        assert_eq!(Some((0, 0)), iter.next());
        assert_eq!(vec![(1, 10), (2, 20)], iter.collect::<Vec<_>>());
    }

    #[test]
    fn into_keys_and_values() {
        assert_eq!(vec![0, 1, 2], tree(3).into_keys().collect::<Vec<_>>());
        assert_eq!(vec![20, 10, 0], tree(3).into_values().rev().collect::<Vec<_>>());
    }

    #[test]
    fn for_loop_over_reference() {
        let tree = tree(3);
        let mut sum = 0;
        for (k, v) in &tree {
            sum += k + v;
        }
        assert_eq!(33, sum);
    }
}
