use std::fmt::Debug;

use crate::{Comparator, Natural, Set, Stats, Tree, TreeError};

impl<T> Set<T, Natural> {
    pub const fn new() -> Self {
        Self { tree: Tree::new() }
    }
}

impl<T, C: Default> Default for Set<T, C> {
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<T, C> Set<T, C> {
    pub const fn with_comparator(cmp: C) -> Self {
        Self {
            tree: Tree::with_comparator(cmp),
        }
    }

    pub fn comparator(&self) -> &C {
        self.tree.comparator()
    }

    pub fn clear(&mut self) {
        self.tree.clear();
    }

    pub fn first(&self) -> Option<&T> {
        self.tree.first_key_value().map(|(k, _)| k)
    }

    pub fn last(&self) -> Option<&T> {
        self.tree.last_key_value().map(|(k, _)| k)
    }

    pub fn pop_first(&mut self) -> Option<T> {
        self.tree.pop_first().map(|kv| kv.0)
    }

    pub fn pop_last(&mut self) -> Option<T> {
        self.tree.pop_last().map(|kv| kv.0)
    }

    pub fn each<F: FnMut(&T)>(&self, mut f: F) {
        self.tree.each(|k, _| f(k));
    }

    pub fn each_rev<F: FnMut(&T)>(&self, mut f: F) {
        self.tree.each_rev(|k, _| f(k));
    }

    pub fn retain<F: FnMut(&T) -> bool>(&mut self, mut f: F) {
        self.tree.retain(|k, _| f(k));
    }

    pub const fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    pub const fn len(&self) -> usize {
        self.tree.len()
    }
}

impl<T, C: Comparator<T>> Set<T, C> {
    /// Adds `element`, returning `false` if an equal element was already
    /// present. The stored element is kept in that case.
    pub fn insert(&mut self, element: T) -> bool {
        self.tree.insert(element, ()).is_none()
    }

    pub fn remove(&mut self, element: &T) -> bool {
        self.tree.remove(element).is_some()
    }

    /// Removes and returns the stored element equal to `element`.
    pub fn take(&mut self, element: &T) -> Option<T> {
        self.tree.remove_entry(element).map(|(k, _)| k)
    }

    /// Removes every element in `elements`, returning how many were present.
    pub fn remove_all<'k, I>(&mut self, elements: I) -> usize
    where
        I: IntoIterator<Item = &'k T>,
        T: 'k,
    {
        elements.into_iter().filter(|e| self.remove(e)).count()
    }

    pub fn contains(&self, element: &T) -> bool {
        self.tree.contains_key(element)
    }

    pub fn contains_all<'k, I>(&self, elements: I) -> bool
    where
        I: IntoIterator<Item = &'k T>,
        T: 'k,
    {
        self.tree.contains_all(elements)
    }

    /// The stored element equal to `element`.
    pub fn get(&self, element: &T) -> Option<&T> {
        self.tree.get_key_value(element).map(|(k, _)| k)
    }

    /// The greatest element less than or equal to `element`.
    pub fn floor(&self, element: &T) -> Option<&T> {
        self.tree.floor(element).map(|(k, _)| k)
    }

    /// The least element greater than or equal to `element`.
    pub fn ceiling(&self, element: &T) -> Option<&T> {
        self.tree.ceiling(element).map(|(k, _)| k)
    }

    /// The greatest element strictly less than `element`.
    pub fn lower(&self, element: &T) -> Option<&T> {
        self.tree.lower(element).map(|(k, _)| k)
    }

    /// The least element strictly greater than `element`.
    pub fn higher(&self, element: &T) -> Option<&T> {
        self.tree.higher(element).map(|(k, _)| k)
    }
}

impl<T: Clone, C: Comparator<T>> Set<T, C> {
    pub fn validate(&self) -> Result<Stats, TreeError<T>> {
        self.tree.validate()
    }
}

impl<T, C: Comparator<T>> Extend<T> for Set<T, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            self.insert(element);
        }
    }
}

impl<T: PartialEq, C> PartialEq for Set<T, C> {
    fn eq(&self, other: &Self) -> bool {
        self.tree == other.tree
    }
}

impl<T: Eq, C> Eq for Set<T, C> {}

impl<T: Debug, C> Debug for Set<T, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Reverse;
    use pretty_assertions::assert_eq;

    #[test]
    fn set_ctor_works() {
        let set = Set::<usize>::new();
        assert_eq!(None, set.first());
        assert_eq!(false, set.contains(&42));
        assert!(set.is_empty());
    }

    #[test]
    fn insert_reports_novelty() {
        let mut set = Set::new();
        assert!(set.insert(3));
        assert!(set.insert(1));
        assert!(!set.insert(3));
        assert_eq!(2, set.len());
        assert_eq!(vec![&1, &3], set.iter().collect::<Vec<_>>());
    }

    #[test]
    fn remove_and_take() {
        let mut set: Set<i32> = (0..10).collect();
        assert!(set.remove(&4));
        assert!(!set.remove(&4));
        assert_eq!(Some(5), set.take(&5));
        assert_eq!(None, set.take(&5));
        assert_eq!(3, set.remove_all([&0, &1, &2, &42]));
        assert_eq!(vec![3, 6, 7, 8, 9], set.iter().copied().collect::<Vec<_>>());
        set.validate().unwrap();
    }

    #[test]
    fn contains_all() {
        let set: Set<i32> = [1, 3, 5].into_iter().collect();
        assert!(set.contains_all([&1, &5]));
        assert!(!set.contains_all([&1, &2]));
        assert!(set.contains_all([]));
    }

    #[test]
    fn bounds() {
        let set: Set<i32> = [1, 3, 4, 7, 8, 9].into_iter().collect();
        assert_eq!(Some(&4), set.floor(&6));
        assert_eq!(Some(&7), set.ceiling(&6));
        assert_eq!(Some(&4), set.lower(&7));
        assert_eq!(Some(&8), set.higher(&7));
        assert_eq!(None, set.floor(&0));
        assert_eq!(None, set.ceiling(&10));
    }

    #[test]
    fn pops() {
        let mut set: Set<i32> = (1..=3).collect();
        assert_eq!(Some(1), set.pop_first());
        assert_eq!(Some(3), set.pop_last());
        assert_eq!(Some(2), set.pop_first());
        assert_eq!(None, set.pop_last());
    }

    #[test]
    fn each_both_ways() {
        let set: Set<char> = "hello".chars().collect();
        let mut forward = String::new();
        set.each(|c| forward.push(*c));
        let mut backward = String::new();
        set.each_rev(|c| backward.push(*c));
        assert_eq!("ehlo", forward);
        assert_eq!("olhe", backward);
    }

    #[test]
    fn retain_and_clear() {
        let mut set: Set<i32> = (0..20).collect();
        set.retain(|x| x % 5 == 0);
        assert_eq!(vec![0, 5, 10, 15], set.iter().copied().collect::<Vec<_>>());
        set.clear();
        assert!(set.is_empty());
    }

    #[test]
    fn reverse_ordered_set() {
        let mut set = Set::with_comparator(Reverse(Natural));
        set.extend(["b", "c", "a"]);
        assert_eq!(Some(&"c"), set.first());
        // "c" sorts before "bb" here, and "b" after it.
        assert_eq!(Some(&"c"), set.floor(&"bb"));
        assert_eq!(Some(&"b"), set.ceiling(&"bb"));
        assert_eq!("{\"c\", \"b\", \"a\"}", format!("{set:?}"));
    }

    #[test]
    fn equality() {
        let a: Set<i32> = [3, 2, 1].into_iter().collect();
        let b: Set<i32> = [1, 2, 3].into_iter().collect();
        assert_eq!(a, b);
        assert_eq!(a.get(&2), Some(&2));
    }
}
