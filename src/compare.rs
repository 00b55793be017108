use std::cmp::Ordering;

/// A total order over `K`.
///
/// The tree trusts the comparator blindly: it must be antisymmetric,
/// transitive and total, and it must not change its mind about keys that
/// are already stored. A comparator that breaks these rules leaves the tree
/// silently mis-ordered; nothing checks for it.
///
/// Any `Fn(&K, &K) -> Ordering` is a comparator:
///
/// ```
/// use rbindex::Tree;
///
/// let mut tree = Tree::with_comparator(|a: &&str, b: &&str| a.len().cmp(&b.len()));
/// tree.insert("ccc", 3);
/// tree.insert("a", 1);
/// tree.insert("bb", 2);
/// assert_eq!(tree.keys().copied().collect::<Vec<_>>(), ["a", "bb", "ccc"]);
/// ```
pub trait Comparator<K: ?Sized> {
    fn compare(&self, a: &K, b: &K) -> Ordering;
}

impl<K: ?Sized, F> Comparator<K> for F
where
    F: Fn(&K, &K) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        self(a, b)
    }
}

/// Orders keys by their [`Ord`] implementation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Natural;

impl<K: Ord + ?Sized> Comparator<K> for Natural {
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        a.cmp(b)
    }
}

/// Flips the order of the wrapped comparator.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Reverse<C = Natural>(pub C);

impl<K: ?Sized, C: Comparator<K>> Comparator<K> for Reverse<C> {
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        self.0.compare(b, a)
    }
}
