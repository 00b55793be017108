pub(crate) mod set;
pub(crate) mod tree;

use std::ops::Index;

use crate::{Comparator, Tree};

impl<K, V, C: Comparator<K>> Index<&K> for Tree<K, V, C> {
    type Output = V;

    /// Returns a reference to the value corresponding to the supplied key.
    ///
    /// # Panics
    ///
    /// Panics if the key is not present in the `Tree`.
    #[inline]
    fn index(&self, key: &K) -> &V {
        self.get(key).expect("no entry found for key")
    }
}
