use std::cmp::Ordering::*;

use crate::{Comparator, Link, Tree};

/// Which side of the probe key a bound search looks on, and whether the key
/// itself qualifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bound {
    /// Greatest key `<=` the probe.
    Floor,
    /// Least key `>=` the probe.
    Ceiling,
    /// Greatest key `<` the probe.
    Lower,
    /// Least key `>` the probe.
    Higher,
}

impl<K, V, C: Comparator<K>> Tree<K, V, C> {
    /// Single root-to-leaf descent remembering the last node that satisfied
    /// the bound.
    fn bound(&self, key: &K, bound: Bound) -> Link {
        let mut link = self.root.root;
        let mut candidate = None;
        while let Some(handle) = link {
            let node = self.root.nodes.get(handle);
            let ord = self.cmp.compare(key, &node.key);
            let (hit, go_right) = match (bound, ord) {
                (Bound::Floor | Bound::Ceiling, Equal) => return Some(handle),
                (Bound::Floor | Bound::Lower, Greater) => (true, true),
                (Bound::Floor | Bound::Lower, Less | Equal) => (false, false),
                (Bound::Ceiling | Bound::Higher, Less) => (true, false),
                (Bound::Ceiling | Bound::Higher, Greater | Equal) => (false, true),
            };
            if hit {
                candidate = Some(handle);
            }
            link = if go_right { node.right } else { node.left };
        }
        candidate
    }

    /// The entry with the greatest key less than or equal to `key`.
    pub fn floor(&self, key: &K) -> Option<(&K, &V)> {
        self.bound(key, Bound::Floor).map(|h| self.entry(h))
    }

    /// The entry with the least key greater than or equal to `key`.
    pub fn ceiling(&self, key: &K) -> Option<(&K, &V)> {
        self.bound(key, Bound::Ceiling).map(|h| self.entry(h))
    }

    /// The entry with the greatest key strictly less than `key`.
    pub fn lower(&self, key: &K) -> Option<(&K, &V)> {
        self.bound(key, Bound::Lower).map(|h| self.entry(h))
    }

    /// The entry with the least key strictly greater than `key`.
    pub fn higher(&self, key: &K) -> Option<(&K, &V)> {
        self.bound(key, Bound::Higher).map(|h| self.entry(h))
    }
}
