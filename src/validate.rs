use std::cmp::Ordering;

use crate::{Comparator, Link, Tree, TreeError};

/// Shape of a tree that passed [`Tree::validate`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    /// Number of entries.
    pub len: usize,
    /// Black nodes on every path from the root to a leaf, counting the root.
    pub blacks: usize,
    /// Longest root-to-node path, in nodes.
    pub depth: usize,
}

impl<K, V, C> Tree<K, V, C>
where
    K: Clone,
    C: Comparator<K>,
{
    /// Walks the whole tree and checks every red-black and ordering
    /// invariant. Linear in the size of the tree; meant for tests and
    /// debugging.
    pub fn validate(&self) -> Result<Stats, TreeError<K>> {
        if self.root.nodes.is_red(self.root.root) {
            return Err(TreeError::RedRoot);
        }
        if self.root.nodes.parent(self.root.root).is_some() {
            return Err(TreeError::BrokenParent);
        }

        let mut stats = Stats::default();
        let blacks = self.validate_tree(self.root.root, false, 1, &mut stats)?;
        stats.blacks = blacks;

        let mut current = self.root.first();
        let mut counted = 0;
        while let Some(handle) = current {
            counted += 1;
            let next = self.root.nodes.next(handle);
            if let Some(next) = next {
                let (a, b) = (self.root.nodes.get(handle), self.root.nodes.get(next));
                if self.cmp.compare(&a.key, &b.key) != Ordering::Less {
                    return Err(TreeError::SortError(a.key.clone(), b.key.clone()));
                }
            }
            current = next;
        }

        if counted != self.len {
            return Err(TreeError::LengthMismatch {
                len: self.len,
                counted,
            });
        }
        let live = self.root.nodes.len();
        if live != self.len {
            return Err(TreeError::LeakedNodes { len: self.len, live });
        }
        stats.len = counted;
        Ok(stats)
    }

    /// Returns the black height of the subtree at `link`.
    fn validate_tree(
        &self,
        link: Link,
        from_red: bool,
        depth: usize,
        stats: &mut Stats,
    ) -> Result<usize, TreeError<K>> {
        let Some(handle) = link else {
            return Ok(0);
        };
        stats.depth = stats.depth.max(depth);

        let node = self.root.nodes.get(handle);
        if from_red && node.is_red() {
            return Err(TreeError::ConsecutiveReds);
        }
        for child in [node.left, node.right].into_iter().flatten() {
            if self.root.nodes.parent(child) != Some(handle) {
                return Err(TreeError::BrokenParent);
            }
        }

        let left = self.validate_tree(node.left, node.is_red(), depth + 1, stats)?;
        let right = self.validate_tree(node.right, node.is_red(), depth + 1, stats)?;
        if left != right {
            return Err(TreeError::UnbalancedBlacks { left, right });
        }
        Ok(left + usize::from(node.is_black()))
    }
}

#[cfg(test)]
mod test {
    use crate::{Color, Natural, Node, Reverse, Tree, TreeError};

    use pretty_assertions::assert_eq;

    fn sample() -> Tree<i32, ()> {
        [5, 3, 8, 1, 4, 7, 9].into_iter().map(|k| (k, ())).collect()
    }

    #[test]
    fn empty_is_valid() {
        let tree: Tree<i32, ()> = Tree::new();
        assert_eq!(0, tree.validate().unwrap().len);
    }

    #[test]
    fn stats() {
        let tree: Tree<u32, ()> = (0..1000).map(|k| (k, ())).collect();
        let stats = tree.validate().unwrap();
        assert_eq!(1000, stats.len);
        // A red-black tree is never more than twice as deep as it is
        // black-high.
        assert!(stats.depth <= 2 * stats.blacks);
        assert!(stats.depth <= 20);
    }

    #[test]
    fn red_root_is_reported() {
        let mut tree = sample();
        tree.root.nodes.set_color(tree.root.root, Color::Red);
        assert_eq!(Err(TreeError::RedRoot), tree.validate());
    }

    #[test]
    fn black_imbalance_is_reported() {
        let mut tree = sample();
        let first = tree.root.first();
        let flipped = if tree.root.nodes.is_red(first) {
            Color::Black
        } else {
            Color::Red
        };
        tree.root.nodes.set_color(first, flipped);
        assert!(tree.validate().is_err());
    }

    #[test]
    fn consecutive_reds_are_reported() {
        let mut tree: Tree<i32, ()> = (0..8).map(|k| (k, ())).collect();
        // Paint every node red but the root.
        let mut current = tree.root.first();
        while let Some(h) = current {
            if Some(h) != tree.root.root {
                tree.root.nodes.set_color(h, Color::Red);
            }
            current = tree.root.nodes.next(h);
        }
        assert_eq!(Err(TreeError::ConsecutiveReds), tree.validate());
    }

    #[test]
    fn sort_error_is_reported() {
        let mut tree = sample();
        let first = tree.root.first().unwrap();
        tree.root.nodes.get_mut(first).key = 100;
        assert!(matches!(tree.validate(), Err(TreeError::SortError(100, 3))));
    }

    #[test]
    fn length_mismatch_is_reported() {
        let mut tree = sample();
        tree.len += 1;
        assert_eq!(
            Err(TreeError::LengthMismatch { len: 8, counted: 7 }),
            tree.validate()
        );
    }

    #[test]
    fn unlinked_node_is_reported() {
        let mut tree = sample();
        tree.root.nodes.alloc(Node::new(100, ()));
        assert_eq!(
            Err(TreeError::LeakedNodes { len: 7, live: 8 }),
            tree.validate()
        );
    }

    #[test]
    fn comparator_is_respected() {
        let mut tree = Tree::with_comparator(Reverse(Natural));
        tree.extend((0..10).map(|k| (k, ())));
        tree.validate().unwrap();
        assert_eq!(Some((&9, &())), tree.first_key_value());
    }
}
