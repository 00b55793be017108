use log::trace;

use crate::{Arena, Color, Direction, Handle, Link, Node, Root};

// Public (to the crate).
impl<K, V> Root<K, V> {
    pub(crate) const fn new() -> Self {
        Root {
            nodes: Arena::new(),
            root: None,
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Root {
            nodes: Arena::with_capacity(capacity),
            root: None,
        }
    }

    pub(crate) fn first(&self) -> Link {
        self.nodes.first(self.root)
    }

    pub(crate) fn last(&self) -> Link {
        self.nodes.last(self.root)
    }

    pub(crate) fn clear(&mut self) {
        self.root = None;
        self.nodes.clear();
    }

    /// Allocates `node`, hangs it below `parent` on the `direction` side (or
    /// makes it the root when there is no parent) and rebalances.
    pub(crate) fn link(&mut self, node: Node<K, V>, parent: Link, direction: Direction) -> Handle {
        let handle = self.nodes.alloc(node);
        match parent {
            None => self.root = Some(handle),
            Some(parent) => {
                self.nodes.set_parent(handle, Some(parent));
                match direction {
                    Direction::Left => self.nodes.set_left(parent, Some(handle)),
                    Direction::Right => self.nodes.set_right(parent, Some(handle)),
                }
            }
        }
        self.fix_after_insert(handle);
        handle
    }

    /// Unlinks `node`, rebalances and hands the node back.
    ///
    /// Only `node` leaves the tree: every other handle keeps pointing at the
    /// same key and value.
    pub(crate) fn erase(&mut self, node: Handle) -> Node<K, V> {
        if self.nodes.left(node).is_some() {
            if let Some(right) = self.nodes.right(node) {
                // The successor is the leftmost node of the right subtree and
                // has no left child. Once the two trade places, `node` has at
                // most one child.
                if let Some(successor) = self.nodes.first(Some(right)) {
                    self.swap_with_successor(node, successor);
                }
            }
        }

        let child = self.nodes.left(node).or(self.nodes.right(node));
        if let Some(child) = child {
            /*
             * A single child must be red and node must be black, so the
             * fixup below only recolors the child.
             *
             *     (p)          (p)
             *      |            |
             *      N     -->    C
             *      |
             *     (c)
             */
            let parent = self.nodes.parent(node);
            self.change_child(node, Some(child), parent);
            self.nodes.set_parent(child, parent);
            if self.nodes.is_black(node) {
                self.fix_after_erase(child);
            }
        } else {
            /*
             * A black leaf leaves a hole in the black height, so rebalance
             * while it is still linked and serves as the fixup start point.
             * Rotations never touch its (absent) children, so it is still a
             * leaf afterwards; only its parent may have moved.
             */
            if self.nodes.is_black(node) {
                self.fix_after_erase(node);
            }
            let parent = self.nodes.parent(node);
            self.change_child(node, None, parent);
        }

        self.nodes.take(node)
    }
}

// Private
impl<K, V> Root<K, V> {
    fn fix_after_insert(&mut self, mut node: Handle) {
        loop {
            /*
             * Loop invariant: node is red.
             */
            let Some(mut parent) = self.nodes.parent(node) else {
                break;
            };
            if self.nodes.is_black(parent) {
                break;
            }
            // A red parent is never the root, so there is a grandparent.
            let Some(gparent) = self.nodes.parent(parent) else {
                break;
            };

            if self.nodes.left(gparent) == Some(parent) {
                let uncle = self.nodes.right(gparent);
                if self.nodes.is_red(uncle) {
                    /*
                     * Case 1 - node's uncle is red (color flips).
                     *
                     *       G            g
                     *      / \          / \
                     *     p   u  -->   P   U
                     *    /            /
                     *   n            n
                     *
                     * g's parent might be red as well, so recurse at g.
                     */
                    trace!("insert fixup: color flip at {gparent:?}");
                    self.nodes.set_color(parent, Color::Black);
                    self.nodes.set_color(uncle, Color::Black);
                    self.nodes.set_color(gparent, Color::Red);
                    node = gparent;
                    continue;
                }

                if self.nodes.right(parent) == Some(node) {
                    /*
                     * Case 2 - node's uncle is black and node is the
                     * parent's right child (left rotate at parent).
                     *
                     *      G             G
                     *     / \           / \
                     *    p   U  -->    n   U
                     *     \           /
                     *      n         p
                     *
                     * Case 3 finishes the job.
                     */
                    self.rotate_left(parent);
                    std::mem::swap(&mut node, &mut parent);
                }

                /*
                 * Case 3 - node's uncle is black and node is the parent's
                 * left child (right rotate at gparent).
                 *
                 *        G           P
                 *       / \         / \
                 *      p   U  -->  n   g
                 *     /                 \
                 *    n                   U
                 */
                self.nodes.set_color(parent, Color::Black);
                self.nodes.set_color(gparent, Color::Red);
                self.rotate_right(gparent);
                break;
            } else {
                let uncle = self.nodes.left(gparent);
                if self.nodes.is_red(uncle) {
                    /* Case 1 - color flips */
                    trace!("insert fixup: color flip at {gparent:?}");
                    self.nodes.set_color(parent, Color::Black);
                    self.nodes.set_color(uncle, Color::Black);
                    self.nodes.set_color(gparent, Color::Red);
                    node = gparent;
                    continue;
                }

                if self.nodes.left(parent) == Some(node) {
                    /* Case 2 - right rotate at parent */
                    self.rotate_right(parent);
                    std::mem::swap(&mut node, &mut parent);
                }

                /* Case 3 - left rotate at gparent */
                self.nodes.set_color(parent, Color::Black);
                self.nodes.set_color(gparent, Color::Red);
                self.rotate_left(gparent);
                break;
            }
        }
        self.nodes.set_color(self.root, Color::Black);
    }

    fn fix_after_erase(&mut self, mut node: Handle) {
        /*
         * Loop invariants:
         * - node is black and not the root
         * - every leaf path through node has one black node fewer than the
         *   other leaf paths through its parent.
         */
        while Some(node) != self.root && self.nodes.is_black(node) {
            let Some(parent) = self.nodes.parent(node) else {
                break;
            };

            if self.nodes.left(parent) == Some(node) {
                let mut sibling = self.nodes.right(parent);
                if self.nodes.is_red(sibling) {
                    /*
                     * Case 1 - left rotate at parent
                     *
                     *     P               S
                     *    / \             / \
                     *   N   s    -->    p   Sr
                     *      / \         / \
                     *     Sl  Sr      N   Sl
                     */
                    trace!("erase fixup: red sibling of {node:?}");
                    self.nodes.set_color(sibling, Color::Black);
                    self.nodes.set_color(parent, Color::Red);
                    self.rotate_left(parent);
                    sibling = self.nodes.right(parent);
                }

                if self.nodes.is_black(self.nodes.left(sibling))
                    && self.nodes.is_black(self.nodes.right(sibling))
                {
                    /*
                     * Case 2 - sibling color flip
                     * (p could be either color here)
                     *
                     *    (p)           (p)
                     *    / \           / \
                     *   N   S    -->  N   s
                     *      / \           / \
                     *     Sl  Sr        Sl  Sr
                     *
                     * The deficit moves up to p.
                     */
                    self.nodes.set_color(sibling, Color::Red);
                    node = parent;
                    continue;
                }

                if self.nodes.is_black(self.nodes.right(sibling)) {
                    /*
                     * Case 3 - right rotate at sibling
                     *
                     *   (p)           (p)
                     *   / \           / \
                     *  N   S    -->  N   sl
                     *     / \             \
                     *    sl  Sr            S
                     *                       \
                     *                        Sr
                     */
                    self.nodes.set_color(self.nodes.left(sibling), Color::Black);
                    self.nodes.set_color(sibling, Color::Red);
                    if let Some(s) = sibling {
                        self.rotate_right(s);
                    }
                    sibling = self.nodes.right(parent);
                }

                /*
                 * Case 4 - left rotate at parent + color flips
                 * (p and sl could be either color here. After rotation, p
                 * becomes black, s acquires p's color, and sl keeps its color)
                 *
                 *      (p)             (s)
                 *      / \             / \
                 *     N   S     -->   P   Sr
                 *        / \         / \
                 *      (sl) sr      N  (sl)
                 */
                trace!("erase fixup: rotate at {parent:?}");
                self.nodes.set_color(sibling, self.nodes.color(parent));
                self.nodes.set_color(parent, Color::Black);
                self.nodes.set_color(self.nodes.right(sibling), Color::Black);
                self.rotate_left(parent);
                break;
            } else {
                let mut sibling = self.nodes.left(parent);
                if self.nodes.is_red(sibling) {
                    /* Case 1 - right rotate at parent */
                    trace!("erase fixup: red sibling of {node:?}");
                    self.nodes.set_color(sibling, Color::Black);
                    self.nodes.set_color(parent, Color::Red);
                    self.rotate_right(parent);
                    sibling = self.nodes.left(parent);
                }

                if self.nodes.is_black(self.nodes.left(sibling))
                    && self.nodes.is_black(self.nodes.right(sibling))
                {
                    /* Case 2 - sibling color flip */
                    self.nodes.set_color(sibling, Color::Red);
                    node = parent;
                    continue;
                }

                if self.nodes.is_black(self.nodes.left(sibling)) {
                    /* Case 3 - left rotate at sibling */
                    self.nodes.set_color(self.nodes.right(sibling), Color::Black);
                    self.nodes.set_color(sibling, Color::Red);
                    if let Some(s) = sibling {
                        self.rotate_left(s);
                    }
                    sibling = self.nodes.left(parent);
                }

                /* Case 4 - right rotate at parent + color flips */
                trace!("erase fixup: rotate at {parent:?}");
                self.nodes.set_color(sibling, self.nodes.color(parent));
                self.nodes.set_color(parent, Color::Black);
                self.nodes.set_color(self.nodes.left(sibling), Color::Black);
                self.rotate_right(parent);
                break;
            }
        }
        // Either node went red on the way up, or the tree is balanced again
        // and the root must be black.
        self.nodes.set_color(node, Color::Black);
        self.nodes.set_color(self.root, Color::Black);
    }

    /// Trades the tree positions and colors of `node` and its in-order
    /// successor. `successor` must be the leftmost node of `node`'s right
    /// subtree.
    fn swap_with_successor(&mut self, node: Handle, successor: Handle) {
        let parent = self.nodes.parent(node);
        let left = self.nodes.left(node);
        let right = self.nodes.right(node);
        let color = self.nodes.color(node);
        let succ_parent = self.nodes.parent(successor);
        let succ_right = self.nodes.right(successor);
        let succ_color = self.nodes.color(successor);

        self.change_child(node, Some(successor), parent);
        self.nodes.set_parent(successor, parent);
        self.nodes.set_color(successor, color);
        self.nodes.set_left(successor, left);
        self.nodes.set_parent(left, Some(successor));

        if succ_parent == Some(node) {
            /*
             *    (n)          (s)
             *    / \          / \
             *  (x) (s)  ->  (x) (n)
             *        \            \
             *        (c)          (c)
             */
            self.nodes.set_right(successor, Some(node));
            self.nodes.set_parent(node, Some(successor));
        } else {
            /*
             *    (n)          (s)
             *    / \          / \
             *  (x) (y)  ->  (x) (y)
             *      /            /
             *    (p)          (p)
             *    /            /
             *  (s)          (n)
             *    \            \
             *    (c)          (c)
             */
            self.nodes.set_right(successor, right);
            self.nodes.set_parent(right, Some(successor));
            self.nodes.set_left(succ_parent, Some(node));
            self.nodes.set_parent(node, succ_parent);
        }

        self.nodes.set_left(node, None);
        self.nodes.set_right(node, succ_right);
        self.nodes.set_color(node, succ_color);
        self.nodes.set_parent(succ_right, Some(node));
    }

    /// Makes `new` take `old`'s slot below `parent`, or the root slot.
    fn change_child(&mut self, old: Handle, new: Link, parent: Link) {
        match parent {
            Some(parent) if self.nodes.left(parent) == Some(old) => self.nodes.set_left(parent, new),
            Some(parent) => self.nodes.set_right(parent, new),
            None => self.root = new,
        }
    }

    /// Left rotation at `node`; a no-op when `node` has no right child.
    pub(crate) fn rotate_left(&mut self, node: Handle) {
        /*
         *     N              R
         *    / \            / \
         *   a   R    -->   N   c
         *      / \        / \
         *     b   c      a   b
         */
        let Some(pivot) = self.nodes.right(node) else {
            return;
        };
        let inner = self.nodes.left(pivot);
        let parent = self.nodes.parent(node);

        self.nodes.set_right(node, inner);
        self.nodes.set_parent(inner, Some(node));
        self.nodes.set_parent(pivot, parent);
        self.change_child(node, Some(pivot), parent);
        self.nodes.set_left(pivot, Some(node));
        self.nodes.set_parent(node, Some(pivot));
    }

    /// Right rotation at `node`; a no-op when `node` has no left child.
    pub(crate) fn rotate_right(&mut self, node: Handle) {
        let Some(pivot) = self.nodes.left(node) else {
            return;
        };
        let inner = self.nodes.right(pivot);
        let parent = self.nodes.parent(node);

        self.nodes.set_left(node, inner);
        self.nodes.set_parent(inner, Some(node));
        self.nodes.set_parent(pivot, parent);
        self.change_child(node, Some(pivot), parent);
        self.nodes.set_right(pivot, Some(node));
        self.nodes.set_parent(node, Some(pivot));
    }
}
