use std::fmt::Debug;

use crate::{Arena, Color, Handle, Link, Node};

impl<K, V> Node<K, V> {
    /// A fresh, unlinked, red node.
    pub(crate) fn new(key: K, value: V) -> Self {
        Node {
            parent: None,
            left: None,
            right: None,
            color: Color::Red,
            key,
            value,
        }
    }

    #[inline(always)]
    pub(crate) fn is_black(&self) -> bool {
        self.color == Color::Black
    }

    #[inline(always)]
    pub(crate) fn is_red(&self) -> bool {
        self.color == Color::Red
    }
}

/// Link accessors. Every accessor takes a possibly absent node: reads on an
/// absent node yield `None` (or black), writes to it are dropped.
impl<K, V> Arena<Node<K, V>> {
    #[inline(always)]
    pub(crate) fn color(&self, link: impl Into<Link>) -> Color {
        link.into().map_or(Color::Black, |h| self.get(h).color)
    }

    #[inline(always)]
    pub(crate) fn is_black(&self, link: impl Into<Link>) -> bool {
        self.color(link) == Color::Black
    }

    #[inline(always)]
    pub(crate) fn is_red(&self, link: impl Into<Link>) -> bool {
        self.color(link) == Color::Red
    }

    #[inline(always)]
    pub(crate) fn parent(&self, link: impl Into<Link>) -> Link {
        link.into().and_then(|h| self.get(h).parent)
    }

    #[inline(always)]
    pub(crate) fn left(&self, link: impl Into<Link>) -> Link {
        link.into().and_then(|h| self.get(h).left)
    }

    #[inline(always)]
    pub(crate) fn right(&self, link: impl Into<Link>) -> Link {
        link.into().and_then(|h| self.get(h).right)
    }

    #[inline(always)]
    pub(crate) fn set_color(&mut self, link: impl Into<Link>, color: Color) {
        if let Some(h) = link.into() {
            self.get_mut(h).color = color;
        }
    }

    #[inline(always)]
    pub(crate) fn set_parent(&mut self, link: impl Into<Link>, parent: Link) {
        if let Some(h) = link.into() {
            self.get_mut(h).parent = parent;
        }
    }

    #[inline(always)]
    pub(crate) fn set_left(&mut self, link: impl Into<Link>, left: Link) {
        if let Some(h) = link.into() {
            self.get_mut(h).left = left;
        }
    }

    #[inline(always)]
    pub(crate) fn set_right(&mut self, link: impl Into<Link>, right: Link) {
        if let Some(h) = link.into() {
            self.get_mut(h).right = right;
        }
    }

    /// Leftmost node of the subtree rooted at `link`.
    pub(crate) fn first(&self, link: Link) -> Link {
        let mut node = link?;
        while let Some(left) = self.get(node).left {
            node = left;
        }
        Some(node)
    }

    /// Rightmost node of the subtree rooted at `link`.
    pub(crate) fn last(&self, link: Link) -> Link {
        let mut node = link?;
        while let Some(right) = self.get(node).right {
            node = right;
        }
        Some(node)
    }

    /// In-order successor.
    pub(crate) fn next(&self, node: Handle) -> Link {
        // If we have a right-hand child, go down and then left as far as we
        // can.
        if let Some(right) = self.get(node).right {
            return self.first(Some(right));
        }
        // No right-hand children. Everything down and left is smaller than
        // us, so the successor is the first ancestor we reach from its left.
        let mut node = node;
        loop {
            let parent = self.get(node).parent?;
            if self.get(parent).right != Some(node) {
                return Some(parent);
            }
            node = parent;
        }
    }

    /// In-order predecessor.
    pub(crate) fn prev(&self, node: Handle) -> Link {
        if let Some(left) = self.get(node).left {
            return self.last(Some(left));
        }
        let mut node = node;
        loop {
            let parent = self.get(node).parent?;
            if self.get(parent).left != Some(node) {
                return Some(parent);
            }
            node = parent;
        }
    }
}

impl<K, V> Debug for Node<K, V>
where
    K: Debug,
    V: Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!(
            "{:?}::({:?},{:?})",
            self.color, self.key, self.value
        ))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    // Links a child under a parent. Colors don't matter for navigation.
    macro_rules! link {
        ($arena:expr, $parent:expr, $child:expr, left) => {
            $arena.set_left($parent, Some($child));
            $arena.set_parent($child, Some($parent));
        };
        ($arena:expr, $parent:expr, $child:expr, right) => {
            $arena.set_right($parent, Some($child));
            $arena.set_parent($child, Some($parent));
        };
    }

    //        7
    //      /   \
    //     3     10
    //    / \      \
    //   1   5      12
    fn complex_tree() -> (Arena<Node<i32, &'static str>>, Vec<Handle>) {
        let mut arena = Arena::new();
        let n7 = arena.alloc(Node::new(7, "root"));
        let n3 = arena.alloc(Node::new(3, "left_child_7"));
        let n10 = arena.alloc(Node::new(10, "right_child_7"));
        let n1 = arena.alloc(Node::new(1, "left_child_3"));
        let n5 = arena.alloc(Node::new(5, "right_child_3"));
        let n12 = arena.alloc(Node::new(12, "right_child_10"));

        link!(arena, n10, n12, right);
        link!(arena, n3, n1, left);
        link!(arena, n3, n5, right);
        link!(arena, n7, n3, left);
        link!(arena, n7, n10, right);

        (arena, vec![n1, n3, n5, n7, n10, n12])
    }

    fn walk(
        arena: &Arena<Node<i32, &'static str>>,
        from: Handle,
        step: impl Fn(&Arena<Node<i32, &'static str>>, Handle) -> Link,
    ) -> Vec<i32> {
        let mut keys = vec![];
        let mut current = step(arena, from);
        while let Some(h) = current {
            keys.push(arena.get(h).key);
            current = step(arena, h);
        }
        keys
    }

    #[test]
    fn absent_links_read_black() {
        let arena: Arena<Node<i32, ()>> = Arena::new();
        assert_eq!(Color::Black, arena.color(None::<Handle>));
        assert!(arena.is_black(None::<Handle>));
        assert!(!arena.is_red(None::<Handle>));
        assert_eq!(None, arena.left(None::<Handle>));
        assert_eq!(None, arena.right(None::<Handle>));
        assert_eq!(None, arena.parent(None::<Handle>));
    }

    #[test]
    fn writes_to_absent_links_are_dropped() {
        let mut arena: Arena<Node<i32, ()>> = Arena::new();
        let n = arena.alloc(Node::new(1, ()));
        arena.set_color(None::<Handle>, Color::Red);
        arena.set_left(None::<Handle>, Some(n));
        assert!(arena.is_red(n));
        assert_eq!(None, arena.left(n));
    }

    #[test]
    fn single_node_has_no_neighbours() {
        let mut arena = Arena::new();
        let n = arena.alloc(Node::new(1, "value"));
        assert_eq!(None, arena.next(n));
        assert_eq!(None, arena.prev(n));
        assert_eq!(Some(n), arena.first(Some(n)));
        assert_eq!(Some(n), arena.last(Some(n)));
    }

    #[test]
    fn next_walks_in_order() {
        let (arena, nodes) = complex_tree();
        let [n1, n3, n5, n7, n10, n12] = nodes[..] else {
            unreachable!()
        };
        assert_eq!(vec![3, 5, 7, 10, 12], walk(&arena, n1, |a, h| a.next(h)));
        assert_eq!(vec![5, 7, 10, 12], walk(&arena, n3, |a, h| a.next(h)));
        assert_eq!(vec![7, 10, 12], walk(&arena, n5, |a, h| a.next(h)));
        assert_eq!(vec![10, 12], walk(&arena, n7, |a, h| a.next(h)));
        assert_eq!(vec![12], walk(&arena, n10, |a, h| a.next(h)));
        assert_eq!(Vec::<i32>::new(), walk(&arena, n12, |a, h| a.next(h)));
    }

    #[test]
    fn prev_walks_in_reverse_order() {
        let (arena, nodes) = complex_tree();
        let [n1, n3, n5, n7, n10, n12] = nodes[..] else {
            unreachable!()
        };
        assert_eq!(Vec::<i32>::new(), walk(&arena, n1, |a, h| a.prev(h)));
        assert_eq!(vec![1], walk(&arena, n3, |a, h| a.prev(h)));
        assert_eq!(vec![3, 1], walk(&arena, n5, |a, h| a.prev(h)));
        assert_eq!(vec![5, 3, 1], walk(&arena, n7, |a, h| a.prev(h)));
        assert_eq!(vec![7, 5, 3, 1], walk(&arena, n10, |a, h| a.prev(h)));
        assert_eq!(vec![10, 7, 5, 3, 1], walk(&arena, n12, |a, h| a.prev(h)));
    }

    #[test]
    fn first_and_last_of_subtrees() {
        let (arena, nodes) = complex_tree();
        let [n1, n3, n5, n7, n10, n12] = nodes[..] else {
            unreachable!()
        };
        assert_eq!(Some(n1), arena.first(Some(n7)));
        assert_eq!(Some(n12), arena.last(Some(n7)));
        assert_eq!(Some(n5), arena.last(Some(n3)));
        assert_eq!(Some(n10), arena.first(Some(n10)));
        assert_eq!(None, arena.first(None));
    }
}
