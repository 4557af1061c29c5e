use super::handle::Handle;

/// Which child link of a parent a node hangs from.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    pub(crate) const fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

// A binary tree node. The tree owns nodes through the `left`/`right` links;
// `parent` is a lookup-only back link kept in step with them.
#[derive(Clone)]
pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    left: Option<Handle>,
    right: Option<Handle>,
    parent: Option<Handle>,
    // 1 for a leaf. AVL height stays below 1.45 * log2(n + 2), far inside `u8`.
    height: u8,
}

impl<K, V> Node<K, V> {
    /// Creates a detached leaf.
    pub(crate) const fn new(key: K, value: V, parent: Option<Handle>) -> Self {
        Self {
            key,
            value,
            left: None,
            right: None,
            parent,
            height: 1,
        }
    }

    #[inline]
    pub(crate) const fn left(&self) -> Option<Handle> {
        self.left
    }

    #[inline]
    pub(crate) const fn right(&self) -> Option<Handle> {
        self.right
    }

    #[inline]
    pub(crate) const fn child(&self, side: Side) -> Option<Handle> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub(crate) fn set_child(&mut self, side: Side, child: Option<Handle>) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }

    #[inline]
    pub(crate) const fn parent(&self) -> Option<Handle> {
        self.parent
    }

    pub(crate) fn set_parent(&mut self, parent: Option<Handle>) {
        self.parent = parent;
    }

    #[inline]
    pub(crate) const fn height(&self) -> u8 {
        self.height
    }

    pub(crate) fn set_height(&mut self, height: u8) {
        self.height = height;
    }

    /// Returns true if both child links are occupied.
    pub(crate) const fn has_two_children(&self) -> bool {
        self.left.is_some() && self.right.is_some()
    }

    /// Returns the only child, if the node has at most one.
    pub(crate) fn only_child(&self) -> Option<Handle> {
        debug_assert!(!self.has_two_children(), "only_child() on a node with two children");
        self.left.or(self.right)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn new_node_is_a_detached_leaf() {
        let node = Node::new(7, 'x', None);
        assert_eq!(node.height(), 1);
        assert_eq!(node.left(), None);
        assert_eq!(node.right(), None);
        assert_eq!(node.parent(), None);
        assert!(!node.has_two_children());
    }

    #[test]
    fn child_links_by_side() {
        let mut node = Node::new(7, 'x', Some(Handle::from_slot(0)));
        node.set_child(Side::Right, Some(Handle::from_slot(2)));
        assert_eq!(node.child(Side::Right), Some(Handle::from_slot(2)));
        assert_eq!(node.child(Side::Right.opposite()), None);
        assert_eq!(node.only_child(), Some(Handle::from_slot(2)));

        node.set_child(Side::Left, Some(Handle::from_slot(1)));
        assert!(node.has_two_children());
    }
}
