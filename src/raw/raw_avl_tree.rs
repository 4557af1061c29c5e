use core::cmp::Ordering;

use smallvec::SmallVec;

use super::arena::Arena;
use super::handle::Handle;
use super::node::{Node, Side};
use crate::comparator::Comparator;

/// Explicit stack of pending nodes used in place of recursion.
///
/// An AVL tree addressable by a 32-bit handle is at most 46 levels deep, so the inline
/// capacity (the next length `smallvec` supports without `const_generics`) covers every
/// such tree without touching the heap.
pub(crate) type Spine = SmallVec<[Handle; 64]>;

/// The core AVL tree backing `AvlTreeMap`.
///
/// Every structural algorithm lives here. The ordering is supplied per call so the
/// engine stays independent of how the public map stores its comparator.
#[derive(Clone)]
pub(crate) struct RawAvlTree<K, V> {
    /// Arena owning every node; links between nodes are handles into it.
    nodes: Arena<Node<K, V>>,
    /// Handle to the root node, if the tree is non-empty.
    root: Option<Handle>,
    /// Number of live entries.
    len: usize,
}

impl<K, V> RawAvlTree<K, V> {
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
            len: 0,
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
            len: 0,
        }
    }

    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    #[cfg(test)]
    pub(crate) const fn root(&self) -> Option<Handle> {
        self.root
    }

    /// Drops every node at once. No rebalancing is involved.
    pub(crate) fn clear(&mut self) {
        crate::trace::debug!(entries = self.len, "clearing tree");
        self.nodes.clear();
        self.root = None;
        self.len = 0;
    }

    #[inline]
    pub(crate) fn node(&self, handle: Handle) -> &Node<K, V> {
        self.nodes.get(handle)
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, handle: Handle) -> &mut Node<K, V> {
        self.nodes.get_mut(handle)
    }

    /// Moves a node out of the arena without touching its neighbours' links.
    ///
    /// Only used by the owning iterator, which never revisits a taken node.
    pub(crate) fn take_node(&mut self, handle: Handle) -> Node<K, V> {
        self.len -= 1;
        self.nodes.take(handle)
    }

    /// Height of the whole tree, 0 when empty.
    pub(crate) fn height(&self) -> u8 {
        self.height_of(self.root)
    }

    #[inline]
    fn height_of(&self, link: Option<Handle>) -> u8 {
        link.map_or(0, |handle| self.nodes.get(handle).height())
    }

    /// `height(right) - height(left)`.
    fn balance(&self, handle: Handle) -> i16 {
        let node = self.nodes.get(handle);
        i16::from(self.height_of(node.right())) - i16::from(self.height_of(node.left()))
    }

    fn update_height(&mut self, handle: Handle) {
        let node = self.nodes.get(handle);
        let height = 1 + self.height_of(node.left()).max(self.height_of(node.right()));
        self.nodes.get_mut(handle).set_height(height);
    }

    /// Leftmost node of the subtree rooted at `handle`.
    pub(crate) fn leftmost(&self, mut handle: Handle) -> Handle {
        while let Some(left) = self.nodes.get(handle).left() {
            handle = left;
        }
        handle
    }

    /// Rightmost node of the subtree rooted at `handle`.
    pub(crate) fn rightmost(&self, mut handle: Handle) -> Handle {
        while let Some(right) = self.nodes.get(handle).right() {
            handle = right;
        }
        handle
    }

    pub(crate) fn first(&self) -> Option<Handle> {
        self.root.map(|root| self.leftmost(root))
    }

    pub(crate) fn last(&self) -> Option<Handle> {
        self.root.map(|root| self.rightmost(root))
    }

    /// Counts the nodes of a subtree with an explicit worklist.
    pub(crate) fn subtree_len(&self, root: Option<Handle>) -> usize {
        let mut pending: Spine = root.into_iter().collect();
        let mut count = 0;
        while let Some(handle) = pending.pop() {
            count += 1;
            let node = self.nodes.get(handle);
            pending.extend(node.left());
            pending.extend(node.right());
        }
        count
    }

    /// Points `parent`'s link (or the root) at `new` instead of `old`, and re-parents `new`.
    fn replace_link(&mut self, parent: Option<Handle>, old: Handle, new: Option<Handle>) {
        match parent {
            None => self.root = new,
            Some(parent) => {
                let parent_node = self.nodes.get_mut(parent);
                let side = if parent_node.left() == Some(old) {
                    Side::Left
                } else {
                    debug_assert_eq!(parent_node.right(), Some(old), "parent link out of sync");
                    Side::Right
                };
                parent_node.set_child(side, new);
            }
        }
        if let Some(new) = new {
            self.nodes.get_mut(new).set_parent(parent);
        }
    }

    /// Rotates `top` down toward `down`; its child on the opposite side takes its place.
    ///
    /// `Side::Left` is a left rotation. Returns the new subtree root.
    fn rotate(&mut self, top: Handle, down: Side) -> Handle {
        let up = down.opposite();
        let top_node = self.nodes.get(top);
        let parent = top_node.parent();
        let heavy = top_node.child(up).expect("rotation needs a child on the heavy side");
        let inner = self.nodes.get(heavy).child(down);

        crate::trace::trace!(?down, "rotating subtree");

        self.nodes.get_mut(top).set_child(up, inner);
        if let Some(inner) = inner {
            self.nodes.get_mut(inner).set_parent(Some(top));
        }
        self.nodes.get_mut(heavy).set_child(down, Some(top));
        self.nodes.get_mut(top).set_parent(Some(heavy));
        self.replace_link(parent, top, Some(heavy));

        self.update_height(top);
        self.update_height(heavy);
        heavy
    }

    /// Restores balance at `pivot`, whose balance factor is `pivot_balance` (|b| >= 2).
    ///
    /// Picks single or double rotation from the balance of the child on the heavy side.
    /// Returns the new subtree root.
    fn restore(&mut self, pivot: Handle, pivot_balance: i16) -> Handle {
        let heavy_side = if pivot_balance > 0 { Side::Right } else { Side::Left };
        let middle = self.nodes.get(pivot).child(heavy_side).expect("unbalanced node has a heavy child");
        let middle_balance = self.balance(middle);

        // A middle node leaning inward needs the inner rotation first.
        let leans_inward = match heavy_side {
            Side::Right => middle_balance < 0,
            Side::Left => middle_balance > 0,
        };
        if leans_inward {
            self.rotate(middle, heavy_side);
        }
        let root = self.rotate(pivot, heavy_side.opposite());
        debug_assert!(self.balance(root).abs() <= 1, "rotation left the subtree unbalanced");
        root
    }

    /// Walks from `start` to the root, refreshing heights and rotating at every
    /// ancestor whose balance factor reached +-2. Returns the number of rotations.
    fn rebalance_upward(&mut self, start: Option<Handle>) -> usize {
        let mut rotations = 0;
        let mut cursor = start;
        while let Some(handle) = cursor {
            self.update_height(handle);
            let balance = self.balance(handle);
            let subtree = if balance.abs() >= 2 {
                rotations += 1;
                self.restore(handle, balance)
            } else {
                handle
            };
            cursor = self.nodes.get(subtree).parent();
        }
        rotations
    }

    /// Unlinks `target` from the tree and returns its entry.
    ///
    /// A node with two children trades entries with its in-order successor first, and
    /// the successor (which has no left child) is the one physically spliced out.
    pub(crate) fn remove_node(&mut self, target: Handle) -> (K, V) {
        let mut doomed = target;
        if let (Some(_), Some(right)) = (self.nodes.get(target).left(), self.nodes.get(target).right()) {
            let successor = self.leftmost(right);
            let (node, next) = self.nodes.get_pair_mut(target, successor);
            core::mem::swap(&mut node.key, &mut next.key);
            core::mem::swap(&mut node.value, &mut next.value);
            doomed = successor;
        }

        let node = self.nodes.get(doomed);
        let parent = node.parent();
        let child = node.only_child();
        self.replace_link(parent, doomed, child);

        let Node { key, value, .. } = self.nodes.take(doomed);
        self.len -= 1;
        self.rebalance_upward(parent);
        debug_assert_eq!(self.nodes.len(), self.len);
        (key, value)
    }

    pub(crate) fn pop_first(&mut self) -> Option<(K, V)> {
        let first = self.first()?;
        Some(self.remove_node(first))
    }

    pub(crate) fn pop_last(&mut self) -> Option<(K, V)> {
        let last = self.last()?;
        Some(self.remove_node(last))
    }

    /// Stack primed for an ascending walk over the whole tree.
    pub(crate) fn spine_from_first(&self) -> Spine {
        let mut spine = Spine::new();
        self.push_left_edge(&mut spine, self.root);
        spine
    }

    /// Pushes `link` and every left descendant along its left edge.
    pub(crate) fn push_left_edge(&self, spine: &mut Spine, mut link: Option<Handle>) {
        while let Some(handle) = link {
            spine.push(handle);
            link = self.nodes.get(handle).left();
        }
    }
}

impl<K, V> RawAvlTree<K, V> {
    /// Finds the node holding `key`.
    pub(crate) fn search<C: Comparator<K>>(&self, key: &K, cmp: &C) -> Option<Handle> {
        let mut cursor = self.root;
        while let Some(handle) = cursor {
            let node = self.nodes.get(handle);
            cursor = match cmp.compare(key, &node.key) {
                Ordering::Less => node.left(),
                Ordering::Greater => node.right(),
                Ordering::Equal => return Some(handle),
            };
        }
        None
    }

    /// Inserts a key-value pair, returning the previous value if `key` was present.
    ///
    /// Overwriting keeps the stored key and changes no structure.
    pub(crate) fn insert<C: Comparator<K>>(&mut self, key: K, value: V, cmp: &C) -> Option<V> {
        let Some(mut current) = self.root else {
            self.root = Some(self.nodes.alloc(Node::new(key, value, None)));
            self.len = 1;
            return None;
        };

        let side = loop {
            let node = self.nodes.get_mut(current);
            let side = match cmp.compare(&key, &node.key) {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal => return Some(core::mem::replace(&mut node.value, value)),
            };
            match node.child(side) {
                Some(child) => current = child,
                None => break side,
            }
        };

        let leaf = self.nodes.alloc(Node::new(key, value, Some(current)));
        self.nodes.get_mut(current).set_child(side, Some(leaf));
        self.len += 1;

        let rotations = self.rebalance_upward(Some(current));
        debug_assert!(rotations <= 1, "insertion needed {rotations} rotations");
        None
    }

    /// Removes `key`, returning its entry if it was present.
    pub(crate) fn remove<C: Comparator<K>>(&mut self, key: &K, cmp: &C) -> Option<(K, V)> {
        let target = self.search(key, cmp)?;
        Some(self.remove_node(target))
    }

    /// Stack primed for an ascending walk starting at the first key `>= lower`.
    ///
    /// Subtrees whose keys are all below `lower` are never entered.
    pub(crate) fn spine_from_lower<C: Comparator<K>>(&self, lower: &K, cmp: &C) -> Spine {
        let mut spine = Spine::new();
        let mut cursor = self.root;
        while let Some(handle) = cursor {
            let node = self.nodes.get(handle);
            if cmp.compare(&node.key, lower) == Ordering::Less {
                cursor = node.right();
            } else {
                spine.push(handle);
                cursor = node.left();
            }
        }
        spine
    }

    /// The first node whose key is strictly greater than `upper`.
    pub(crate) fn first_above<C: Comparator<K>>(&self, upper: &K, cmp: &C) -> Option<Handle> {
        let mut found = None;
        let mut cursor = self.root;
        while let Some(handle) = cursor {
            let node = self.nodes.get(handle);
            if cmp.compare(&node.key, upper) == Ordering::Greater {
                found = Some(handle);
                cursor = node.left();
            } else {
                cursor = node.right();
            }
        }
        found
    }

    /// Number of keys strictly less than `key`; `key` need not be present.
    ///
    /// No subtree sizes are cached, so every left subtree passed on the way down is
    /// counted node by node. Worst case O(n).
    pub(crate) fn rank<C: Comparator<K>>(&self, key: &K, cmp: &C) -> usize {
        let mut rank = 0;
        let mut cursor = self.root;
        while let Some(handle) = cursor {
            let node = self.nodes.get(handle);
            if cmp.compare(&node.key, key) == Ordering::Less {
                rank += 1 + self.subtree_len(node.left());
                cursor = node.right();
            } else {
                cursor = node.left();
            }
        }
        rank
    }
}

impl<K, V> RawAvlTree<K, V> {
    /// The node at zero-based position `rank` in ascending order, by in-order scan.
    pub(crate) fn select(&self, rank: usize) -> Option<Handle> {
        if rank >= self.len {
            return None;
        }
        let mut spine = self.spine_from_first();
        let mut seen = 0;
        while let Some(handle) = spine.pop() {
            if seen == rank {
                return Some(handle);
            }
            seen += 1;
            self.push_left_edge(&mut spine, self.nodes.get(handle).right());
        }
        None
    }

    /// Number of nodes strictly below `handle`.
    pub(crate) fn descendants(&self, handle: Handle) -> usize {
        self.subtree_len(Some(handle)) - 1
    }
}

#[cfg(test)]
impl<K, V> RawAvlTree<K, V> {
    /// Checks every structural invariant, panicking with a description of the first
    /// violation found.
    pub(crate) fn validate<C: Comparator<K>>(&self, cmp: &C) {
        if let Some(root) = self.root {
            assert_eq!(self.nodes.get(root).parent(), None, "root has a parent");
        }
        let reachable = self.validate_subtree(self.root, None, cmp);
        assert_eq!(reachable, self.len, "len disagrees with reachable node count");
        assert_eq!(self.nodes.len(), self.len, "arena holds unreachable nodes");

        let mut spine = self.spine_from_first();
        let mut previous: Option<&K> = None;
        while let Some(handle) = spine.pop() {
            let key = &self.nodes.get(handle).key;
            if let Some(previous) = previous {
                assert_eq!(cmp.compare(previous, key), Ordering::Less, "keys out of order");
            }
            previous = Some(key);
            self.push_left_edge(&mut spine, self.nodes.get(handle).right());
        }
    }

    // Returns the number of nodes in the subtree.
    fn validate_subtree<C: Comparator<K>>(&self, link: Option<Handle>, parent: Option<Handle>, cmp: &C) -> usize {
        let Some(handle) = link else {
            return 0;
        };
        let node = self.nodes.get(handle);
        assert_eq!(node.parent(), parent, "parent link out of sync");
        let count = 1 + self.validate_subtree(node.left(), link, cmp) + self.validate_subtree(node.right(), link, cmp);

        let (left, right) = (self.height_of(node.left()), self.height_of(node.right()));
        assert_eq!(node.height(), 1 + left.max(right), "stale cached height");
        assert!(left.abs_diff(right) <= 1, "balance factor outside -1..=1");
        if let Some(left) = node.left() {
            assert_eq!(cmp.compare(&self.nodes.get(left).key, &node.key), Ordering::Less, "left child not smaller");
        }
        if let Some(right) = node.right() {
            assert_eq!(cmp.compare(&self.nodes.get(right).key, &node.key), Ordering::Greater, "right child not larger");
        }
        count
    }

    /// Renders the tree shape as nested `(left key right)` groups; leaves print bare.
    pub(crate) fn shape(&self) -> alloc::string::String
    where
        K: core::fmt::Display,
    {
        let mut out = alloc::string::String::new();
        self.shape_into(self.root, &mut out);
        out
    }

    fn shape_into(&self, link: Option<Handle>, out: &mut alloc::string::String)
    where
        K: core::fmt::Display,
    {
        use core::fmt::Write;

        let Some(handle) = link else {
            out.push('.');
            return;
        };
        let node = self.nodes.get(handle);
        if node.left().is_none() && node.right().is_none() {
            write!(out, "{}", node.key).unwrap();
            return;
        }
        out.push('(');
        self.shape_into(node.left(), out);
        write!(out, " {} ", node.key).unwrap();
        self.shape_into(node.right(), out);
        out.push(')');
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use alloc::vec::Vec;

    use super::*;
    use crate::comparator::{Natural, Reverse};
    use proptest::prelude::*;

    fn tree_of(keys: &[i32]) -> RawAvlTree<i32, i32> {
        let mut tree = RawAvlTree::new();
        for &key in keys {
            tree.insert(key, key * 10, &Natural);
            tree.validate(&Natural);
        }
        tree
    }

    fn in_order_keys<K: Copy, V>(tree: &RawAvlTree<K, V>) -> Vec<K> {
        let mut keys = Vec::new();
        let mut spine = tree.spine_from_first();
        while let Some(handle) = spine.pop() {
            keys.push(tree.node(handle).key);
            tree.push_left_edge(&mut spine, tree.node(handle).right());
        }
        keys
    }

    #[test]
    fn single_rotations() {
        assert_eq!(tree_of(&[1, 2, 3]).shape(), "(1 2 3)");
        assert_eq!(tree_of(&[3, 2, 1]).shape(), "(1 2 3)");
    }

    #[test]
    fn double_rotations() {
        assert_eq!(tree_of(&[3, 1, 2]).shape(), "(1 2 3)");
        assert_eq!(tree_of(&[1, 3, 2]).shape(), "(1 2 3)");
    }

    #[test]
    fn overwrite_changes_no_structure() {
        let mut tree = tree_of(&[20, 4, 26, 3, 9]);
        let before = tree.shape();
        assert_eq!(tree.insert(9, -1, &Natural), Some(90));
        assert_eq!(tree.shape(), before);
        assert_eq!(tree.len(), 5);
        let nine = tree.search(&9, &Natural).unwrap();
        assert_eq!(tree.node(nine).value, -1);
    }

    #[test]
    fn insertion_scenario_shape() {
        let tree = tree_of(&[20, 4, 26, 3, 9, 2, 7, 11, 21]);
        assert_eq!(tree.shape(), "((2 3 .) 4 ((7 9 11) 20 (21 26 .)))");
        assert_eq!(tree.height(), 4);
    }

    #[test]
    fn two_child_removal_promotes_successor() {
        let mut tree = tree_of(&[20, 4, 26, 3, 9, 2, 7, 11, 21]);
        assert_eq!(tree.remove(&20, &Natural), Some((20, 200)));
        tree.validate(&Natural);
        assert_eq!(tree.shape(), "((2 3 .) 4 ((7 9 11) 21 26))");
    }

    #[test]
    fn removal_scenario_keeps_invariants() {
        let mut tree = tree_of(&[20, 4, 26, 3, 9, 2, 7, 11, 21]);
        for key in [2, 3, 4, 7, 11] {
            assert!(tree.remove(&key, &Natural).is_some());
            tree.validate(&Natural);
            assert_eq!(tree.search(&key, &Natural), None);
        }
        assert_eq!(in_order_keys(&tree), [9, 20, 21, 26]);
        assert_eq!(tree.shape(), "(9 20 (21 26 .))");
    }

    #[test]
    fn removal_can_rotate_at_several_ancestors() {
        let mut tree = tree_of(&[36, 30, 29, 33, 13, 12, 39, 31, 21, 20, 26, 6]);
        assert_eq!(tree.shape(), "((((6 12 .) 13 20) 21 (26 29 .)) 30 ((31 33 .) 36 39))");

        // 36 trades places with 39; fixing 33's subtree then leaves the root off by two.
        assert!(tree.remove(&36, &Natural).is_some());
        tree.validate(&Natural);
        assert_eq!(tree.shape(), "(((6 12 .) 13 20) 21 ((26 29 .) 30 (31 33 39)))");
    }

    #[test]
    fn removing_absent_key_is_a_no_op() {
        let mut tree = tree_of(&[5, 1, 9]);
        assert_eq!(tree.remove(&4, &Natural), None);
        assert_eq!(tree.len(), 3);
        let mut empty: RawAvlTree<i32, i32> = RawAvlTree::new();
        assert_eq!(empty.remove(&4, &Natural), None);
    }

    #[test]
    fn removing_the_last_entry_empties_the_tree() {
        let mut tree = tree_of(&[1]);
        assert_eq!(tree.remove(&1, &Natural), Some((1, 10)));
        assert!(tree.is_empty());
        assert_eq!(tree.root(), None);
        assert_eq!(tree.height(), 0);
    }

    #[test]
    fn rank_counts_strictly_smaller_keys() {
        let tree = tree_of(&[20, 4, 26, 3, 9, 2, 7, 11, 21]);
        assert_eq!(tree.rank(&2, &Natural), 0);
        assert_eq!(tree.rank(&8, &Natural), 4);
        assert_eq!(tree.rank(&9, &Natural), 4);
        assert_eq!(tree.rank(&100, &Natural), 9);
        assert_eq!(tree.rank(&-100, &Natural), 0);
    }

    #[test]
    fn select_walks_to_position() {
        let tree = tree_of(&[20, 4, 26, 3, 9, 2, 7, 11, 21]);
        let keys: Vec<i32> = (0..tree.len()).map(|rank| tree.node(tree.select(rank).unwrap()).key).collect();
        assert_eq!(keys, [2, 3, 4, 7, 9, 11, 20, 21, 26]);
        assert_eq!(tree.select(9), None);
    }

    #[test]
    fn descendants_counts_nodes_below() {
        let tree = tree_of(&[20, 4, 26, 3, 9, 2, 7, 11, 21]);
        let root = tree.root().unwrap();
        assert_eq!(tree.descendants(root), 8);
        let leaf = tree.search(&7, &Natural).unwrap();
        assert_eq!(tree.descendants(leaf), 0);
        let twenty = tree.search(&20, &Natural).unwrap();
        assert_eq!(tree.descendants(twenty), 5);
    }

    #[test]
    fn range_primitives() {
        let tree = tree_of(&[20, 4, 26, 3, 9, 2, 7, 11, 21]);
        let spine = tree.spine_from_lower(&8, &Natural);
        assert_eq!(tree.node(*spine.last().unwrap()).key, 9);
        let stop = tree.first_above(&22, &Natural).unwrap();
        assert_eq!(tree.node(stop).key, 26);
        assert_eq!(tree.first_above(&26, &Natural), None);
    }

    #[test]
    fn reversed_comparator_mirrors_the_tree() {
        let mut tree = RawAvlTree::new();
        for key in 0..64 {
            tree.insert(key, (), &Reverse(Natural));
        }
        tree.validate(&Reverse(Natural));
        let keys = in_order_keys(&tree);
        assert_eq!(keys, (0..64).rev().collect::<Vec<_>>());
    }

    #[test]
    fn sequential_inserts_stay_logarithmic() {
        let mut tree = RawAvlTree::new();
        for key in 0..4096 {
            tree.insert(key, (), &Natural);
        }
        tree.validate(&Natural);
        // A perfectly balanced tree of 4096 nodes has height 13.
        assert_eq!(tree.height(), 13);
    }

    #[test]
    fn spine_stays_inline_for_deep_trees() {
        let mut tree = RawAvlTree::new();
        for key in (0..4096).rev() {
            tree.insert(key, (), &Natural);
        }
        let spine = tree.spine_from_first();
        assert!(spine.len() <= usize::from(tree.height()));
        assert!(!spine.spilled());
        assert!(spine.inline_size() > 46);

        let walked = tree.spine_from_lower(&2048, &Natural);
        assert!(!walked.spilled());
    }

    #[test]
    fn pop_extremes() {
        let mut tree = tree_of(&[5, 3, 8, 1, 4]);
        assert_eq!(tree.pop_first(), Some((1, 10)));
        assert_eq!(tree.pop_last(), Some((8, 80)));
        tree.validate(&Natural);
        assert_eq!(in_order_keys(&tree), [3, 4, 5]);
    }

    #[derive(Clone, Debug)]
    enum Op {
        Insert(i16),
        Remove(i16),
        PopFirst,
        PopLast,
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            6 => (-200i16..200).prop_map(Op::Insert),
            4 => (-200i16..200).prop_map(Op::Remove),
            1 => Just(Op::PopFirst),
            1 => Just(Op::PopLast),
        ]
    }

    proptest! {
        #[test]
        fn invariants_hold_after_every_mutation(ops in prop::collection::vec(op_strategy(), 0..600)) {
            let mut tree = RawAvlTree::new();
            let mut model = alloc::collections::BTreeMap::new();

            for op in ops {
                match op {
                    Op::Insert(key) => {
                        prop_assert_eq!(tree.insert(key, u32::from(key.unsigned_abs()), &Natural), model.insert(key, u32::from(key.unsigned_abs())));
                    }
                    Op::Remove(key) => {
                        prop_assert_eq!(tree.remove(&key, &Natural), model.remove_entry(&key));
                    }
                    Op::PopFirst => prop_assert_eq!(tree.pop_first(), model.pop_first()),
                    Op::PopLast => prop_assert_eq!(tree.pop_last(), model.pop_last()),
                }
                tree.validate(&Natural);
                prop_assert_eq!(tree.len(), model.len());
            }
            prop_assert_eq!(in_order_keys(&tree), model.keys().copied().collect::<Vec<_>>());
        }

        #[test]
        fn rank_inverts_select(keys in prop::collection::btree_set(any::<i32>(), 0..300)) {
            let mut tree = RawAvlTree::new();
            for &key in &keys {
                tree.insert(key, (), &Natural);
            }
            for rank in 0..tree.len() {
                let handle = tree.select(rank).unwrap();
                prop_assert_eq!(tree.rank(&tree.node(handle).key, &Natural), rank);
            }
        }
    }
}
