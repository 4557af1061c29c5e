use core::ops::Index;

use super::AvlTreeMap;
use crate::Rank;
use crate::comparator::Comparator;

impl<K, V, C> AvlTreeMap<K, V, C> {
    /// Returns the key at zero-based position `rank` in ascending order, or `None` if
    /// `rank >= self.len()`.
    ///
    /// # Complexity
    ///
    /// O(rank + log n). Nodes carry no subtree sizes, so the position is found by
    /// walking the tree in order.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlTreeMap;
    ///
    /// let map = AvlTreeMap::from([(10, "a"), (30, "c"), (20, "b")]);
    /// assert_eq!(map.select(1), Some(&20));
    /// assert_eq!(map.select(3), None);
    /// ```
    #[must_use]
    pub fn select(&self, rank: usize) -> Option<&K> {
        self.select_entry(rank).map(|(key, _)| key)
    }

    /// Returns the entry at zero-based position `rank` in ascending order.
    ///
    /// # Complexity
    ///
    /// O(rank + log n)
    #[must_use]
    pub fn select_entry(&self, rank: usize) -> Option<(&K, &V)> {
        self.raw.select(rank).map(|handle| self.entry(handle))
    }
}

impl<K, V, C: Comparator<K>> AvlTreeMap<K, V, C> {
    /// Returns the number of keys in the map strictly less than `key`.
    ///
    /// `key` itself need not be present, so this is also the position at which it
    /// would be inserted. For every `r < self.len()`,
    /// `self.rank(self.select(r).unwrap()) == r`.
    ///
    /// # Complexity
    ///
    /// O(n) in the worst case: nodes carry no subtree sizes, so every left subtree
    /// passed on the way down is counted node by node.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlTreeMap;
    ///
    /// let map = AvlTreeMap::from([(10, "a"), (20, "b"), (30, "c")]);
    /// assert_eq!(map.rank(&10), 0);
    /// assert_eq!(map.rank(&25), 2);
    /// assert_eq!(map.rank(&99), 3);
    /// ```
    #[must_use]
    pub fn rank(&self, key: &K) -> usize {
        self.raw.rank(key, &self.cmp)
    }

    /// Returns how many entries sit strictly below `key`'s node in the tree, or 0 if
    /// `key` is absent.
    ///
    /// The answer depends on the current tree shape, not only on the set of keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlTreeMap;
    ///
    /// let map = AvlTreeMap::from([(1, ()), (2, ()), (3, ())]);
    /// assert_eq!(map.descendant_count(&2), 2); // 2 ends up at the root
    /// assert_eq!(map.descendant_count(&3), 0);
    /// assert_eq!(map.descendant_count(&4), 0);
    /// ```
    #[must_use]
    pub fn descendant_count(&self, key: &K) -> usize {
        self.raw.search(key, &self.cmp).map_or(0, |handle| self.raw.descendants(handle))
    }
}

/// Indexes into the map by rank.
///
/// # Panics
///
/// Panics if `rank` is out of bounds.
///
/// # Examples
///
/// ```
/// use avl_ost::{AvlTreeMap, Rank};
///
/// let mut map = AvlTreeMap::new();
/// map.insert("b", 2);
/// map.insert("a", 1);
///
/// assert_eq!(map[Rank(0)], 1);
/// ```
impl<K, V, C> Index<Rank> for AvlTreeMap<K, V, C> {
    type Output = V;

    fn index(&self, rank: Rank) -> &V {
        self.select_entry(rank.0).map(|(_, value)| value).expect("rank out of bounds")
    }
}
