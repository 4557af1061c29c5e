use core::cmp::Ordering;
use core::fmt;
use core::iter::FusedIterator;
use core::ops::Index;

use crate::comparator::{Comparator, Natural};
use crate::error::EmptyTreeError;
use crate::raw::{Handle, Node, RawAvlTree, Spine};

mod capacity;
mod order_statistic;
#[cfg(feature = "serde")]
mod serde_impl;

pub use crate::Rank;

/// An ordered map based on an [AVL tree].
///
/// Entries are kept in the order defined by the map's [`Comparator`]. By default that is
/// the key type's [`Ord`] implementation ([`Natural`]); any other strict total order can
/// be injected with [`AvlTreeMap::with_comparator`], so keys need not implement `Ord` at
/// all.
///
/// Every node records the height of its subtree, and after each insertion or removal the
/// tree is rotated until no node's two subtrees differ in height by more than one. Lookups,
/// insertions and removals therefore visit O(log n) nodes.
///
/// Iterators obtained from [`iter`](AvlTreeMap::iter), [`keys`](AvlTreeMap::keys),
/// [`values`](AvlTreeMap::values) and [`range`](AvlTreeMap::range) produce their items in
/// ascending order. They walk the tree with an explicit stack rather than recursion and are
/// lazy: nothing is visited until an item is requested.
///
/// # Examples
///
/// ```
/// use avl_ost::AvlTreeMap;
///
/// let mut ranks = AvlTreeMap::new();
/// ranks.insert(20, 'A');
/// ranks.insert(4, 'B');
/// ranks.insert(26, 'C');
/// ranks.insert(9, 'E');
///
/// assert_eq!(ranks.get(&9), Some(&'E'));
/// assert_eq!(ranks.len(), 4);
///
/// // Values come out in key order.
/// assert_eq!(ranks.values().collect::<String>(), "BEAC");
///
/// // Everything with a key in 5..=21.
/// assert_eq!(ranks.range_search(&5, &21).collect::<String>(), "EA");
///
/// // Order statistics.
/// assert_eq!(ranks.rank(&20), 2);
/// assert_eq!(ranks.select(0), Some(&4));
///
/// assert!(ranks.remove(&4));
/// assert_eq!(ranks.min(), Ok(&'E'));
/// ```
///
/// [AVL tree]: https://en.wikipedia.org/wiki/AVL_tree
pub struct AvlTreeMap<K, V, C = Natural> {
    raw: RawAvlTree<K, V>,
    cmp: C,
}

/// An iterator over the entries of an `AvlTreeMap`, in ascending key order.
///
/// This `struct` is created by the [`iter`] method on [`AvlTreeMap`].
///
/// [`iter`]: AvlTreeMap::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, K, V> {
    tree: &'a RawAvlTree<K, V>,
    spine: Spine,
    remaining: usize,
}

/// An iterator over the keys of an `AvlTreeMap`.
///
/// This `struct` is created by the [`keys`] method on [`AvlTreeMap`].
///
/// [`keys`]: AvlTreeMap::keys
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

/// An iterator over the values of an `AvlTreeMap`.
///
/// This `struct` is created by the [`values`] method on [`AvlTreeMap`].
///
/// [`values`]: AvlTreeMap::values
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

/// An owning iterator over the entries of an `AvlTreeMap`, in ascending key order.
///
/// This `struct` is created by the [`into_iter`] method on [`AvlTreeMap`]
/// (provided by the [`IntoIterator`] trait).
///
/// [`into_iter`]: IntoIterator::into_iter
pub struct IntoIter<K, V> {
    tree: RawAvlTree<K, V>,
    spine: Spine,
}

/// An iterator over the entries whose keys lie in a closed interval.
///
/// This `struct` is created by the [`range`] method on [`AvlTreeMap`].
///
/// [`range`]: AvlTreeMap::range
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Range<'a, K, V> {
    tree: &'a RawAvlTree<K, V>,
    spine: Spine,
    // First node past the upper bound; reaching it ends the walk.
    stop: Option<Handle>,
}

/// An iterator over the values whose keys lie in a closed interval.
///
/// This `struct` is created by the [`range_search`] method on [`AvlTreeMap`].
///
/// [`range_search`]: AvlTreeMap::range_search
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct RangeValues<'a, K, V> {
    inner: Range<'a, K, V>,
}

impl<K, V> AvlTreeMap<K, V> {
    /// Makes a new, empty `AvlTreeMap` ordered by the keys' [`Ord`] implementation.
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlTreeMap;
    ///
    /// let mut map = AvlTreeMap::new();
    ///
    /// // entries can now be inserted into the empty map
    /// map.insert(1, "a");
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        Self::with_comparator(Natural)
    }
}

impl<K, V, C> AvlTreeMap<K, V, C> {
    /// Makes a new, empty `AvlTreeMap` ordered by `cmp`.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::{AvlTreeMap, Natural, Reverse};
    ///
    /// let mut map = AvlTreeMap::with_comparator(Reverse(Natural));
    /// map.insert(1, "a");
    /// map.insert(2, "b");
    /// assert_eq!(map.first_key_value(), Some((&2, &"b")));
    /// ```
    #[must_use]
    pub const fn with_comparator(cmp: C) -> Self {
        Self {
            raw: RawAvlTree::new(),
            cmp,
        }
    }

    /// Returns the comparator that orders this map.
    pub const fn comparator(&self) -> &C {
        &self.cmp
    }

    /// Returns the number of entries in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlTreeMap;
    ///
    /// let mut a = AvlTreeMap::new();
    /// assert_eq!(a.len(), 0);
    /// a.insert(1, "a");
    /// a.insert(1, "b");
    /// assert_eq!(a.len(), 1);
    /// ```
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the map contains no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Clears the map, dropping every entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlTreeMap;
    ///
    /// let mut a = AvlTreeMap::new();
    /// a.insert(1, "a");
    /// a.clear();
    /// assert!(a.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Returns the height of the tree: 0 when empty, 1 for a single entry.
    ///
    /// An AVL tree of `n` entries is never taller than about `1.44 * log2(n + 2)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlTreeMap;
    ///
    /// let map: AvlTreeMap<u32, ()> = (0..7).map(|k| (k, ())).collect();
    /// assert_eq!(map.height(), 3);
    /// ```
    #[must_use]
    pub fn height(&self) -> usize {
        usize::from(self.raw.height())
    }

    /// Returns the entry with the smallest key, or `None` if the map is empty.
    #[must_use]
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.raw.first().map(|handle| self.entry(handle))
    }

    /// Returns the entry with the largest key, or `None` if the map is empty.
    #[must_use]
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.raw.last().map(|handle| self.entry(handle))
    }

    /// Returns the value of the smallest key.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyTreeError`] if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::{AvlTreeMap, EmptyTreeError};
    ///
    /// let mut map = AvlTreeMap::new();
    /// assert_eq!(map.min(), Err(EmptyTreeError));
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// assert_eq!(map.min(), Ok(&"a"));
    /// ```
    pub fn min(&self) -> Result<&V, EmptyTreeError> {
        self.first_key_value().map(|(_, value)| value).ok_or(EmptyTreeError)
    }

    /// Returns the value of the largest key.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyTreeError`] if the map is empty.
    pub fn max(&self) -> Result<&V, EmptyTreeError> {
        self.last_key_value().map(|(_, value)| value).ok_or(EmptyTreeError)
    }

    /// Removes and returns the entry with the smallest key.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlTreeMap;
    ///
    /// let mut map = AvlTreeMap::from([(1, "a"), (2, "b")]);
    /// assert_eq!(map.pop_first(), Some((1, "a")));
    /// assert_eq!(map.pop_first(), Some((2, "b")));
    /// assert_eq!(map.pop_first(), None);
    /// ```
    pub fn pop_first(&mut self) -> Option<(K, V)> {
        self.raw.pop_first()
    }

    /// Removes and returns the entry with the largest key.
    pub fn pop_last(&mut self) -> Option<(K, V)> {
        self.raw.pop_last()
    }

    /// Gets an iterator over the entries of the map, sorted by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlTreeMap;
    ///
    /// let mut map = AvlTreeMap::new();
    /// map.insert(3, "c");
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    ///
    /// for (key, value) in map.iter() {
    ///     println!("{key}: {value}");
    /// }
    ///
    /// let (first_key, first_value) = map.iter().next().unwrap();
    /// assert_eq!((*first_key, *first_value), (1, "a"));
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            tree: &self.raw,
            spine: self.raw.spine_from_first(),
            remaining: self.raw.len(),
        }
    }

    /// Gets an iterator over the keys of the map, in sorted order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Gets an iterator over the values of the map, in order by key.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    fn entry(&self, handle: Handle) -> (&K, &V) {
        let node = self.raw.node(handle);
        (&node.key, &node.value)
    }
}

impl<K, V, C: Comparator<K>> AvlTreeMap<K, V, C> {
    /// Returns a reference to the value corresponding to the key.
    ///
    /// An empty map simply answers `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlTreeMap;
    ///
    /// let mut map = AvlTreeMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// assert_eq!(map.get(&2), None);
    /// ```
    pub fn get(&self, key: &K) -> Option<&V> {
        self.get_key_value(key).map(|(_, value)| value)
    }

    /// Returns the stored key and its value for a key that compares equal to `key`.
    pub fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        self.raw.search(key, &self.cmp).map(|handle| self.entry(handle))
    }

    /// Returns a mutable reference to the value corresponding to the key.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlTreeMap;
    ///
    /// let mut map = AvlTreeMap::new();
    /// map.insert(1, "a");
    /// if let Some(x) = map.get_mut(&1) {
    ///     *x = "b";
    /// }
    /// assert_eq!(map[&1], "b");
    /// ```
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let handle = self.raw.search(key, &self.cmp)?;
        Some(&mut self.raw.node_mut(handle).value)
    }

    /// Returns `true` if the map contains a value for the specified key.
    pub fn contains_key(&self, key: &K) -> bool {
        self.raw.search(key, &self.cmp).is_some()
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map did not have this key present, `None` is returned and the tree is
    /// rebalanced.
    ///
    /// If the map did have this key present, the value is updated in place and the old
    /// value is returned. The stored key is not replaced and the tree shape is unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlTreeMap;
    ///
    /// let mut map = AvlTreeMap::new();
    /// assert_eq!(map.insert(37, "a"), None);
    /// assert_eq!(map.is_empty(), false);
    ///
    /// map.insert(37, "b");
    /// assert_eq!(map.insert(37, "c"), Some("b"));
    /// assert_eq!(map[&37], "c");
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.raw.insert(key, value, &self.cmp)
    }

    /// Removes a key from the map, returning `true` if it was present.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlTreeMap;
    ///
    /// let mut map = AvlTreeMap::new();
    /// map.insert(1, "a");
    /// assert!(map.remove(&1));
    /// assert!(!map.remove(&1));
    /// ```
    pub fn remove(&mut self, key: &K) -> bool {
        self.remove_entry(key).is_some()
    }

    /// Removes a key from the map, returning the stored key and value if it was present.
    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        self.raw.remove(key, &self.cmp)
    }

    /// Gets an iterator over the entries whose keys satisfy `lower <= key <= upper`,
    /// in ascending order.
    ///
    /// Neither bound has to be present in the map. If `lower` is greater than `upper`
    /// the iterator is empty. Subtrees entirely outside the interval are never visited.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlTreeMap;
    ///
    /// let map = AvlTreeMap::from([(3, "a"), (5, "b"), (8, "c")]);
    /// let found: Vec<_> = map.range(&4, &8).collect();
    /// assert_eq!(found, [(&5, &"b"), (&8, &"c")]);
    /// assert_eq!(map.range(&9, &1).count(), 0);
    /// ```
    pub fn range(&self, lower: &K, upper: &K) -> Range<'_, K, V> {
        if self.cmp.compare(lower, upper) == Ordering::Greater {
            return Range {
                tree: &self.raw,
                spine: Spine::new(),
                stop: None,
            };
        }
        Range {
            tree: &self.raw,
            spine: self.raw.spine_from_lower(lower, &self.cmp),
            stop: self.raw.first_above(upper, &self.cmp),
        }
    }

    /// Gets an iterator over the values whose keys satisfy `lower <= key <= upper`,
    /// in ascending key order.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlTreeMap;
    ///
    /// let mut map = AvlTreeMap::new();
    /// for (key, value) in [20, 4, 26, 3, 9, 2, 7, 11, 21].into_iter().zip('A'..) {
    ///     map.insert(key, value);
    /// }
    /// assert_eq!(map.range_search(&8, &22).collect::<String>(), "EHAI");
    /// ```
    pub fn range_search(&self, lower: &K, upper: &K) -> RangeValues<'_, K, V> {
        RangeValues {
            inner: self.range(lower, upper),
        }
    }
}

impl<K: Clone, V: Clone, C: Clone> Clone for AvlTreeMap<K, V, C> {
    fn clone(&self) -> Self {
        Self {
            raw: self.raw.clone(),
            cmp: self.cmp.clone(),
        }
    }
}

impl<K: PartialEq, V: PartialEq, C> PartialEq for AvlTreeMap<K, V, C> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq, C> Eq for AvlTreeMap<K, V, C> {}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for AvlTreeMap<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, C: Default> Default for AvlTreeMap<K, V, C> {
    /// Creates an empty `AvlTreeMap`.
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<K, V, C: Comparator<K> + Default> FromIterator<(K, V)> for AvlTreeMap<K, V, C> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Self::default();
        map.extend(iter);
        map
    }
}

impl<K, V, C: Comparator<K>> Extend<(K, V)> for AvlTreeMap<K, V, C> {
    #[inline]
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Ord, V, const N: usize> From<[(K, V); N]> for AvlTreeMap<K, V> {
    /// Converts a `[(K, V); N]` into an `AvlTreeMap<K, V>`.
    ///
    /// If any entries in the array have equal keys, all but the last entry are discarded.
    fn from(arr: [(K, V); N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<K, V, C: Comparator<K>> Index<&K> for AvlTreeMap<K, V, C> {
    type Output = V;

    /// Returns a reference to the value corresponding to the supplied key.
    ///
    /// # Panics
    ///
    /// Panics if the key is not present in the map.
    #[inline]
    fn index(&self, key: &K) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

impl<'a, K, V, C> IntoIterator for &'a AvlTreeMap<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<K, V, C> IntoIterator for AvlTreeMap<K, V, C> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    /// Gets an owning iterator over the entries of the map, sorted by key.
    fn into_iter(self) -> IntoIter<K, V> {
        IntoIter {
            spine: self.raw.spine_from_first(),
            tree: self.raw,
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let handle = self.spine.pop()?;
        let tree = self.tree;
        let node = tree.node(handle);
        tree.push_left_edge(&mut self.spine, node.right());
        self.remaining -= 1;
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Iter {
            tree: self.tree,
            spine: self.spine.clone(),
            remaining: self.remaining,
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

impl<K, V> Clone for Keys<'_, K, V> {
    fn clone(&self) -> Self {
        Keys {
            inner: self.inner.clone(),
        }
    }
}

impl<K: fmt::Debug, V> fmt::Debug for Keys<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for Values<'_, K, V> {}

impl<K, V> Clone for Values<'_, K, V> {
    fn clone(&self) -> Self {
        Values {
            inner: self.inner.clone(),
        }
    }
}

impl<K, V: fmt::Debug> fmt::Debug for Values<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<(K, V)> {
        let handle = self.spine.pop()?;
        let right = self.tree.node(handle).right();
        self.tree.push_left_edge(&mut self.spine, right);
        // Everything left of `handle` is already gone and its right edge is queued,
        // so nothing will look at this node again.
        let Node { key, value, .. } = self.tree.take_node(handle);
        Some((key, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.tree.len(), Some(self.tree.len()))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {
    fn len(&self) -> usize {
        self.tree.len()
    }
}

impl<K, V> FusedIterator for IntoIter<K, V> {}

impl<K, V> fmt::Debug for IntoIter<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntoIter").field("remaining", &self.tree.len()).finish()
    }
}

impl<'a, K, V> Iterator for Range<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let handle = self.spine.pop()?;
        if Some(handle) == self.stop {
            self.spine.clear();
            return None;
        }
        let tree = self.tree;
        let node = tree.node(handle);
        tree.push_left_edge(&mut self.spine, node.right());
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.spine.is_empty() {
            (0, Some(0))
        } else {
            (0, Some(self.tree.len()))
        }
    }
}

impl<K, V> FusedIterator for Range<'_, K, V> {}

impl<K, V> Clone for Range<'_, K, V> {
    fn clone(&self) -> Self {
        Range {
            tree: self.tree,
            spine: self.spine.clone(),
            stop: self.stop,
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Range<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K, V> Iterator for RangeValues<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> FusedIterator for RangeValues<'_, K, V> {}

impl<K, V> Clone for RangeValues<'_, K, V> {
    fn clone(&self) -> Self {
        RangeValues {
            inner: self.inner.clone(),
        }
    }
}

impl<K, V: fmt::Debug> fmt::Debug for RangeValues<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use alloc::string::String;
    use alloc::vec::Vec;

    use super::*;

    fn scenario() -> AvlTreeMap<i32, char> {
        let mut map = AvlTreeMap::new();
        for (key, value) in [20, 4, 26, 3, 9, 2, 7, 11, 21].into_iter().zip('A'..) {
            map.insert(key, value);
        }
        map
    }

    #[test]
    fn iteration_is_ascending() {
        let map = scenario();
        assert_eq!(map.keys().copied().collect::<Vec<_>>(), [2, 3, 4, 7, 9, 11, 20, 21, 26]);
        assert_eq!(map.values().collect::<String>(), "FDBGEHAIC");
        map.raw.validate(&map.cmp);
    }

    #[test]
    fn iterators_restart_and_report_length() {
        let map = scenario();
        let mut iter = map.iter();
        assert_eq!(iter.len(), 9);
        iter.next();
        let rest = iter.clone();
        assert_eq!(iter.count(), 8);
        assert_eq!(rest.len(), 8);
        assert_eq!(map.iter().count(), 9);
    }

    #[test]
    fn range_bounds_need_not_exist() {
        let map = scenario();
        assert_eq!(map.range_search(&8, &22).collect::<String>(), "EHAI");
        assert_eq!(map.range_search(&9, &21).collect::<String>(), "EHAI");
        assert_eq!(map.range_search(&27, &40).count(), 0);
        assert_eq!(map.range_search(&-5, &1).count(), 0);
        assert_eq!(map.range_search(&12, &19).count(), 0);
        assert_eq!(map.range_search(&20, &20).collect::<String>(), "A");
        assert_eq!(map.range_search(&i32::MIN, &i32::MAX).collect::<String>(), "FDBGEHAIC");
    }

    #[test]
    fn inverted_range_is_empty() {
        let map = scenario();
        assert_eq!(map.range(&22, &8).count(), 0);
    }

    #[test]
    fn range_is_fused_after_stop() {
        let map = scenario();
        let mut range = map.range(&2, &3);
        assert_eq!(range.next(), Some((&2, &'F')));
        assert_eq!(range.next(), Some((&3, &'D')));
        assert_eq!(range.next(), None);
        assert_eq!(range.next(), None);
    }

    #[test]
    fn removing_scenario_keys() {
        let mut map = scenario();
        for key in [2, 3, 4, 7, 11] {
            assert!(map.remove(&key));
            assert!(!map.contains_key(&key));
            map.raw.validate(&map.cmp);
        }
        assert_eq!(map.keys().copied().collect::<Vec<_>>(), [9, 20, 21, 26]);
        assert_eq!(map.len(), 4);
    }

    #[test]
    fn into_iter_drains_in_order() {
        let map = scenario();
        let mut iter = map.into_iter();
        assert_eq!(iter.len(), 9);
        assert_eq!(iter.next(), Some((2, 'F')));
        assert_eq!(iter.len(), 8);
        let rest: String = iter.map(|(_, value)| value).collect();
        assert_eq!(rest, "DBGEHAIC");
    }

    #[test]
    fn partially_consumed_into_iter_drops_cleanly() {
        let map: AvlTreeMap<i32, String> = (0..100).map(|k| (k, alloc::format!("v{k}"))).collect();
        let mut iter = map.into_iter();
        assert_eq!(iter.nth(10), Some((10, String::from("v10"))));
        drop(iter);
    }

    #[test]
    fn debug_renders_as_a_map() {
        let map = AvlTreeMap::from([(2, 'b'), (1, 'a')]);
        assert_eq!(alloc::format!("{map:?}"), "{1: 'a', 2: 'b'}");
        assert_eq!(alloc::format!("{:?}", map.keys()), "[1, 2]");
    }

    #[test]
    fn equality_ignores_shape() {
        let ascending: AvlTreeMap<i32, i32> = (0..50).map(|k| (k, k)).collect();
        let descending: AvlTreeMap<i32, i32> = (0..50).rev().map(|k| (k, k)).collect();
        assert_eq!(ascending, descending);
        let mut other = descending.clone();
        other.insert(7, -7);
        assert_ne!(ascending, other);
    }
}
