//! The narrow map contract offered to collaborators.
//!
//! A wrapper that shards, locks or persists maps can be written against these traits
//! and host any implementation, with [`AvlTreeMap`] as the ordered one.

use crate::avl_tree_map::AvlTreeMap;
use crate::comparator::Comparator;
use crate::error::EmptyTreeError;

/// Point operations every map supports.
pub trait Map<K, V> {
    /// Inserts or overwrites an entry, returning the replaced value.
    fn insert(&mut self, key: K, value: V) -> Option<V>;

    /// Looks up the value stored under `key`.
    fn get(&self, key: &K) -> Option<&V>;

    /// Removes `key`, returning `true` if it was present.
    fn remove(&mut self, key: &K) -> bool;

    /// Returns `true` if `key` is present.
    fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Drops every entry.
    fn clear(&mut self);

    /// Number of entries.
    fn len(&self) -> usize;

    /// Returns `true` if there are no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Ordered queries on top of [`Map`].
pub trait SearchTree<K, V>: Map<K, V> {
    /// Value of the smallest key.
    ///
    /// # Errors
    ///
    /// [`EmptyTreeError`] if there are no entries.
    fn min(&self) -> Result<&V, EmptyTreeError>;

    /// Value of the largest key.
    ///
    /// # Errors
    ///
    /// [`EmptyTreeError`] if there are no entries.
    fn max(&self) -> Result<&V, EmptyTreeError>;

    /// Number of keys strictly less than `key`.
    fn rank(&self, key: &K) -> usize;

    /// Key at zero-based ascending position `rank`.
    fn select(&self, rank: usize) -> Option<&K>;

    /// Values whose keys satisfy `lower <= key <= upper`, ascending.
    fn range_values<'a>(&'a self, lower: &'a K, upper: &'a K) -> impl Iterator<Item = &'a V>
    where
        K: 'a,
        V: 'a;
}

impl<K, V, C: Comparator<K>> Map<K, V> for AvlTreeMap<K, V, C> {
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        AvlTreeMap::insert(self, key, value)
    }

    fn get(&self, key: &K) -> Option<&V> {
        AvlTreeMap::get(self, key)
    }

    fn remove(&mut self, key: &K) -> bool {
        AvlTreeMap::remove(self, key)
    }

    fn contains_key(&self, key: &K) -> bool {
        AvlTreeMap::contains_key(self, key)
    }

    fn clear(&mut self) {
        AvlTreeMap::clear(self);
    }

    fn len(&self) -> usize {
        AvlTreeMap::len(self)
    }

    fn is_empty(&self) -> bool {
        AvlTreeMap::is_empty(self)
    }
}

impl<K, V, C: Comparator<K>> SearchTree<K, V> for AvlTreeMap<K, V, C> {
    fn min(&self) -> Result<&V, EmptyTreeError> {
        AvlTreeMap::min(self)
    }

    fn max(&self) -> Result<&V, EmptyTreeError> {
        AvlTreeMap::max(self)
    }

    fn rank(&self, key: &K) -> usize {
        AvlTreeMap::rank(self, key)
    }

    fn select(&self, rank: usize) -> Option<&K> {
        AvlTreeMap::select(self, rank)
    }

    fn range_values<'a>(&'a self, lower: &'a K, upper: &'a K) -> impl Iterator<Item = &'a V>
    where
        K: 'a,
        V: 'a,
    {
        self.range_search(lower, upper)
    }
}
