use super::AvlTreeMap;
use crate::comparator::Natural;
use crate::raw::RawAvlTree;

impl<K, V> AvlTreeMap<K, V> {
    /// Creates an empty map with node storage for at least `capacity` entries.
    ///
    /// This is an extension and is not part of the standard `BTreeMap` API.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlTreeMap;
    ///
    /// let map: AvlTreeMap<i32, i32> = AvlTreeMap::with_capacity(32);
    /// assert!(map.is_empty());
    /// assert!(map.capacity() >= 32);
    /// ```
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        AvlTreeMap {
            raw: RawAvlTree::with_capacity(capacity),
            cmp: Natural,
        }
    }
}

impl<K, V, C> AvlTreeMap<K, V, C> {
    /// Creates an empty map ordered by `cmp`, with node storage for at least `capacity`
    /// entries.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::{AvlTreeMap, Natural, Reverse};
    ///
    /// let mut map = AvlTreeMap::with_capacity_and_comparator(16, Reverse(Natural));
    /// assert!(map.capacity() >= 16);
    /// map.insert(1, "a");
    /// map.insert(2, "b");
    /// assert_eq!(map.first_key_value(), Some((&2, &"b")));
    /// ```
    #[must_use]
    pub fn with_capacity_and_comparator(capacity: usize, cmp: C) -> Self {
        AvlTreeMap {
            raw: RawAvlTree::with_capacity(capacity),
            cmp,
        }
    }

    /// Returns how many entries the map can hold before its node storage reallocates.
    ///
    /// Slots freed by removals are reused before the storage grows.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }
}
