/// A zero-based position in the ascending order of a map's keys.
///
/// Used to index an [`AvlTreeMap`](crate::AvlTreeMap) by position rather than by key.
///
/// # Examples
///
/// ```
/// use avl_ost::{AvlTreeMap, Rank};
///
/// let map = AvlTreeMap::from([("a", 10), ("b", 20)]);
/// assert_eq!(map[Rank(1)], 20);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Rank(pub usize);
