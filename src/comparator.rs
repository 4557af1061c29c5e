use core::cmp::Ordering;

/// A strict total order over keys, injected into an [`AvlTreeMap`](crate::AvlTreeMap).
///
/// The map never looks at keys except through its comparator, so any key type can be
/// stored as long as some comparator orders it. It is a logic error for `compare` to
/// be inconsistent (non-transitive, or changing its answer for the same pair) while
/// keys are in the map. The map will not misbehave unsafely, but lookups and
/// iteration order become unspecified.
///
/// Closures work out of the box:
///
/// ```
/// use avl_ost::AvlTreeMap;
///
/// // Odd keys before even keys, each group ascending.
/// let mut map = AvlTreeMap::with_comparator(|a: &i32, b: &i32| (a % 2 == 0).cmp(&(b % 2 == 0)).then(a.cmp(b)));
/// for key in 1..=6 {
///     map.insert(key, ());
/// }
///
/// assert_eq!(map.keys().copied().collect::<Vec<_>>(), [1, 3, 5, 2, 4, 6]);
/// ```
pub trait Comparator<K: ?Sized> {
    /// Compares two keys.
    fn compare(&self, a: &K, b: &K) -> Ordering;
}

/// The key type's own [`Ord`] implementation. This is the default comparator.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Natural;

impl<K: ?Sized + Ord> Comparator<K> for Natural {
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        a.cmp(b)
    }
}

/// Reverses the order of the wrapped comparator.
///
/// ```
/// use avl_ost::{AvlTreeMap, Natural, Reverse};
///
/// let mut map = AvlTreeMap::with_comparator(Reverse(Natural));
/// map.extend([(1, 'a'), (3, 'c'), (2, 'b')]);
/// assert_eq!(map.values().collect::<String>(), "cba");
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Reverse<C>(pub C);

impl<K: ?Sized, C: Comparator<K>> Comparator<K> for Reverse<C> {
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        self.0.compare(b, a)
    }
}

impl<K: ?Sized, F> Comparator<K> for F
where
    F: Fn(&K, &K) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        self(a, b)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn natural_matches_ord() {
        assert_eq!(Natural.compare(&1, &2), Ordering::Less);
        assert_eq!(Natural.compare("b", "a"), Ordering::Greater);
        assert_eq!(Natural.compare(&5u8, &5u8), Ordering::Equal);
    }

    #[test]
    fn reverse_flips_order() {
        assert_eq!(Reverse(Natural).compare(&1, &2), Ordering::Greater);
        assert_eq!(Reverse(Reverse(Natural)).compare(&1, &2), Ordering::Less);
    }

    #[test]
    fn closures_are_comparators() {
        let by_abs = |a: &i32, b: &i32| a.abs().cmp(&b.abs());
        assert_eq!(by_abs.compare(&-3, &2), Ordering::Greater);
        assert_eq!(by_abs.compare(&-3, &3), Ordering::Equal);
    }
}
