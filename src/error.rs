use thiserror::Error;

/// Returned by [`AvlTreeMap::min`](crate::AvlTreeMap::min) and
/// [`AvlTreeMap::max`](crate::AvlTreeMap::max) when the map holds no entries.
///
/// Absent keys are never reported through this type; lookups answer with `None`
/// or `false` instead.
///
/// # Examples
///
/// ```
/// use avl_ost::{AvlTreeMap, EmptyTreeError};
///
/// let map: AvlTreeMap<u32, &str> = AvlTreeMap::new();
/// assert_eq!(map.min(), Err(EmptyTreeError));
/// assert_eq!(EmptyTreeError.to_string(), "tree is empty");
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Error)]
#[error("tree is empty")]
pub struct EmptyTreeError;
