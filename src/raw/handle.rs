use core::num::NonZero;

// Unit tests narrow handles to 16 bits so `Handle::MAX` and the arena's capacity
// limit are reachable in a test.
#[cfg(test)]
type RawHandle = u16;
#[cfg(not(test))]
type RawHandle = u32;

/// Index of a tree node inside the arena.
///
/// Stored off-by-one in a `NonZero` so that `Option<Handle>` (every child and parent
/// link) costs no more than the handle itself.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(transparent)]
pub(crate) struct Handle(NonZero<RawHandle>);

impl Handle {
    /// Largest slot index a handle can address.
    pub(crate) const MAX: usize = (RawHandle::MAX - 1) as usize;

    #[inline]
    pub(crate) const fn from_slot(slot: usize) -> Self {
        assert!(slot <= Self::MAX, "`Handle::from_slot()` - `slot` > `Handle::MAX`!");
        #[allow(clippy::cast_possible_truncation)]
        match NonZero::new((slot + 1) as RawHandle) {
            Some(raw) => Self(raw),
            None => unreachable!(),
        }
    }

    #[inline]
    pub(crate) const fn slot(self) -> usize {
        (self.0.get() - 1) as usize
    }
}
