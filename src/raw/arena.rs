use alloc::vec::Vec;

use super::handle::Handle;

/// Slab of tree nodes addressed by [`Handle`].
///
/// Freed slots are recycled through `vacant`, so a handle stays valid exactly as long
/// as the node it names is linked into the tree.
#[derive(Clone)]
pub(crate) struct Arena<T> {
    slots: Vec<Option<T>>,
    vacant: Vec<Handle>,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            vacant: Vec::new(),
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            vacant: Vec::new(),
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Number of occupied slots.
    pub(crate) const fn len(&self) -> usize {
        self.slots.len().saturating_sub(self.vacant.len())
    }

    #[cfg(test)]
    pub(crate) const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn alloc(&mut self, element: T) -> Handle {
        if let Some(handle) = self.vacant.pop() {
            self.slots[handle.slot()] = Some(element);
            return handle;
        }
        assert!(
            self.slots.len() <= Handle::MAX,
            "`Arena::alloc()` - arena is at maximum capacity ({})",
            Handle::MAX + 1
        );
        self.slots.push(Some(element));
        Handle::from_slot(self.slots.len() - 1)
    }

    #[inline]
    pub(crate) fn get(&self, handle: Handle) -> &T {
        self.slots[handle.slot()].as_ref().expect("`Arena::get()` - `handle` is vacant!")
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, handle: Handle) -> &mut T {
        self.slots[handle.slot()].as_mut().expect("`Arena::get_mut()` - `handle` is vacant!")
    }

    /// Borrows two distinct slots mutably at once.
    pub(crate) fn get_pair_mut(&mut self, a: Handle, b: Handle) -> (&mut T, &mut T) {
        assert_ne!(a, b, "`Arena::get_pair_mut()` - handles alias!");
        let (low, high, swapped) = if a.slot() < b.slot() { (a, b, false) } else { (b, a, true) };
        let (head, tail) = self.slots.split_at_mut(high.slot());
        let low = head[low.slot()].as_mut().expect("`Arena::get_pair_mut()` - `handle` is vacant!");
        let high = tail[0].as_mut().expect("`Arena::get_pair_mut()` - `handle` is vacant!");
        if swapped { (high, low) } else { (low, high) }
    }

    /// Moves the element out and marks its slot for reuse.
    pub(crate) fn take(&mut self, handle: Handle) -> T {
        let element = self.slots[handle.slot()].take().expect("`Arena::take()` - `handle` is vacant!");
        self.vacant.push(handle);
        element
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.vacant.clear();
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn with_capacity_reserves_slots() {
        let arena: Arena<u32> = Arena::with_capacity(10);
        assert!(arena.capacity() >= 10);
        assert!(arena.is_empty());
    }

    #[test]
    fn vacant_slots_are_reused() {
        let mut arena = Arena::new();
        let a = arena.alloc('a');
        let b = arena.alloc('b');
        assert_eq!(arena.take(a), 'a');
        let c = arena.alloc('c');
        assert_eq!(c, a);
        assert_eq!(*arena.get(b), 'b');
        assert_eq!(*arena.get(c), 'c');
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn pair_borrows_follow_argument_order() {
        let mut arena = Arena::new();
        let a = arena.alloc(1);
        let b = arena.alloc(2);
        let (x, y) = arena.get_pair_mut(b, a);
        core::mem::swap(x, y);
        assert_eq!((*arena.get(a), *arena.get(b)), (2, 1));
        let (x, y) = arena.get_pair_mut(a, b);
        assert_eq!((*x, *y), (2, 1));
    }

    #[test]
    #[should_panic(expected = "`Arena::get()` - `handle` is vacant!")]
    fn reading_a_taken_slot_panics() {
        let mut arena = Arena::new();
        let a = arena.alloc(1u8);
        arena.take(a);
        let _ = arena.get(a);
    }

    proptest! {
        #[test]
        fn arena_tracks_a_vec_model(operations in prop::collection::vec(strategy(), 0..256)) {
            let mut model: Vec<(Handle, u32)> = Vec::new();
            let mut arena: Arena<u32> = Arena::new();

            for operation in operations {
                match operation {
                    Operation::Alloc(value) => {
                        model.push((arena.alloc(value), value));
                    }
                    Operation::Overwrite(which, value) if !model.is_empty() => {
                        let index = which % model.len();
                        *arena.get_mut(model[index].0) = value;
                        model[index].1 = value;
                    }
                    Operation::Take(which) if !model.is_empty() => {
                        let index = which % model.len();
                        let (handle, expected) = model.swap_remove(index);
                        prop_assert_eq!(arena.take(handle), expected);
                    }
                    Operation::Clear => {
                        arena.clear();
                        model.clear();
                    }
                    _ => {}
                }

                prop_assert_eq!(arena.len(), model.len());
                prop_assert_eq!(arena.is_empty(), model.is_empty());
                for &(handle, value) in &model {
                    prop_assert_eq!(*arena.get(handle), value);
                }
            }
        }
    }

    #[derive(Clone, Debug)]
    enum Operation {
        Alloc(u32),
        Overwrite(usize, u32),
        Take(usize),
        Clear,
    }

    fn strategy() -> impl Strategy<Value = Operation> {
        prop_oneof![
            20 => any::<u32>().prop_map(Operation::Alloc),
            5 => (any::<usize>(), any::<u32>()).prop_map(|(which, value)| Operation::Overwrite(which, value)),
            8 => any::<usize>().prop_map(Operation::Take),
            1 => Just(Operation::Clear),
        ]
    }
}
