//! Growable list of datums backed by an arena block.

use scree_core::{BlockHandle, Datum};

use crate::arena::Arena;

/// A growable array of [`Datum`] values whose storage is owned by an
/// [`Arena`].
///
/// Shares the buffer's growth policy (double, else jump straight to the
/// required size) and its contract rules: out-of-range indexes panic,
/// while expected absence (popping an empty list) is reported in-band
/// as [`Datum::None`].
#[derive(Clone, Copy, Debug)]
pub struct List {
    handle: BlockHandle,
    len: usize,
}

impl List {
    /// Create an empty list with `initial_capacity` slots of backing
    /// storage.
    pub fn create(arena: &mut Arena, initial_capacity: usize) -> Self {
        Self {
            handle: arena.alloc_data(initial_capacity),
            len: 0,
        }
    }

    /// Number of items stored.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the list holds no items.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current backing capacity in items.
    pub fn capacity(&self, arena: &Arena) -> usize {
        arena.data(self.handle).len()
    }

    /// The stored items, in index order.
    pub fn as_slice<'a>(&self, arena: &'a Arena) -> &'a [Datum] {
        &arena.data(self.handle)[..self.len]
    }

    /// The item at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn get(&self, arena: &Arena, index: usize) -> Datum {
        assert!(
            index < self.len,
            "index {index} out of range for list of size {}",
            self.len
        );
        arena.data(self.handle)[index]
    }

    /// Add an item at the end, growing the backing storage if needed.
    pub fn add(&mut self, arena: &mut Arena, item: Datum) {
        self.ensure_capacity(arena, self.len + 1);
        arena.data_mut(self.handle)[self.len] = item;
        self.len += 1;
    }

    /// Append the contents of another list.
    pub fn append(&mut self, arena: &mut Arena, other: &List) {
        let copy = other.as_slice(arena).to_vec();
        self.ensure_capacity(arena, self.len + copy.len());
        let data = arena.data_mut(self.handle);
        data[self.len..self.len + copy.len()].copy_from_slice(&copy);
        self.len += copy.len();
    }

    /// Insert an item before index `before`, shifting the tail up while
    /// preserving its order.
    ///
    /// # Panics
    ///
    /// Panics if `before > len()`.
    pub fn insert(&mut self, arena: &mut Arena, item: Datum, before: usize) {
        assert!(
            before <= self.len,
            "insert index {before} out of range for list of size {}",
            self.len
        );
        if before == self.len {
            self.add(arena, item);
            return;
        }

        self.ensure_capacity(arena, self.len + 1);
        let data = arena.data_mut(self.handle);
        data.copy_within(before..self.len, before + 1);
        data[before] = item;
        self.len += 1;
    }

    /// Remove the item at `index`, shifting the tail down.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn remove(&mut self, arena: &mut Arena, index: usize) {
        assert!(
            index < self.len,
            "remove index {index} out of range for list of size {}",
            self.len
        );
        let data = arena.data_mut(self.handle);
        data.copy_within(index + 1..self.len, index);
        self.len -= 1;
    }

    /// Push an item (stack discipline; same as [`List::add`]).
    pub fn push(&mut self, arena: &mut Arena, item: Datum) {
        self.add(arena, item);
    }

    /// Pop the most recently pushed item, or [`Datum::None`] if the list
    /// is empty.
    pub fn pop(&mut self, arena: &Arena) -> Datum {
        if self.len == 0 {
            Datum::None
        } else {
            self.len -= 1;
            arena.data(self.handle)[self.len]
        }
    }

    /// Discard the stored items without shrinking the backing storage.
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Copy `count` items starting at `start` into a new, independent
    /// list allocated from the same arena.
    ///
    /// # Panics
    ///
    /// Panics if the range `[start, start + count)` is not within the
    /// stored items.
    pub fn extract(&self, arena: &mut Arena, start: usize, count: usize) -> List {
        assert!(
            count <= self.len && start <= self.len - count,
            "extract range {start}..{} out of range for list of size {}",
            start + count,
            self.len
        );
        let copy = self.as_slice(arena)[start..start + count].to_vec();
        let mut result = List::create(arena, count);
        for item in copy {
            result.add(arena, item);
        }
        result
    }

    /// Visit every item in index order.
    ///
    /// Stops and returns `false` as soon as the callback returns `false`;
    /// returns `true` if every item was visited.
    pub fn for_each(&self, arena: &Arena, mut callback: impl FnMut(&Datum) -> bool) -> bool {
        for item in self.as_slice(arena) {
            if !callback(item) {
                return false;
            }
        }

        true
    }

    /// Same growth policy as the buffer: double, else jump straight to
    /// `minimum` when doubling is not enough.
    fn ensure_capacity(&mut self, arena: &mut Arena, minimum: usize) {
        let capacity = arena.data(self.handle).len();
        if capacity >= minimum {
            return;
        }

        let mut new_capacity = capacity * 2;
        if new_capacity < minimum {
            new_capacity = minimum;
        }

        self.handle = arena.grow(self.handle, new_capacity);
    }
}
