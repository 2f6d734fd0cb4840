//! Growable byte buffer backed by an arena block.

use scree_core::BlockHandle;

use crate::arena::Arena;

/// Smallest capacity a buffer is created with.
const CAPACITY_FLOOR: usize = 4;

/// A growable byte array whose storage is owned by an [`Arena`].
///
/// The struct itself is a plain value (handle + length); all storage
/// lives in the arena, so completing the arena releases every buffer
/// created against it. `len() <= capacity()` holds after every
/// operation.
///
/// Out-of-range index and range arguments are contract violations and
/// panic; they are never reported as recoverable errors.
#[derive(Clone, Copy, Debug)]
pub struct Buffer {
    handle: BlockHandle,
    len: usize,
}

impl Buffer {
    /// Create an empty buffer with at least `initial_capacity` bytes of
    /// backing storage (floored to 4).
    pub fn create(arena: &mut Arena, initial_capacity: usize) -> Self {
        let capacity = initial_capacity.max(CAPACITY_FLOOR);
        Self {
            handle: arena.alloc_bytes(capacity),
            len: 0,
        }
    }

    /// Number of bytes stored.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the buffer holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current backing capacity in bytes.
    pub fn capacity(&self, arena: &Arena) -> usize {
        arena.bytes(self.handle).len()
    }

    /// Handle of the backing block, for callers that need to register a
    /// cleanup or share the storage with other arena clients.
    pub fn handle(&self) -> BlockHandle {
        self.handle
    }

    /// The stored bytes.
    pub fn as_slice<'a>(&self, arena: &'a Arena) -> &'a [u8] {
        &arena.bytes(self.handle)[..self.len]
    }

    /// Append `bytes` at the end, growing the backing storage if needed.
    pub fn append(&mut self, arena: &mut Arena, bytes: &[u8]) {
        self.ensure_capacity(arena, self.len + bytes.len());
        let data = arena.bytes_mut(self.handle);
        data[self.len..self.len + bytes.len()].copy_from_slice(bytes);
        self.len += bytes.len();
    }

    /// Append the contents of another buffer.
    pub fn append_buffer(&mut self, arena: &mut Arena, other: &Buffer) {
        let copy = other.as_slice(arena).to_vec();
        self.append(arena, &copy);
    }

    /// Insert `bytes` before index `before`, shifting the tail up while
    /// preserving its order.
    ///
    /// # Panics
    ///
    /// Panics if `before > len()`.
    pub fn insert(&mut self, arena: &mut Arena, bytes: &[u8], before: usize) {
        assert!(
            before <= self.len,
            "insert index {before} out of range for buffer of size {}",
            self.len
        );
        if before == self.len {
            self.append(arena, bytes);
            return;
        }

        self.ensure_capacity(arena, self.len + bytes.len());
        let data = arena.bytes_mut(self.handle);
        data.copy_within(before..self.len, before + bytes.len());
        data[before..before + bytes.len()].copy_from_slice(bytes);
        self.len += bytes.len();
    }

    /// Remove `count` bytes starting at `start`, shifting the tail down.
    ///
    /// # Panics
    ///
    /// Panics if the range `[start, start + count)` is not within the
    /// stored bytes.
    pub fn remove(&mut self, arena: &mut Arena, start: usize, count: usize) {
        assert!(
            count <= self.len && start <= self.len - count,
            "remove range {start}..{} out of range for buffer of size {}",
            start + count,
            self.len
        );
        let data = arena.bytes_mut(self.handle);
        data.copy_within(start + count..self.len, start);
        self.len -= count;
    }

    /// Copy `count` bytes starting at `start` into a new, independent
    /// buffer allocated from the same arena.
    ///
    /// # Panics
    ///
    /// Panics if the range `[start, start + count)` is not within the
    /// stored bytes.
    pub fn extract(&self, arena: &mut Arena, start: usize, count: usize) -> Buffer {
        assert!(
            count <= self.len && start <= self.len - count,
            "extract range {start}..{} out of range for buffer of size {}",
            start + count,
            self.len
        );
        let copy = self.as_slice(arena)[start..start + count].to_vec();
        let mut result = Buffer::create(arena, count);
        result.append(arena, &copy);
        result
    }

    /// Discard the stored bytes without shrinking the backing storage.
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Grow the backing block so it can hold at least `minimum` bytes:
    /// capacity doubles, or jumps straight to `minimum` when doubling is
    /// not enough.
    fn ensure_capacity(&mut self, arena: &mut Arena, minimum: usize) {
        let capacity = arena.bytes(self.handle).len();
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_is_floored_to_four() {
        let mut arena = Arena::new();
        let buf = Buffer::create(&mut arena, 1);
        assert_eq!(buf.capacity(&arena), 4);
        assert_eq!(buf.len(), 0);
    }

    #[test]
    fn append_doubles_capacity_when_needed() {
        let mut arena = Arena::new();
        let mut buf = Buffer::create(&mut arena, 1);

        buf.append(&mut arena, b"abc");
        assert_eq!(buf.len(), 3);
        assert_eq!(buf.capacity(&arena), 4);

        buf.append(&mut arena, b"123\0");
        assert_eq!(buf.len(), 7);
        assert_eq!(buf.capacity(&arena), 8);
        assert_eq!(buf.as_slice(&arena), b"abc123\0");
    }

    #[test]
    fn append_jumps_to_exact_size_when_doubling_is_insufficient() {
        let mut arena = Arena::new();
        let mut buf = Buffer::create(&mut arena, 1);
        buf.append(&mut arena, &[7u8; 100]);
        assert_eq!(buf.len(), 100);
        assert_eq!(buf.capacity(&arena), 100);
    }

    #[test]
    fn insert_shifts_tail_preserving_order() {
        let mut arena = Arena::new();
        let mut buf = Buffer::create(&mut arena, 1);
        buf.append(&mut arena, b"abc");

        buf.insert(&mut arena, b"", 2);
        assert_eq!(buf.len(), 3);
        assert_eq!(buf.as_slice(&arena), b"abc");

        buf.insert(&mut arena, b"12", 3);
        assert_eq!(buf.len(), 5);
        assert_eq!(buf.as_slice(&arena), b"abc12");

        buf.insert(&mut arena, b"3456", 3);
        assert_eq!(buf.len(), 9);
        assert_eq!(buf.as_slice(&arena), b"abc345612");
    }

    #[test]
    fn remove_closes_the_gap() {
        let mut arena = Arena::new();
        let mut buf = Buffer::create(&mut arena, 1);
        buf.append(&mut arena, b"123456");
        buf.remove(&mut arena, 2, 3);
        assert_eq!(buf.len(), 3);
        assert_eq!(buf.as_slice(&arena), b"126");
    }

    #[test]
    fn extract_copies_the_requested_range() {
        let mut arena = Arena::new();
        let mut buf = Buffer::create(&mut arena, 1);
        buf.append(&mut arena, b"123456");

        let empty = buf.extract(&mut arena, 2, 0);
        assert_eq!(empty.len(), 0);

        let mid = buf.extract(&mut arena, 1, 3);
        assert_eq!(mid.len(), 3);
        assert_eq!(mid.as_slice(&arena), b"234");
    }

    #[test]
    fn extract_is_independent_of_source_mutation() {
        let mut arena = Arena::new();
        let mut buf = Buffer::create(&mut arena, 1);
        buf.append(&mut arena, b"123456");

        let copy = buf.extract(&mut arena, 1, 3);
        buf.remove(&mut arena, 0, 6);
        buf.append(&mut arena, b"zzzzzz");

        assert_eq!(copy.as_slice(&arena), b"234");
    }

    #[test]
    fn append_buffer_concatenates() {
        let mut arena = Arena::new();
        let mut a = Buffer::create(&mut arena, 1);
        let mut b = Buffer::create(&mut arena, 1);
        a.append(&mut arena, b"head-");
        b.append(&mut arena, b"tail");
        a.append_buffer(&mut arena, &b);
        assert_eq!(a.as_slice(&arena), b"head-tail");
        assert_eq!(b.as_slice(&arena), b"tail");
    }

    #[test]
    fn clear_keeps_capacity() {
        let mut arena = Arena::new();
        let mut buf = Buffer::create(&mut arena, 1);
        buf.append(&mut arena, b"12345678");
        let capacity = buf.capacity(&arena);
        buf.clear();
        assert!(buf.is_empty());
        assert_eq!(buf.capacity(&arena), capacity);
    }

    #[test]
    #[should_panic(expected = "insert index")]
    fn insert_past_end_is_a_contract_violation() {
        let mut arena = Arena::new();
        let mut buf = Buffer::create(&mut arena, 1);
        buf.append(&mut arena, b"ab");
        buf.insert(&mut arena, b"x", 3);
    }

    #[test]
    #[should_panic(expected = "remove range")]
    fn remove_past_end_is_a_contract_violation() {
        let mut arena = Arena::new();
        let mut buf = Buffer::create(&mut arena, 1);
        buf.append(&mut arena, b"ab");
        buf.remove(&mut arena, 1, 2);
    }

    #[test]
    #[should_panic(expected = "extract range")]
    fn extract_past_end_is_a_contract_violation() {
        let mut arena = Arena::new();
        let mut buf = Buffer::create(&mut arena, 1);
        buf.append(&mut arena, b"ab");
        let _ = buf.extract(&mut arena, 2, 1);
    }

    #[cfg(not(miri))]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        #[derive(Clone, Debug)]
        enum Op {
            Append(Vec<u8>),
            Insert(Vec<u8>, usize),
            Remove(usize, usize),
        }

        fn op_strategy() -> impl Strategy<Value = Op> {
            prop_oneof![
                proptest::collection::vec(any::<u8>(), 0..8).prop_map(Op::Append),
                (proptest::collection::vec(any::<u8>(), 0..8), 0usize..16)
                    .prop_map(|(bytes, at)| Op::Insert(bytes, at)),
                (0usize..16, 0usize..8).prop_map(|(start, count)| Op::Remove(start, count)),
            ]
        }

        proptest! {
            #[test]
            fn buffer_agrees_with_vec_model(ops in proptest::collection::vec(op_strategy(), 1..40)) {
                let mut arena = Arena::new();
                let mut buf = Buffer::create(&mut arena, 1);
                let mut model: Vec<u8> = Vec::new();

                for op in ops {
                    match op {
                        Op::Append(bytes) => {
                            buf.append(&mut arena, &bytes);
                            model.extend_from_slice(&bytes);
                        }
                        Op::Insert(bytes, at) => {
                            // Clamp to stay within contract.
                            let at = at.min(model.len());
                            buf.insert(&mut arena, &bytes, at);
                            for (i, b) in bytes.iter().enumerate() {
                                model.insert(at + i, *b);
                            }
                        }
                        Op::Remove(start, count) => {
                            let start = start.min(model.len());
                            let count = count.min(model.len() - start);
                            buf.remove(&mut arena, start, count);
                            model.drain(start..start + count);
                        }
                    }

                    prop_assert!(buf.len() <= buf.capacity(&arena));
                    prop_assert_eq!(buf.as_slice(&arena), model.as_slice());
                }
            }
        }
    }
}
