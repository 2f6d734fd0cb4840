//! Strongly-typed identifiers for arenas and arena blocks.
//!
//! A [`BlockHandle`] is the opaque replacement for a payload pointer: it
//! names the owning arena, the block's slot within it, and the generation
//! the block was stamped with when allocated. Staleness (use after
//! `complete` or after `grow`) is detectable in O(1) by comparing the
//! handle's generation against the slot's current one.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique [`ArenaId`] allocation.
static ARENA_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique per-instance identifier for an arena.
///
/// Allocated from a monotonic atomic counter via [`ArenaId::next`]. Two
/// distinct arenas always have different IDs, so a [`BlockHandle`]
/// presented to the wrong arena is rejected rather than silently
/// resolving to an unrelated block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArenaId(u64);

impl ArenaId {
    /// Allocate a fresh, unique arena ID.
    ///
    /// Each call returns an ID that has never been returned before within
    /// this process.
    pub fn next() -> Self {
        Self(ARENA_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ArenaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque reference to one block owned by one arena.
///
/// Handles are plain data: `Copy`, comparable, and freely storable (a
/// [`Datum::Handle`](crate::Datum::Handle) carries one). A handle does
/// not keep its block alive: after the owning arena completes, or after
/// the block is regrown, the handle is stale and any access through it
/// is a contract violation.
///
/// Handles are normally obtained from the arena's allocation calls; a
/// hand-built handle will fail the generation check on first use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[must_use]
pub struct BlockHandle {
    arena: ArenaId,
    index: u32,
    generation: u64,
}

impl BlockHandle {
    /// Create a handle from its raw parts.
    pub fn new(arena: ArenaId, index: u32, generation: u64) -> Self {
        Self {
            arena,
            index,
            generation,
        }
    }

    /// The arena this handle belongs to.
    ///
    /// This is the O(1) owner lookup: no table walk, no header arithmetic.
    pub fn arena(&self) -> ArenaId {
        self.arena
    }

    /// Slot index within the owning arena.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// The generation this block was stamped with at allocation.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl fmt::Display for BlockHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BlockHandle(arena={}, index={}, gen={})",
            self.arena, self.index, self.generation
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arena_ids_are_unique() {
        let a = ArenaId::next();
        let b = ArenaId::next();
        assert_ne!(a, b);
    }

    #[test]
    fn handle_round_trip() {
        let arena = ArenaId::next();
        let h = BlockHandle::new(arena, 7, 42);
        assert_eq!(h.arena(), arena);
        assert_eq!(h.index(), 7);
        assert_eq!(h.generation(), 42);
    }

    #[test]
    fn handles_compare_by_all_fields() {
        let arena = ArenaId::next();
        let h = BlockHandle::new(arena, 0, 1);
        assert_eq!(h, BlockHandle::new(arena, 0, 1));
        assert_ne!(h, BlockHandle::new(arena, 0, 2));
        assert_ne!(h, BlockHandle::new(arena, 1, 1));
    }
}
