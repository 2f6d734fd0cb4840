//! The arena: scoped ownership of blocks with bulk cleanup.
//!
//! Every allocation becomes a [`Block`] slot linked into an intrusive
//! doubly-linked chain whose head is the most recently allocated (or
//! regrown) block. [`Arena::complete`] walks the chain once, running
//! cleanups in chain order, then frees everything and resets the arena
//! to empty, ready for reuse.
//!
//! Handles are generation-stamped: growing a block or completing the
//! arena invalidates outstanding handles, and any later access through
//! one is a contract violation (panic), not undefined behavior.

use scree_core::{ArenaId, BlockHandle, BlockPayload, Cleanup, Datum, Entry};

use crate::config::ArenaConfig;
use crate::error::{AbortHandler, Exhausted, ExhaustionHandler};

/// One allocation: payload plus chain links and cleanup registration.
struct Block {
    /// Generation stamped at allocation; re-stamped on grow.
    generation: u64,
    /// Previous block in the chain (`None` at the head).
    prev: Option<u32>,
    /// Next block in the chain (`None` at the tail).
    next: Option<u32>,
    /// The block's storage.
    payload: BlockPayload,
    /// Callback run exactly once, with the payload, at completion.
    cleanup: Option<Cleanup>,
}

/// A scope that owns a set of allocations and bulk-releases them at one
/// explicit completion point.
///
/// Buffers, lists, and dictionaries created against an arena keep their
/// backing storage here; completing the arena tears all of them down in
/// one step. Strictly single-threaded: share across threads only with
/// external serialization.
pub struct Arena {
    id: ArenaId,
    slots: Vec<Block>,
    head: Option<u32>,
    next_generation: u64,
    total_bytes: usize,
    config: ArenaConfig,
    handler: Box<dyn ExhaustionHandler>,
}

impl Arena {
    /// Create an empty arena with no byte budget and the default
    /// (terminate-on-exhaustion) policy. Performs no allocation.
    pub fn new() -> Self {
        Self::with_config(ArenaConfig::unlimited())
    }

    /// Create an empty arena with the given configuration and the
    /// default exhaustion policy.
    pub fn with_config(config: ArenaConfig) -> Self {
        Self::with_exhaustion_handler(config, Box::new(AbortHandler))
    }

    /// Create an empty arena with the given configuration and an
    /// injected exhaustion policy.
    ///
    /// The handler fires whenever an allocation or growth would push the
    /// arena past `config.byte_limit`; it cannot return normally.
    pub fn with_exhaustion_handler(config: ArenaConfig, handler: Box<dyn ExhaustionHandler>) -> Self {
        Self {
            id: ArenaId::next(),
            slots: Vec::new(),
            head: None,
            next_generation: 0,
            total_bytes: 0,
            config,
            handler,
        }
    }

    /// This arena's process-unique identity.
    pub fn id(&self) -> ArenaId {
        self.id
    }

    /// Whether `handle` names this arena as its owner.
    ///
    /// Owner discovery is O(1): the handle itself carries the
    /// [`ArenaId`] it was allocated from.
    pub fn owns(&self, handle: BlockHandle) -> bool {
        handle.arena() == self.id
    }

    /// Whether `handle` refers to a live block of this arena.
    ///
    /// False for foreign handles, handles outlived by
    /// [`Arena::complete`], and handles invalidated by [`Arena::grow`].
    pub fn is_live(&self, handle: BlockHandle) -> bool {
        self.owns(handle)
            && self
                .slots
                .get(handle.index() as usize)
                .is_some_and(|block| block.generation == handle.generation())
    }

    /// Number of live blocks.
    pub fn block_count(&self) -> usize {
        self.slots.len()
    }

    /// Total payload bytes currently held.
    pub fn allocated_bytes(&self) -> usize {
        self.total_bytes
    }

    /// Allocate a zero-filled byte block of `len` bytes.
    pub fn alloc_bytes(&mut self, len: usize) -> BlockHandle {
        self.charge(len);
        self.alloc_block(BlockPayload::Bytes(vec![0; len]), None)
    }

    /// Allocate a zero-filled byte block and register a cleanup to run,
    /// with the payload, when this arena completes.
    pub fn alloc_bytes_with_cleanup(&mut self, len: usize, cleanup: Cleanup) -> BlockHandle {
        self.charge(len);
        self.alloc_block(BlockPayload::Bytes(vec![0; len]), Some(cleanup))
    }

    /// Allocate a datum block of `len` slots, each [`Datum::None`].
    pub fn alloc_data(&mut self, len: usize) -> BlockHandle {
        self.charge(len * std::mem::size_of::<Datum>());
        self.alloc_block(BlockPayload::Data(vec![Datum::None; len]), None)
    }

    /// Allocate an entry block of `len` slots, each [`Entry::EMPTY`].
    pub fn alloc_entries(&mut self, len: usize) -> BlockHandle {
        self.charge(len * std::mem::size_of::<Entry>());
        self.alloc_block(BlockPayload::Entries(vec![Entry::EMPTY; len]), None)
    }

    /// Register (or replace) the cleanup for a live block.
    ///
    /// # Panics
    ///
    /// Panics if `handle` is stale or foreign.
    pub fn register_cleanup(&mut self, handle: BlockHandle, cleanup: Cleanup) {
        let index = self.resolve(handle);
        self.slots[index].cleanup = Some(cleanup);
    }

    /// Resize the block behind `handle` to `new_len` elements of its own
    /// payload shape, returning the replacement handle.
    ///
    /// The common prefix of the payload is preserved; growth zero-fills,
    /// shrinking truncates. The block is relinked at the chain head, so
    /// a regrown block's cleanup runs first at completion. Cleanup
    /// registration survives the resize. The old handle is dead; any
    /// later use of it is a contract violation.
    ///
    /// # Panics
    ///
    /// Panics if `handle` is stale or belongs to a different arena.
    pub fn grow(&mut self, handle: BlockHandle, new_len: usize) -> BlockHandle {
        let index = self.resolve(handle);
        let old_bytes = self.slots[index].payload.byte_len();
        let elem_size = match self.slots[index].payload {
            BlockPayload::Bytes(_) => 1,
            BlockPayload::Data(_) => std::mem::size_of::<Datum>(),
            BlockPayload::Entries(_) => std::mem::size_of::<Entry>(),
        };
        let new_bytes = new_len * elem_size;
        if new_bytes > old_bytes {
            self.charge(new_bytes - old_bytes);
        } else {
            self.total_bytes -= old_bytes - new_bytes;
        }

        let generation = self.next_generation;
        self.next_generation += 1;
        self.unlink(index as u32);
        let block = &mut self.slots[index];
        match &mut block.payload {
            BlockPayload::Bytes(v) => v.resize(new_len, 0),
            BlockPayload::Data(v) => v.resize(new_len, Datum::None),
            BlockPayload::Entries(v) => v.resize(new_len, Entry::EMPTY),
        }
        block.generation = generation;
        self.link_at_head(index as u32);
        BlockHandle::new(self.id, index as u32, generation)
    }

    /// Complete the arena: run every registered cleanup (chain order,
    /// most recently allocated first), free every block, and reset to
    /// empty. The arena may be reused afterward.
    ///
    /// Completing an already-empty arena is a no-op.
    pub fn complete(&mut self) {
        let mut cursor = self.head;
        while let Some(i) = cursor {
            let block = &mut self.slots[i as usize];
            cursor = block.next;
            if let Some(cleanup) = block.cleanup.take() {
                cleanup(&mut block.payload);
            }
        }

        self.slots.clear();
        self.head = None;
        self.total_bytes = 0;
    }

    /// Shared view of a byte block's payload.
    ///
    /// # Panics
    ///
    /// Panics if `handle` is stale, foreign, or not a byte block.
    pub fn bytes(&self, handle: BlockHandle) -> &[u8] {
        match &self.slots[self.resolve(handle)].payload {
            BlockPayload::Bytes(v) => v,
            other => panic!("block {handle} holds {}, not bytes", other.kind()),
        }
    }

    /// Mutable view of a byte block's payload.
    ///
    /// # Panics
    ///
    /// Panics if `handle` is stale, foreign, or not a byte block.
    pub fn bytes_mut(&mut self, handle: BlockHandle) -> &mut [u8] {
        let index = self.resolve(handle);
        match &mut self.slots[index].payload {
            BlockPayload::Bytes(v) => v,
            other => panic!("block {handle} holds {}, not bytes", other.kind()),
        }
    }

    /// Shared view of a datum block's payload.
    ///
    /// # Panics
    ///
    /// Panics if `handle` is stale, foreign, or not a datum block.
    pub fn data(&self, handle: BlockHandle) -> &[Datum] {
        match &self.slots[self.resolve(handle)].payload {
            BlockPayload::Data(v) => v,
            other => panic!("block {handle} holds {}, not data", other.kind()),
        }
    }

    /// Mutable view of a datum block's payload.
    ///
    /// # Panics
    ///
    /// Panics if `handle` is stale, foreign, or not a datum block.
    pub fn data_mut(&mut self, handle: BlockHandle) -> &mut [Datum] {
        let index = self.resolve(handle);
        match &mut self.slots[index].payload {
            BlockPayload::Data(v) => v,
            other => panic!("block {handle} holds {}, not data", other.kind()),
        }
    }

    /// Shared view of an entry block's payload.
    ///
    /// # Panics
    ///
    /// Panics if `handle` is stale, foreign, or not an entry block.
    pub fn entries(&self, handle: BlockHandle) -> &[Entry] {
        match &self.slots[self.resolve(handle)].payload {
            BlockPayload::Entries(v) => v,
            other => panic!("block {handle} holds {}, not entries", other.kind()),
        }
    }

    /// Mutable view of an entry block's payload.
    ///
    /// # Panics
    ///
    /// Panics if `handle` is stale, foreign, or not an entry block.
    pub fn entries_mut(&mut self, handle: BlockHandle) -> &mut [Entry] {
        let index = self.resolve(handle);
        match &mut self.slots[index].payload {
            BlockPayload::Entries(v) => v,
            other => panic!("block {handle} holds {}, not entries", other.kind()),
        }
    }

    // ── internals ─────────────────────────────────────────────────────

    /// Map a handle to its slot index, enforcing ownership and liveness.
    fn resolve(&self, handle: BlockHandle) -> usize {
        assert!(
            self.owns(handle),
            "block handle from arena {} presented to arena {}",
            handle.arena(),
            self.id
        );
        let index = handle.index() as usize;
        let live = self
            .slots
            .get(index)
            .is_some_and(|block| block.generation == handle.generation());
        assert!(live, "stale {handle}");
        index
    }

    /// Charge `additional` bytes against the budget, invoking the
    /// exhaustion policy if the budget would be exceeded.
    fn charge(&mut self, additional: usize) {
        if let Some(limit) = self.config.byte_limit {
            let projected = self.total_bytes.saturating_add(additional);
            if projected > limit {
                self.handler.exhausted(&Exhausted {
                    requested: additional,
                    limit,
                });
            }
        }
        self.total_bytes += additional;
    }

    fn alloc_block(&mut self, payload: BlockPayload, cleanup: Option<Cleanup>) -> BlockHandle {
        let generation = self.next_generation;
        self.next_generation += 1;
        let index =
            u32::try_from(self.slots.len()).expect("arena block count exceeds u32::MAX slots");
        self.slots.push(Block {
            generation,
            prev: None,
            next: None,
            payload,
            cleanup,
        });
        self.link_at_head(index);
        BlockHandle::new(self.id, index, generation)
    }

    fn link_at_head(&mut self, index: u32) {
        let old_head = self.head;
        {
            let block = &mut self.slots[index as usize];
            block.prev = None;
            block.next = old_head;
        }
        if let Some(h) = old_head {
            self.slots[h as usize].prev = Some(index);
        }
        self.head = Some(index);
    }

    fn unlink(&mut self, index: u32) {
        let (prev, next) = {
            let block = &self.slots[index as usize];
            (block.prev, block.next)
        };
        match prev {
            Some(p) => self.slots[p as usize].next = next,
            None => self.head = next,
        }
        if let Some(n) = next {
            self.slots[n as usize].prev = prev;
        }
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new()
    }
}
