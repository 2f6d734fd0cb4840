//! The open-addressing dictionary.
//!
//! All entries live directly in one arena-owned slot array; collisions
//! are resolved by probing alternate slots rather than chaining. The
//! probe step for attempt `c` is the c-th triangular number masked to
//! the table, which visits every slot of a power-of-two table exactly
//! once per pass, so probing terminates without a second hash function.
//!
//! Removal writes no tombstones: a key's probe path depends only on its
//! own hash and the attempt count, never on which other keys occupy the
//! intervening slots, so holes left by removing unrelated keys cannot
//! break a surviving key's lookup path. Misses are cut short by
//! `max_collisions`, the worst chain length any successful insert has
//! recorded since the last rehash.

use scree_arena::Arena;
use scree_core::{BlockHandle, Datum, Entry};

/// Hash function supplied by the caller. The result is reduced to a slot
/// with a bitmask, so signedness handling belongs to the caller, not the
/// table.
pub type HashFn = fn(Datum) -> u64;

/// Key comparison supplied by the caller. Must return false when either
/// operand is [`Datum::None`], the empty-slot marker.
pub type CompareFn = fn(Datum, Datum) -> bool;

/// Smallest capacity a dictionary is created with.
const MIN_CAPACITY: usize = 16;

/// Rehash triggers when the free-slot percentage after a hypothetical
/// insertion would fall below this.
const MIN_FREE_PERCENTAGE: f64 = 25.0;

/// Probe step for the given attempt: the attempt's triangular number,
/// masked to the table.
///
/// Of the consecutive pair `(n, n + 1)` exactly one member is even;
/// halving it before the multiply keeps the product at n(n+1)/2 without
/// overflow bias, and the masks keep both factors within the table.
fn probe_offset(attempt: usize, mask: usize) -> usize {
    let n = attempt & mask;
    let (a, b) = if n % 2 == 0 {
        (n / 2, n + 1)
    } else {
        (n, (n + 1) / 2)
    };

    ((a & mask) * (b & mask)) & mask
}

/// Walk a key's probe sequence over `entries`.
///
/// Insert mode accepts the first empty slot or comparison match and
/// always succeeds (the table keeps at least a quarter of its slots
/// free). Non-insert mode skips empty slots and gives up once the
/// attempt count exceeds `max_collisions`, the recorded upper bound on
/// any live key's chain length.
///
/// Returns the slot index and the attempt count at which it matched.
fn probe(
    entries: &[Entry],
    hash_func: HashFn,
    comparison_func: CompareFn,
    max_collisions: usize,
    key: Datum,
    inserting: bool,
) -> Option<(usize, usize)> {
    let mask = entries.len() - 1;
    let home = (hash_func(key) as usize) & mask;
    for attempt in 0..entries.len() {
        let index = (home + probe_offset(attempt, mask)) & mask;
        let entry = entries[index];
        let mut found = comparison_func(entry.key, key);
        if inserting {
            found = found || entry.key.is_none();
        }

        if found {
            return Some((index, attempt));
        }

        if !inserting && attempt > max_collisions {
            return None;
        }
    }

    if inserting {
        unreachable!("insert probe exhausted a table with free slots");
    }

    None
}

/// An open-addressing map from [`Datum`] keys to datum values.
///
/// Capacity is always a power of two and at least 16; the slot array is
/// arena-owned, so completing the arena releases the table. The struct
/// itself is a plain value.
#[derive(Clone, Copy, Debug)]
pub struct Dictionary {
    hash_func: HashFn,
    comparison_func: CompareFn,
    size: usize,
    capacity: usize,
    max_collisions: usize,
    items: BlockHandle,
}

impl Dictionary {
    /// Create an empty dictionary with capacity rounded up to a power of
    /// two no smaller than 16.
    pub fn create(
        arena: &mut Arena,
        hash_func: HashFn,
        comparison_func: CompareFn,
        initial_capacity: usize,
    ) -> Self {
        let capacity = initial_capacity.max(MIN_CAPACITY).next_power_of_two();
        Self {
            hash_func,
            comparison_func,
            size: 0,
            capacity,
            max_collisions: 0,
            items: arena.alloc_entries(capacity),
        }
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.size
    }

    /// Whether the dictionary holds no entries.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Current slot-array capacity. Always a power of two ≥ 16.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Worst probe-chain length recorded among successful inserts since
    /// the last rehash.
    pub fn max_collisions(&self) -> usize {
        self.max_collisions
    }

    /// Insert or overwrite `key`, returning the previous value, or
    /// [`Datum::None`] if the key was newly added.
    ///
    /// May rehash to double the capacity first, whenever the free-slot
    /// percentage after this insertion would fall below 25%.
    pub fn add(&mut self, arena: &mut Arena, key: Datum, value: Datum) -> Datum {
        self.ensure_capacity(arena);
        let entries = arena.entries_mut(self.items);
        let (index, collisions) = probe(
            entries,
            self.hash_func,
            self.comparison_func,
            self.max_collisions,
            key,
            true,
        )
        .expect("a quarter of the table is free, so an insert probe cannot miss");

        if collisions > self.max_collisions {
            self.max_collisions = collisions;
        }

        let entry = &mut entries[index];
        if entry.key.is_none() {
            self.size += 1;
        }

        let original_value = entry.value;
        entry.key = key;
        entry.value = value;
        original_value
    }

    /// Remove `key`, returning its value, or [`Datum::None`] if it was
    /// absent. The slot is cleared outright; no tombstone is written.
    pub fn remove(&mut self, arena: &mut Arena, key: Datum) -> Datum {
        let entries = arena.entries_mut(self.items);
        match probe(
            entries,
            self.hash_func,
            self.comparison_func,
            self.max_collisions,
            key,
            false,
        ) {
            None => Datum::None,
            Some((index, _)) => {
                let entry = &mut entries[index];
                let original_value = entry.value;
                *entry = Entry::EMPTY;
                self.size -= 1;
                original_value
            }
        }
    }

    /// Look up `key`, returning its value if present.
    pub fn lookup(&self, arena: &Arena, key: Datum) -> Option<Datum> {
        let entries = arena.entries(self.items);
        probe(
            entries,
            self.hash_func,
            self.comparison_func,
            self.max_collisions,
            key,
            false,
        )
        .map(|(index, _)| entries[index].value)
    }

    /// Snapshot every live entry into an independent vector.
    ///
    /// Iteration order is unspecified and must not be relied upon.
    pub fn get_items(&self, arena: &Arena) -> Vec<Entry> {
        arena
            .entries(self.items)
            .iter()
            .copied()
            .filter(|entry| !entry.is_empty())
            .collect()
    }

    /// Rehash to double the capacity when the table would drop below the
    /// free-slot threshold after one more insertion. Runs before any
    /// slot is computed, so the insert that follows probes the resized
    /// table.
    fn ensure_capacity(&mut self, arena: &mut Arena) {
        let new_size = (self.size + 1) as f64;
        let percent_free = 100.0 * (self.capacity as f64 - new_size) / self.capacity as f64;
        if percent_free < MIN_FREE_PERCENTAGE {
            self.rehash(arena, self.capacity * 2);
        }
    }

    /// Resize the slot array to `new_capacity` and reinsert every live
    /// entry under the new mask.
    ///
    /// `max_collisions` restarts at zero and is rebuilt by the
    /// reinsertion probes; skipping that bookkeeping would leave the
    /// miss early-exit with a stale bound and strand relocated keys.
    fn rehash(&mut self, arena: &mut Arena, new_capacity: usize) {
        let live: Vec<Entry> = self.get_items(arena);

        self.items = arena.grow(self.items, new_capacity);
        self.capacity = new_capacity;
        self.max_collisions = 0;

        let entries = arena.entries_mut(self.items);
        entries.fill(Entry::EMPTY);
        for entry in &live {
            let (index, collisions) = probe(
                entries,
                self.hash_func,
                self.comparison_func,
                self.max_collisions,
                entry.key,
                true,
            )
            .expect("a quarter of the table is free, so an insert probe cannot miss");
            entries[index] = *entry;
            if collisions > self.max_collisions {
                self.max_collisions = collisions;
            }
        }
    }
}
