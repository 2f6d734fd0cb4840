//! Test fixtures for Scree development.
//!
//! Provides the hash functions the dictionary tests pass by name and a
//! counting cleanup fixture for arena completion tests.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::cell::Cell;
use std::rc::Rc;

use scree_core::{BlockPayload, Cleanup, Datum};

/// Hash an integer datum to its own value.
///
/// Non-integer datums hash to zero, so accidental mixed-kind keys land in
/// one chain and surface quickly in tests.
pub fn int_hash(key: Datum) -> u64 {
    key.as_int().unwrap_or(0) as u64
}

/// Hash an integer datum modulo 4, a deliberately collision-heavy
/// function for driving several keys through shared probe chains.
pub fn mod4_hash(key: Datum) -> u64 {
    (key.as_int().unwrap_or(0) % 4) as u64
}

/// Hash every key to zero, forcing all keys into a single probe chain.
pub fn zero_hash(_key: Datum) -> u64 {
    0
}

/// Counts how many times the cleanups it hands out have been invoked.
///
/// Each call to [`CleanupCounter::cleanup`] produces an independent boxed
/// callback sharing this counter, so a test can register several cleanups
/// and assert the total (and per-allocation counts via separate counters)
/// after the arena completes.
#[derive(Clone, Default)]
pub struct CleanupCounter {
    count: Rc<Cell<usize>>,
}

impl CleanupCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cleanup invocations observed so far.
    pub fn count(&self) -> usize {
        self.count.get()
    }

    /// Produce a cleanup callback that bumps this counter when run.
    pub fn cleanup(&self) -> Cleanup {
        let count = Rc::clone(&self.count);
        Box::new(move |_payload: &mut BlockPayload| {
            count.set(count.get() + 1);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_tracks_invocations() {
        let counter = CleanupCounter::new();
        let mut payload = BlockPayload::Bytes(vec![0; 4]);
        let cb = counter.cleanup();
        assert_eq!(counter.count(), 0);
        cb(&mut payload);
        assert_eq!(counter.count(), 1);
    }

    #[test]
    fn hash_fixtures() {
        assert_eq!(int_hash(Datum::Int(9)), 9);
        assert_eq!(mod4_hash(Datum::Int(9)), 1);
        assert_eq!(zero_hash(Datum::Int(9)), 0);
        assert_eq!(int_hash(Datum::Bool(true)), 0);
    }
}
