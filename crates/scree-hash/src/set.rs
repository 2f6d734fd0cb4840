//! Membership set over the dictionary.

use scree_arena::Arena;
use scree_core::Datum;

use crate::dict::{CompareFn, Dictionary, HashFn};

/// A set of datums: a [`Dictionary`] whose every stored value is
/// `Bool(true)`, so membership is key presence.
#[derive(Clone, Copy, Debug)]
pub struct Set {
    dictionary: Dictionary,
}

impl Set {
    /// Create an empty set; capacity handling matches
    /// [`Dictionary::create`].
    pub fn create(
        arena: &mut Arena,
        hash_func: HashFn,
        comparison_func: CompareFn,
        initial_capacity: usize,
    ) -> Self {
        Self {
            dictionary: Dictionary::create(arena, hash_func, comparison_func, initial_capacity),
        }
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.dictionary.len()
    }

    /// Whether the set has no members.
    pub fn is_empty(&self) -> bool {
        self.dictionary.is_empty()
    }

    /// Add `item`, reporting whether it was newly inserted.
    pub fn add(&mut self, arena: &mut Arena, item: Datum) -> bool {
        self.dictionary
            .add(arena, item, Datum::Bool(true))
            .is_none()
    }

    /// Remove `item`, reporting whether it was present.
    pub fn remove(&mut self, arena: &mut Arena, item: Datum) -> bool {
        !self.dictionary.remove(arena, item).is_none()
    }

    /// Whether `item` is a member.
    pub fn contains(&self, arena: &Arena, item: Datum) -> bool {
        self.dictionary.lookup(arena, item).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scree_core::int_compare;
    use scree_test_utils::int_hash;

    #[test]
    fn add_reports_novelty() {
        let mut arena = Arena::new();
        let mut set = Set::create(&mut arena, int_hash, int_compare, 16);
        assert!(set.add(&mut arena, Datum::Int(5)));
        assert!(!set.add(&mut arena, Datum::Int(5)));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn remove_reports_presence() {
        let mut arena = Arena::new();
        let mut set = Set::create(&mut arena, int_hash, int_compare, 16);
        set.add(&mut arena, Datum::Int(5));
        assert!(set.remove(&mut arena, Datum::Int(5)));
        assert!(!set.remove(&mut arena, Datum::Int(5)));
        assert!(set.is_empty());
    }

    #[test]
    fn contains_tracks_membership() {
        let mut arena = Arena::new();
        let mut set = Set::create(&mut arena, int_hash, int_compare, 16);
        for i in 0..20 {
            set.add(&mut arena, Datum::Int(i));
        }
        assert!(set.contains(&arena, Datum::Int(19)));
        assert!(!set.contains(&arena, Datum::Int(20)));

        set.remove(&mut arena, Datum::Int(19));
        assert!(!set.contains(&arena, Datum::Int(19)));
        assert_eq!(set.len(), 19);
    }
}
