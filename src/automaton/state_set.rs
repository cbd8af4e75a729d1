use bitvec::prelude::*;
use std::fmt;

/// Growable bitset over state slots
///
/// Slots are the insertion positions of states inside their automaton, so
/// membership tests are O(1) and iteration follows insertion order.
#[derive(Clone, Debug, Default)]
pub struct StateSet {
    bits: BitVec,
}

impl StateSet {
    /// Create a set with room for `capacity` slots and no members
    pub fn new(capacity: usize) -> Self {
        Self {
            bits: bitvec![0; capacity],
        }
    }

    /// Add one more (absent) slot at the end
    pub fn push_slot(&mut self) {
        self.bits.push(false);
    }

    /// Insert a slot, growing the set if needed
    ///
    /// Returns whether the slot was newly inserted.
    pub fn insert(&mut self, slot: usize) -> bool {
        if slot >= self.bits.len() {
            self.bits.resize(slot + 1, false);
        }
        let present = self.contains(slot);
        self.bits.set(slot, true);
        !present
    }

    /// Test slot membership
    pub fn contains(&self, slot: usize) -> bool {
        self.bits.get(slot).as_deref() == Some(&true)
    }

    /// Test if no slots are present
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Count slots in the set
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Iterate member slots in ascending order
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.iter_ones()
    }

    /// Extract all member slots as a vector
    pub fn to_vec(&self) -> Vec<usize> {
        self.iter().collect()
    }
}

// Trailing absent slots don't affect membership
impl PartialEq for StateSet {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl Eq for StateSet {}

impl fmt::Display for StateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StateSet({} states: {:?})", self.count(), self.to_vec())
    }
}
