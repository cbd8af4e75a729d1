//! Deterministic automaton over the quadrant alphabet
//!
//! States live in insertion order inside the automaton; transitions point at
//! slots rather than ids so traversal never needs a lookup. Totality of the
//! transition function is not enforced while building: a missing transition
//! only becomes an error when a traversal reaches it.

use crate::automaton::alphabet::{QUADRANT_COUNT, Quadrant};
use crate::automaton::state::{IdAllocator, StateId};
use crate::automaton::state_set::StateSet;
use crate::io::error::{Result, invalid_automaton};
use std::collections::HashMap;

/// A single deterministic state with a fixed-size transition table
#[derive(Clone, Debug)]
pub struct DfaState {
    id: StateId,
    transitions: [Option<usize>; QUADRANT_COUNT],
}

impl DfaState {
    const fn new(id: StateId) -> Self {
        Self {
            id,
            transitions: [None; QUADRANT_COUNT],
        }
    }

    /// Identity of the state
    pub const fn id(&self) -> StateId {
        self.id
    }
}

/// Deterministic finite automaton recognizing quadtree addresses
#[derive(Clone, Debug)]
pub struct Dfa {
    alphabet: Vec<Quadrant>,
    states: Vec<DfaState>,
    slots: HashMap<StateId, usize>,
    ids: IdAllocator,
    initial: Option<usize>,
    finals: StateSet,
}

impl Default for Dfa {
    fn default() -> Self {
        Self::new()
    }
}

impl Dfa {
    /// Create an empty automaton over the full quadrant alphabet
    pub fn new() -> Self {
        Self::with_alphabet(Quadrant::ALL.to_vec())
    }

    /// Create an empty automaton over a declared subset of the quadrants
    ///
    /// The order given is the order used when serializing.
    pub fn with_alphabet(alphabet: Vec<Quadrant>) -> Self {
        Self {
            alphabet,
            states: Vec::new(),
            slots: HashMap::new(),
            ids: IdAllocator::new(),
            initial: None,
            finals: StateSet::default(),
        }
    }

    /// Declared alphabet in declaration order
    pub fn alphabet(&self) -> &[Quadrant] {
        &self.alphabet
    }

    /// Number of states owned by the automaton
    pub const fn len(&self) -> usize {
        self.states.len()
    }

    /// Whether the automaton owns no states
    pub const fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Add a state with a freshly allocated id
    ///
    /// # Errors
    ///
    /// Returns `InvalidAutomaton` if no unused id remains
    pub fn add_state(&mut self) -> Result<StateId> {
        let id = self.ids.allocate()?;
        self.push_state(id);
        Ok(id)
    }

    /// Add a state with an externally supplied id
    ///
    /// # Errors
    ///
    /// Returns `InvalidAutomaton` if the id is already in use
    pub fn add_state_with_id(&mut self, id: StateId) -> Result<StateId> {
        if self.slots.contains_key(&id) {
            return Err(invalid_automaton(&format!("duplicate state {id}")));
        }
        self.ids.reserve(id);
        self.push_state(id);
        Ok(id)
    }

    fn push_state(&mut self, id: StateId) {
        self.slots.insert(id, self.states.len());
        self.states.push(DfaState::new(id));
        self.finals.push_slot();
    }

    /// Whether the automaton owns a state with this id
    pub fn contains(&self, id: StateId) -> bool {
        self.slots.contains_key(&id)
    }

    /// Add or replace the transition `from --symbol--> to`
    ///
    /// # Errors
    ///
    /// Returns `InvalidAutomaton` if either state is unknown
    pub fn add_transition(&mut self, from: StateId, symbol: Quadrant, to: StateId) -> Result<()> {
        let target = self.slot_of(to)?;
        let source = self.slot_of(from)?;
        if let Some(slot) = self
            .states
            .get_mut(source)
            .and_then(|state| state.transitions.get_mut(symbol.index()))
        {
            *slot = Some(target);
        }
        Ok(())
    }

    /// Make a state the single initial state
    ///
    /// # Errors
    ///
    /// Returns `InvalidAutomaton` if the state is unknown
    pub fn set_initial(&mut self, id: StateId) -> Result<()> {
        self.initial = Some(self.slot_of(id)?);
        Ok(())
    }

    /// Mark a state as accepting; marking twice has no further effect
    ///
    /// # Errors
    ///
    /// Returns `InvalidAutomaton` if the state is unknown
    pub fn add_final(&mut self, id: StateId) -> Result<()> {
        let slot = self.slot_of(id)?;
        self.finals.insert(slot);
        Ok(())
    }

    /// Initial state, if one has been assigned
    pub fn initial(&self) -> Option<StateId> {
        self.initial.and_then(|slot| self.id_at(slot))
    }

    /// Whether the state is accepting
    pub fn is_final(&self, id: StateId) -> bool {
        self.slots
            .get(&id)
            .is_some_and(|&slot| self.finals.contains(slot))
    }

    /// State ids in insertion order
    pub fn states(&self) -> impl Iterator<Item = StateId> + '_ {
        self.states.iter().map(DfaState::id)
    }

    /// Accepting state ids in insertion order
    pub fn final_states(&self) -> impl Iterator<Item = StateId> + '_ {
        self.finals.iter().filter_map(|slot| self.id_at(slot))
    }

    /// Successor of a state on a symbol, `None` when undefined
    ///
    /// # Errors
    ///
    /// Returns `InvalidAutomaton` if the state is unknown
    pub fn successor(&self, id: StateId, symbol: Quadrant) -> Result<Option<StateId>> {
        let slot = self.slot_of(id)?;
        Ok(self
            .states
            .get(slot)
            .and_then(|state| state.transitions.get(symbol.index()).copied().flatten())
            .and_then(|target| self.id_at(target)))
    }

    /// Full transition row of a state, indexed by quadrant
    ///
    /// # Errors
    ///
    /// Returns `InvalidAutomaton` if the state is unknown
    pub fn transitions_of(&self, id: StateId) -> Result<[Option<StateId>; QUADRANT_COUNT]> {
        let slot = self.slot_of(id)?;
        Ok(self
            .states
            .get(slot)
            .map_or([None; QUADRANT_COUNT], |state| self.transition_ids(state)))
    }

    /// Follow a word of symbols from the initial state
    ///
    /// # Errors
    ///
    /// Returns `InvalidAutomaton` if there is no initial state or a
    /// transition along the word is missing
    pub fn run<I>(&self, word: I) -> Result<StateId>
    where
        I: IntoIterator<Item = Quadrant>,
    {
        let mut current = self
            .initial
            .ok_or_else(|| invalid_automaton(&"no initial state assigned"))?;
        for symbol in word {
            let state = self
                .states
                .get(current)
                .ok_or_else(|| invalid_automaton(&format!("dangling state slot {current}")))?;
            current = state
                .transitions
                .get(symbol.index())
                .copied()
                .flatten()
                .ok_or_else(|| {
                    invalid_automaton(&format!(
                        "state {} has no transition on symbol '{symbol}'",
                        state.id
                    ))
                })?;
        }
        self.id_at(current)
            .ok_or_else(|| invalid_automaton(&format!("dangling state slot {current}")))
    }

    fn slot_of(&self, id: StateId) -> Result<usize> {
        self.slots
            .get(&id)
            .copied()
            .ok_or_else(|| invalid_automaton(&format!("unknown state {id}")))
    }

    fn id_at(&self, slot: usize) -> Option<StateId> {
        self.states.get(slot).map(DfaState::id)
    }

    fn transition_ids(&self, state: &DfaState) -> [Option<StateId>; QUADRANT_COUNT] {
        state
            .transitions
            .map(|target| target.and_then(|slot| self.id_at(slot)))
    }
}

// Structural equality: same alphabet, same state ids in the same order, same
// transitions by id, same initial state and same accepting states.
impl PartialEq for Dfa {
    fn eq(&self, other: &Self) -> bool {
        self.alphabet == other.alphabet
            && self.initial() == other.initial()
            && self.states().eq(other.states())
            && self.final_states().eq(other.final_states())
            && self
                .states
                .iter()
                .zip(&other.states)
                .all(|(a, b)| self.transition_ids(a) == other.transition_ids(b))
    }
}

impl Eq for Dfa {}
