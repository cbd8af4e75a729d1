//! Non-deterministic automaton with epsilon transitions
//!
//! Unlike [`crate::automaton::dfa::Dfa`], the alphabet is an arbitrary list of
//! characters and each state maps a label to any number of successors.

use crate::automaton::state::{IdAllocator, StateId};
use crate::automaton::state_set::StateSet;
use crate::io::error::{Result, invalid_automaton};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Transition label: a symbol or the empty word
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Label {
    /// Transition taken without reading input
    Epsilon,
    /// Transition reading one symbol
    Symbol(char),
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Epsilon => write!(f, "ε"),
            Self::Symbol(symbol) => write!(f, "{symbol}"),
        }
    }
}

/// A single state and its transition relation
#[derive(Clone, Debug)]
pub struct NfaState {
    id: StateId,
    transitions: BTreeMap<Label, Vec<usize>>,
}

impl NfaState {
    const fn new(id: StateId) -> Self {
        Self {
            id,
            transitions: BTreeMap::new(),
        }
    }

    /// Identity of the state
    pub const fn id(&self) -> StateId {
        self.id
    }
}

/// Non-deterministic finite automaton
#[derive(Clone, Debug, Default)]
pub struct Nfa {
    alphabet: Vec<char>,
    states: Vec<NfaState>,
    slots: HashMap<StateId, usize>,
    ids: IdAllocator,
    initial: Option<usize>,
    finals: Vec<usize>,
}

impl Nfa {
    /// Create an empty automaton over the given alphabet
    ///
    /// Repeated symbols are kept once, in first-seen order.
    pub fn new(alphabet: impl IntoIterator<Item = char>) -> Self {
        let mut nfa = Self::default();
        nfa.extend_alphabet(alphabet);
        nfa
    }

    /// Append symbols not already in the alphabet
    pub fn extend_alphabet(&mut self, symbols: impl IntoIterator<Item = char>) {
        for symbol in symbols {
            if !self.alphabet.contains(&symbol) {
                self.alphabet.push(symbol);
            }
        }
    }

    /// Declared alphabet in declaration order
    pub fn alphabet(&self) -> &[char] {
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

    /// Add a state keeping `preferred` as its id when that id is free
    ///
    /// # Errors
    ///
    /// Returns `InvalidAutomaton` if `preferred` is taken and no unused id
    /// remains
    pub fn add_state_preferring(&mut self, preferred: StateId) -> Result<StateId> {
        if self.slots.contains_key(&preferred) {
            self.add_state()
        } else {
            self.ids.reserve(preferred);
            self.push_state(preferred);
            Ok(preferred)
        }
    }

    fn push_state(&mut self, id: StateId) {
        self.slots.insert(id, self.states.len());
        self.states.push(NfaState::new(id));
    }

    /// Whether the automaton owns a state with this id
    pub fn contains(&self, id: StateId) -> bool {
        self.slots.contains_key(&id)
    }

    /// Add `to` to the successors of `from` on `label`
    ///
    /// Adding an existing edge again has no effect.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAutomaton` if either state is unknown or the symbol is
    /// not in the alphabet
    pub fn add_transition(&mut self, from: StateId, label: Label, to: StateId) -> Result<()> {
        if let Label::Symbol(symbol) = label
            && !self.alphabet.contains(&symbol)
        {
            return Err(invalid_automaton(&format!(
                "symbol '{symbol}' is not in the alphabet"
            )));
        }
        let target = self.slot_of(to)?;
        let source = self.slot_of(from)?;
        if let Some(state) = self.states.get_mut(source) {
            let targets = state.transitions.entry(label).or_default();
            if !targets.contains(&target) {
                targets.push(target);
            }
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
        if !self.finals.contains(&slot) {
            self.finals.push(slot);
        }
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
            .is_some_and(|slot| self.finals.contains(slot))
    }

    /// State ids in insertion order
    pub fn states(&self) -> impl Iterator<Item = StateId> + '_ {
        self.states.iter().map(NfaState::id)
    }

    /// Accepting state ids in the order they were marked
    pub fn final_states(&self) -> impl Iterator<Item = StateId> + '_ {
        self.finals.iter().filter_map(|&slot| self.id_at(slot))
    }

    /// Successors of a state on a label, in insertion order
    ///
    /// # Errors
    ///
    /// Returns `InvalidAutomaton` if the state is unknown
    pub fn successors(&self, id: StateId, label: Label) -> Result<Vec<StateId>> {
        let slot = self.slot_of(id)?;
        Ok(self
            .states
            .get(slot)
            .and_then(|state| state.transitions.get(&label))
            .map(|targets| targets.iter().filter_map(|&t| self.id_at(t)).collect())
            .unwrap_or_default())
    }

    /// Labels that have at least one outgoing edge from a state
    ///
    /// # Errors
    ///
    /// Returns `InvalidAutomaton` if the state is unknown
    pub fn labels_of(&self, id: StateId) -> Result<Vec<Label>> {
        let slot = self.slot_of(id)?;
        Ok(self
            .states
            .get(slot)
            .map(|state| state.transitions.keys().copied().collect())
            .unwrap_or_default())
    }

    /// Every state reachable from `seed` through epsilon edges alone
    pub fn epsilon_closure(&self, seed: &StateSet) -> StateSet {
        let mut closure = seed.clone();
        let mut pending = seed.to_vec();
        while let Some(slot) = pending.pop() {
            let targets = self
                .states
                .get(slot)
                .and_then(|state| state.transitions.get(&Label::Epsilon));
            for &target in targets.into_iter().flatten() {
                if closure.insert(target) {
                    pending.push(target);
                }
            }
        }
        closure
    }

    /// Whether the automaton accepts the word, by subset simulation
    ///
    /// # Errors
    ///
    /// Returns `InvalidAutomaton` if there is no initial state
    pub fn accepts<I>(&self, word: I) -> Result<bool>
    where
        I: IntoIterator<Item = char>,
    {
        let initial = self
            .initial
            .ok_or_else(|| invalid_automaton(&"no initial state assigned"))?;
        let mut seed = StateSet::new(self.states.len());
        seed.insert(initial);
        let mut current = self.epsilon_closure(&seed);

        for symbol in word {
            let mut next = StateSet::new(self.states.len());
            for slot in current.iter() {
                let targets = self
                    .states
                    .get(slot)
                    .and_then(|state| state.transitions.get(&Label::Symbol(symbol)));
                for &target in targets.into_iter().flatten() {
                    next.insert(target);
                }
            }
            if next.is_empty() {
                return Ok(false);
            }
            current = self.epsilon_closure(&next);
        }

        Ok(self.finals.iter().any(|&slot| current.contains(slot)))
    }

    fn slot_of(&self, id: StateId) -> Result<usize> {
        self.slots
            .get(&id)
            .copied()
            .ok_or_else(|| invalid_automaton(&format!("unknown state {id}")))
    }

    fn id_at(&self, slot: usize) -> Option<StateId> {
        self.states.get(slot).map(NfaState::id)
    }

    fn edge_ids(&self, state: &NfaState) -> Vec<(Label, Vec<StateId>)> {
        state
            .transitions
            .iter()
            .map(|(&label, targets)| {
                (
                    label,
                    targets.iter().filter_map(|&t| self.id_at(t)).collect(),
                )
            })
            .collect()
    }
}

// Structural equality by state id; final states compare as sets.
impl PartialEq for Nfa {
    fn eq(&self, other: &Self) -> bool {
        let mut own_finals: Vec<StateId> = self.final_states().collect();
        let mut other_finals: Vec<StateId> = other.final_states().collect();
        own_finals.sort_unstable();
        other_finals.sort_unstable();

        self.alphabet == other.alphabet
            && self.initial() == other.initial()
            && own_finals == other_finals
            && self.states().eq(other.states())
            && self
                .states
                .iter()
                .zip(&other.states)
                .all(|(a, b)| self.edge_ids(a) == other.edge_ids(b))
    }
}

impl Eq for Nfa {}
