//! Thompson-style composition of non-deterministic automata
//!
//! Every operator builds a brand new automaton and copies the operands'
//! states into it. Copied states keep their ids unless the id is already
//! taken in the result, in which case they receive a fresh one.

use crate::automaton::dfa::Dfa;
use crate::automaton::nfa::{Label, Nfa};
use crate::automaton::state::StateId;
use crate::io::error::Result;
use std::collections::HashMap;

/// Copy of `source`'s states and edges placed inside `target`
struct Embedding {
    ids: HashMap<StateId, StateId>,
}

impl Embedding {
    fn map(&self, id: StateId) -> Option<StateId> {
        self.ids.get(&id).copied()
    }
}

fn embed(target: &mut Nfa, source: &Nfa) -> Result<Embedding> {
    target.extend_alphabet(source.alphabet().iter().copied());

    let mut ids = HashMap::with_capacity(source.len());
    for id in source.states() {
        ids.insert(id, target.add_state_preferring(id)?);
    }

    for id in source.states() {
        let Some(&from) = ids.get(&id) else {
            continue;
        };
        for label in source.labels_of(id)? {
            for successor in source.successors(id, label)? {
                if let Some(&to) = ids.get(&successor) {
                    target.add_transition(from, label, to)?;
                }
            }
        }
    }

    Ok(Embedding { ids })
}

/// Lift a deterministic automaton into the non-deterministic representation
///
/// State ids, state order, initial state and accepting states are kept; each
/// transition becomes a single-target edge.
///
/// # Errors
///
/// Returns `InvalidAutomaton` if the automaton references states it does not
/// own
pub fn lift(dfa: &Dfa) -> Result<Nfa> {
    let mut nfa = Nfa::new(dfa.alphabet().iter().map(|symbol| symbol.as_char()));

    for id in dfa.states() {
        nfa.add_state_with_id(id)?;
    }

    for id in dfa.states() {
        for &symbol in dfa.alphabet() {
            if let Some(successor) = dfa.successor(id, symbol)? {
                nfa.add_transition(id, Label::Symbol(symbol.as_char()), successor)?;
            }
        }
    }

    if let Some(initial) = dfa.initial() {
        nfa.set_initial(initial)?;
    }
    for id in dfa.final_states() {
        nfa.add_final(id)?;
    }

    Ok(nfa)
}

/// Automaton accepting the words of either operand
///
/// A fresh initial state has epsilon edges to both operands' initial states;
/// the accepting states are those of `a` followed by those of `b`.
///
/// # Errors
///
/// Returns `InvalidAutomaton` if an operand references states it does not own
/// or no id is left for the new initial state
pub fn union(a: &Nfa, b: &Nfa) -> Result<Nfa> {
    let mut result = Nfa::default();
    let left = embed(&mut result, a)?;
    let right = embed(&mut result, b)?;

    let start = result.add_state()?;
    result.set_initial(start)?;

    for (operand, embedding) in [(a, &left), (b, &right)] {
        if let Some(initial) = operand.initial().and_then(|id| embedding.map(id)) {
            result.add_transition(start, Label::Epsilon, initial)?;
        }
        for id in operand.final_states().filter_map(|id| embedding.map(id)) {
            result.add_final(id)?;
        }
    }

    Ok(result)
}

/// Automaton reading a word of `a` followed by a word of `b`
///
/// Only the first accepting state of `a` is linked to `b`'s initial state,
/// so operands with several accepting states are joined through that one
/// state alone. Accepting states of the result are those of `b`.
///
/// # Errors
///
/// Returns `InvalidAutomaton` if an operand references states it does not own
pub fn concat(a: &Nfa, b: &Nfa) -> Result<Nfa> {
    let mut result = Nfa::default();
    let left = embed(&mut result, a)?;
    let right = embed(&mut result, b)?;

    if let Some(initial) = a.initial().and_then(|id| left.map(id)) {
        result.set_initial(initial)?;
    }

    let first_final = a.final_states().next().and_then(|id| left.map(id));
    let next_initial = b.initial().and_then(|id| right.map(id));
    if let (Some(from), Some(to)) = (first_final, next_initial) {
        result.add_transition(from, Label::Epsilon, to)?;
    }

    for id in b.final_states().filter_map(|id| right.map(id)) {
        result.add_final(id)?;
    }

    Ok(result)
}

/// Kleene closure of an automaton
///
/// A fresh accepting initial state has an epsilon edge to `a`'s initial
/// state, and every accepting state of `a` has an epsilon edge back to it.
///
/// # Errors
///
/// Returns `InvalidAutomaton` if the operand references states it does not
/// own or no id is left for the new initial state
pub fn star(a: &Nfa) -> Result<Nfa> {
    let mut result = Nfa::default();
    let inner = embed(&mut result, a)?;

    let start = result.add_state()?;
    result.set_initial(start)?;
    result.add_final(start)?;

    if let Some(initial) = a.initial().and_then(|id| inner.map(id)) {
        result.add_transition(start, Label::Epsilon, initial)?;
    }
    for id in a.final_states().filter_map(|id| inner.map(id)) {
        result.add_final(id)?;
        result.add_transition(id, Label::Epsilon, start)?;
    }

    Ok(result)
}
