//! JSON wire format for deterministic and non-deterministic automata
//!
//! An automaton is one JSON object with the fields `states`,
//! `initial_state`, `final_states` and `alphabet`, followed by one field per
//! state token holding that state's transitions. Deterministic tables map
//! each symbol to one successor token; non-deterministic tables map each
//! symbol, or `""` for epsilon, to a list of successor tokens.
//!
//! Parsing validates everything except transition totality before any
//! automaton is handed back.

use crate::automaton::alphabet::Quadrant;
use crate::automaton::dfa::Dfa;
use crate::automaton::nfa::{Label, Nfa};
use crate::automaton::state::StateId;
use crate::io::configuration::EPSILON_KEY;
use crate::io::error::{QuadfaError, Result, invalid_automaton, malformed};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};

#[derive(Serialize, Deserialize)]
struct AutomatonRecord {
    states: Vec<String>,
    initial_state: String,
    final_states: Vec<String>,
    alphabet: Vec<String>,
    #[serde(flatten)]
    tables: Map<String, Value>,
}

/// Render a deterministic automaton as JSON text
///
/// # Errors
///
/// Returns `InvalidAutomaton` if no initial state is assigned, or
/// `Serialization` if the JSON writer fails
pub fn serialize_dfa(dfa: &Dfa) -> Result<String> {
    let initial = dfa
        .initial()
        .ok_or_else(|| invalid_automaton(&"cannot serialize without an initial state"))?;

    let mut tables = Map::new();
    for id in dfa.states() {
        let row = dfa.transitions_of(id)?;
        let mut table = Map::new();
        for &symbol in dfa.alphabet() {
            if let Some(target) = row.get(symbol.index()).copied().flatten() {
                table.insert(symbol.to_string(), Value::String(target.token()));
            }
        }
        tables.insert(id.token(), Value::Object(table));
    }

    let record = AutomatonRecord {
        states: dfa.states().map(StateId::token).collect(),
        initial_state: initial.token(),
        final_states: dfa.final_states().map(StateId::token).collect(),
        alphabet: dfa.alphabet().iter().map(ToString::to_string).collect(),
        tables,
    };

    Ok(serde_json::to_string(&record)?)
}

/// Parse a deterministic automaton from JSON text
///
/// # Errors
///
/// Returns `MalformedWireFormat` if a field is missing or mistyped, a state
/// token is unparsable, undeclared or duplicated, an alphabet entry is not a
/// quadrant symbol, or a transition uses a symbol outside the alphabet
pub fn deserialize_dfa(text: &str) -> Result<Dfa> {
    let record = parse_record(text)?;

    let mut alphabet = Vec::with_capacity(record.alphabet.len());
    for entry in &record.alphabet {
        let symbol = single_char(entry)?;
        let quadrant = Quadrant::from_char(symbol)
            .ok_or_else(|| malformed(&format!("alphabet symbol '{entry}' is not a quadrant")))?;
        if alphabet.contains(&quadrant) {
            return Err(malformed(&format!("alphabet symbol '{entry}' is repeated")));
        }
        alphabet.push(quadrant);
    }

    let skeleton = Skeleton::parse(&record)?;
    let mut dfa = Dfa::with_alphabet(alphabet);
    for &id in &skeleton.states {
        dfa.add_state_with_id(id).map_err(as_malformed)?;
    }

    for &id in &skeleton.states {
        let table = skeleton.table(id)?;
        for (key, target) in table {
            let symbol = single_char(key)?;
            let quadrant = Quadrant::from_char(symbol)
                .filter(|quadrant| dfa.alphabet().contains(quadrant))
                .ok_or_else(|| {
                    malformed(&format!("state {id} uses symbol '{key}' outside the alphabet"))
                })?;
            let token = target.as_str().ok_or_else(|| {
                malformed(&format!("state {id} on '{key}' must name a single state"))
            })?;
            let successor = skeleton.declared(token)?;
            dfa.add_transition(id, quadrant, successor)
                .map_err(as_malformed)?;
        }
    }

    dfa.set_initial(skeleton.initial).map_err(as_malformed)?;
    for &id in &skeleton.finals {
        dfa.add_final(id).map_err(as_malformed)?;
    }

    Ok(dfa)
}

/// Render a non-deterministic automaton as JSON text
///
/// Every alphabet symbol gets an entry, empty when the state has no such
/// edge; epsilon edges appear under `""` only when present.
///
/// # Errors
///
/// Returns `InvalidAutomaton` if no initial state is assigned, or
/// `Serialization` if the JSON writer fails
pub fn serialize_nfa(nfa: &Nfa) -> Result<String> {
    let initial = nfa
        .initial()
        .ok_or_else(|| invalid_automaton(&"cannot serialize without an initial state"))?;

    let tokens = |targets: Vec<StateId>| {
        Value::Array(
            targets
                .into_iter()
                .map(|target| Value::String(target.token()))
                .collect(),
        )
    };

    let mut tables = Map::new();
    for id in nfa.states() {
        let mut table = Map::new();
        let epsilon = nfa.successors(id, Label::Epsilon)?;
        if !epsilon.is_empty() {
            table.insert(EPSILON_KEY.to_string(), tokens(epsilon));
        }
        for &symbol in nfa.alphabet() {
            table.insert(
                symbol.to_string(),
                tokens(nfa.successors(id, Label::Symbol(symbol))?),
            );
        }
        tables.insert(id.token(), Value::Object(table));
    }

    let record = AutomatonRecord {
        states: nfa.states().map(StateId::token).collect(),
        initial_state: initial.token(),
        final_states: nfa.final_states().map(StateId::token).collect(),
        alphabet: nfa.alphabet().iter().map(ToString::to_string).collect(),
        tables,
    };

    Ok(serde_json::to_string(&record)?)
}

/// Parse a non-deterministic automaton from JSON text
///
/// # Errors
///
/// Returns `MalformedWireFormat` if a field is missing or mistyped, a state
/// token is unparsable, undeclared or duplicated, an alphabet entry is not a
/// single character, or a transition uses a symbol outside the alphabet
pub fn deserialize_nfa(text: &str) -> Result<Nfa> {
    let record = parse_record(text)?;

    let mut alphabet = Vec::with_capacity(record.alphabet.len());
    for entry in &record.alphabet {
        let symbol = single_char(entry)?;
        if alphabet.contains(&symbol) {
            return Err(malformed(&format!("alphabet symbol '{entry}' is repeated")));
        }
        alphabet.push(symbol);
    }

    let skeleton = Skeleton::parse(&record)?;
    let mut nfa = Nfa::new(alphabet);
    for &id in &skeleton.states {
        nfa.add_state_with_id(id).map_err(as_malformed)?;
    }

    for &id in &skeleton.states {
        let table = skeleton.table(id)?;
        for (key, targets) in table {
            let label = if key == EPSILON_KEY {
                Label::Epsilon
            } else {
                let symbol = single_char(key)?;
                if !nfa.alphabet().contains(&symbol) {
                    return Err(malformed(&format!(
                        "state {id} uses symbol '{key}' outside the alphabet"
                    )));
                }
                Label::Symbol(symbol)
            };
            let targets = targets.as_array().ok_or_else(|| {
                malformed(&format!("state {id} on '{key}' must list successor states"))
            })?;
            for target in targets {
                let token = target.as_str().ok_or_else(|| {
                    malformed(&format!("state {id} on '{key}' lists a non-string successor"))
                })?;
                let successor = skeleton.declared(token)?;
                nfa.add_transition(id, label, successor)
                    .map_err(as_malformed)?;
            }
        }
    }

    nfa.set_initial(skeleton.initial).map_err(as_malformed)?;
    for &id in &skeleton.finals {
        nfa.add_final(id).map_err(as_malformed)?;
    }

    Ok(nfa)
}

fn parse_record(text: &str) -> Result<AutomatonRecord> {
    serde_json::from_str(text).map_err(|e| malformed(&e))
}

fn single_char(entry: &str) -> Result<char> {
    let mut chars = entry.chars();
    match (chars.next(), chars.next()) {
        (Some(symbol), None) => Ok(symbol),
        _ => Err(malformed(&format!(
            "symbol '{entry}' must be exactly one character"
        ))),
    }
}

// Structure errors found while assembling an already validated record are
// still reported as wire-format problems
fn as_malformed(error: QuadfaError) -> QuadfaError {
    match error {
        QuadfaError::InvalidAutomaton { reason } => malformed(&reason),
        other => other,
    }
}

/// State tokens of a record, parsed and cross-checked
struct Skeleton<'a> {
    states: Vec<StateId>,
    declared: HashSet<StateId>,
    initial: StateId,
    finals: Vec<StateId>,
    tables: HashMap<StateId, &'a Map<String, Value>>,
}

impl<'a> Skeleton<'a> {
    fn parse(record: &'a AutomatonRecord) -> Result<Self> {
        let mut states = Vec::with_capacity(record.states.len());
        let mut declared = HashSet::with_capacity(record.states.len());
        for token in &record.states {
            let id = StateId::parse_token(token)?;
            if !declared.insert(id) {
                return Err(malformed(&format!("state {token} is declared twice")));
            }
            states.push(id);
        }

        let mut skeleton = Self {
            states,
            declared,
            initial: StateId(0),
            finals: Vec::with_capacity(record.final_states.len()),
            tables: HashMap::with_capacity(record.tables.len()),
        };

        skeleton.initial = skeleton.declared(&record.initial_state)?;
        for token in &record.final_states {
            let id = skeleton.declared(token)?;
            skeleton.finals.push(id);
        }

        for (token, table) in &record.tables {
            let id = StateId::parse_token(token)
                .map_err(|e| malformed(&format!("unexpected field '{token}': {e}")))?;
            if !skeleton.declared.contains(&id) {
                return Err(malformed(&format!(
                    "transition table for undeclared state {token}"
                )));
            }
            let table = table
                .as_object()
                .ok_or_else(|| malformed(&format!("transitions of {token} must be an object")))?;
            if skeleton.tables.insert(id, table).is_some() {
                return Err(malformed(&format!(
                    "state {id} has more than one transition table"
                )));
            }
        }

        Ok(skeleton)
    }

    fn declared(&self, token: &str) -> Result<StateId> {
        let id = StateId::parse_token(token)?;
        if self.declared.contains(&id) {
            Ok(id)
        } else {
            Err(malformed(&format!("unknown state token '{token}'")))
        }
    }

    fn table(&self, id: StateId) -> Result<&'a Map<String, Value>> {
        self.tables
            .get(&id)
            .copied()
            .ok_or_else(|| malformed(&format!("missing transition table for state {id}")))
    }
}
