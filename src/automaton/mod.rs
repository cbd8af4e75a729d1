//! Finite automata over symbol alphabets
//!
//! The deterministic variant recognizes quadtree addresses; the
//! non-deterministic variant backs the composition operators.

/// Union, concatenation and closure over non-deterministic automata
pub mod algebra;
/// The four-symbol quadrant alphabet
pub mod alphabet;
/// Deterministic automaton with fixed-size transition tables
pub mod dfa;
/// Non-deterministic automaton with epsilon transitions
pub mod nfa;
/// State identities and id allocation
pub mod state;
/// Bitset of state slots used for accepting sets and simulation
pub mod state_set;

pub use alphabet::Quadrant;
pub use dfa::Dfa;
pub use nfa::{Label, Nfa};
pub use state::StateId;
