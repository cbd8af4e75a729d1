//! State identities and the per-automaton id allocator

use crate::io::configuration::STATE_TOKEN_PREFIX;
use crate::io::error::{Result, invalid_automaton, malformed};
use std::fmt;
use std::str::FromStr;

/// Identity of a state, unique within its owning automaton
///
/// Rendered on the wire as `q_<id>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateId(pub u32);

impl StateId {
    /// Numeric value of the id
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Parse a `q_<id>` token
    ///
    /// The prefix is stripped and the remainder is always read as an integer.
    ///
    /// # Errors
    ///
    /// Returns `MalformedWireFormat` if the prefix is missing or the
    /// remainder is not a non-negative integer
    pub fn parse_token(token: &str) -> Result<Self> {
        let digits = token
            .strip_prefix(STATE_TOKEN_PREFIX)
            .ok_or_else(|| malformed(&format!("state token '{token}' lacks the 'q_' prefix")))?;
        digits
            .parse::<u32>()
            .map(Self)
            .map_err(|e| malformed(&format!("state token '{token}' has a bad id: {e}")))
    }

    /// Render the `q_<id>` token
    pub fn token(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{STATE_TOKEN_PREFIX}{}", self.0)
    }
}

impl FromStr for StateId {
    type Err = crate::io::error::QuadfaError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_token(s)
    }
}

/// Hands out fresh state ids for a single automaton
///
/// Explicitly supplied ids are reserved rather than counted, and the counter
/// always jumps past the largest reserved id, so allocated and supplied ids
/// never collide. Once `q_4294967295` is taken no fresh id remains.
#[derive(Clone, Debug, Default)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    /// Create an allocator starting at zero
    pub const fn new() -> Self {
        Self { next: 0 }
    }

    /// Take the next unused id
    ///
    /// # Errors
    ///
    /// Returns `InvalidAutomaton` if every id up to `u32::MAX` is taken
    pub fn allocate(&mut self) -> Result<StateId> {
        let id = u32::try_from(self.next)
            .map_err(|_| invalid_automaton(&"no state ids left to allocate"))?;
        self.next += 1;
        Ok(StateId(id))
    }

    /// Record an externally supplied id so it is never allocated
    pub fn reserve(&mut self, id: StateId) {
        let after = u64::from(id.0) + 1;
        if after > self.next {
            self.next = after;
        }
    }
}
