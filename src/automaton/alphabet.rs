//! Quadrant alphabet shared by deterministic automata and quadtree addresses

use std::fmt;

/// Number of symbols in the quadrant alphabet
pub const QUADRANT_COUNT: usize = 4;

/// One of the four quadrants of a region, doubling as an input symbol
///
/// The discriminant is the symbol's position in the alphabet, so it can index
/// fixed-size transition tables directly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Quadrant {
    /// Symbol `0`
    TopLeft = 0,
    /// Symbol `1`
    TopRight = 1,
    /// Symbol `2`
    BottomLeft = 2,
    /// Symbol `3`
    BottomRight = 3,
}

impl Quadrant {
    /// All quadrants in alphabet order
    pub const ALL: [Self; QUADRANT_COUNT] = [
        Self::TopLeft,
        Self::TopRight,
        Self::BottomLeft,
        Self::BottomRight,
    ];

    /// Position of the symbol in the alphabet
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Quadrant at the given alphabet position
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::TopLeft),
            1 => Some(Self::TopRight),
            2 => Some(Self::BottomLeft),
            3 => Some(Self::BottomRight),
            _ => None,
        }
    }

    /// Character used for this symbol on the wire
    pub const fn as_char(self) -> char {
        match self {
            Self::TopLeft => '0',
            Self::TopRight => '1',
            Self::BottomLeft => '2',
            Self::BottomRight => '3',
        }
    }

    /// Parse a wire character back into a quadrant
    pub const fn from_char(symbol: char) -> Option<Self> {
        match symbol {
            '0' => Some(Self::TopLeft),
            '1' => Some(Self::TopRight),
            '2' => Some(Self::BottomLeft),
            '3' => Some(Self::BottomRight),
            _ => None,
        }
    }
}

impl fmt::Display for Quadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}
