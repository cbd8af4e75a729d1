//! Binary raster images encoded as finite automata over quadtree addresses
//!
//! Every pixel of a `2^n x 2^n` image has an address: the sequence of
//! quadrant choices leading from the whole image down to that pixel. An image
//! is encoded as a deterministic automaton accepting the addresses of its on
//! pixels, with structurally equal regions sharing a state. The crate also
//! renders automata back to rasters, scores how well an automaton fits an
//! image, and composes non-deterministic automata.

#![forbid(unsafe_code)]

/// Deterministic and non-deterministic automata and their algebra
pub mod automaton;
/// Image to automaton encoding, decoding and matching
pub mod codec;
/// Input/output operations and error handling
pub mod io;
/// Quadtree decomposition and pixel addressing
pub mod quadtree;

pub use io::error::{QuadfaError, Result};
