//! Conversions between rasters and automata
//!
//! The builder turns an image into an automaton, the decoder turns it back,
//! and the matcher measures how well an automaton describes an image.

/// Image to automaton construction with region merging
pub mod builder;
/// Automaton traversal and image rendering
pub mod decoder;
/// Address match scoring and best-fit selection
pub mod matcher;

pub use builder::build;
pub use decoder::{accepts, render};
pub use matcher::{MatchReport, score, select_best};
