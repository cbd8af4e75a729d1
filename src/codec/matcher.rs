//! Scoring automata against images and picking the best fit

use crate::automaton::dfa::Dfa;
use crate::codec::decoder::accepts;
use crate::io::error::Result;
use crate::quadtree::address::{Address, encode};
use crate::quadtree::raster::BitImage;
use ndarray::ArrayView2;
use num_traits::One;

/// How many of an image's on-cell addresses an automaton accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchReport {
    /// Addresses accepted by the automaton
    pub matched: usize,
    /// Addresses tested, one per on cell
    pub total: usize,
}

impl MatchReport {
    /// Accepted fraction in `[0, 1]`, zero for an image with no on cells
    pub const fn ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.matched as f64 / self.total as f64
        }
    }

    /// Accepted fraction as a percentage
    pub const fn percentage(&self) -> f64 {
        self.ratio() * 100.0
    }

    /// Whether every tested address was accepted
    pub const fn all_accepted(&self) -> bool {
        self.matched == self.total
    }
}

fn count_matches(dfa: &Dfa, addresses: &[Address]) -> Result<MatchReport> {
    let mut matched = 0;
    for address in addresses {
        if accepts(dfa, address)? {
            matched += 1;
        }
    }
    Ok(MatchReport {
        matched,
        total: addresses.len(),
    })
}

/// Test every on cell of an image against the automaton
///
/// # Errors
///
/// Returns `InvalidAutomaton` if some address cannot be traversed
pub fn verify<T: One + PartialEq>(dfa: &Dfa, image: ArrayView2<'_, T>) -> Result<MatchReport> {
    count_matches(dfa, &encode(image))
}

/// Fraction of the image's on cells accepted by the automaton
///
/// An image without on cells scores 0 so it still compares numerically.
///
/// # Errors
///
/// Returns `InvalidAutomaton` if some address cannot be traversed
pub fn score<T: One + PartialEq>(dfa: &Dfa, image: ArrayView2<'_, T>) -> Result<f64> {
    verify(dfa, image).map(|report| report.ratio())
}

/// Index of the automaton scoring highest on the image
///
/// Ties go to the earliest candidate. Returns `None` when there are no
/// candidates.
///
/// # Errors
///
/// Returns `InvalidAutomaton` if some candidate cannot be traversed
pub fn select_best<T: One + PartialEq>(
    candidates: &[Dfa],
    image: ArrayView2<'_, T>,
) -> Result<Option<usize>> {
    let addresses = encode(image);
    let mut best_score = -1.0;
    let mut best_index = None;

    for (index, dfa) in candidates.iter().enumerate() {
        let candidate_score = count_matches(dfa, &addresses)?.ratio();
        tracing::debug!(index, score = candidate_score, "scored candidate");
        if candidate_score > best_score {
            best_score = candidate_score;
            best_index = Some(index);
        }
    }

    Ok(best_index)
}

/// Best candidate for each image in turn
///
/// # Errors
///
/// Returns `InvalidAutomaton` if some candidate cannot be traversed
pub fn select_best_batch(candidates: &[Dfa], images: &[BitImage]) -> Result<Vec<Option<usize>>> {
    images
        .iter()
        .map(|image| select_best(candidates, image.view()))
        .collect()
}
