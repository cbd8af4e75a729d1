//! Reconstruction of a raster from an address-recognizing automaton

use crate::automaton::dfa::Dfa;
use crate::io::error::Result;
use crate::quadtree::address::{Address, decode, encode};
use crate::quadtree::raster::{BitImage, index_image};

/// Whether the automaton accepts an address
///
/// Walks from the initial state one symbol at a time and checks whether the
/// state reached is accepting.
///
/// # Errors
///
/// Returns `InvalidAutomaton` if there is no initial state or a state along
/// the walk has no transition for the next symbol
pub fn accepts(dfa: &Dfa, address: &Address) -> Result<bool> {
    let end = dfa.run(address.iter())?;
    Ok(dfa.is_final(end))
}

/// Render the automaton as a `resolution × resolution` raster
///
/// Every address of that resolution is tried against the automaton and the
/// accepted ones become the on cells. `resolution` should be a power of two
/// for the addresses to line up with whole pixels.
///
/// # Errors
///
/// Returns `InvalidAutomaton` if some address cannot be traversed
pub fn render(dfa: &Dfa, resolution: usize) -> Result<BitImage> {
    let mut image = BitImage::ones((resolution, resolution));
    let index = index_image(resolution);

    // An all-ones raster enumerates every address exactly once
    let mut accepted = Vec::new();
    for address in encode(image.view()) {
        if accepts(dfa, &address)? {
            accepted.push(address);
        }
    }

    tracing::debug!(
        accepted = accepted.len(),
        total = resolution * resolution,
        "rendering {resolution}x{resolution} image"
    );

    decode(&accepted, index.view(), &mut image);
    Ok(image)
}
