//! Construction of an address-recognizing automaton from a raster
//!
//! Each state stands for one distinct sub-image. States are expanded in id
//! order: a region that can still be split gets one transition per quadrant,
//! reusing the state of any structurally equal region seen before, and a
//! single cell becomes an absorbing state that accepts iff the cell is on.

use crate::automaton::alphabet::Quadrant;
use crate::automaton::dfa::Dfa;
use crate::automaton::state::StateId;
use crate::io::error::Result;
use crate::quadtree::cache::{CacheStats, RegionCache, RegionKey};
use crate::quadtree::partition::split_into_fourths;
use ndarray::ArrayView2;
use num_traits::One;
use std::hash::Hash;

/// Build the automaton whose accepted addresses are the image's on cells
///
/// # Errors
///
/// Returns `InvalidAutomaton` only if the automaton under construction is
/// left inconsistent, which the construction itself rules out
pub fn build<T>(image: ArrayView2<'_, T>) -> Result<Dfa>
where
    T: One + Eq + Hash + Clone,
{
    build_with_stats(image).map(|(dfa, _)| dfa)
}

/// Build the automaton and report how often regions were merged
///
/// Every cache hit is a transition into an existing state instead of a new
/// one, so `hits` measures how much the image's self-similarity saved.
///
/// # Errors
///
/// Returns `InvalidAutomaton` only if the automaton under construction is
/// left inconsistent, which the construction itself rules out
pub fn build_with_stats<T>(image: ArrayView2<'_, T>) -> Result<(Dfa, CacheStats)>
where
    T: One + Eq + Hash + Clone,
{
    let (rows, cols) = image.dim();
    let mut dfa = Dfa::new();
    let mut cache = RegionCache::new();
    let mut worklist: Vec<(StateId, ArrayView2<'_, T>)> = Vec::new();

    let (initial, _) = cache.get_or_insert_with(RegionKey::new(&image), || dfa.add_state())?;
    dfa.set_initial(initial)?;
    worklist.push((initial, image));

    let mut cursor = 0;
    while let Some((state, region)) = worklist.get(cursor).copied() {
        match split_into_fourths(region) {
            None => {
                if region.iter().next().is_some_and(One::is_one) {
                    dfa.add_final(state)?;
                }
                for symbol in Quadrant::ALL {
                    dfa.add_transition(state, symbol, state)?;
                }
            }
            Some(parts) => {
                for (symbol, part) in Quadrant::ALL.into_iter().zip(parts) {
                    let key = RegionKey::new(&part);
                    let (target, _) = cache.get_or_insert_with(key, || {
                        let id = dfa.add_state()?;
                        worklist.push((id, part));
                        Ok(id)
                    })?;
                    dfa.add_transition(state, symbol, target)?;
                }
            }
        }
        cursor += 1;
    }

    tracing::debug!(
        states = dfa.len(),
        merged = cache.stats.hits,
        distinct = cache.stats.misses,
        "built automaton from {rows}x{cols} image"
    );

    Ok((dfa, cache.stats))
}
