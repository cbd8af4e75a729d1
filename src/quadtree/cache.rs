use crate::automaton::state::StateId;
use crate::io::error::Result;
use ndarray::ArrayView2;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

/// Key for looking up structurally equal regions
///
/// Two regions share a key exactly when they have the same shape and the
/// same cell values in row-major order, wherever they sit in the image.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RegionKey<T> {
    cells: Vec<T>,
    rows: usize,
    cols: usize,
}

impl<T: Clone> RegionKey<T> {
    /// Create a key from a region's shape and values
    pub fn new(region: &ArrayView2<'_, T>) -> Self {
        let (rows, cols) = region.dim();
        // Empty regions of any shape are the same region
        let (rows, cols) = if region.is_empty() { (0, 0) } else { (rows, cols) };

        Self {
            cells: region.iter().cloned().collect(),
            rows,
            cols,
        }
    }
}

impl<T: Hash> Hash for RegionKey<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.cells.hash(state);
        self.rows.hash(state);
        self.cols.hash(state);
    }
}

/// Map from already-seen regions to the state representing them
///
/// Replaces a scan over every previously seen region with a single hash
/// lookup, so merging identical quadrants costs near-linear time overall.
pub struct RegionCache<T> {
    /// Region to state mapping
    states: HashMap<RegionKey<T>, StateId>,

    /// Cache performance statistics
    pub stats: CacheStats,
}

impl<T> Default for RegionCache<T> {
    fn default() -> Self {
        Self {
            states: HashMap::new(),
            stats: CacheStats::default(),
        }
    }
}

/// Lookup counters for the region cache
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of regions matched to an existing state
    pub hits: usize,
    /// Number of regions that needed a new state
    pub misses: usize,
}

impl<T: Eq + Hash> RegionCache<T> {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct regions recorded
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Whether no region has been recorded
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Retrieve the state for a region or create and record a new one
    ///
    /// The closure runs only when the region has not been seen before.
    /// Returns the state and whether it was already present.
    ///
    /// # Errors
    ///
    /// Propagates the closure's error; nothing is recorded in that case
    pub fn get_or_insert_with<F>(
        &mut self,
        key: RegionKey<T>,
        create: F,
    ) -> Result<(StateId, bool)>
    where
        F: FnOnce() -> Result<StateId>,
    {
        use std::collections::hash_map::Entry;

        match self.states.entry(key) {
            Entry::Occupied(entry) => {
                self.stats.hits += 1;
                Ok((*entry.get(), true))
            }
            Entry::Vacant(entry) => {
                let id = create()?;
                self.stats.misses += 1;
                Ok((*entry.insert(id), false))
            }
        }
    }
}
