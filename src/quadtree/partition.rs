//! Quadtree partitioning of rectangular regions
//!
//! Works on borrowed views so the same routine splits pixel values and
//! coordinate matrices identically without copying either.

use crate::automaton::alphabet::QUADRANT_COUNT;
use ndarray::{ArrayView2, Axis};

/// Split a region into its four quadrants
///
/// Quadrants come back in alphabet order: top-left, top-right, bottom-left,
/// bottom-right. The split point is `rows / 2` and `cols / 2`, so on odd
/// sizes the lower and right quadrants are the larger ones. A quadrant that
/// receives no cell is returned as an empty `0×0` view.
///
/// Returns `None` when the region cannot be halved on either axis, i.e. it
/// holds at most a single cell.
pub fn split_into_fourths<'a, T>(
    region: ArrayView2<'a, T>,
) -> Option<[ArrayView2<'a, T>; QUADRANT_COUNT]> {
    let (rows, cols) = region.dim();
    let half_rows = rows / 2;
    let half_cols = cols / 2;

    if half_rows == 0 && half_cols == 0 {
        return None;
    }

    let (top, bottom) = region.split_at(Axis(0), half_rows);
    let (top_left, top_right) = top.split_at(Axis(1), half_cols);
    let (bottom_left, bottom_right) = bottom.split_at(Axis(1), half_cols);

    Some([top_left, top_right, bottom_left, bottom_right].map(normalize_empty))
}

// An empty view keeps its stray extent otherwise, e.g. 0x3
fn normalize_empty<T>(part: ArrayView2<'_, T>) -> ArrayView2<'_, T> {
    if part.is_empty() {
        part.split_at(Axis(0), 0).0.split_at(Axis(1), 0).0
    } else {
        part
    }
}

/// Whether a region is a leaf of the quadtree
pub fn is_atomic<T>(region: &ArrayView2<'_, T>) -> bool {
    let (rows, cols) = region.dim();
    rows / 2 == 0 && cols / 2 == 0
}
