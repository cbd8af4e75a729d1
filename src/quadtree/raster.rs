//! Bit rasters and their coordinate companions

use crate::io::error::{QuadfaError, Result};
use ndarray::{Array2, ArrayView2};

/// Binary raster indexed `[row, col]`, each cell 0 or 1
pub type BitImage = Array2<u8>;

/// Matrix whose cells hold their own `(row, col)` coordinates
pub type IndexImage = Array2<(usize, usize)>;

/// Build a bit image from row-major rows
///
/// # Errors
///
/// Returns `InvalidSourceData` if rows differ in length or a cell is
/// neither 0 nor 1
pub fn bit_image_from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<BitImage> {
    let height = rows.len();
    let width = rows.first().map_or(0, |row| row.as_ref().len());

    let mut cells = Vec::with_capacity(height * width);
    for (index, row) in rows.iter().enumerate() {
        let row = row.as_ref();
        if row.len() != width {
            return Err(QuadfaError::InvalidSourceData {
                reason: format!(
                    "row {index} has {} cells, expected {width}",
                    row.len()
                ),
            });
        }
        if let Some(bad) = row.iter().find(|&&cell| cell > 1) {
            return Err(QuadfaError::InvalidSourceData {
                reason: format!("row {index} holds {bad}, cells must be 0 or 1"),
            });
        }
        cells.extend_from_slice(row);
    }

    Array2::from_shape_vec((height, width), cells).map_err(|e| QuadfaError::InvalidSourceData {
        reason: e.to_string(),
    })
}

/// Square coordinate matrix of the given side length
pub fn index_image(resolution: usize) -> IndexImage {
    Array2::from_shape_fn((resolution, resolution), |(row, col)| (row, col))
}

/// Quadtree depth of a square raster whose side is a power of two
///
/// Returns `None` for non-square rasters, empty rasters and sides that are
/// not a power of two.
pub fn power_of_two_side<T>(image: &ArrayView2<'_, T>) -> Option<u32> {
    let (rows, cols) = image.dim();
    (rows == cols && rows.is_power_of_two()).then_some(rows.trailing_zeros())
}
