//! PNG import and export of bit rasters

use crate::io::configuration::{PIXEL_OFF_LUMA, PIXEL_ON_LUMA, PIXEL_ON_THRESHOLD};
use crate::io::error::{QuadfaError, Result};
use crate::quadtree::raster::BitImage;
use image::{GrayImage, Luma};
use std::path::Path;

/// Load an image file as a bit raster
///
/// The image is converted to 8-bit luma; pixels at or above
/// `PIXEL_ON_THRESHOLD` become 1, the rest 0.
///
/// # Errors
///
/// Returns `ImageLoad` if the file cannot be opened or decoded
pub fn load_bit_image<P: AsRef<Path>>(path: P) -> Result<BitImage> {
    let path_buf = path.as_ref().to_path_buf();
    let luma = image::open(&path_buf)
        .map_err(|e| QuadfaError::ImageLoad {
            path: path_buf,
            source: e,
        })?
        .to_luma8();

    Ok(bit_image_from_luma(&luma))
}

/// Threshold a luma image into a bit raster
pub fn bit_image_from_luma(luma: &GrayImage) -> BitImage {
    let (width, height) = (luma.width() as usize, luma.height() as usize);
    let mut raster = BitImage::zeros((height, width));

    for (x, y, pixel) in luma.enumerate_pixels() {
        if let Some(cell) = raster.get_mut((y as usize, x as usize)) {
            *cell = u8::from(pixel.0[0] >= PIXEL_ON_THRESHOLD);
        }
    }

    raster
}

/// Convert a bit raster into a black and white luma image
///
/// # Errors
///
/// Returns `InvalidSourceData` if the raster is too large for an image
pub fn luma_from_bit_image(raster: &BitImage) -> Result<GrayImage> {
    let (height, width) = raster.dim();
    let side = |value: usize, axis: &str| {
        u32::try_from(value).map_err(|e| QuadfaError::InvalidSourceData {
            reason: format!("raster {axis} {value} does not fit an image: {e}"),
        })
    };
    let width = side(width, "width")?;
    let height = side(height, "height")?;

    Ok(GrayImage::from_fn(width, height, |x, y| {
        let on = raster
            .get((y as usize, x as usize))
            .is_some_and(|&cell| cell != 0);
        Luma([if on { PIXEL_ON_LUMA } else { PIXEL_OFF_LUMA }])
    }))
}

/// Export a bit raster as a PNG file
///
/// # Errors
///
/// Returns an error if:
/// - The raster is too large for an image
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_bit_image<P: AsRef<Path>>(raster: &BitImage, output_path: P) -> Result<()> {
    let output_path = output_path.as_ref();
    let img = luma_from_bit_image(raster)?;

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| QuadfaError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    img.save(output_path)
        .map_err(|e| QuadfaError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    Ok(())
}
