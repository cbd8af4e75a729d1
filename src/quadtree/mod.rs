//! Quadtree decomposition of rasters
//!
//! This module contains the spatial side of the codec:
//! - Splitting regions into quadrants
//! - Converting between rasters and pixel addresses
//! - Recognizing structurally equal regions

/// Pixel addresses and the raster/address conversions
pub mod address;
/// Structural-equality cache of already seen regions
pub mod cache;
/// Region splitting into four quadrants
pub mod partition;
/// Bit raster types and helpers
pub mod raster;

pub use address::Address;
pub use raster::BitImage;
