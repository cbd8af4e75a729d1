//! Tests for PNG import and export of bit rasters

#[cfg(test)]
mod tests {
    use image::{GrayImage, Luma};
    use ndarray::array;
    use quadfa::QuadfaError;
    use quadfa::io::configuration::{PIXEL_OFF_LUMA, PIXEL_ON_LUMA};
    use quadfa::io::image::{
        bit_image_from_luma, export_bit_image, load_bit_image, luma_from_bit_image,
    };

    // Tests thresholding of grey levels
    // Verified by treating any non-zero luma as on
    #[test]
    fn test_bit_image_from_luma_threshold() {
        let mut luma = GrayImage::new(3, 1);
        luma.put_pixel(0, 0, Luma([0]));
        luma.put_pixel(1, 0, Luma([127]));
        luma.put_pixel(2, 0, Luma([128]));

        assert_eq!(bit_image_from_luma(&luma), array![[0_u8, 0, 1]]);
    }

    // Tests that rows map to image y and columns to image x
    // Verified by transposing the raster
    #[test]
    fn test_luma_orientation() {
        let raster = array![[1_u8, 0, 0], [0, 0, 0]];
        let luma = luma_from_bit_image(&raster).expect("small raster");

        assert_eq!((luma.width(), luma.height()), (3, 2));
        assert_eq!(luma.get_pixel(0, 0).0, [PIXEL_ON_LUMA]);
        assert_eq!(luma.get_pixel(2, 0).0, [PIXEL_OFF_LUMA]);
        assert_eq!(luma.get_pixel(0, 1).0, [PIXEL_OFF_LUMA]);
    }

    // Tests saving and reloading a raster through a PNG file
    // Verified by disabling file save operation
    #[test]
    fn test_export_then_load() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("nested").join("raster.png");
        let raster = array![[1_u8, 0, 1, 1], [0, 0, 1, 0], [1, 1, 1, 1], [0, 1, 0, 0]];

        export_bit_image(&raster, &path).expect("export succeeds");
        assert!(path.exists(), "PNG file should be created");

        let loaded = load_bit_image(&path).expect("load succeeds");
        assert_eq!(loaded, raster);
    }

    // Tests loading a missing file reports its path
    // Verified by returning an empty raster on failure
    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("absent.png");

        match load_bit_image(&path) {
            Err(QuadfaError::ImageLoad { path: reported, .. }) => assert_eq!(reported, path),
            _ => unreachable!("Expected ImageLoad error type"),
        }
    }
}
