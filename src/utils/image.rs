//! Image decoding and conversion helpers.

use crate::core::ClassifierError;
use image::{DynamicImage, ImageError, RgbImage};
use std::path::Path;

/// Converts a DynamicImage to an RgbImage.
///
/// Alpha is dropped and grayscale is expanded to three channels.
pub fn dynamic_to_rgb(img: DynamicImage) -> RgbImage {
    img.to_rgb8()
}

/// Decodes an encoded image (PNG, JPEG, BMP, ...) from memory into RGB.
///
/// # Errors
///
/// Returns `ClassifierError::Decode` if the format is unknown or the data is corrupt.
pub fn decode_image(bytes: &[u8]) -> Result<RgbImage, ClassifierError> {
    let img = image::load_from_memory(bytes).map_err(ClassifierError::Decode)?;
    Ok(dynamic_to_rgb(img))
}

/// Loads an image file and converts it to RGB.
///
/// # Errors
///
/// Returns `ClassifierError::Decode` both when the file cannot be read and
/// when its content is not a decodable image.
pub fn load_image(path: &Path) -> Result<RgbImage, ClassifierError> {
    let bytes = std::fs::read(path).map_err(|e| ClassifierError::Decode(ImageError::IoError(e)))?;
    decode_image(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb, Rgba, RgbaImage};
    use std::io::Cursor;

    fn encode_png(img: DynamicImage) -> Vec<u8> {
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_decode_image_png() {
        let png = encode_png(DynamicImage::ImageRgb8(RgbImage::from_pixel(
            3,
            2,
            Rgb([10, 20, 30]),
        )));
        let img = decode_image(&png).unwrap();
        assert_eq!(img.dimensions(), (3, 2));
        assert_eq!(img.get_pixel(2, 1), &Rgb([10, 20, 30]));
    }

    #[test]
    fn test_decode_image_drops_alpha() {
        let png = encode_png(DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            1,
            1,
            Rgba([1, 2, 3, 128]),
        )));
        let img = decode_image(&png).unwrap();
        assert_eq!(img.get_pixel(0, 0), &Rgb([1, 2, 3]));
    }

    #[test]
    fn test_decode_image_garbage() {
        let err = decode_image(b"definitely not an image").unwrap_err();
        assert!(matches!(err, ClassifierError::Decode(_)));
    }

    #[test]
    fn test_load_image_missing_file_is_decode_error() {
        let err = load_image(Path::new("/nonexistent/cat.jpg")).unwrap_err();
        assert!(matches!(err, ClassifierError::Decode(ImageError::IoError(_))));
    }
}
