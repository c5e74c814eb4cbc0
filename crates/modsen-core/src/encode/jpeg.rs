//! JPEG encoding.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder};

use super::EncodeError;
use crate::raster::RasterImage;

/// Quality used when none is configured.
pub const DEFAULT_JPEG_QUALITY: u8 = 75;

/// Encode an image as JPEG.
///
/// The image is converted to 8-bit RGB first: alpha is discarded and 16-bit
/// samples are scaled down. `quality` is clamped to `1..=100`.
///
/// # Errors
///
/// `EncodeError::InvalidDimensions` for an empty image,
/// `EncodeError::EncodingFailed` if the encoder rejects the data.
pub fn encode_jpeg(image: &RasterImage, quality: u8) -> Result<Vec<u8>, EncodeError> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let rgb = image.as_dynamic().to_rgb8();
    let quality = quality.clamp(1, 100);

    let mut buffer = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut buffer, quality)
        .write_image(rgb.as_raw(), width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::raster::PixelMode;
    use image::{DynamicImage, Rgb};

    fn gradient(width: u32, height: u32) -> RasterImage {
        let buf = image::RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x * 255 / width) as u8, (y * 255 / height) as u8, 128])
        });
        RasterImage::from_dynamic(DynamicImage::ImageRgb8(buf))
    }

    fn has_jpeg_markers(bytes: &[u8]) -> bool {
        bytes.len() >= 4 && bytes[..2] == [0xFF, 0xD8] && bytes[bytes.len() - 2..] == [0xFF, 0xD9]
    }

    #[test]
    fn test_encode_jpeg_basic() {
        let jpeg = encode_jpeg(&gradient(100, 100), 90).unwrap();
        assert!(has_jpeg_markers(&jpeg));
    }

    #[test]
    fn test_encode_rgba_as_rgb() {
        let img = RasterImage::solid(100, 100, Color::rgba(255, 0, 0, 128), PixelMode::Rgba8);
        let jpeg = encode_jpeg(&img, DEFAULT_JPEG_QUALITY).unwrap();

        let decoded = image::load_from_memory(&jpeg).unwrap();
        assert_eq!(decoded.color(), image::ColorType::Rgb8);
        assert_eq!((decoded.width(), decoded.height()), (100, 100));
        // Alpha dropped, not blended toward white or black.
        let px = decoded.to_rgb8().get_pixel(50, 50).0;
        assert!(px[0] > 240 && px[1] < 16 && px[2] < 16, "{px:?}");
    }

    #[test]
    fn test_encode_16_bit_downconverts() {
        let img = RasterImage::solid(8, 8, Color::rgb(0, 0, 255), PixelMode::Rgb16);
        let jpeg = encode_jpeg(&img, 95).unwrap();
        let decoded = image::load_from_memory(&jpeg).unwrap();
        assert_eq!(decoded.color(), image::ColorType::Rgb8);
    }

    #[test]
    fn test_encode_jpeg_quality_affects_size() {
        let img = gradient(64, 64);
        let low = encode_jpeg(&img, 10).unwrap();
        let high = encode_jpeg(&img, 100).unwrap();
        assert!(high.len() > low.len());
    }

    #[test]
    fn test_encode_jpeg_quality_clamping() {
        let img = gradient(10, 10);
        assert!(encode_jpeg(&img, 0).is_ok());
        assert!(encode_jpeg(&img, 255).is_ok());
    }

    #[test]
    fn test_encode_jpeg_empty_image() {
        for (w, h) in [(0, 10), (10, 0)] {
            let img = RasterImage::new(w, h, PixelMode::Rgb8);
            assert!(matches!(
                encode_jpeg(&img, 90),
                Err(EncodeError::InvalidDimensions { .. })
            ));
        }
    }
}
