//! Raster image model shared by every operation.
//!
//! A [`RasterImage`] is always one of four layouts: RGB or RGBA, with 8-bit or
//! 16-bit channels. Decoded images in any other layout (grayscale, float) are
//! normalized on construction so operations only ever see these four.

use image::{ColorType, DynamicImage, ImageBuffer, Rgb, Rgba};
use serde::{Deserialize, Serialize};

use crate::color::Color;

/// Channel layout and depth of a raster image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PixelMode {
    /// 3 channels, 8 bits each.
    Rgb8,
    /// 4 channels, 8 bits each.
    Rgba8,
    /// 3 channels, 16 bits each.
    Rgb16,
    /// 4 channels, 16 bits each.
    Rgba16,
}

impl PixelMode {
    /// Number of channels per pixel (3 or 4).
    pub fn channels(self) -> usize {
        match self {
            PixelMode::Rgb8 | PixelMode::Rgb16 => 3,
            PixelMode::Rgba8 | PixelMode::Rgba16 => 4,
        }
    }

    pub fn has_alpha(self) -> bool {
        self.channels() == 4
    }

    /// Bits per channel (8 or 16).
    pub fn bit_depth(self) -> u8 {
        match self {
            PixelMode::Rgb8 | PixelMode::Rgba8 => 8,
            PixelMode::Rgb16 | PixelMode::Rgba16 => 16,
        }
    }

    /// Largest value a single channel can hold.
    pub fn max_value(self) -> u32 {
        match self.bit_depth() {
            8 => u8::MAX as u32,
            _ => u16::MAX as u32,
        }
    }

    fn from_color_type(color: ColorType) -> Option<Self> {
        match color {
            ColorType::Rgb8 => Some(PixelMode::Rgb8),
            ColorType::Rgba8 => Some(PixelMode::Rgba8),
            ColorType::Rgb16 => Some(PixelMode::Rgb16),
            ColorType::Rgba16 => Some(PixelMode::Rgba16),
            _ => None,
        }
    }
}

/// Numeric channel type the pixel loops are generic over.
pub(crate) trait Channel: Copy {
    const MAX: f64;

    fn to_f64(self) -> f64;

    /// Convert back, saturating at the channel range. Fractions are truncated.
    fn from_f64(value: f64) -> Self;
}

impl Channel for u8 {
    const MAX: f64 = u8::MAX as f64;

    #[inline]
    fn to_f64(self) -> f64 {
        self as f64
    }

    #[inline]
    fn from_f64(value: f64) -> Self {
        value as u8
    }
}

impl Channel for u16 {
    const MAX: f64 = u16::MAX as f64;

    #[inline]
    fn to_f64(self) -> f64 {
        self as f64
    }

    #[inline]
    fn from_f64(value: f64) -> Self {
        value as u16
    }
}

/// Callback over the flat, row-major sample buffer of an image.
///
/// `channels` is 3 or 4; when it is 4 the last sample of every pixel is alpha.
pub(crate) trait SampleVisitor {
    fn visit<C: Channel>(&mut self, samples: &mut [C], channels: usize);
}

/// A decoded raster image: RGB or RGBA, 8 or 16 bits per channel.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterImage {
    inner: DynamicImage,
}

impl RasterImage {
    /// Wrap a decoded image, converting unsupported layouts.
    ///
    /// Grayscale becomes RGB, grayscale with alpha becomes RGBA, and float
    /// images become 16-bit.
    pub fn from_dynamic(image: DynamicImage) -> Self {
        let color = image.color();
        if PixelMode::from_color_type(color).is_some() {
            return Self { inner: image };
        }

        let deep = color.bytes_per_pixel() / color.channel_count() > 1;
        let inner = match (color.has_alpha(), deep) {
            (false, false) => DynamicImage::ImageRgb8(image.to_rgb8()),
            (true, false) => DynamicImage::ImageRgba8(image.to_rgba8()),
            (false, true) => DynamicImage::ImageRgb16(image.to_rgb16()),
            (true, true) => DynamicImage::ImageRgba16(image.to_rgba16()),
        };
        Self { inner }
    }

    /// Create an image with every sample set to zero (black, or transparent
    /// black when the mode has alpha).
    pub fn new(width: u32, height: u32, mode: PixelMode) -> Self {
        let inner = match mode {
            PixelMode::Rgb8 => DynamicImage::ImageRgb8(ImageBuffer::new(width, height)),
            PixelMode::Rgba8 => DynamicImage::ImageRgba8(ImageBuffer::new(width, height)),
            PixelMode::Rgb16 => DynamicImage::ImageRgb16(ImageBuffer::new(width, height)),
            PixelMode::Rgba16 => DynamicImage::ImageRgba16(ImageBuffer::new(width, height)),
        };
        Self { inner }
    }

    /// Create an image filled with a single color.
    pub fn solid(width: u32, height: u32, color: Color, mode: PixelMode) -> Self {
        let inner = match mode {
            PixelMode::Rgb8 => DynamicImage::ImageRgb8(ImageBuffer::from_pixel(
                width,
                height,
                Rgb(color.rgb8()),
            )),
            PixelMode::Rgba8 => DynamicImage::ImageRgba8(ImageBuffer::from_pixel(
                width,
                height,
                Rgba(color.rgba8()),
            )),
            PixelMode::Rgb16 => DynamicImage::ImageRgb16(ImageBuffer::from_pixel(
                width,
                height,
                Rgb(color.rgb16()),
            )),
            PixelMode::Rgba16 => DynamicImage::ImageRgba16(ImageBuffer::from_pixel(
                width,
                height,
                Rgba(color.rgba16()),
            )),
        };
        Self { inner }
    }

    pub fn width(&self) -> u32 {
        self.inner.width()
    }

    pub fn height(&self) -> u32 {
        self.inner.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.inner.width(), self.inner.height())
    }

    pub fn mode(&self) -> PixelMode {
        // Construction guarantees one of the four supported layouts.
        PixelMode::from_color_type(self.inner.color()).unwrap_or(PixelMode::Rgb8)
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> u64 {
        self.width() as u64 * self.height() as u64
    }

    /// True when either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Borrow the underlying `DynamicImage`.
    pub fn as_dynamic(&self) -> &DynamicImage {
        &self.inner
    }

    /// Consume the image and return the underlying `DynamicImage`.
    pub fn into_dynamic(self) -> DynamicImage {
        self.inner
    }

    /// Raw samples widened to `u16`, row-major. Mostly useful for inspection.
    pub fn samples(&self) -> Vec<u16> {
        match &self.inner {
            DynamicImage::ImageRgb8(buf) => buf.iter().map(|&s| s as u16).collect(),
            DynamicImage::ImageRgba8(buf) => buf.iter().map(|&s| s as u16).collect(),
            DynamicImage::ImageRgb16(buf) => buf.to_vec(),
            DynamicImage::ImageRgba16(buf) => buf.to_vec(),
            other => other.to_rgb16().into_raw(),
        }
    }

    /// Channel values of the pixel at `(x, y)`, or `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Vec<u16>> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let pixel = match &self.inner {
            DynamicImage::ImageRgb8(buf) => buf.get_pixel(x, y).0.map(u16::from).to_vec(),
            DynamicImage::ImageRgba8(buf) => buf.get_pixel(x, y).0.map(u16::from).to_vec(),
            DynamicImage::ImageRgb16(buf) => buf.get_pixel(x, y).0.to_vec(),
            DynamicImage::ImageRgba16(buf) => buf.get_pixel(x, y).0.to_vec(),
            other => other.to_rgb16().get_pixel(x, y).0.to_vec(),
        };
        Some(pixel)
    }

    /// Run `visitor` over the mutable sample buffer.
    pub(crate) fn visit_samples_mut<V: SampleVisitor>(&mut self, visitor: &mut V) {
        match &mut self.inner {
            DynamicImage::ImageRgb8(buf) => visitor.visit::<u8>(&mut **buf, 3),
            DynamicImage::ImageRgba8(buf) => visitor.visit::<u8>(&mut **buf, 4),
            DynamicImage::ImageRgb16(buf) => visitor.visit::<u16>(&mut **buf, 3),
            DynamicImage::ImageRgba16(buf) => visitor.visit::<u16>(&mut **buf, 4),
            _ => debug_assert!(false, "RasterImage holds an unsupported layout"),
        }
    }
}

impl From<DynamicImage> for RasterImage {
    fn from(image: DynamicImage) -> Self {
        Self::from_dynamic(image)
    }
}

impl From<RasterImage> for DynamicImage {
    fn from(image: RasterImage) -> Self {
        image.inner
    }
}
