//! Uniform scaling by a factor.
//!
//! Output dimensions are `round(width * factor)` by `round(height * factor)`,
//! resampled with the `image` crate's filters. Pixel mode is preserved.

use serde::{Deserialize, Serialize};

use crate::error::OpError;
use crate::raster::{PixelMode, RasterImage};

/// Filter type for scaling operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterType {
    /// Nearest neighbor interpolation (fastest, lowest quality).
    Nearest,
    /// Bilinear interpolation.
    Bilinear,
    /// Bicubic (Catmull-Rom) interpolation.
    #[default]
    Bicubic,
    /// Lanczos3 interpolation (slower, highest quality).
    Lanczos3,
}

impl FilterType {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            FilterType::Nearest => image::imageops::FilterType::Nearest,
            FilterType::Bilinear => image::imageops::FilterType::Triangle,
            FilterType::Bicubic => image::imageops::FilterType::CatmullRom,
            FilterType::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// Dimensions of `width x height` scaled by `factor`, rounded to the nearest
/// pixel. Sizes are not truncated to `u32`.
pub fn scaled_dimensions(width: u32, height: u32, factor: f64) -> (f64, f64) {
    (
        (f64::from(width) * factor).round(),
        (f64::from(height) * factor).round(),
    )
}

/// Check a target size against `u32` and the `image` crate's default
/// allocation limit for the given pixel mode.
fn checked_dimensions(width: f64, height: f64, mode: PixelMode) -> Result<(u32, u32), OpError> {
    let limit = image::Limits::default().max_alloc.unwrap_or(u64::MAX);
    let bytes_per_pixel = (mode.channels() * usize::from(mode.bit_depth() / 8)) as f64;
    let too_large = || OpError::TooLarge {
        width: width as u64,
        height: height as u64,
        limit,
    };

    if width > f64::from(u32::MAX) || height > f64::from(u32::MAX) {
        return Err(too_large());
    }
    if width * height * bytes_per_pixel > limit as f64 {
        return Err(too_large());
    }
    Ok((width as u32, height as u32))
}

/// Scale an image by `factor`.
///
/// # Errors
///
/// Returns `OpError::InvalidParameter` if `factor` is not a finite number
/// greater than zero, and `OpError::TooLarge` if the result would exceed the
/// `image` crate's default allocation limit.
///
/// # Behavior
///
/// - `factor == 1.0` (or any factor that rounds back to the same size)
///   returns a copy of the input
/// - A rounded dimension of zero yields an empty image of the same mode
pub fn scale(
    image: &RasterImage,
    factor: f64,
    filter: FilterType,
) -> Result<RasterImage, OpError> {
    if !factor.is_finite() || factor <= 0.0 {
        return Err(OpError::invalid(
            "factor",
            format!("scale factor must be a finite number greater than zero, got {factor}"),
        ));
    }

    let (width, height) = scaled_dimensions(image.width(), image.height(), factor);
    let (width, height) = checked_dimensions(width, height, image.mode())?;

    // Fast path: if dimensions match, just clone
    if (width, height) == image.dimensions() {
        return Ok(image.clone());
    }

    if width == 0 || height == 0 || image.is_empty() {
        return Ok(RasterImage::new(width, height, image.mode()));
    }

    let resized = image
        .as_dynamic()
        .resize_exact(width, height, filter.to_image_filter());

    Ok(RasterImage::from_dynamic(resized))
}
