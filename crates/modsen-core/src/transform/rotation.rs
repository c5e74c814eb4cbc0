//! Rotation about the image center on a fixed canvas.
//!
//! The output canvas always has the input's dimensions: corners that rotate
//! out of frame are clipped and newly exposed regions are filled with zero
//! (black for RGB, transparent black for RGBA).
//!
//! Angles are in degrees, positive = counter-clockwise. General angles go
//! through `imageproc`'s inverse-mapping rotation, which takes a clockwise
//! angle in radians, so the angle is negated on the way in.

use image::{DynamicImage, Rgb, Rgba};
use imageproc::geometric_transformations::{rotate_about_center, Interpolation};
use serde::{Deserialize, Serialize};

use crate::raster::RasterImage;

/// Angles closer than this to a right-angle multiple take the exact path.
const RIGHT_ANGLE_EPSILON: f64 = 1e-3;

/// Interpolation filter for rotation operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterpolationFilter {
    /// Nearest neighbor sampling, no new colors introduced.
    #[default]
    Nearest,
    /// Bilinear interpolation.
    Bilinear,
    /// Bicubic interpolation.
    Bicubic,
}

impl InterpolationFilter {
    fn to_imageproc(self) -> Interpolation {
        match self {
            InterpolationFilter::Nearest => Interpolation::Nearest,
            InterpolationFilter::Bilinear => Interpolation::Bilinear,
            InterpolationFilter::Bicubic => Interpolation::Bicubic,
        }
    }
}

/// Rotate an image counter-clockwise by `angle_degrees` about its center.
///
/// # Behavior
///
/// - Output dimensions always equal the input dimensions
/// - Multiples of 360 degrees return a copy of the input
/// - 180 degrees, and 90/270 degrees on square images, are exact transposes
/// - Any other angle is resampled with `filter`
pub fn rotate(image: &RasterImage, angle_degrees: f64, filter: InterpolationFilter) -> RasterImage {
    let normalized = angle_degrees.rem_euclid(360.0);
    let near = |target: f64| (normalized - target).abs() < RIGHT_ANGLE_EPSILON;

    if near(0.0) || near(360.0) || image.is_empty() {
        return image.clone();
    }

    let src = image.as_dynamic();
    let square = image.width() == image.height();

    // image's rotate90 is clockwise, so a counter-clockwise quarter turn is rotate270.
    if near(180.0) {
        return RasterImage::from_dynamic(src.rotate180());
    }
    if square && near(90.0) {
        return RasterImage::from_dynamic(src.rotate270());
    }
    if square && near(270.0) {
        return RasterImage::from_dynamic(src.rotate90());
    }

    let theta = -(angle_degrees.to_radians()) as f32;
    let interpolation = filter.to_imageproc();

    let rotated = match src {
        DynamicImage::ImageRgb8(buf) => DynamicImage::ImageRgb8(rotate_about_center(
            buf,
            theta,
            interpolation,
            Rgb([0u8; 3]),
        )),
        DynamicImage::ImageRgba8(buf) => DynamicImage::ImageRgba8(rotate_about_center(
            buf,
            theta,
            interpolation,
            Rgba([0u8; 4]),
        )),
        DynamicImage::ImageRgb16(buf) => DynamicImage::ImageRgb16(rotate_about_center(
            buf,
            theta,
            interpolation,
            Rgb([0u16; 3]),
        )),
        DynamicImage::ImageRgba16(buf) => DynamicImage::ImageRgba16(rotate_about_center(
            buf,
            theta,
            interpolation,
            Rgba([0u16; 4]),
        )),
        other => DynamicImage::ImageRgb8(rotate_about_center(
            &other.to_rgb8(),
            theta,
            interpolation,
            Rgb([0u8; 3]),
        )),
    };

    RasterImage::from_dynamic(rotated)
}
