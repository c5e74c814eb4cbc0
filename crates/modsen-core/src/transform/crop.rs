//! Image cropping operations.
//!
//! Crop coordinates are in pixels with the origin at the top-left corner.
//! The region `[x, x + width) x [y, y + height)` must lie inside the image;
//! nothing is clamped.

use rand::Rng;

use crate::error::OpError;
use crate::raster::RasterImage;

/// Crop a rectangular region from the image.
///
/// # Errors
///
/// Returns `OpError::OutOfBounds` if the region extends past the right or
/// bottom edge of the image.
///
/// # Behavior
///
/// - Full crop (0, 0, width, height) returns a copy of the original image
/// - Zero-sized regions are allowed and produce an empty image
pub fn crop(
    image: &RasterImage,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
) -> Result<RasterImage, OpError> {
    let fits = |start: u32, len: u32, limit: u32| {
        start.checked_add(len).is_some_and(|end| end <= limit)
    };

    if !fits(x, width, image.width()) || !fits(y, height, image.height()) {
        return Err(OpError::OutOfBounds {
            x,
            y,
            width,
            height,
            image_width: image.width(),
            image_height: image.height(),
        });
    }

    Ok(crop_region(image, x, y, width, height))
}

/// Crop a randomly placed `width x height` region.
///
/// If the requested region is larger than the image in either dimension the
/// image is returned unchanged. Otherwise the top-left corner is drawn
/// uniformly from `[0, image_width - width) x [0, image_height - height)`;
/// an empty range (region as wide or tall as the image) pins that coordinate
/// to zero.
pub fn random_crop<R: Rng + ?Sized>(
    image: &RasterImage,
    width: u32,
    height: u32,
    rng: &mut R,
) -> RasterImage {
    if width > image.width() || height > image.height() {
        return image.clone();
    }

    let x = random_offset(image.width() - width, rng);
    let y = random_offset(image.height() - height, rng);

    crop_region(image, x, y, width, height)
}

fn random_offset<R: Rng + ?Sized>(slack: u32, rng: &mut R) -> u32 {
    if slack == 0 {
        0
    } else {
        rng.random_range(0..slack)
    }
}

/// Copy out a region already known to be in bounds.
fn crop_region(image: &RasterImage, x: u32, y: u32, width: u32, height: u32) -> RasterImage {
    // Fast path: full crop returns a clone
    if x == 0 && y == 0 && (width, height) == image.dimensions() {
        return image.clone();
    }

    RasterImage::from_dynamic(image.as_dynamic().crop_imm(x, y, width, height))
}
