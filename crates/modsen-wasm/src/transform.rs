//! WASM bindings for the geometric operations.

use crate::types::JsRasterImage;
use modsen_core::transform::{self, FilterType, InterpolationFilter, ReflectAxis};
use rand::rngs::StdRng;
use rand::SeedableRng;
use wasm_bindgen::prelude::*;

/// Scale both dimensions by `factor` (bicubic).
///
/// ```typescript
/// const half = scale(image, 0.5);
/// ```
#[wasm_bindgen]
pub fn scale(image: &JsRasterImage, factor: f64) -> Result<JsRasterImage, JsValue> {
    transform::scale(image.raster(), factor, FilterType::Bicubic)
        .map(JsRasterImage::from)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Rotate counter-clockwise about the center, keeping the canvas size.
/// Uncovered corners are filled with black (transparent for RGBA).
#[wasm_bindgen]
pub fn rotate(image: &JsRasterImage, angle_degrees: f64, smooth: bool) -> JsRasterImage {
    let filter = if smooth {
        InterpolationFilter::Bilinear
    } else {
        InterpolationFilter::Nearest
    };
    transform::rotate(image.raster(), angle_degrees, filter).into()
}

/// Cut out the `width` x `height` rectangle at `(x, y)`. Errors if the
/// rectangle leaves the image.
#[wasm_bindgen]
pub fn crop(
    image: &JsRasterImage,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
) -> Result<JsRasterImage, JsValue> {
    transform::crop(image.raster(), x, y, width, height)
        .map(JsRasterImage::from)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Crop a `width` x `height` rectangle at a random position. Returns an
/// unchanged copy when the rectangle is larger than the image.
#[wasm_bindgen]
pub fn random_crop(image: &JsRasterImage, width: u32, height: u32) -> JsRasterImage {
    let mut rng = StdRng::from_os_rng();
    transform::random_crop(image.raster(), width, height, &mut rng).into()
}

/// Mirror (`"horizontal"`) or flip (`"vertical"`). Any other axis returns an
/// unchanged copy.
#[wasm_bindgen]
pub fn reflect(image: &JsRasterImage, axis: &str) -> JsRasterImage {
    match ReflectAxis::from_name(axis) {
        Some(axis) => transform::reflect(image.raster(), axis).into(),
        None => image.raster().clone().into(),
    }
}
