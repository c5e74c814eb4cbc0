//! WASM bindings for brightness, contrast and noise.

use crate::types::JsRasterImage;
use modsen_core::{adjustments, noise};
use rand::rngs::StdRng;
use rand::SeedableRng;
use wasm_bindgen::prelude::*;

/// Multiply every color channel by `factor` (1.0 = unchanged, 0.0 = black).
#[wasm_bindgen]
pub fn adjust_brightness(image: &JsRasterImage, factor: f64) -> Result<JsRasterImage, JsValue> {
    adjustments::adjust_brightness(image.raster(), factor)
        .map(JsRasterImage::from)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Stretch color channels around the mean gray (1.0 = unchanged, 0.0 = flat
/// gray).
#[wasm_bindgen]
pub fn adjust_contrast(image: &JsRasterImage, level: f64) -> Result<JsRasterImage, JsValue> {
    adjustments::adjust_contrast(image.raster(), level)
        .map(JsRasterImage::from)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Add uniform noise to every sample. Pass a `seed` for repeatable output.
///
/// ```typescript
/// const grainy = add_noise(image, 0.2, undefined);
/// const repeatable = add_noise(image, 0.2, 42n);
/// ```
#[wasm_bindgen]
pub fn add_noise(
    image: &JsRasterImage,
    intensity: f64,
    seed: Option<u64>,
) -> Result<JsRasterImage, JsValue> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    noise::add_noise(image.raster(), intensity, &mut rng)
        .map(JsRasterImage::from)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
