//! Image encoding WASM bindings.
//!
//! The browser has no filesystem, so "save" means encoding to bytes and
//! handing them to a download or the File System Access API.
//!
//! ```typescript
//! const jpeg = encode_jpeg(image, 75);
//! const blob = new Blob([jpeg], { type: 'image/jpeg' });
//! ```

use crate::types::JsRasterImage;
use modsen_core::encode::{self, OutputFormat};
use wasm_bindgen::prelude::*;

/// Encode as JPEG. Alpha is dropped and 16-bit samples scaled to 8 bits.
/// `quality` is clamped to 1-100.
#[wasm_bindgen]
pub fn encode_jpeg(image: &JsRasterImage, quality: u8) -> Result<Vec<u8>, JsValue> {
    encode::encode_jpeg(image.raster(), quality).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Encode as PNG, keeping alpha and bit depth.
#[wasm_bindgen]
pub fn encode_png(image: &JsRasterImage) -> Result<Vec<u8>, JsValue> {
    encode::encode_image(image.raster(), OutputFormat::Png, 0)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// MIME type for a file extension such as `"jpg"` or `"png"`; `undefined`
/// when the extension is not supported.
#[wasm_bindgen]
pub fn mime_type_for_extension(extension: &str) -> Option<String> {
    OutputFormat::from_extension(extension).map(|f| f.mime_type().to_string())
}
