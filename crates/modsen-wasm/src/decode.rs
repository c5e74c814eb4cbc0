//! Image decoding WASM bindings.
//!
//! ```typescript
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_image(bytes, false);
//! console.log(`Decoded ${image.width}x${image.height}`);
//! ```

use crate::types::JsRasterImage;
use modsen_core::decode;
use wasm_bindgen::prelude::*;

/// Decode a JPEG or PNG; the format is detected from the bytes.
///
/// With `apply_orientation`, the EXIF orientation tag is applied so the
/// image comes out upright.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8], apply_orientation: bool) -> Result<JsRasterImage, JsValue> {
    decode::decode_bytes(bytes, apply_orientation)
        .map(JsRasterImage::from)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// EXIF orientation value (1-8) of an encoded image; 1 when absent.
#[wasm_bindgen]
pub fn get_orientation(bytes: &[u8]) -> u8 {
    decode::get_orientation(bytes) as u8
}
