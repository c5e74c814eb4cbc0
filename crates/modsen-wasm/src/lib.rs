//! Modsen WASM - WebAssembly bindings for the Modsen image editor
//!
//! Exposes the modsen-core engine to a browser shell.
//!
//! # Module Structure
//!
//! - `session` - Stateful editor session with undo history
//! - `types` - WASM-compatible image wrapper
//! - `transform` - Scale, rotate, crop, random crop, reflect
//! - `adjustments` - Brightness, contrast, noise
//! - `decode` / `encode` - JPEG and PNG bytes in and out
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsEditorSession, set_log_level } from '@modsen/wasm';
//!
//! await init();
//! set_log_level('debug');
//!
//! const session = new JsEditorSession(undefined);
//! session.load_bytes(new Uint8Array(await file.arrayBuffer()));
//! session.apply_form('scale', { factor: '0.5' });
//! ```

use wasm_bindgen::prelude::*;

mod adjustments;
mod decode;
mod encode;
mod logger;
mod session;
mod transform;
mod types;

pub use adjustments::{add_noise, adjust_brightness, adjust_contrast};
pub use decode::{decode_image, get_orientation};
pub use encode::{encode_jpeg, encode_png, mime_type_for_extension};
pub use session::JsEditorSession;
pub use transform::{crop, random_crop, reflect, rotate, scale};
pub use types::JsRasterImage;

/// Initialize the WASM module (called automatically on load).
///
/// Routes `log` output to the browser console at `info` level.
#[wasm_bindgen(start)]
pub fn init() {
    logger::install(log::LevelFilter::Info);
}

/// Change the console log level: `"off"`, `"error"`, `"warn"`, `"info"`,
/// `"debug"` or `"trace"`. Unknown names select `"info"`.
#[wasm_bindgen]
pub fn set_log_level(level: &str) {
    logger::install(logger::parse_level(level));
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
