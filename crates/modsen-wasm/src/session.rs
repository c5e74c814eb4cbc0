//! Editor session bindings.
//!
//! The session keeps the current image and its undo history in WASM memory;
//! JavaScript only sends operations and pulls pixels or encoded bytes back.
//!
//! ```typescript
//! const session = new JsEditorSession({ jpeg_quality: 90 });
//! session.load_bytes(new Uint8Array(await file.arrayBuffer()));
//! session.apply({ op: 'rotate', angle: 45 });
//! session.apply_form('brightness', { factor: '1.2' });
//! const jpeg = session.export('jpg');
//! ```

use std::collections::BTreeMap;

use crate::types::JsRasterImage;
use js_sys::{Array, Object};
use modsen_core::encode::OutputFormat;
use modsen_core::{EditorConfig, EditorSession, FormSubmission, Operation, SessionError};
use serde::Serialize;
use wasm_bindgen::prelude::*;

fn to_js(err: SessionError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Snapshot of the session state returned by [`JsEditorSession::info`].
#[derive(Debug, Serialize)]
struct SessionInfo {
    width: u32,
    height: u32,
    channels: usize,
    bit_depth: u8,
    history_len: usize,
}

#[wasm_bindgen]
pub struct JsEditorSession {
    inner: EditorSession,
}

#[wasm_bindgen]
impl JsEditorSession {
    /// Create a session. `config` is a partial `EditorConfig` object, or
    /// `undefined` for the defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<JsEditorSession, JsValue> {
        let config = if config.is_undefined() || config.is_null() {
            EditorConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config).map_err(|e| JsValue::from_str(&e.to_string()))?
        };
        Ok(Self::with_config(config))
    }

    /// Decode a JPEG or PNG and make it the current image.
    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<(), JsValue> {
        self.inner.load_bytes(bytes).map(|_| ()).map_err(to_js)
    }

    /// Make a copy of `image` the current image.
    pub fn load_image(&mut self, image: &JsRasterImage) {
        self.inner.load(image.raster().clone());
    }

    /// Apply a typed operation such as `{ op: 'scale', factor: 0.5 }`.
    pub fn apply(&mut self, operation: JsValue) -> Result<(), JsValue> {
        let op: Operation = serde_wasm_bindgen::from_value(operation)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.inner.apply(&op).map(|_| ()).map_err(to_js)
    }

    /// Apply an operation from raw form fields. Field values may be strings,
    /// numbers or booleans; they are parsed the same way as dialog input.
    pub fn apply_form(&mut self, operation: &str, fields: &Object) -> Result<(), JsValue> {
        self.apply_form_fields(operation, form_fields(fields))
            .map_err(to_js)
    }

    /// Restore the image before the last operation. False when there is
    /// nothing to undo.
    pub fn undo(&mut self) -> bool {
        self.inner.undo()
    }

    #[wasm_bindgen(getter)]
    pub fn has_image(&self) -> bool {
        self.inner.has_image()
    }

    #[wasm_bindgen(getter)]
    pub fn history_len(&self) -> usize {
        self.inner.history_len()
    }

    /// Copy of the current image, or `undefined`.
    pub fn current(&self) -> Option<JsRasterImage> {
        self.inner.current().cloned().map(JsRasterImage::from)
    }

    /// Encode the current image. `format` is an extension: `"jpg"`, `"jpeg"`
    /// or `"png"`.
    pub fn export(&self, format: &str) -> Result<Vec<u8>, JsValue> {
        let format = OutputFormat::from_extension(format)
            .ok_or_else(|| JsValue::from_str(&format!("Unsupported output format: {format}")))?;
        self.inner.export(format).map_err(to_js)
    }

    /// Use a TrueType/OpenType font (e.g. fetched from the server) for text.
    pub fn set_font_bytes(&mut self, bytes: Vec<u8>) -> Result<(), JsValue> {
        self.inner.set_font_bytes(bytes).map_err(to_js)
    }

    /// `{ width, height, channels, bit_depth, history_len }` of the current
    /// image, or `null` without one.
    pub fn info(&self) -> Result<JsValue, JsValue> {
        match self.session_info() {
            Some(info) => {
                serde_wasm_bindgen::to_value(&info).map_err(|e| JsValue::from_str(&e.to_string()))
            }
            None => Ok(JsValue::NULL),
        }
    }
}

impl JsEditorSession {
    pub(crate) fn with_config(config: EditorConfig) -> Self {
        Self {
            inner: EditorSession::new(config),
        }
    }

    fn apply_form_fields(
        &mut self,
        operation: &str,
        fields: BTreeMap<String, String>,
    ) -> Result<(), SessionError> {
        let form = FormSubmission {
            operation: operation.to_string(),
            fields,
        };
        self.inner.apply_form(&form).map(|_| ())
    }

    fn session_info(&self) -> Option<SessionInfo> {
        self.inner.current().map(|image| SessionInfo {
            width: image.width(),
            height: image.height(),
            channels: image.mode().channels(),
            bit_depth: image.mode().bit_depth(),
            history_len: self.inner.history_len(),
        })
    }
}

/// Stringify the own enumerable properties of a JS object. Values that are
/// neither strings, numbers nor booleans are skipped, which surfaces as a
/// missing field when parsing.
fn form_fields(object: &Object) -> BTreeMap<String, String> {
    let mut fields = BTreeMap::new();
    for entry in Object::entries(object).iter() {
        let pair = Array::from(&entry);
        let Some(key) = pair.get(0).as_string() else {
            continue;
        };
        let value = pair.get(1);
        let text = value
            .as_string()
            .or_else(|| value.as_f64().map(|n| n.to_string()))
            .or_else(|| value.as_bool().map(|b| b.to_string()));
        if let Some(text) = text {
            fields.insert(key, text);
        }
    }
    fields
}
