//! Image encoding and saving.
//!
//! JPEG has no alpha channel and only 8-bit samples, so JPEG output always
//! goes through an RGB8 conversion first; alpha is dropped, not composited.
//! PNG keeps the image's own layout.

mod format;
mod jpeg;
mod types;

pub use format::{encode_image, resolve_save_path, save_image, OutputFormat};
pub use jpeg::{encode_jpeg, DEFAULT_JPEG_QUALITY};
pub use types::EncodeError;
