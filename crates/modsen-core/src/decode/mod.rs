//! Image loading.
//!
//! Any format the `image` crate is built with (JPEG and PNG here) is
//! accepted; the format is guessed from the content, not the file name.
//! Decoded images are normalized into a [`RasterImage`](crate::RasterImage).
//!
//! EXIF orientation correction is optional and off by default, so pixels
//! come out in stored order unless the caller asks otherwise.

mod loader;
mod types;

pub use loader::{apply_orientation, decode_bytes, decode_file, get_orientation};
pub use types::{DecodeError, Orientation};
