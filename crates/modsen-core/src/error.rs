//! Errors raised by the transformation operations themselves.

use thiserror::Error;

/// Failure of a single transformation. The input image is never modified.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OpError {
    /// A numeric parameter is outside the operation's domain.
    #[error("Invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// The crop rectangle does not lie within the image.
    #[error(
        "Crop region ({x}, {y}) {width}x{height} exceeds image bounds {image_width}x{image_height}"
    )]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        image_width: u32,
        image_height: u32,
    },

    /// The result would not fit in memory.
    #[error("Result of {width}x{height} exceeds the {limit} byte allocation limit")]
    TooLarge { width: u64, height: u64, limit: u64 },

    /// The font resource could not be read.
    #[error("Font resource unavailable at {path}: {reason}")]
    MissingFont { path: String, reason: String },

    /// The font bytes could not be parsed.
    #[error("Invalid font data: {0}")]
    InvalidFont(String),
}

impl OpError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        OpError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
