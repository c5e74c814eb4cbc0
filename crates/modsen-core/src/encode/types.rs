use thiserror::Error;

/// Errors that can occur while encoding or writing an image.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The target extension does not name a format we can write
    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),

    #[error("Encoding failed: {0}")]
    EncodingFailed(String),

    #[error("I/O error: {0}")]
    Io(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_error_display() {
        let err = EncodeError::InvalidDimensions { width: 0, height: 3 };
        assert_eq!(
            err.to_string(),
            "Invalid dimensions: width (0) and height (3) must be non-zero"
        );
        assert_eq!(
            EncodeError::UnsupportedFormat("tiff".to_string()).to_string(),
            "Unsupported output format: tiff"
        );
    }
}
