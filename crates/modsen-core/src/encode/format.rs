use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::codecs::png::PngEncoder;
use serde::{Deserialize, Serialize};

use super::{encode_jpeg, EncodeError};
use crate::raster::RasterImage;

/// Formats an image can be written as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Jpeg,
    Png,
}

impl OutputFormat {
    /// Match a file extension, case-insensitively, with or without the dot.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(OutputFormat::Jpeg),
            "png" => Some(OutputFormat::Png),
            _ => None,
        }
    }

    /// Format implied by a path's extension.
    pub fn from_path(path: &Path) -> Result<Self, EncodeError> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
        Self::from_extension(ext).ok_or_else(|| EncodeError::UnsupportedFormat(ext.to_string()))
    }

    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Png => "png",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "image/jpeg",
            OutputFormat::Png => "image/png",
        }
    }
}

/// Encode in the given format. `quality` only affects JPEG.
pub fn encode_image(
    image: &RasterImage,
    format: OutputFormat,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    match format {
        OutputFormat::Jpeg => encode_jpeg(image, quality),
        OutputFormat::Png => encode_png(image),
    }
}

fn encode_png(image: &RasterImage) -> Result<Vec<u8>, EncodeError> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let mut buffer = Cursor::new(Vec::new());
    image
        .as_dynamic()
        .write_with_encoder(PngEncoder::new(&mut buffer))
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;
    Ok(buffer.into_inner())
}

/// Append `default_extension` when `path` has none.
pub fn resolve_save_path(path: impl AsRef<Path>, default_extension: &str) -> PathBuf {
    let path = path.as_ref();
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension(default_extension.trim_start_matches('.'))
    }
}

/// Encode `image` in the format named by the path's extension and write it.
///
/// The file is only created once encoding has succeeded.
pub fn save_image(
    image: &RasterImage,
    path: impl AsRef<Path>,
    quality: u8,
) -> Result<(), EncodeError> {
    let path = path.as_ref();
    let format = OutputFormat::from_path(path)?;
    let bytes = encode_image(image, format, quality)?;
    std::fs::write(path, bytes).map_err(|e| EncodeError::Io(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::raster::PixelMode;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(OutputFormat::from_extension("jpg"), Some(OutputFormat::Jpeg));
        assert_eq!(OutputFormat::from_extension("JPEG"), Some(OutputFormat::Jpeg));
        assert_eq!(OutputFormat::from_extension(".png"), Some(OutputFormat::Png));
        assert_eq!(OutputFormat::from_extension("bmp"), None);
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(OutputFormat::from_path(Path::new("a/b.Png")).unwrap(), OutputFormat::Png);
        assert!(matches!(
            OutputFormat::from_path(Path::new("photo.tiff")),
            Err(EncodeError::UnsupportedFormat(ext)) if ext == "tiff"
        ));
        assert!(OutputFormat::from_path(Path::new("noext")).is_err());
    }

    #[test]
    fn test_resolve_save_path() {
        assert_eq!(resolve_save_path("out", "jpg"), PathBuf::from("out.jpg"));
        assert_eq!(resolve_save_path("dir/out", ".png"), PathBuf::from("dir/out.png"));
        assert_eq!(resolve_save_path("out.png", "jpg"), PathBuf::from("out.png"));
    }

    #[test]
    fn test_png_keeps_alpha_and_depth() {
        let img = RasterImage::solid(5, 4, Color::rgba(1, 2, 3, 4), PixelMode::Rgba16);
        let png = encode_image(&img, OutputFormat::Png, 0).unwrap();

        let decoded = image::load_from_memory(&png).unwrap();
        assert_eq!(decoded.color(), image::ColorType::Rgba16);
        assert_eq!(RasterImage::from_dynamic(decoded), img);
    }

    #[test]
    fn test_png_empty_image() {
        let img = RasterImage::new(0, 0, PixelMode::Rgb8);
        assert!(matches!(
            encode_image(&img, OutputFormat::Png, 75),
            Err(EncodeError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_save_image_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("solid.png");
        let img = RasterImage::solid(6, 6, Color::rgb(9, 8, 7), PixelMode::Rgb8);

        save_image(&img, &path, 75).unwrap();
        let reloaded = image::open(&path).unwrap();
        assert_eq!(RasterImage::from_dynamic(reloaded), img);
    }

    #[test]
    fn test_save_image_unsupported_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("solid.gif");
        let img = RasterImage::solid(6, 6, Color::WHITE, PixelMode::Rgb8);

        assert!(matches!(
            save_image(&img, &path, 75),
            Err(EncodeError::UnsupportedFormat(_))
        ));
        assert!(!path.exists());
    }

    #[test]
    fn test_save_image_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.jpg");
        let img = RasterImage::solid(2, 2, Color::WHITE, PixelMode::Rgb8);
        assert!(matches!(save_image(&img, &path, 75), Err(EncodeError::Io(_))));
    }
}
