//! Text overlay.
//!
//! Text is rasterized with `ab_glyph` through `imageproc`'s text drawing,
//! anchored at the top-left corner of the first line. Font size is the em
//! size in pixels.

use std::path::Path;

use ab_glyph::{Font, FontArc, PxScale};
use image::{DynamicImage, Rgb, Rgba};
use imageproc::drawing::draw_text_mut;

use crate::color::Color;
use crate::error::OpError;
use crate::raster::RasterImage;

/// Font file used when no other font is configured.
pub const DEFAULT_FONT_PATH: &str = "arial.ttf";

/// Read and parse a TrueType/OpenType font file.
///
/// # Errors
///
/// `OpError::MissingFont` if the file cannot be read, `OpError::InvalidFont`
/// if its contents are not a font.
pub fn load_font(path: impl AsRef<Path>) -> Result<FontArc, OpError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| OpError::MissingFont {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    font_from_bytes(bytes)
}

/// Parse font data already in memory.
pub fn font_from_bytes(bytes: Vec<u8>) -> Result<FontArc, OpError> {
    FontArc::try_from_vec(bytes).map_err(|e| OpError::InvalidFont(e.to_string()))
}

/// Pixel scale giving glyphs an em size of `font_size` pixels.
fn em_scale(font: &FontArc, font_size: u32) -> PxScale {
    let size = font_size as f32;
    match font.units_per_em() {
        Some(units) if units > 0.0 => PxScale::from(size * font.height_unscaled() / units),
        _ => PxScale::from(size),
    }
}

fn check_font_size(font_size: u32) -> Result<(), OpError> {
    if font_size == 0 {
        return Err(OpError::invalid("font_size", "must be greater than zero"));
    }
    Ok(())
}

/// Render `content` onto a copy of `image`.
///
/// `(x, y)` may be negative or beyond the image; glyphs are clipped to the
/// canvas. Empty content returns an identical copy.
///
/// # Errors
///
/// Returns `OpError::InvalidParameter` if `font_size` is zero.
pub fn draw_text(
    image: &RasterImage,
    content: &str,
    x: i32,
    y: i32,
    font_size: u32,
    color: Color,
    font: &FontArc,
) -> Result<RasterImage, OpError> {
    check_font_size(font_size)?;
    if content.is_empty() || image.is_empty() {
        return Ok(image.clone());
    }

    log::debug!(
        "draw_text: {} chars at ({x}, {y}), size {font_size}, color {color}",
        content.chars().count()
    );

    let scale = em_scale(font, font_size);
    let mut canvas = image.clone().into_dynamic();
    match &mut canvas {
        DynamicImage::ImageRgb8(buf) => {
            draw_text_mut(buf, Rgb(color.rgb8()), x, y, scale, font, content)
        }
        DynamicImage::ImageRgba8(buf) => {
            draw_text_mut(buf, Rgba(color.rgba8()), x, y, scale, font, content)
        }
        DynamicImage::ImageRgb16(buf) => {
            draw_text_mut(buf, Rgb(color.rgb16()), x, y, scale, font, content)
        }
        DynamicImage::ImageRgba16(buf) => {
            draw_text_mut(buf, Rgba(color.rgba16()), x, y, scale, font, content)
        }
        _ => {}
    }
    Ok(RasterImage::from_dynamic(canvas))
}
