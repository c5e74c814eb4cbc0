//! WASM-compatible wrapper around the core raster image.

use image::{DynamicImage, RgbImage, RgbaImage};
use modsen_core::{PixelMode, RasterImage};
use wasm_bindgen::prelude::*;

/// An image held in WASM memory.
///
/// Pixel accessors copy into JavaScript memory; keep images on the WASM side
/// while chaining operations and only pull pixels out to display them.
#[wasm_bindgen]
pub struct JsRasterImage {
    inner: RasterImage,
}

#[wasm_bindgen]
impl JsRasterImage {
    /// Build an image from 8-bit samples, row-major.
    ///
    /// `channels` is 3 for RGB or 4 for RGBA (e.g. canvas `ImageData`).
    #[wasm_bindgen(constructor)]
    pub fn new(
        width: u32,
        height: u32,
        pixels: Vec<u8>,
        channels: u8,
    ) -> Result<JsRasterImage, JsValue> {
        Self::from_samples(width, height, pixels, channels).map_err(|e| JsValue::from_str(&e))
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width()
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height()
    }

    /// 3 (RGB) or 4 (RGBA)
    #[wasm_bindgen(getter)]
    pub fn channels(&self) -> u8 {
        self.inner.mode().channels() as u8
    }

    /// 8 or 16
    #[wasm_bindgen(getter)]
    pub fn bit_depth(&self) -> u8 {
        self.inner.mode().bit_depth()
    }

    #[wasm_bindgen(getter)]
    pub fn has_alpha(&self) -> bool {
        self.inner.mode().has_alpha()
    }

    /// 8-bit samples in the image's own channel layout. 16-bit images are
    /// scaled down.
    pub fn pixels(&self) -> Vec<u8> {
        let dynamic = self.inner.as_dynamic();
        match self.inner.mode() {
            PixelMode::Rgb8 | PixelMode::Rgba8 => dynamic.as_bytes().to_vec(),
            PixelMode::Rgb16 => dynamic.to_rgb8().into_raw(),
            PixelMode::Rgba16 => dynamic.to_rgba8().into_raw(),
        }
    }

    /// RGBA8 samples, ready for `new ImageData(...)`. Opaque when the image
    /// has no alpha.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.inner.as_dynamic().to_rgba8().into_raw()
    }

    /// Release WASM memory now instead of waiting for the finalizer.
    pub fn free(self) {}
}

impl JsRasterImage {
    pub(crate) fn from_samples(
        width: u32,
        height: u32,
        pixels: Vec<u8>,
        channels: u8,
    ) -> Result<Self, String> {
        let expected = width as usize * height as usize * channels as usize;
        if pixels.len() != expected {
            return Err(format!(
                "Invalid pixel data: expected {expected} bytes \
                 ({width}x{height}x{channels}), got {}",
                pixels.len()
            ));
        }

        let dynamic = match channels {
            3 => RgbImage::from_raw(width, height, pixels).map(DynamicImage::ImageRgb8),
            4 => RgbaImage::from_raw(width, height, pixels).map(DynamicImage::ImageRgba8),
            other => return Err(format!("channels must be 3 or 4, got {other}")),
        };
        dynamic
            .map(Self::from)
            .ok_or_else(|| format!("pixel buffer does not fit {width}x{height}"))
    }

    pub(crate) fn raster(&self) -> &RasterImage {
        &self.inner
    }
}

impl From<RasterImage> for JsRasterImage {
    fn from(inner: RasterImage) -> Self {
        Self { inner }
    }
}

impl From<DynamicImage> for JsRasterImage {
    fn from(image: DynamicImage) -> Self {
        Self {
            inner: RasterImage::from_dynamic(image),
        }
    }
}
