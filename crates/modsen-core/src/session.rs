//! Editor session: the current image, undo history and the resources
//! operations need (random source, font).
//!
//! Operations are all-or-nothing. A failed operation leaves the current image
//! and history exactly as they were.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use ab_glyph::FontArc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;

use crate::adjustments::{adjust_brightness, adjust_contrast};
use crate::config::EditorConfig;
use crate::decode::{decode_bytes, decode_file, DecodeError};
use crate::encode::{encode_image, resolve_save_path, save_image, EncodeError, OutputFormat};
use crate::error::OpError;
use crate::form::FormSubmission;
use crate::noise::add_noise;
use crate::params::{Operation, ParamError};
use crate::raster::RasterImage;
use crate::text::{draw_text, font_from_bytes, load_font};
use crate::transform::{crop, random_crop, reflect, rotate, scale};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("No image loaded")]
    NoImage,

    #[error("No image to save")]
    NothingToSave,

    #[error(transparent)]
    Param(#[from] ParamError),

    #[error(transparent)]
    Op(#[from] OpError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),
}

pub struct EditorSession {
    config: EditorConfig,
    current: Option<RasterImage>,
    history: VecDeque<RasterImage>,
    rng: StdRng,
    font: Option<FontArc>,
}

impl EditorSession {
    pub fn new(config: EditorConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            config,
            current: None,
            history: VecDeque::new(),
            rng,
            font: None,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Decode a file and make it the current image. History is cleared.
    pub fn open(&mut self, path: impl AsRef<Path>) -> Result<&RasterImage, SessionError> {
        let path = path.as_ref();
        let image = decode_file(path, self.config.apply_exif_orientation)?;
        log::info!(
            "opened {} ({}x{}, {:?})",
            path.display(),
            image.width(),
            image.height(),
            image.mode()
        );
        Ok(self.load(image))
    }

    /// Decode encoded bytes and make them the current image.
    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<&RasterImage, SessionError> {
        let image = decode_bytes(bytes, self.config.apply_exif_orientation)?;
        log::info!("loaded {} bytes ({}x{})", bytes.len(), image.width(), image.height());
        Ok(self.load(image))
    }

    /// Replace the current image. History is cleared.
    pub fn load(&mut self, image: RasterImage) -> &RasterImage {
        self.history.clear();
        self.current.insert(image)
    }

    pub fn current(&self) -> Option<&RasterImage> {
        self.current.as_ref()
    }

    pub fn has_image(&self) -> bool {
        self.current.is_some()
    }

    /// Number of steps [`undo`](Self::undo) can go back.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Validate and run `op` against the current image.
    pub fn apply(&mut self, op: &Operation) -> Result<&RasterImage, SessionError> {
        if self.current.is_none() {
            return Err(SessionError::NoImage);
        }
        op.validate()?;

        let font = match op {
            Operation::DrawText(_) => Some(self.font()?),
            _ => None,
        };

        let Some(image) = self.current.as_ref() else {
            return Err(SessionError::NoImage);
        };
        let result = match execute(op, image, &self.config, &mut self.rng, font.as_ref()) {
            Ok(result) => result,
            Err(e) => {
                log::warn!("{} failed: {e}", op.name());
                return Err(e.into());
            }
        };
        log::debug!(
            "{}: {}x{} -> {}x{}",
            op.name(),
            image.width(),
            image.height(),
            result.width(),
            result.height()
        );

        if let Some(previous) = self.current.replace(result) {
            self.push_history(previous);
        }
        self.current.as_ref().ok_or(SessionError::NoImage)
    }

    /// Parse a form submission and apply it.
    pub fn apply_form(&mut self, form: &FormSubmission) -> Result<&RasterImage, SessionError> {
        let op = form.parse().inspect_err(|e| {
            log::warn!("rejected {} form: {e}", form.operation.trim());
        })?;
        self.apply(&op)
    }

    /// Step back to the image before the last successful operation.
    /// Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.history.pop_back() {
            Some(previous) => {
                self.current = Some(previous);
                true
            }
            None => false,
        }
    }

    /// Save the current image; the format follows the path's extension.
    ///
    /// A path without an extension gets `default_extension`. Returns the path
    /// actually written.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<PathBuf, SessionError> {
        let Some(image) = self.current.as_ref() else {
            log::warn!("No image to save");
            return Err(SessionError::NothingToSave);
        };
        let path = resolve_save_path(path, &self.config.default_extension);
        save_image(image, &path, self.config.jpeg_quality)?;
        log::info!("saved {}x{} to {}", image.width(), image.height(), path.display());
        Ok(path)
    }

    /// Encode the current image without touching the filesystem.
    pub fn export(&self, format: OutputFormat) -> Result<Vec<u8>, SessionError> {
        let Some(image) = self.current.as_ref() else {
            log::warn!("No image to save");
            return Err(SessionError::NothingToSave);
        };
        Ok(encode_image(image, format, self.config.jpeg_quality)?)
    }

    pub fn set_font(&mut self, font: FontArc) {
        self.font = Some(font);
    }

    /// Parse font bytes and use them for text overlays.
    pub fn set_font_bytes(&mut self, bytes: Vec<u8>) -> Result<(), SessionError> {
        self.font = Some(font_from_bytes(bytes)?);
        Ok(())
    }

    /// The configured font, loaded on first use.
    fn font(&mut self) -> Result<FontArc, SessionError> {
        if let Some(font) = &self.font {
            return Ok(font.clone());
        }
        let font = load_font(&self.config.font_path).inspect_err(|e| log::warn!("{e}"))?;
        log::debug!("loaded font {}", self.config.font_path.display());
        self.font = Some(font.clone());
        Ok(font)
    }

    fn push_history(&mut self, image: RasterImage) {
        if self.config.history_limit == 0 {
            return;
        }
        while self.history.len() >= self.config.history_limit {
            self.history.pop_front();
        }
        self.history.push_back(image);
    }
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

fn execute(
    op: &Operation,
    image: &RasterImage,
    config: &EditorConfig,
    rng: &mut StdRng,
    font: Option<&FontArc>,
) -> Result<RasterImage, OpError> {
    match op {
        Operation::Scale(p) => scale(image, p.factor, config.scale_filter),
        Operation::Rotate(p) => Ok(rotate(image, p.angle, config.rotate_filter)),
        Operation::Crop(p) => crop(image, p.x, p.y, p.width, p.height),
        Operation::RandomCrop(p) => Ok(random_crop(image, p.width, p.height, rng)),
        Operation::Reflect(p) => Ok(match p.axis {
            Some(axis) => reflect(image, axis),
            None => image.clone(),
        }),
        Operation::Brightness(p) => adjust_brightness(image, p.factor),
        Operation::Contrast(p) => adjust_contrast(image, p.level),
        Operation::AddNoise(p) => add_noise(image, p.intensity, rng),
        Operation::DrawText(p) => {
            let font = font.ok_or_else(|| OpError::MissingFont {
                path: config.font_path.display().to_string(),
                reason: "font not loaded".to_string(),
            })?;
            draw_text(image, &p.content, p.x, p.y, p.font_size, p.color, font)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::params::{
        CropParams, NoiseParams, ReflectParams, RotateParams, ScaleParams, TextParams,
    };
    use crate::raster::PixelMode;
    use crate::transform::ReflectAxis;

    fn seeded(seed: u64) -> EditorSession {
        EditorSession::new(EditorConfig {
            seed: Some(seed),
            ..EditorConfig::default()
        })
    }

    fn red_square() -> RasterImage {
        RasterImage::solid(100, 100, Color::rgb(255, 0, 0), PixelMode::Rgb8)
    }

    #[test]
    fn test_apply_without_image() {
        let mut session = seeded(1);
        assert!(!session.has_image());
        let err = session.apply(&Operation::Scale(ScaleParams { factor: 0.5 })).unwrap_err();
        assert!(matches!(err, SessionError::NoImage));
    }

    #[test]
    fn test_save_without_image_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.jpg");
        let session = seeded(1);

        let err = session.save(&path).unwrap_err();
        assert!(matches!(err, SessionError::NothingToSave));
        assert_eq!(err.to_string(), "No image to save");
        assert!(!path.exists());
        assert!(matches!(session.export(OutputFormat::Png), Err(SessionError::NothingToSave)));
    }

    #[test]
    fn test_scale_then_undo() {
        let mut session = seeded(1);
        session.load(red_square());

        let result = session.apply(&Operation::Scale(ScaleParams { factor: 0.5 })).unwrap();
        assert_eq!(result.dimensions(), (50, 50));
        assert_eq!(session.history_len(), 1);

        assert!(session.undo());
        assert_eq!(session.current().unwrap().dimensions(), (100, 100));
        assert!(!session.undo());
    }

    #[test]
    fn test_rotate_keeps_canvas_with_black_corners() {
        let mut session = seeded(1);
        session.load(red_square());

        let result = session.apply(&Operation::Rotate(RotateParams { angle: 45.0 })).unwrap();
        assert_eq!(result.dimensions(), (100, 100));
        assert_eq!(result.pixel(0, 0), Some(vec![0, 0, 0]));
        assert_eq!(result.pixel(99, 99), Some(vec![0, 0, 0]));
        assert_eq!(result.pixel(50, 50), Some(vec![255, 0, 0]));
    }

    #[test]
    fn test_failed_operation_leaves_image_untouched() {
        let mut session = seeded(1);
        session.load(red_square());
        let flip = Operation::Reflect(ReflectParams {
            axis: Some(ReflectAxis::Vertical),
        });
        session.apply(&flip).unwrap();
        let before = session.current().unwrap().clone();

        let err = session
            .apply(&Operation::Crop(CropParams {
                x: 90,
                y: 0,
                width: 20,
                height: 10,
            }))
            .unwrap_err();
        assert!(matches!(err, SessionError::Op(OpError::OutOfBounds { .. })));
        assert_eq!(session.current(), Some(&before));
        assert_eq!(session.history_len(), 1);

        let err = session.apply(&Operation::Scale(ScaleParams { factor: -1.0 })).unwrap_err();
        assert!(matches!(err, SessionError::Param(ParamError::OutOfRange { .. })));
        assert_eq!(session.current(), Some(&before));
    }

    #[test]
    fn test_missing_font_leaves_image_untouched() {
        let mut session = EditorSession::new(EditorConfig {
            font_path: PathBuf::from("/nonexistent/fonts/arial.ttf"),
            seed: Some(3),
            ..EditorConfig::default()
        });
        session.load(red_square());

        let err = session
            .apply(&Operation::DrawText(TextParams {
                content: "hello".to_string(),
                x: 0,
                y: 0,
                font_size: 12,
                color: Color::BLACK,
            }))
            .unwrap_err();
        assert!(matches!(err, SessionError::Op(OpError::MissingFont { .. })));
        assert_eq!(session.current(), Some(&red_square()));
        assert_eq!(session.history_len(), 0);
    }

    #[test]
    fn test_set_font_bytes_rejects_garbage() {
        let mut session = seeded(1);
        assert!(matches!(
            session.set_font_bytes(vec![1, 2, 3]),
            Err(SessionError::Op(OpError::InvalidFont(_)))
        ));
    }

    #[test]
    fn test_history_is_bounded() {
        let mut session = EditorSession::new(EditorConfig {
            history_limit: 2,
            seed: Some(1),
            ..EditorConfig::default()
        });
        session.load(red_square());
        for _ in 0..5 {
            session.apply(&Operation::Rotate(RotateParams { angle: 90.0 })).unwrap();
        }
        assert_eq!(session.history_len(), 2);
    }

    #[test]
    fn test_zero_history_limit_disables_undo() {
        let mut session = EditorSession::new(EditorConfig {
            history_limit: 0,
            seed: Some(1),
            ..EditorConfig::default()
        });
        session.load(red_square());
        session.apply(&Operation::Scale(ScaleParams { factor: 2.0 })).unwrap();
        assert!(!session.undo());
        assert_eq!(session.current().unwrap().dimensions(), (200, 200));
    }

    #[test]
    fn test_load_clears_history() {
        let mut session = seeded(1);
        session.load(red_square());
        session.apply(&Operation::Scale(ScaleParams { factor: 2.0 })).unwrap();
        session.load(red_square());
        assert_eq!(session.history_len(), 0);
    }

    #[test]
    fn test_seeded_sessions_are_reproducible() {
        let run = || {
            let mut session = seeded(42);
            session.load(red_square());
            session.apply(&Operation::AddNoise(NoiseParams { intensity: 0.3 })).unwrap().clone()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_apply_form() {
        let mut session = seeded(1);
        session.load(red_square());

        let form = FormSubmission::new("random_crop")
            .with_field("width", "30")
            .with_field("height", "20");
        let result = session.apply_form(&form).unwrap();
        assert_eq!(result.dimensions(), (30, 20));

        let bad = FormSubmission::new("brightness").with_field("factor", "bright");
        assert!(matches!(
            session.apply_form(&bad),
            Err(SessionError::Param(ParamError::InvalidNumber { .. }))
        ));
        assert_eq!(session.current().unwrap().dimensions(), (30, 20));
    }

    #[test]
    fn test_oversized_scale_form_keeps_session_alive() {
        let mut session = seeded(1);
        session.load(red_square());

        let form = FormSubmission::new("scale").with_field("factor", "1000");
        assert!(matches!(
            session.apply_form(&form),
            Err(SessionError::Op(OpError::TooLarge { .. }))
        ));
        assert_eq!(session.current(), Some(&red_square()));
        assert_eq!(session.history_len(), 0);
    }

    #[test]
    fn test_rgba_saved_as_jpeg_is_rgb() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = seeded(1);
        session.load(RasterImage::solid(100, 100, Color::rgb(255, 0, 0), PixelMode::Rgba8));

        let path = session.save(dir.path().join("photo.jpg")).unwrap();
        let reloaded = image::open(&path).unwrap();
        assert_eq!(reloaded.color(), image::ColorType::Rgb8);
        assert_eq!((reloaded.width(), reloaded.height()), (100, 100));
    }

    #[test]
    fn test_save_appends_default_extension() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = seeded(1);
        session.load(red_square());

        let path = session.save(dir.path().join("untitled")).unwrap();
        assert_eq!(path, dir.path().join("untitled.jpg"));
        assert!(path.exists());
    }

    #[test]
    fn test_save_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = seeded(1);
        session.load(red_square());
        assert!(matches!(
            session.save(dir.path().join("photo.bmp")),
            Err(SessionError::Encode(EncodeError::UnsupportedFormat(_)))
        ));
    }

    #[test]
    fn test_open_and_export_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.png");
        let original = RasterImage::solid(12, 7, Color::rgba(1, 2, 3, 200), PixelMode::Rgba8);
        crate::encode::save_image(&original, &path, 75).unwrap();

        let mut session = seeded(1);
        assert_eq!(session.open(&path).unwrap(), &original);

        let png = session.export(OutputFormat::Png).unwrap();
        let mut other = seeded(2);
        assert_eq!(other.load_bytes(&png).unwrap(), &original);
    }

    #[test]
    fn test_open_missing_file() {
        let mut session = seeded(1);
        assert!(matches!(
            session.open("/no/such/image.jpg"),
            Err(SessionError::Decode(DecodeError::Io(_)))
        ));
        assert!(!session.has_image());
    }
}
