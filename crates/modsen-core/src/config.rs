//! Editor configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::encode::DEFAULT_JPEG_QUALITY;
use crate::text::DEFAULT_FONT_PATH;
use crate::transform::{FilterType, InterpolationFilter};

/// Settings for an [`EditorSession`](crate::EditorSession).
///
/// Every field has a default, so a partial object deserializes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Font used by text overlays.
    pub font_path: PathBuf,
    /// Extension appended to save paths that have none.
    pub default_extension: String,
    /// JPEG quality (1-100).
    pub jpeg_quality: u8,
    pub scale_filter: FilterType,
    pub rotate_filter: InterpolationFilter,
    /// Number of previous images kept for undo. 0 disables undo.
    pub history_limit: usize,
    /// Rotate/flip loaded images according to their EXIF orientation tag.
    pub apply_exif_orientation: bool,
    /// Seed for random crop and noise; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            font_path: PathBuf::from(DEFAULT_FONT_PATH),
            default_extension: "jpg".to_string(),
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            scale_filter: FilterType::default(),
            rotate_filter: InterpolationFilter::default(),
            history_limit: 20,
            apply_exif_orientation: false,
            seed: None,
        }
    }
}
