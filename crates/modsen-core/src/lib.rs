//! Modsen Core - image transformation engine
//!
//! Geometric, photometric, noise and text operations over a small raster
//! model, plus the editor session that owns the current image, parses form
//! input and loads/saves files.
//!
//! Every operation takes `&RasterImage` and returns a new image; the only
//! mutable state lives in [`EditorSession`].

pub mod adjustments;
pub mod color;
pub mod config;
pub mod decode;
pub mod encode;
pub mod error;
pub mod form;
pub mod luminance;
pub mod noise;
pub mod params;
pub mod raster;
pub mod session;
pub mod text;
pub mod transform;

pub use adjustments::{adjust_brightness, adjust_contrast};
pub use color::{Color, ColorError};
pub use config::EditorConfig;
pub use error::OpError;
pub use form::FormSubmission;
pub use noise::add_noise;
pub use params::{Operation, ParamError};
pub use raster::{PixelMode, RasterImage};
pub use session::{EditorSession, SessionError};
pub use text::draw_text;
pub use transform::{
    crop, random_crop, reflect, rotate, scale, FilterType, InterpolationFilter, ReflectAxis,
};

/// Re-exported so callers can hand fonts to [`draw_text`] without depending
/// on `ab_glyph` directly.
pub use ab_glyph::FontArc;
