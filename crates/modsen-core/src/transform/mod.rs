//! Geometric operations: scale, rotate, crop, random crop and reflect.
//!
//! Every function takes the source image by reference and returns a new
//! image; the source is never modified.
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner, x grows right, y grows down
//! - Crop coordinates and sizes are in pixels
//! - Rotation angles are in degrees, positive = counter-clockwise
//! - Rotation keeps the canvas size; scaling is the only operation here
//!   that changes dimensions other than cropping

mod crop;
mod reflect;
mod rotation;
mod scale;

pub use crop::{crop, random_crop};
pub use reflect::{reflect, ReflectAxis};
pub use rotation::{rotate, InterpolationFilter};
pub use scale::{scale, scaled_dimensions, FilterType};
