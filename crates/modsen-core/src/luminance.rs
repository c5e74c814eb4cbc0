//! Luma calculation using ITU-R BT.601 coefficients.
//!
//! This is the weighting used when converting RGB to a single gray channel,
//! and it defines the gray point the contrast operation pivots around.

/// ITU-R BT.601 coefficient for red channel in luma calculation.
pub const LUMA_R: f64 = 0.299;

/// ITU-R BT.601 coefficient for green channel in luma calculation.
pub const LUMA_G: f64 = 0.587;

/// ITU-R BT.601 coefficient for blue channel in luma calculation.
pub const LUMA_B: f64 = 0.114;

/// Luma of a pixel in its native channel range.
#[inline]
pub fn luma(r: f64, g: f64, b: f64) -> f64 {
    LUMA_R * r + LUMA_G * g + LUMA_B * b
}
