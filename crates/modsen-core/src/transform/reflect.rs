//! Mirror and flip.

use serde::{Deserialize, Serialize};

use crate::raster::RasterImage;

/// Axis a reflection is taken across.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReflectAxis {
    /// Left/right mirror.
    Horizontal,
    /// Top/bottom flip.
    Vertical,
}

impl ReflectAxis {
    /// Look up an axis by name, case-insensitively. Unknown names give `None`,
    /// which callers treat as "leave the image alone".
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "horizontal" => Some(ReflectAxis::Horizontal),
            "vertical" => Some(ReflectAxis::Vertical),
            _ => None,
        }
    }
}

pub fn reflect(image: &RasterImage, axis: ReflectAxis) -> RasterImage {
    let flipped = match axis {
        ReflectAxis::Horizontal => image.as_dynamic().fliph(),
        ReflectAxis::Vertical => image.as_dynamic().flipv(),
    };
    RasterImage::from_dynamic(flipped)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use image::{DynamicImage, Rgba};
    use proptest::prelude::*;

    proptest! {
        /// Property: mirroring is its own inverse for arbitrary content.
        #[test]
        fn prop_mirror_is_involution(
            (width, height) in (1u32..=24, 1u32..=24),
            seed in any::<u32>(),
        ) {
            let buf = image::RgbaImage::from_fn(width, height, |x, y| {
                let v = seed.wrapping_mul(x + 31 * y + 1);
                Rgba(v.to_le_bytes())
            });
            let img = RasterImage::from_dynamic(DynamicImage::ImageRgba8(buf));

            let twice = reflect(&reflect(&img, ReflectAxis::Horizontal), ReflectAxis::Horizontal);
            prop_assert_eq!(twice, img);
        }
    }
}
