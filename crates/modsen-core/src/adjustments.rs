//! Photometric adjustments: brightness and contrast.
//!
//! Both are enhancement factors where `1.0` is the identity:
//!
//! - Brightness blends against black: `output = input * factor`
//! - Contrast blends against the image's mean gray:
//!   `output = mean + (input - mean) * level`
//!
//! Results are rounded and clamped to the channel range. Alpha is never
//! touched.

use crate::error::OpError;
use crate::luminance::luma;
use crate::raster::{Channel, RasterImage, SampleVisitor};

/// Scale every color channel by `factor`.
///
/// `factor < 1.0` darkens, `factor > 1.0` brightens, `0.0` gives black.
///
/// # Errors
///
/// Returns `OpError::InvalidParameter` if `factor` is negative or not finite.
pub fn adjust_brightness(image: &RasterImage, factor: f64) -> Result<RasterImage, OpError> {
    check_factor("factor", factor)?;
    if factor == 1.0 {
        return Ok(image.clone());
    }

    let mut output = image.clone();
    output.visit_samples_mut(&mut Brightness { factor });
    Ok(output)
}

/// Stretch or compress every color channel around the mean gray level.
///
/// `level < 1.0` flattens toward uniform gray (`0.0` gives a solid gray image),
/// `level > 1.0` increases contrast.
///
/// # Errors
///
/// Returns `OpError::InvalidParameter` if `level` is negative or not finite.
pub fn adjust_contrast(image: &RasterImage, level: f64) -> Result<RasterImage, OpError> {
    check_factor("level", level)?;
    if level == 1.0 {
        return Ok(image.clone());
    }

    let mut output = image.clone();
    output.visit_samples_mut(&mut Contrast { level });
    Ok(output)
}

fn check_factor(name: &'static str, value: f64) -> Result<(), OpError> {
    if !value.is_finite() || value < 0.0 {
        return Err(OpError::invalid(
            name,
            format!("must be a finite number >= 0, got {value}"),
        ));
    }
    Ok(())
}

#[inline]
fn to_channel<C: Channel>(value: f64) -> C {
    C::from_f64(value.round().clamp(0.0, C::MAX))
}

struct Brightness {
    factor: f64,
}

impl SampleVisitor for Brightness {
    fn visit<C: Channel>(&mut self, samples: &mut [C], channels: usize) {
        for pixel in samples.chunks_exact_mut(channels) {
            for sample in &mut pixel[..3] {
                *sample = to_channel(sample.to_f64() * self.factor);
            }
        }
    }
}

struct Contrast {
    level: f64,
}

impl SampleVisitor for Contrast {
    fn visit<C: Channel>(&mut self, samples: &mut [C], channels: usize) {
        let mean = mean_gray(samples, channels);

        for pixel in samples.chunks_exact_mut(channels) {
            for sample in &mut pixel[..3] {
                *sample = to_channel(mean + (sample.to_f64() - mean) * self.level);
            }
        }
    }
}

/// Mean of the per-pixel gray levels, rounded to an integer level.
fn mean_gray<C: Channel>(samples: &[C], channels: usize) -> f64 {
    let mut count = 0u64;
    let mut total = 0.0;

    for pixel in samples.chunks_exact(channels) {
        total += luma(pixel[0].to_f64(), pixel[1].to_f64(), pixel[2].to_f64()).round();
        count += 1;
    }

    if count == 0 {
        return 0.0;
    }
    (total / count as f64 + 0.5).floor()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use image::{DynamicImage, Rgb};
    use proptest::prelude::*;

    fn create_test_image(seed: u32) -> RasterImage {
        let buf = image::RgbImage::from_fn(16, 16, |x, y| {
            let v = seed.wrapping_mul(x * 17 + y * 131 + 7);
            Rgb([v as u8, (v >> 8) as u8, (v >> 16) as u8])
        });
        RasterImage::from_dynamic(DynamicImage::ImageRgb8(buf))
    }

    proptest! {
        /// Property: brightening never darkens a channel and vice versa.
        #[test]
        fn prop_brightness_is_monotonic(seed in any::<u32>(), factor in 0.0f64..=4.0) {
            let img = create_test_image(seed);
            let result = adjust_brightness(&img, factor).unwrap();

            for (before, after) in img.samples().iter().zip(result.samples().iter()) {
                if factor >= 1.0 {
                    prop_assert!(after >= before);
                } else {
                    prop_assert!(after <= before);
                }
            }
        }

        /// Property: contrast keeps dimensions and mode.
        #[test]
        fn prop_contrast_keeps_shape(seed in any::<u32>(), level in 0.0f64..=4.0) {
            let img = create_test_image(seed);
            let result = adjust_contrast(&img, level).unwrap();
            prop_assert_eq!(result.dimensions(), img.dimensions());
            prop_assert_eq!(result.mode(), img.mode());
        }
    }
}
