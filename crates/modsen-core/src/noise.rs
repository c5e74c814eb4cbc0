//! Uniform additive noise.
//!
//! Every sample of every pixel, alpha included, receives its own independent
//! draw `u ~ U[-intensity, intensity]`:
//!
//! ```text
//! output = trunc(clamp(input + u * max_value, 0, max_value))
//! ```
//!
//! `max_value` follows the channel depth (255 or 65535). The pass runs once
//! over the flat sample buffer rather than looping per row, column and channel.

use rand::Rng;

use crate::error::OpError;
use crate::raster::{Channel, RasterImage, SampleVisitor};

/// Add uniform noise of the given intensity.
///
/// The intended domain of `intensity` is `[0, 1]` but it is not enforced;
/// the sign is irrelevant since the noise is symmetric. Zero intensity returns
/// an identical copy.
///
/// # Errors
///
/// Returns `OpError::InvalidParameter` if `intensity` is not finite.
pub fn add_noise<R: Rng + ?Sized>(
    image: &RasterImage,
    intensity: f64,
    rng: &mut R,
) -> Result<RasterImage, OpError> {
    if !intensity.is_finite() {
        return Err(OpError::invalid(
            "intensity",
            format!("must be a finite number, got {intensity}"),
        ));
    }
    if intensity == 0.0 {
        return Ok(image.clone());
    }

    let mut output = image.clone();
    output.visit_samples_mut(&mut UniformNoise {
        intensity: intensity.abs(),
        rng,
    });
    Ok(output)
}

struct UniformNoise<'a, R: ?Sized> {
    intensity: f64,
    rng: &'a mut R,
}

impl<R: Rng + ?Sized> SampleVisitor for UniformNoise<'_, R> {
    fn visit<C: Channel>(&mut self, samples: &mut [C], _channels: usize) {
        let spread = self.intensity * C::MAX;
        for sample in samples.iter_mut() {
            // random::<f64>() is in [0, 1), mapped onto [-spread, spread)
            let u = (self.rng.random::<f64>() * 2.0 - 1.0) * spread;
            *sample = C::from_f64((sample.to_f64() + u).clamp(0.0, C::MAX).trunc());
        }
    }
}
