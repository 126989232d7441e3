//! Color adjustment filters: Contrast, Gamma.
//!
//! These are pixel-wise operations that don't require spatial context.
//! Every channel is processed independently and saturated into 0-255.

use log::debug;

use super::pointwise::apply_pointwise;
use crate::buffer::{clamp_channel, clamp_channel_f64, PixelBuffer};
use crate::error::{EffectError, Result};

/// Contrast amounts beyond this magnitude are clamped.
pub const MAX_CONTRAST: i32 = 160;

const GAMMA_EPSILON: f64 = 1e-9;

// ============================================================================
// Contrast
// ============================================================================

/// Scale factor applied around mid-grey for a given contrast amount.
///
/// `amount` is clamped to [-160, 160] first. An amount of 0 gives exactly 1.
pub fn contrast_factor(amount: i32) -> f64 {
    let amount = amount.clamp(-MAX_CONTRAST, MAX_CONTRAST);
    (259 * (amount + 255)) as f64 / (255 * (259 - amount)) as f64
}

/// Adjust image contrast.
///
/// # Arguments
/// * `source` - Input image
/// * `amount` - Contrast adjustment, clamped to [-160, 160]; 0 = no change
///
/// # Returns
/// Contrast-adjusted image of the same size
pub fn contrast(source: &PixelBuffer, amount: i32) -> PixelBuffer {
    let factor = contrast_factor(amount);
    debug!(
        "contrast {}x{} amount={} factor={:.4}",
        source.width(),
        source.height(),
        amount,
        factor
    );

    // Truncation toward zero, as an integer cast does
    let adjust = |v: u8| clamp_channel((factor * (v as f64 - 128.0) + 128.0) as i32);
    apply_pointwise(source, |sample| sample.color.map(adjust))
}

// ============================================================================
// Gamma
// ============================================================================

/// Apply gamma correction: `out = floor(255 * (in / 255) ^ gamma)`.
///
/// # Arguments
/// * `source` - Input image
/// * `gamma` - Exponent, must be positive and finite; < 1 brightens, > 1 darkens
///
/// # Returns
/// Gamma-corrected image, or `ParameterOutOfRange` for a bad exponent
pub fn gamma(source: &PixelBuffer, gamma: f64) -> Result<PixelBuffer> {
    if !gamma.is_finite() || gamma <= 0.0 {
        return Err(EffectError::out_of_range(
            "gamma",
            gamma,
            "a positive finite number",
        ));
    }
    debug!("gamma {}x{} gamma={}", source.width(), source.height(), gamma);

    // (i / 255) * 255 is not always exactly i in binary floating point, so
    // nudge before flooring
    let mut lut = [0u8; 256];
    for (i, entry) in lut.iter_mut().enumerate() {
        *entry = clamp_channel_f64(255.0 * (i as f64 / 255.0).powf(gamma) + GAMMA_EPSILON);
    }

    Ok(apply_pointwise(source, |sample| {
        sample.color.map(|v| lut[v as usize])
    }))
}
