//! Image subtraction.

use log::debug;

use super::pointwise::apply_pointwise;
use crate::buffer::{clamp_channel, PixelBuffer, Rgb};
use crate::error::{EffectError, Result};

/// Subtract `other` from `source` channel by channel, saturating at 0.
///
/// `other` must be at least as large as `source` on both axes; pixels are
/// matched by position and any extra area of `other` is ignored.
pub fn subtract(source: &PixelBuffer, other: &PixelBuffer) -> Result<PixelBuffer> {
    let (width, height) = source.dimensions();
    if other.width() < width || other.height() < height {
        return Err(EffectError::DimensionMismatch {
            expected_width: width,
            expected_height: height,
            actual_width: other.width(),
            actual_height: other.height(),
        });
    }
    debug!(
        "subtract {}x{} minus {}x{}",
        width,
        height,
        other.width(),
        other.height()
    );

    Ok(apply_pointwise(source, |sample| {
        let a = sample.color;
        let b = other.get(sample.x, sample.y);
        Rgb::new(
            clamp_channel(a.r as i32 - b.r as i32),
            clamp_channel(a.g as i32 - b.g as i32),
            clamp_channel(a.b as i32 - b.b as i32),
        )
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subtract_saturates() {
        let a = PixelBuffer::filled(2, 2, Rgb::new(100, 50, 200)).unwrap();
        let b = PixelBuffer::filled(2, 2, Rgb::new(30, 80, 200)).unwrap();
        let out = subtract(&a, &b).unwrap();
        assert_eq!(out.get(1, 1), Rgb::new(70, 0, 0));
    }

    #[test]
    fn test_subtract_uses_matching_position() {
        let a = PixelBuffer::filled(3, 2, Rgb::WHITE).unwrap();
        let b = PixelBuffer::from_fn(3, 2, |x, y| Rgb::gray((x * 10 + y) as u8)).unwrap();
        let out = subtract(&a, &b).unwrap();
        assert_eq!(out.get(2, 1), Rgb::gray(255 - 21));
        assert_eq!(out.get(0, 0), Rgb::WHITE);
    }

    #[test]
    fn test_larger_operand_accepted() {
        let a = PixelBuffer::filled(2, 2, Rgb::WHITE).unwrap();
        let b = PixelBuffer::new(5, 3).unwrap();
        let out = subtract(&a, &b).unwrap();
        assert_eq!(out.dimensions(), (2, 2));
    }

    #[test]
    fn test_smaller_operand_rejected() {
        let a = PixelBuffer::new(4, 4).unwrap();
        let b = PixelBuffer::new(4, 3).unwrap();
        let err = subtract(&a, &b).unwrap_err();
        assert!(matches!(
            err,
            EffectError::DimensionMismatch {
                expected_height: 4,
                actual_height: 3,
                ..
            }
        ));
    }
}
