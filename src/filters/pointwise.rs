//! Per-pixel effects.
//!
//! A pointwise effect maps each pixel independently: output `(x, y)` depends
//! only on input `(x, y)` and whatever the closure captures. Rows are
//! evaluated in parallel.

use crate::buffer::{PixelBuffer, Rgb};

/// A pixel handed to a pointwise function together with its position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelSample {
    pub color: Rgb,
    pub x: usize,
    pub y: usize,
}

/// Apply `effect` to every pixel of `source`, producing a new image of the
/// same size.
pub fn apply_pointwise<F>(source: &PixelBuffer, effect: F) -> PixelBuffer
where
    F: Fn(PixelSample) -> Rgb + Sync,
{
    let (width, height) = source.dimensions();
    PixelBuffer::build(width, height, |x, y| {
        effect(PixelSample {
            color: source.get(x, y),
            x,
            y,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sees_coordinates() {
        let img = PixelBuffer::new(5, 4).unwrap();
        let result = apply_pointwise(&img, |s| Rgb::new(s.x as u8, s.y as u8, s.color.b));
        assert_eq!(result.dimensions(), (5, 4));
        assert_eq!(result.get(4, 3), Rgb::new(4, 3, 0));
        assert_eq!(result.get(0, 2), Rgb::new(0, 2, 0));
    }

    #[test]
    fn test_source_untouched() {
        let img = PixelBuffer::filled(2, 2, Rgb::gray(10)).unwrap();
        let _ = apply_pointwise(&img, |_| Rgb::WHITE);
        assert_eq!(img.get(1, 1), Rgb::gray(10));
    }
}
