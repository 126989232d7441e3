//! Greyscale conversion filter.
//!
//! Uses the plain channel average rather than a luminosity weighting, so
//! pure red, green and blue all map to the same grey.

use log::debug;

use super::pointwise::apply_pointwise;
use crate::buffer::{PixelBuffer, Rgb};

/// Convert an image to greyscale.
///
/// Each pixel becomes `(v, v, v)` with `v = (r + g + b) / 3`, truncated.
///
/// # Arguments
/// * `source` - Input image
///
/// # Returns
/// New image with R=G=B
pub fn greyscale(source: &PixelBuffer) -> PixelBuffer {
    debug!("greyscale {}x{}", source.width(), source.height());
    apply_pointwise(source, |sample| average(sample.color))
}

#[inline]
fn average(c: Rgb) -> Rgb {
    Rgb::gray((c.total() / 3) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_image() -> PixelBuffer {
        PixelBuffer::from_fn(4, 3, |x, y| {
            Rgb::new((x * 60) as u8, (y * 90) as u8, (x * y * 20) as u8)
        })
        .unwrap()
    }

    #[test]
    fn test_greyscale_truncates() {
        let img = PixelBuffer::filled(1, 1, Rgb::new(10, 10, 12)).unwrap();
        // 32 / 3 = 10.67
        assert_eq!(greyscale(&img).get(0, 0), Rgb::gray(10));
    }

    #[test]
    fn test_greyscale_primaries_equal() {
        let red = PixelBuffer::filled(1, 1, Rgb::new(255, 0, 0)).unwrap();
        let blue = PixelBuffer::filled(1, 1, Rgb::new(0, 0, 255)).unwrap();
        assert_eq!(greyscale(&red).get(0, 0), Rgb::gray(85));
        assert_eq!(greyscale(&red), greyscale(&blue));
    }

    #[test]
    fn test_greyscale_idempotent() {
        let once = greyscale(&sample_image());
        let twice = greyscale(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_greyscale_white_stays_white() {
        let img = PixelBuffer::filled(2, 2, Rgb::WHITE).unwrap();
        assert_eq!(greyscale(&img).get(1, 1), Rgb::WHITE);
    }
}
