//! Image scaling.
//!
//! Ratios of 1 or more upscale with linear interpolation, done as two
//! separable passes (horizontal, then vertical on the widened result).
//! Ratios below 1 downscale with nearest-neighbor sampling.
//!
//! ## Output size
//!
//! | Mode | Width | Height |
//! |------|-------|--------|
//! | Upscale (`r >= 1`) | `floor(W*r) + 1` | `floor(H*r) + 1` |
//! | Downscale (`r < 1`) | `floor(W*r) - 1` | `floor(H*r) - 1` |
//!
//! The extra upscaled column/row comes from interpolating the first source
//! pixel against black, which stands in for the missing left/top neighbor.

use log::debug;

use crate::buffer::{PixelBuffer, Rgb};
use crate::error::{EffectError, Result};

/// Largest upscaled image, in pixels.
pub const MAX_OUTPUT_PIXELS: usize = 1 << 28;

/// How one output sample along an axis is derived from the source axis.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Tap {
    /// Verbatim copy of source sample `i`.
    Copy(usize),
    /// Linear blend from `prev` (black when `None`) toward `next`;
    /// `weight` is the share of `next`.
    Blend {
        prev: Option<usize>,
        next: usize,
        weight: f64,
    },
}

/// Scale an image by `ratio`.
///
/// # Arguments
/// * `source` - Input image
/// * `ratio` - Positive scale factor; `>= 1` upscales, `< 1` downscales
///
/// # Returns
/// Scaled image, or `ParameterOutOfRange` for a non-positive ratio, an
/// upscale beyond [`MAX_OUTPUT_PIXELS`] or a downscale that would leave no
/// pixels
pub fn scale(source: &PixelBuffer, ratio: f64) -> Result<PixelBuffer> {
    if !ratio.is_finite() || ratio <= 0.0 {
        return Err(EffectError::out_of_range(
            "ratio",
            ratio,
            "a positive finite number",
        ));
    }
    debug!(
        "scale {}x{} ratio={}",
        source.width(),
        source.height(),
        ratio
    );

    if ratio >= 1.0 {
        let (width, height) = source.dimensions();
        let fits = upscaled_len(width, ratio)
            .zip(upscaled_len(height, ratio))
            .and_then(|(w, h)| w.checked_mul(h))
            .is_some_and(|pixels| pixels <= MAX_OUTPUT_PIXELS);
        if !fits {
            return Err(EffectError::out_of_range(
                "ratio",
                ratio,
                "small enough to keep the output within 2^28 pixels",
            ));
        }
        Ok(upscale(source, ratio))
    } else {
        downscale(source, ratio)
    }
}

// ============================================================================
// Upscale
// ============================================================================

/// `floor(len * ratio) + 1`, or `None` if it does not fit in a `usize`.
fn upscaled_len(len: usize, ratio: f64) -> Option<usize> {
    let scaled = (len as f64 * ratio).floor();
    if scaled >= usize::MAX as f64 {
        return None;
    }
    (scaled as usize).checked_add(1)
}

fn upscale(source: &PixelBuffer, ratio: f64) -> PixelBuffer {
    let (width, height) = source.dimensions();
    let columns = upscale_taps(width, ratio);
    let rows = upscale_taps(height, ratio);

    // Horizontal pass
    let wide = PixelBuffer::build(columns.len(), height, |x, y| {
        sample_tap(columns[x], |i| source.get(i, y))
    });

    // Vertical pass
    PixelBuffer::build(columns.len(), rows.len(), |x, y| {
        sample_tap(rows[y], |j| wide.get(x, j))
    })
}

/// Plan the output samples for one axis of `len` source samples.
///
/// Source samples are visited in order while the output position advances by
/// `ratio` per sample. Whenever it has moved more than one step, the gap is
/// filled with blends from the previous source sample toward the current one
/// before the current one is copied.
fn upscale_taps(len: usize, ratio: f64) -> Vec<Tap> {
    let total = (len as f64 * ratio).floor() as usize + 1;
    let mut taps = Vec::with_capacity(total);

    for i in 0..len {
        let target = ((i + 1) as f64 * ratio).floor() as usize + 1;
        let inserted = target.saturating_sub(taps.len() + 1);
        let prev = i.checked_sub(1);

        for k in 1..=inserted {
            taps.push(Tap::Blend {
                prev,
                next: i,
                weight: k as f64 / (inserted + 1) as f64,
            });
        }
        taps.push(Tap::Copy(i));
    }

    taps
}

#[inline]
fn sample_tap(tap: Tap, at: impl Fn(usize) -> Rgb) -> Rgb {
    match tap {
        Tap::Copy(i) => at(i),
        Tap::Blend { prev, next, weight } => {
            let a = prev.map(&at).unwrap_or(Rgb::BLACK);
            let b = at(next);
            let mix = |p: u8, q: u8| {
                let v = p as f64 * (1.0 - weight) + q as f64 * weight;
                v.round().clamp(0.0, 255.0) as u8
            };
            Rgb::new(mix(a.r, b.r), mix(a.g, b.g), mix(a.b, b.b))
        }
    }
}

// ============================================================================
// Downscale
// ============================================================================

fn downscale(source: &PixelBuffer, ratio: f64) -> Result<PixelBuffer> {
    let (width, height) = source.dimensions();
    let out_width = (width as f64 * ratio).floor() as i64 - 1;
    let out_height = (height as f64 * ratio).floor() as i64 - 1;
    if out_width < 1 || out_height < 1 {
        return Err(EffectError::out_of_range(
            "ratio",
            ratio,
            "large enough to keep at least one pixel",
        ));
    }

    let nearest = |v: usize, limit: usize| ((v as f64 / ratio).floor() as usize).min(limit - 1);
    Ok(PixelBuffer::build(
        out_width as usize,
        out_height as usize,
        |x, y| source.get(nearest(x, width), nearest(y, height)),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(levels: &[u8]) -> PixelBuffer {
        PixelBuffer::from_fn(levels.len(), 1, |x, _| Rgb::gray(levels[x])).unwrap()
    }

    fn levels(img: &PixelBuffer, y: usize) -> Vec<u8> {
        (0..img.width()).map(|x| img.get(x, y).r).collect()
    }

    #[test]
    fn test_upscale_taps_count() {
        for (len, ratio) in [(1, 1.0), (5, 1.0), (5, 1.5), (7, 2.0), (3, 3.7)] {
            let taps = upscale_taps(len, ratio);
            assert_eq!(taps.len(), (len as f64 * ratio).floor() as usize + 1);
            assert_eq!(taps.last(), Some(&Tap::Copy(len - 1)));
        }
    }

    #[test]
    fn test_upscale_ratio_one_adds_black_blend() {
        let out = scale(&row(&[10, 20, 30]), 1.0).unwrap();
        assert_eq!(out.dimensions(), (4, 2));
        // Bottom row: horizontal pass copied verbatim
        assert_eq!(levels(&out, 1), vec![5, 10, 20, 30]);
        // Top row: blended halfway from black
        assert_eq!(levels(&out, 0), vec![3, 5, 10, 15]);
    }

    #[test]
    fn test_upscale_weights_decrease_toward_left() {
        let out = scale(&row(&[90, 180]), 2.0).unwrap();
        assert_eq!(out.dimensions(), (5, 3));
        assert_eq!(levels(&out, 2), vec![30, 60, 90, 135, 180]);
    }

    #[test]
    fn test_upscale_fractional_ratio_dimensions() {
        let img = PixelBuffer::filled(5, 3, Rgb::gray(200)).unwrap();
        let out = scale(&img, 1.5).unwrap();
        assert_eq!(out.dimensions(), (8, 5));
        // Interior of a flat image stays flat
        assert_eq!(out.get(7, 4), Rgb::gray(200));
    }

    #[test]
    fn test_downscale_half_of_four() {
        let img = PixelBuffer::from_fn(4, 4, |x, y| Rgb::new(x as u8, y as u8, 9)).unwrap();
        let out = scale(&img, 0.5).unwrap();
        assert_eq!(out.dimensions(), (1, 1));
        assert_eq!(out.get(0, 0), img.get(0, 0));
    }

    #[test]
    fn test_downscale_nearest_mapping() {
        let img = PixelBuffer::from_fn(10, 10, |x, y| Rgb::new(x as u8, y as u8, 0)).unwrap();
        let out = scale(&img, 0.5).unwrap();
        assert_eq!(out.dimensions(), (4, 4));
        assert_eq!(out.get(3, 1), Rgb::new(6, 2, 0));
    }

    #[test]
    fn test_round_trip_dimensions() {
        let img = PixelBuffer::filled(8, 6, Rgb::gray(100)).unwrap();
        let up = scale(&img, 2.0).unwrap();
        assert_eq!(up.dimensions(), (17, 13));
        let down = scale(&up, 0.5).unwrap();
        assert_eq!(down.dimensions(), (7, 5));
    }

    #[test]
    fn test_invalid_ratios() {
        let img = PixelBuffer::new(4, 4).unwrap();
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                scale(&img, bad),
                Err(EffectError::ParameterOutOfRange { parameter: "ratio", .. })
            ));
        }
        // floor(4 * 0.25) - 1 = 0
        assert!(scale(&img, 0.25).is_err());
    }

    #[test]
    fn test_huge_ratio_rejected() {
        let img = PixelBuffer::new(2, 2).unwrap();
        for huge in [1e20, 1e9, 20_000.0] {
            assert!(matches!(
                scale(&img, huge),
                Err(EffectError::ParameterOutOfRange { parameter: "ratio", .. })
            ));
        }
        assert_eq!(upscaled_len(2, 1e20), None);
        assert_eq!(upscaled_len(3, 2.0), Some(7));
    }
}
