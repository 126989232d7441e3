//! Noise reduction: trimmed median filter.
//!
//! Each pixel is replaced by the median of its square neighborhood, ranked by
//! brightness (channel sum), after the near-darkest and near-brightest
//! neighbors have been discarded. The center pixel is not part of its own
//! neighborhood. Every output pixel reads only the unmodified input, so rows
//! are processed in parallel.

use log::debug;

use crate::buffer::{PixelBuffer, Rgb};
use crate::error::{EffectError, Result};

pub const MIN_MEDIAN_RADIUS: u32 = 1;
pub const MAX_MEDIAN_RADIUS: u32 = 10;

/// Neighbors whose brightness lies within this distance of the darkest or
/// brightest one are dropped before the median is taken.
pub const TRIM_MARGIN: i32 = 15;

// ============================================================================
// Median
// ============================================================================

/// Apply the trimmed median filter.
///
/// # Arguments
/// * `source` - Input image
/// * `radius` - Window radius (1-10); the window is `(2r+1)^2` minus the center,
///   clipped at the image border
///
/// # Returns
/// Filtered image, or `ParameterOutOfRange` if `radius` is outside 1-10
pub fn median(source: &PixelBuffer, radius: u32) -> Result<PixelBuffer> {
    if !(MIN_MEDIAN_RADIUS..=MAX_MEDIAN_RADIUS).contains(&radius) {
        return Err(EffectError::out_of_range("radius", radius, "1..=10"));
    }
    debug!(
        "median {}x{} radius={}",
        source.width(),
        source.height(),
        radius
    );

    let (width, height) = source.dimensions();
    let radius = radius as usize;
    let window = (2 * radius + 1) * (2 * radius + 1);

    Ok(PixelBuffer::build(width, height, |x, y| {
        let left = x.saturating_sub(radius);
        let right = (x + radius).min(width - 1);
        let top = y.saturating_sub(radius);
        let bottom = (y + radius).min(height - 1);

        // Column-major collection order; the stable sort below keeps it for
        // equal brightness
        let mut values: Vec<Rgb> = Vec::with_capacity(window);
        for i in left..=right {
            for j in top..=bottom {
                if i == x && j == y {
                    continue;
                }
                values.push(source.get(i, j));
            }
        }

        trimmed_median(values).unwrap_or_else(|| source.get(x, y))
    }))
}

/// Median of `values` by brightness after trimming both extremes.
///
/// Returns `None` when fewer than two values survive trimming.
fn trimmed_median(mut values: Vec<Rgb>) -> Option<Rgb> {
    values.sort_by_key(|c| c.total());
    let min_total = values.first()?.total();
    let max_total = values.last()?.total();

    values.retain(|c| {
        let total = c.total();
        total - TRIM_MARGIN >= min_total && total + TRIM_MARGIN <= max_total
    });

    if values.len() < 2 {
        return None;
    }
    Some(values[values.len() / 2])
}
