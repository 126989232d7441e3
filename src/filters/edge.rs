//! Edge detection: brightness contour.
//!
//! Marks pixels that sit next to a markedly brighter 4-neighbor. The test is
//! one-sided, so it traces the dark side of a boundary rather than a
//! symmetric gradient magnitude.
//!
//! Output is binary: black on the contour, white elsewhere, white frame.

use log::debug;

use super::core::{binary, is_border};
use crate::buffer::PixelBuffer;

const FOUR_NEIGHBORS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Extract the brightness contour.
///
/// # Arguments
/// * `source` - Input image
/// * `cutoff` - Per-channel brightness step; a neighbor must be brighter by
///   more than `3 * cutoff` in channel sum to mark the pixel
///
/// # Returns
/// Black/white image of the same size
pub fn contour(source: &PixelBuffer, cutoff: i32) -> PixelBuffer {
    debug!(
        "contour {}x{} cutoff={}",
        source.width(),
        source.height(),
        cutoff
    );

    let (width, height) = source.dimensions();
    // Brightness is an unnormalized sum of three channels
    let threshold = 3 * cutoff as i64;

    PixelBuffer::build(width, height, |x, y| {
        if is_border(x, y, width, height) {
            return binary(false);
        }
        let val = source.get(x, y).total() as i64;
        let marked = FOUR_NEIGHBORS.iter().any(|&(dx, dy)| {
            let n = source.get((x as isize + dx) as usize, (y as isize + dy) as usize);
            n.total() as i64 - val > threshold
        });
        binary(marked)
    })
}
