//! Morphology: connectivity-preserving thinning.
//!
//! Thinning erodes black pixels of a binary image while keeping the
//! 4-connected structure intact. It runs as one forward raster sweep followed
//! by one reverse sweep over a single working copy, so a pixel sees the
//! erasures already made earlier in the same sweep. Sweeps are therefore
//! strictly sequential.
//!
//! Only exact black counts as black; every other color is background.

use log::debug;

use super::core::{is_black_at, whiten_border};
use crate::buffer::{PixelBuffer, Rgb};

// ============================================================================
// Thinning
// ============================================================================

/// Apply one forward and one reverse thinning sweep.
///
/// # Arguments
/// * `source` - Binary (black/white) image
///
/// # Returns
/// Thinned image with a white frame
pub fn thin(source: &PixelBuffer) -> PixelBuffer {
    debug!("thin {}x{}", source.width(), source.height());

    let mut work = source.clone();
    whiten_border(&mut work);

    let (width, height) = work.dimensions();
    if width < 3 || height < 3 {
        return work;
    }

    forward_sweep(&mut work);
    reverse_sweep(&mut work);

    work
}

/// Visit interior pixels top-left to bottom-right. `work` is at least 3x3.
fn forward_sweep(work: &mut PixelBuffer) {
    let (width, height) = work.dimensions();
    for y in 1..height - 1 {
        for x in 1..width - 1 {
            thin_pixel(work, x, y);
        }
    }
}

/// Visit interior pixels bottom-right to top-left. `work` is at least 3x3.
fn reverse_sweep(work: &mut PixelBuffer) {
    let (width, height) = work.dimensions();
    for y in (1..height - 1).rev() {
        for x in (1..width - 1).rev() {
            thin_pixel(work, x, y);
        }
    }
}

/// Erase the interior pixel at `(x, y)` if it is removable.
fn thin_pixel(work: &mut PixelBuffer, x: usize, y: usize) {
    if !work.get(x, y).is_black() {
        return;
    }
    if is_removable(work, x, y) {
        work.set(x, y, Rgb::WHITE);
    }
}

/// A black pixel with at least two black 4-neighbors is removable unless it
/// bridges two opposite neighbors or closes a corner whose diagonal is white.
fn is_removable(work: &PixelBuffer, x: usize, y: usize) -> bool {
    let black = |dx: isize, dy: isize| is_black_at(work, x, y, dx, dy);

    let left = black(-1, 0);
    let right = black(1, 0);
    let top = black(0, -1);
    let bottom = black(0, 1);

    let neighbors = [left, right, top, bottom].iter().filter(|&&b| b).count();
    if neighbors < 2 {
        return false;
    }

    let keep = (left && right && !top && !bottom)
        || (top && bottom && !left && !right)
        || (top && right && !black(1, -1))
        || (top && left && !black(-1, -1))
        || (bottom && right && !black(1, 1))
        || (bottom && left && !black(-1, 1));

    !keep
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_mask(rows: &[&str]) -> PixelBuffer {
        PixelBuffer::from_fn(rows[0].len(), rows.len(), |x, y| {
            if rows[y].as_bytes()[x] == b'#' {
                Rgb::BLACK
            } else {
                Rgb::WHITE
            }
        })
        .unwrap()
    }

    fn to_mask(img: &PixelBuffer) -> Vec<String> {
        (0..img.height())
            .map(|y| {
                (0..img.width())
                    .map(|x| if img.get(x, y).is_black() { '#' } else { '.' })
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_all_white_is_noop() {
        let img = PixelBuffer::filled(7, 5, Rgb::WHITE).unwrap();
        assert_eq!(thin(&img), img);
    }

    #[test]
    fn test_border_forced_white() {
        let img = PixelBuffer::new(4, 4).unwrap();
        let out = thin(&img);
        assert_eq!(out.get(0, 0), Rgb::WHITE);
        assert_eq!(out.get(3, 2), Rgb::WHITE);
    }

    #[test]
    fn test_thin_line_kept() {
        let img = from_mask(&[".....", ".....", ".###.", ".....", "....."]);
        assert_eq!(thin(&img), img);
    }

    #[test]
    fn test_block_sees_earlier_erasure() {
        // (1,1) goes first; (2,2) then finds its top-left diagonal white and
        // is kept as a corner
        let img = from_mask(&["....", ".##.", ".##.", "...."]);
        let out = thin(&img);
        assert_eq!(to_mask(&out), vec!["....", "..#.", ".##.", "...."]);
    }

    #[test]
    fn test_corner_guard() {
        // An L-shape elbow with a white diagonal is kept
        let img = from_mask(&[".....", "..#..", "..##.", ".....", "....."]);
        assert_eq!(thin(&img), img);
    }

    #[test]
    fn test_bottom_right_corner_guard() {
        // Elbow at (2,1) has right and bottom neighbors, bottom-right white
        let img = from_mask(&[".....", "..##.", "..#..", ".....", "....."]);
        assert_eq!(thin(&img), img);
    }

    #[test]
    fn test_bottom_left_corner_guard() {
        // Elbow at (2,1) has left and bottom neighbors, bottom-left white
        let img = from_mask(&[".....", ".##..", "..#..", ".....", "....."]);
        assert_eq!(thin(&img), img);
    }

    #[test]
    fn test_reverse_sweep_order() {
        // (2,2) goes first, so (1,1) then finds its bottom-right diagonal
        // white and is kept; the forward sweep keeps (2,2) instead
        let mut work = from_mask(&["....", ".##.", ".##.", "...."]);
        reverse_sweep(&mut work);
        assert_eq!(to_mask(&work), vec!["....", ".##.", ".#..", "...."]);

        let mut work = from_mask(&["....", ".##.", ".##.", "...."]);
        forward_sweep(&mut work);
        assert_eq!(to_mask(&work), vec!["....", "..#.", ".##.", "...."]);
    }

    #[test]
    fn test_thinned_image_is_stable() {
        let img = from_mask(&[
            "........",
            ".####...",
            ".#####..",
            "..####..",
            "...###..",
            ".....##.",
            "........",
        ]);
        let once = thin(&img);
        assert_eq!(thin(&once), once);
    }

    #[test]
    fn test_tiny_image_only_frame() {
        let img = PixelBuffer::new(2, 2).unwrap();
        let out = thin(&img);
        assert_eq!(out, PixelBuffer::filled(2, 2, Rgb::WHITE).unwrap());
    }
}
