//! Skeleton extraction from the brightness contour.
//!
//! The contour (see [`super::edge::contour`]) outlines shapes. For every pixel
//! the distance field holds the shortest of the eight compass distances to a
//! contour pixel, or `None` when at least one compass ray leaves the image
//! without meeting the contour. Pixels whose distance is a local maximum form
//! the skeleton (medial axis).
//!
//! `None` orders below every `Some`, so it behaves as "less than zero" both
//! when taking the minimum over directions and when comparing neighbors.

use log::debug;
use ndarray::{Array2, Zip};

use super::core::{binary, is_border, COMPASS};
use super::edge::contour;
use crate::buffer::PixelBuffer;

/// Extract the skeleton.
///
/// # Arguments
/// * `source` - Input image
/// * `cutoff` - Contour cutoff, as for [`contour`]
///
/// # Returns
/// Black/white image, black on the skeleton, white frame
pub fn skeleton(source: &PixelBuffer, cutoff: i32) -> PixelBuffer {
    debug!(
        "skeleton {}x{} cutoff={}",
        source.width(),
        source.height(),
        cutoff
    );

    let edges = contour(source, cutoff);
    let field = distance_field(&edges);
    let (width, height) = edges.dimensions();

    PixelBuffer::build(width, height, |x, y| {
        if is_border(x, y, width, height) {
            return binary(false);
        }
        let here = field[[y, x]];
        match here {
            None | Some(0) => binary(false),
            Some(_) => {
                let is_peak = COMPASS.iter().all(|&(dx, dy)| {
                    let (nx, ny) = ((x as isize + dx) as usize, (y as isize + dy) as usize);
                    field[[ny, nx]] <= here
                });
                binary(is_peak)
            }
        }
    })
}

/// Per-pixel minimum compass distance to a black pixel of `edges`.
pub fn distance_field(edges: &PixelBuffer) -> Array2<Option<u32>> {
    let (width, height) = edges.dimensions();
    let mut field = Array2::<Option<u32>>::from_elem((height, width), None);

    Zip::indexed(&mut field).par_for_each(|(y, x), d| {
        *d = COMPASS
            .iter()
            .map(|&(dx, dy)| march(edges, x, y, dx, dy))
            .min()
            .flatten();
    });

    field
}

/// Steps from `(x, y)` along `(dx, dy)` to the first black pixel, counting
/// the start pixel as step 0. `None` if the ray leaves the image first.
fn march(edges: &PixelBuffer, x: usize, y: usize, dx: isize, dy: isize) -> Option<u32> {
    let (mut cx, mut cy) = (x as isize, y as isize);
    let mut steps = 0;
    while edges.contains(cx, cy) {
        if edges.get(cx as usize, cy as usize).is_black() {
            return Some(steps);
        }
        cx += dx;
        cy += dy;
        steps += 1;
    }
    None
}
