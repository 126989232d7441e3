//! Core utilities shared by the binary-map filters.
//!
//! Contour, skeleton and thinning all produce pure black/white images where
//! black marks the feature and the one-pixel frame is always white.

use crate::buffer::{PixelBuffer, Rgb};

/// The eight compass directions as `(dx, dy)`, clockwise from north.
pub const COMPASS: [(isize, isize); 8] = [
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

/// Whether `(x, y)` lies on the one-pixel frame of a `width` x `height` image.
#[inline]
pub fn is_border(x: usize, y: usize, width: usize, height: usize) -> bool {
    x == 0 || y == 0 || x + 1 >= width || y + 1 >= height
}

/// Paint the one-pixel frame white.
pub fn whiten_border(image: &mut PixelBuffer) {
    let (width, height) = image.dimensions();
    for x in 0..width {
        image.set(x, 0, Rgb::WHITE);
        image.set(x, height - 1, Rgb::WHITE);
    }
    for y in 0..height {
        image.set(0, y, Rgb::WHITE);
        image.set(width - 1, y, Rgb::WHITE);
    }
}

#[inline]
pub fn binary(black: bool) -> Rgb {
    if black {
        Rgb::BLACK
    } else {
        Rgb::WHITE
    }
}

/// Black at `(x + dx, y + dy)`; anything outside the image counts as white.
#[inline]
pub fn is_black_at(image: &PixelBuffer, x: usize, y: usize, dx: isize, dy: isize) -> bool {
    let (nx, ny) = (x as isize + dx, y as isize + dy);
    image.contains(nx, ny) && image.get(nx as usize, ny as usize).is_black()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_border_detection() {
        assert!(is_border(0, 2, 5, 5));
        assert!(is_border(4, 2, 5, 5));
        assert!(is_border(2, 4, 5, 5));
        assert!(!is_border(2, 2, 5, 5));
        // Every pixel of a 2-wide image is on the frame
        assert!(is_border(1, 1, 2, 5));
    }

    #[test]
    fn test_whiten_border() {
        let mut img = PixelBuffer::new(4, 3).unwrap();
        whiten_border(&mut img);
        for y in 0..3 {
            for x in 0..4 {
                let expected = if is_border(x, y, 4, 3) { Rgb::WHITE } else { Rgb::BLACK };
                assert_eq!(img.get(x, y), expected);
            }
        }
    }

    #[test]
    fn test_is_black_at_outside_is_white() {
        let img = PixelBuffer::new(2, 2).unwrap();
        assert!(is_black_at(&img, 0, 0, 1, 1));
        assert!(!is_black_at(&img, 0, 0, -1, 0));
    }

    #[test]
    fn test_compass_unique() {
        for (i, a) in COMPASS.iter().enumerate() {
            assert_ne!(*a, (0, 0));
            assert!(COMPASS[i + 1..].iter().all(|b| b != a));
        }
    }
}
