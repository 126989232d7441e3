//! Pixel storage shared by every effect.
//!
//! A [`PixelBuffer`] is an `(height, width, 3)` u8 array in row-major order,
//! the same layout the numpy and WASM bindings exchange. Effects never mutate
//! their input: each one reads a buffer by reference and returns a new one.

use ndarray::{Array3, ArrayView3, Axis};
use rayon::prelude::*;

use crate::error::{EffectError, Result};

/// An 8-bit RGB color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    pub const fn gray(v: u8) -> Self {
        Rgb { r: v, g: v, b: v }
    }

    /// Unnormalized brightness: the plain channel sum, 0..=765.
    #[inline]
    pub fn total(self) -> i32 {
        self.r as i32 + self.g as i32 + self.b as i32
    }

    #[inline]
    pub fn is_black(self) -> bool {
        self == Rgb::BLACK
    }

    /// Apply `f` to each channel.
    #[inline]
    pub fn map(self, f: impl Fn(u8) -> u8) -> Self {
        Rgb::new(f(self.r), f(self.g), f(self.b))
    }

    /// Unpack a `0xRRGGBB` value. Bits above 24 are ignored.
    pub fn from_packed(packed: u32) -> Self {
        Rgb::new((packed >> 16) as u8, (packed >> 8) as u8, packed as u8)
    }

    /// Pack as `0xRRGGBB`.
    pub fn packed(self) -> u32 {
        (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }
}

/// Saturate an integer channel value into 0..=255.
#[inline]
pub fn clamp_channel(v: i32) -> u8 {
    v.clamp(0, 255) as u8
}

/// Truncate toward zero, then saturate into 0..=255. NaN maps to 0.
#[inline]
pub fn clamp_channel_f64(v: f64) -> u8 {
    if v.is_nan() {
        return 0;
    }
    v.trunc().clamp(0.0, 255.0) as u8
}

/// A dense RGB image with both sides at least one pixel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    data: Array3<u8>,
}

impl PixelBuffer {
    /// Black image of the given size.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        check_dimensions(width, height)?;
        Ok(PixelBuffer {
            data: Array3::zeros((height, width, 3)),
        })
    }

    /// Image where every pixel is `color`.
    pub fn filled(width: usize, height: usize, color: Rgb) -> Result<Self> {
        check_dimensions(width, height)?;
        Ok(Self::build(width, height, |_, _| color))
    }

    /// Build an image by evaluating `f(x, y)` for every pixel. Rows are
    /// evaluated in parallel.
    pub fn from_fn<F>(width: usize, height: usize, f: F) -> Result<Self>
    where
        F: Fn(usize, usize) -> Rgb + Sync,
    {
        check_dimensions(width, height)?;
        Ok(Self::build(width, height, f))
    }

    /// Dimensions must already be validated.
    pub(crate) fn build<F>(width: usize, height: usize, f: F) -> Self
    where
        F: Fn(usize, usize) -> Rgb + Sync,
    {
        let mut data = Array3::<u8>::zeros((height, width, 3));
        data.axis_iter_mut(Axis(0))
            .into_par_iter()
            .enumerate()
            .for_each(|(y, mut row)| {
                for x in 0..width {
                    let c = f(x, y);
                    row[[x, 0]] = c.r;
                    row[[x, 1]] = c.g;
                    row[[x, 2]] = c.b;
                }
            });
        PixelBuffer { data }
    }

    /// Wrap an `(height, width, 3)` array.
    pub fn from_array(data: Array3<u8>) -> Result<Self> {
        let (height, width, channels) = data.dim();
        if channels != 3 {
            return Err(EffectError::InvalidBuffer {
                expected: height * width * 3,
                actual: data.len(),
            });
        }
        check_dimensions(width, height)?;
        if !data.is_standard_layout() {
            return Ok(PixelBuffer {
                data: data.as_standard_layout().into_owned(),
            });
        }
        // A sliced array keeps its whole allocation; drop what lies outside
        // the view so the buffer starts at offset zero.
        let len = data.len();
        let (mut raw, offset) = data.into_raw_vec_and_offset();
        let start = offset.unwrap_or(0);
        raw.truncate(start + len);
        raw.drain(..start);
        let actual = raw.len();
        let data = Array3::from_shape_vec((height, width, 3), raw).map_err(|_| {
            EffectError::InvalidBuffer {
                expected: len,
                actual,
            }
        })?;
        Ok(PixelBuffer { data })
    }

    /// Wrap interleaved RGB bytes, row-major.
    pub fn from_raw(width: usize, height: usize, raw: Vec<u8>) -> Result<Self> {
        let expected = check_dimensions(width, height)?;
        let actual = raw.len();
        if actual != expected {
            return Err(EffectError::InvalidBuffer { expected, actual });
        }
        let data = Array3::from_shape_vec((height, width, 3), raw)
            .map_err(|_| EffectError::InvalidBuffer { expected, actual })?;
        Ok(PixelBuffer { data })
    }

    /// Build from one `0xRRGGBB` value per pixel, row-major.
    pub fn from_packed(width: usize, height: usize, packed: &[u32]) -> Result<Self> {
        let expected = check_dimensions(width, height)? / 3;
        if packed.len() != expected {
            return Err(EffectError::InvalidBuffer {
                expected,
                actual: packed.len(),
            });
        }
        Ok(Self::build(width, height, |x, y| {
            Rgb::from_packed(packed[y * width + x])
        }))
    }

    /// One `0xRRGGBB` value per pixel, row-major.
    pub fn to_packed(&self) -> Vec<u32> {
        let (width, height) = self.dimensions();
        let mut packed = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                packed.push(self.get(x, y).packed());
            }
        }
        packed
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.data.dim().1
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.data.dim().0
    }

    #[inline]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width(), self.height())
    }

    /// Color at `(x, y)`. Panics when out of bounds, like slice indexing.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Rgb {
        Rgb::new(
            self.data[[y, x, 0]],
            self.data[[y, x, 1]],
            self.data[[y, x, 2]],
        )
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, color: Rgb) {
        self.data[[y, x, 0]] = color.r;
        self.data[[y, x, 1]] = color.g;
        self.data[[y, x, 2]] = color.b;
    }

    /// Whether `(x, y)`, given as signed coordinates, lies inside the image.
    #[inline]
    pub fn contains(&self, x: isize, y: isize) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width() && (y as usize) < self.height()
    }

    pub fn as_array(&self) -> ArrayView3<'_, u8> {
        self.data.view()
    }

    pub fn into_array(self) -> Array3<u8> {
        self.data
    }

    /// Interleaved RGB bytes, row-major.
    pub fn into_raw(self) -> Vec<u8> {
        self.data.into_raw_vec_and_offset().0
    }
}

/// Number of channel values in a `width` x `height` image. Fails for a zero
/// side or a size an array cannot address.
fn check_dimensions(width: usize, height: usize) -> Result<usize> {
    width
        .checked_mul(height)
        .and_then(|pixels| pixels.checked_mul(3))
        .filter(|&len| width > 0 && height > 0 && len <= isize::MAX as usize)
        .ok_or(EffectError::InvalidDimensions { width, height })
}
