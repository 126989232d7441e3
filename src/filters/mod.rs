//! Filter modules for image processing effects.
//!
//! ## Format
//!
//! Every filter takes a [`PixelBuffer`](crate::buffer::PixelBuffer) of 8-bit
//! RGB by reference and returns a freshly allocated one. Inputs are never
//! modified. Every output channel is saturated into 0-255.
//!
//! ## Filter Categories
//!
//! - **Pixel-wise**: greyscale, contrast, gamma, subtraction (built on [`pointwise`])
//! - **Noise**: trimmed median
//! - **Geometry**: scale (linear upscale, nearest-neighbor downscale)
//! - **Binary maps**: contour, skeleton, thinning (black feature on white,
//!   white one-pixel frame)
//!
//! Rows are computed in parallel with rayon wherever each output pixel
//! depends only on the input. Thinning is the exception: its sweeps read
//! their own earlier writes and run sequentially.

pub mod pointwise;
pub mod grayscale;
pub mod color_adjust;
pub mod subtract;
pub mod noise;
pub mod resample;
pub mod core;
pub mod edge;
pub mod skeleton;
pub mod morphology;

pub use color_adjust::{contrast, gamma};
pub use edge::contour;
pub use grayscale::greyscale;
pub use morphology::thin;
pub use noise::median;
pub use pointwise::{apply_pointwise, PixelSample};
pub use resample::scale;
pub use skeleton::skeleton;
pub use subtract::subtract;
