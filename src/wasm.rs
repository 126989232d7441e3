//! WebAssembly exports for pixelfx effects.
//!
//! These functions are exposed to JavaScript via wasm-bindgen. Images travel
//! as flat RGB byte arrays (length = width * height * 3); invalid dimensions
//! or parameters surface as JavaScript errors.

use wasm_bindgen::prelude::*;

use crate::buffer::PixelBuffer;
use crate::error::EffectError;
use crate::filters;

fn to_js(err: EffectError) -> JsError {
    JsError::new(&err.to_string())
}

fn to_buffer(data: &[u8], width: usize, height: usize) -> Result<PixelBuffer, JsError> {
    PixelBuffer::from_raw(width, height, data.to_vec()).map_err(to_js)
}

// ============================================================================
// Pixel-wise Filters
// ============================================================================

/// Average the channels of an RGB image.
///
/// # Arguments
/// * `data` - Flat array of RGB bytes (length = width * height * 3)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
///
/// # Returns
/// Flat array of RGB bytes with R=G=B
#[wasm_bindgen]
pub fn greyscale_wasm(data: &[u8], width: usize, height: usize) -> Result<Vec<u8>, JsError> {
    let input = to_buffer(data, width, height)?;
    Ok(filters::greyscale(&input).into_raw())
}

#[wasm_bindgen]
pub fn contrast_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    amount: i32,
) -> Result<Vec<u8>, JsError> {
    let input = to_buffer(data, width, height)?;
    Ok(filters::contrast(&input, amount).into_raw())
}

#[wasm_bindgen]
pub fn gamma_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    gamma: f64,
) -> Result<Vec<u8>, JsError> {
    let input = to_buffer(data, width, height)?;
    Ok(filters::gamma(&input, gamma).map_err(to_js)?.into_raw())
}

/// Subtract a second image of at least the same size.
#[wasm_bindgen]
pub fn subtract_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    other: &[u8],
    other_width: usize,
    other_height: usize,
) -> Result<Vec<u8>, JsError> {
    let input = to_buffer(data, width, height)?;
    let other = to_buffer(other, other_width, other_height)?;
    Ok(filters::subtract(&input, &other).map_err(to_js)?.into_raw())
}

// ============================================================================
// Spatial Filters
// ============================================================================

#[wasm_bindgen]
pub fn median_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    radius: u32,
) -> Result<Vec<u8>, JsError> {
    let input = to_buffer(data, width, height)?;
    Ok(filters::median(&input, radius).map_err(to_js)?.into_raw())
}

/// Scale an image. The output size differs from the input; JavaScript reads
/// it back from the returned array as `[width, height, ...rgb]` encoded in
/// the first eight bytes (little-endian u32 each).
#[wasm_bindgen]
pub fn scale_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    ratio: f64,
) -> Result<Vec<u8>, JsError> {
    let input = to_buffer(data, width, height)?;
    let output = filters::scale(&input, ratio).map_err(to_js)?;
    let (out_width, out_height) = output.dimensions();

    let mut bytes = Vec::with_capacity(8 + out_width * out_height * 3);
    bytes.extend_from_slice(&(out_width as u32).to_le_bytes());
    bytes.extend_from_slice(&(out_height as u32).to_le_bytes());
    bytes.extend(output.into_raw());
    Ok(bytes)
}

// ============================================================================
// Binary Maps
// ============================================================================

#[wasm_bindgen]
pub fn contour_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    cutoff: i32,
) -> Result<Vec<u8>, JsError> {
    let input = to_buffer(data, width, height)?;
    Ok(filters::contour(&input, cutoff).into_raw())
}

#[wasm_bindgen]
pub fn skeleton_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    cutoff: i32,
) -> Result<Vec<u8>, JsError> {
    let input = to_buffer(data, width, height)?;
    Ok(filters::skeleton(&input, cutoff).into_raw())
}

#[wasm_bindgen]
pub fn thin_wasm(data: &[u8], width: usize, height: usize) -> Result<Vec<u8>, JsError> {
    let input = to_buffer(data, width, height)?;
    Ok(filters::thin(&input).into_raw())
}
