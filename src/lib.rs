//! pixelfx
//!
//! Raster image effects over 8-bit RGB buffers, with optional Python
//! bindings via PyO3 and WASM bindings for JavaScript.
//!
//! ## Image Format
//! Images are [`PixelBuffer`]s: `(height, width, 3)` u8 arrays, row-major.
//! Both sides are at least one pixel. There is no alpha channel.
//!
//! ## Effects
//! - **Pixel-wise**: greyscale, contrast, gamma correction, subtraction
//! - **Noise**: trimmed median filter
//! - **Geometry**: scale (linear upscale, nearest-neighbor downscale)
//! - **Binary maps**: contour, skeleton, thinning
//!
//! Every effect reads its input by reference and returns a new buffer, or an
//! [`EffectError`] before any work is done. [`Engine`] keeps the current
//! source and the last result for interactive use.
//!
//! ```
//! use pixelfx::{Engine, EffectParams, PixelBuffer, Rgb};
//!
//! let mut engine = Engine::new();
//! engine.set_source(PixelBuffer::filled(8, 8, Rgb::new(30, 60, 90))?);
//! let grey = engine.apply(&EffectParams::Greyscale, None)?;
//! assert_eq!(grey.get(0, 0), Rgb::gray(60));
//! # Ok::<(), pixelfx::EffectError>(())
//! ```

pub mod buffer;
pub mod engine;
pub mod error;
pub mod filters;
pub mod params;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use buffer::{clamp_channel, clamp_channel_f64, PixelBuffer, Rgb};
pub use engine::{render, EffectRegistry, Engine, ImageIo, PluggableEffect};
pub use error::{EffectError, Result};
pub use params::{EffectKind, EffectParams};

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use numpy::{IntoPyArray, PyArray3, PyReadonlyArray3};
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;

    use crate::buffer::PixelBuffer;
    use crate::error::EffectError;
    use crate::filters;

    impl From<EffectError> for PyErr {
        fn from(err: EffectError) -> PyErr {
            PyValueError::new_err(err.to_string())
        }
    }

    fn to_buffer(image: &PyReadonlyArray3<'_, u8>) -> PyResult<PixelBuffer> {
        Ok(PixelBuffer::from_array(image.as_array().to_owned())?)
    }

    fn to_py<'py>(py: Python<'py>, image: PixelBuffer) -> Bound<'py, PyArray3<u8>> {
        image.into_array().into_pyarray(py)
    }

    // ========================================================================
    // Pixel-wise Filters
    // ========================================================================

    /// Average the channels of an (H, W, 3) u8 image.
    #[pyfunction]
    pub fn greyscale<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let input = to_buffer(&image)?;
        Ok(to_py(py, filters::greyscale(&input)))
    }

    /// Adjust contrast; `amount` is clamped to [-160, 160].
    #[pyfunction]
    pub fn contrast<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        amount: i32,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let input = to_buffer(&image)?;
        Ok(to_py(py, filters::contrast(&input, amount)))
    }

    #[pyfunction]
    pub fn gamma<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        gamma: f64,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let input = to_buffer(&image)?;
        Ok(to_py(py, filters::gamma(&input, gamma)?))
    }

    /// Subtract `other` from `image`; `other` must be at least as large.
    #[pyfunction]
    pub fn subtract<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        other: PyReadonlyArray3<'py, u8>,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let input = to_buffer(&image)?;
        let other = to_buffer(&other)?;
        Ok(to_py(py, filters::subtract(&input, &other)?))
    }

    // ========================================================================
    // Spatial Filters
    // ========================================================================

    /// Trimmed median filter, radius 1-10.
    #[pyfunction]
    pub fn median<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        radius: u32,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let input = to_buffer(&image)?;
        Ok(to_py(py, filters::median(&input, radius)?))
    }

    #[pyfunction]
    pub fn scale<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        ratio: f64,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let input = to_buffer(&image)?;
        Ok(to_py(py, filters::scale(&input, ratio)?))
    }

    #[pyfunction]
    pub fn contour<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        cutoff: i32,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let input = to_buffer(&image)?;
        Ok(to_py(py, filters::contour(&input, cutoff)))
    }

    #[pyfunction]
    pub fn skeleton<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        cutoff: i32,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let input = to_buffer(&image)?;
        Ok(to_py(py, filters::skeleton(&input, cutoff)))
    }

    #[pyfunction]
    pub fn thin<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let input = to_buffer(&image)?;
        Ok(to_py(py, filters::thin(&input)))
    }

    /// pixelfx extension module
    #[pymodule]
    pub fn pixelfx(m: &Bound<'_, PyModule>) -> PyResult<()> {
        // Pixel-wise filters
        m.add_function(wrap_pyfunction!(greyscale, m)?)?;
        m.add_function(wrap_pyfunction!(contrast, m)?)?;
        m.add_function(wrap_pyfunction!(gamma, m)?)?;
        m.add_function(wrap_pyfunction!(subtract, m)?)?;

        // Spatial filters
        m.add_function(wrap_pyfunction!(median, m)?)?;
        m.add_function(wrap_pyfunction!(scale, m)?)?;

        // Binary maps
        m.add_function(wrap_pyfunction!(contour, m)?)?;
        m.add_function(wrap_pyfunction!(skeleton, m)?)?;
        m.add_function(wrap_pyfunction!(thin, m)?)?;

        Ok(())
    }
}

#[cfg(feature = "python")]
pub use python::pixelfx;
