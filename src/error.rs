//! Error type shared by every effect and by the session.
//!
//! All failures are input-validation failures: they are reported before any
//! output is produced and never leave a partially written buffer behind.

use thiserror::Error;

use crate::params::EffectKind;

#[derive(Debug, Error)]
pub enum EffectError {
    #[error("parameter `{parameter}` out of range: got {value}, expected {expected}")]
    ParameterOutOfRange {
        parameter: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error(
        "operand image is {actual_width}x{actual_height}, \
         must be at least {expected_width}x{expected_height}"
    )]
    DimensionMismatch {
        expected_width: usize,
        expected_height: usize,
        actual_width: usize,
        actual_height: usize,
    },

    #[error("effect `{0}` is not available")]
    UnsupportedEffect(EffectKind),

    #[error("image dimensions must be non-zero, got {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("pixel data has {actual} values, expected {expected}")]
    InvalidBuffer { expected: usize, actual: usize },

    #[error("subtraction requires a second image")]
    MissingOperand,

    #[error("no source image loaded")]
    NoSourceImage,

    #[error("no effect has been applied yet")]
    NoResultImage,

    #[error("source image has no file path to save to")]
    NoSavePath,

    #[error("image i/o failed: {0}")]
    Io(#[from] std::io::Error),
}

impl EffectError {
    pub(crate) fn out_of_range(
        parameter: &'static str,
        value: impl ToString,
        expected: &'static str,
    ) -> Self {
        EffectError::ParameterOutOfRange {
            parameter,
            value: value.to_string(),
            expected,
        }
    }
}

pub type Result<T> = std::result::Result<T, EffectError>;
