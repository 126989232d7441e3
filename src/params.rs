//! Effect selection and parameters.
//!
//! [`EffectKind`] is the closed set of effects the engine knows about.
//! [`EffectParams`] carries a kind together with only the scalars that kind
//! needs, and deserializes from any serde format:
//!
//! ```
//! use pixelfx::params::EffectParams;
//!
//! let params: EffectParams = serde_json::from_str(r#"{"effect": "median_filter", "radius": 2}"#).unwrap();
//! assert_eq!(params, EffectParams::MedianFilter { radius: 2 });
//! ```
//!
//! Values typed into a free-form text field go through [`parse_int_value`],
//! [`parse_real_value`] and [`EffectParams::from_text`], which apply the
//! lenient policy of the editing surface: unparsable text counts as zero.

use std::fmt;

use log::warn;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectKind {
    Greyscale,
    Contrast,
    GammaCorrection,
    Subtraction,
    MedianFilter,
    Scale,
    Contour,
    Skeleton,
    Thinning,
    LensFlare,
}

impl EffectKind {
    /// Every kind, in selection order.
    pub const ALL: [EffectKind; 10] = [
        EffectKind::Greyscale,
        EffectKind::Contrast,
        EffectKind::GammaCorrection,
        EffectKind::Subtraction,
        EffectKind::MedianFilter,
        EffectKind::Scale,
        EffectKind::Contour,
        EffectKind::Skeleton,
        EffectKind::Thinning,
        EffectKind::LensFlare,
    ];

    pub fn name(self) -> &'static str {
        match self {
            EffectKind::Greyscale => "greyscale",
            EffectKind::Contrast => "contrast",
            EffectKind::GammaCorrection => "gamma correction",
            EffectKind::Subtraction => "subtraction",
            EffectKind::MedianFilter => "median filter",
            EffectKind::Scale => "scale",
            EffectKind::Contour => "contour",
            EffectKind::Skeleton => "skeleton",
            EffectKind::Thinning => "thinning",
            EffectKind::LensFlare => "lens flare",
        }
    }
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An effect together with its parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum EffectParams {
    Greyscale,
    /// Clamped to [-160, 160] when applied.
    Contrast { amount: i32 },
    GammaCorrection { gamma: f64 },
    Subtraction,
    /// Window radius in pixels, 1..=10.
    MedianFilter { radius: u32 },
    Scale { ratio: f64 },
    Contour { cutoff: i32 },
    Skeleton { cutoff: i32 },
    Thinning,
    /// Flare center in source pixel coordinates.
    LensFlare { x: f64, y: f64 },
}

impl EffectParams {
    pub fn kind(&self) -> EffectKind {
        match self {
            EffectParams::Greyscale => EffectKind::Greyscale,
            EffectParams::Contrast { .. } => EffectKind::Contrast,
            EffectParams::GammaCorrection { .. } => EffectKind::GammaCorrection,
            EffectParams::Subtraction => EffectKind::Subtraction,
            EffectParams::MedianFilter { .. } => EffectKind::MedianFilter,
            EffectParams::Scale { .. } => EffectKind::Scale,
            EffectParams::Contour { .. } => EffectKind::Contour,
            EffectParams::Skeleton { .. } => EffectKind::Skeleton,
            EffectParams::Thinning => EffectKind::Thinning,
            EffectParams::LensFlare { .. } => EffectKind::LensFlare,
        }
    }

    /// Build parameters for `kind` from the contents of a value field.
    ///
    /// Integer parameters are parsed as reals and truncated. Negative median
    /// radii become 0 and are rejected later by the filter itself. Lens flare
    /// reads two coordinates separated by a comma or whitespace; missing
    /// ones count as zero.
    pub fn from_text(kind: EffectKind, text: &str) -> Self {
        match kind {
            EffectKind::Greyscale => EffectParams::Greyscale,
            EffectKind::Contrast => EffectParams::Contrast {
                amount: parse_int_value(text),
            },
            EffectKind::GammaCorrection => EffectParams::GammaCorrection {
                gamma: parse_real_value(text),
            },
            EffectKind::Subtraction => EffectParams::Subtraction,
            EffectKind::MedianFilter => EffectParams::MedianFilter {
                radius: parse_int_value(text).max(0) as u32,
            },
            EffectKind::Scale => EffectParams::Scale {
                ratio: parse_real_value(text),
            },
            EffectKind::Contour => EffectParams::Contour {
                cutoff: parse_int_value(text),
            },
            EffectKind::Skeleton => EffectParams::Skeleton {
                cutoff: parse_int_value(text),
            },
            EffectKind::Thinning => EffectParams::Thinning,
            EffectKind::LensFlare => {
                let mut coords = text
                    .split(|c: char| c == ',' || c.is_whitespace())
                    .filter(|part| !part.is_empty())
                    .map(parse_real_value);
                EffectParams::LensFlare {
                    x: coords.next().unwrap_or(0.0),
                    y: coords.next().unwrap_or(0.0),
                }
            }
        }
    }
}

/// Parse a real; unparsable text yields 0.
pub fn parse_real_value(text: &str) -> f64 {
    match text.trim().parse::<f64>() {
        Ok(v) => v,
        Err(_) => {
            warn!("could not parse {:?} as a number, using 0", text);
            0.0
        }
    }
}

/// Parse a real and truncate toward zero; unparsable text yields 0.
/// Values beyond the `i32` range saturate.
pub fn parse_int_value(text: &str) -> i32 {
    parse_real_value(text) as i32
}

/// Whether a value field may hold `text`. Empty text and a lone minus sign
/// are accepted as edits in progress.
pub fn is_acceptable_input(text: &str) -> bool {
    let trimmed = text.trim();
    trimmed.is_empty() || trimmed == "-" || trimmed.parse::<f64>().is_ok()
}
