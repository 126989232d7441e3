//! Effect dispatch and the editing session.
//!
//! [`render`] turns a source image and [`EffectParams`] into a new image.
//! [`Engine`] wraps it with the state an editor keeps around: the current
//! source, the most recent result, and the path the source came from.
//!
//! Reading and writing image files is left to an [`ImageIo`] implementation
//! supplied by the caller. Effects without a built-in algorithm (lens flare)
//! are supplied as [`PluggableEffect`]s.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::buffer::PixelBuffer;
use crate::error::{EffectError, Result};
use crate::filters;
use crate::params::{EffectKind, EffectParams};

/// Loads and stores images in whatever file format the application uses.
pub trait ImageIo {
    fn load(&self, path: &Path) -> Result<PixelBuffer>;
    fn save(&self, path: &Path, image: &PixelBuffer) -> Result<()>;
}

/// An effect implemented outside this crate.
pub trait PluggableEffect: Send + Sync {
    /// The kind this effect handles.
    fn kind(&self) -> EffectKind;

    fn apply(&self, source: &PixelBuffer, params: &EffectParams) -> Result<PixelBuffer>;
}

/// Plugged effects, at most one per kind.
#[derive(Default)]
pub struct EffectRegistry {
    effects: HashMap<EffectKind, Box<dyn PluggableEffect>>,
}

impl EffectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `effect`, replacing any earlier one for the same kind.
    pub fn register(&mut self, effect: Box<dyn PluggableEffect>) {
        self.effects.insert(effect.kind(), effect);
    }

    pub fn get(&self, kind: EffectKind) -> Option<&dyn PluggableEffect> {
        self.effects.get(&kind).map(|e| e.as_ref())
    }

    pub fn contains(&self, kind: EffectKind) -> bool {
        self.effects.contains_key(&kind)
    }
}

/// Kinds with an algorithm in this crate.
pub fn is_builtin(kind: EffectKind) -> bool {
    !matches!(kind, EffectKind::LensFlare)
}

/// Apply `params` to `source`.
///
/// `operand` is the second image for subtraction and ignored otherwise.
/// Kinds without a built-in algorithm are looked up in `plugins`.
pub fn render(
    source: &PixelBuffer,
    params: &EffectParams,
    operand: Option<&PixelBuffer>,
    plugins: &EffectRegistry,
) -> Result<PixelBuffer> {
    match *params {
        EffectParams::Greyscale => Ok(filters::greyscale(source)),
        EffectParams::Contrast { amount } => Ok(filters::contrast(source, amount)),
        EffectParams::GammaCorrection { gamma } => filters::gamma(source, gamma),
        EffectParams::Subtraction => {
            let other = operand.ok_or(EffectError::MissingOperand)?;
            filters::subtract(source, other)
        }
        EffectParams::MedianFilter { radius } => filters::median(source, radius),
        EffectParams::Scale { ratio } => filters::scale(source, ratio),
        EffectParams::Contour { cutoff } => Ok(filters::contour(source, cutoff)),
        EffectParams::Skeleton { cutoff } => Ok(filters::skeleton(source, cutoff)),
        EffectParams::Thinning => Ok(filters::thin(source)),
        EffectParams::LensFlare { .. } => {
            let kind = params.kind();
            let effect = plugins
                .get(kind)
                .ok_or(EffectError::UnsupportedEffect(kind))?;
            effect.apply(source, params)
        }
    }
}

/// An editing session: one current source, at most one result.
///
/// A failed effect leaves both untouched.
#[derive(Default)]
pub struct Engine {
    source: Option<PixelBuffer>,
    result: Option<PixelBuffer>,
    source_path: Option<PathBuf>,
    plugins: EffectRegistry,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Plug in an implementation for a kind without a built-in algorithm.
    pub fn register_effect(&mut self, effect: Box<dyn PluggableEffect>) {
        info!("registered plugged effect `{}`", effect.kind());
        self.plugins.register(effect);
    }

    /// Whether `kind` can currently be applied.
    pub fn supports(&self, kind: EffectKind) -> bool {
        is_builtin(kind) || self.plugins.contains(kind)
    }

    /// Load a new source image and remember its path for saving.
    pub fn load_source(&mut self, io: &impl ImageIo, path: impl AsRef<Path>) -> Result<&PixelBuffer> {
        let path = path.as_ref();
        let image = io.load(path)?;
        info!(
            "loaded {} ({}x{})",
            path.display(),
            image.width(),
            image.height()
        );
        self.source_path = Some(path.to_path_buf());
        self.result = None;
        Ok(self.source.insert(image))
    }

    /// Load a second image, e.g. a subtraction operand, without touching the
    /// session.
    pub fn load_operand(&self, io: &impl ImageIo, path: impl AsRef<Path>) -> Result<PixelBuffer> {
        io.load(path.as_ref())
    }

    /// Install an in-memory source. Clears the result and the save path.
    pub fn set_source(&mut self, image: PixelBuffer) {
        self.source = Some(image);
        self.source_path = None;
        self.result = None;
    }

    pub fn source(&self) -> Option<&PixelBuffer> {
        self.source.as_ref()
    }

    pub fn result(&self) -> Option<&PixelBuffer> {
        self.result.as_ref()
    }

    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    /// Apply an effect to the current source and keep the output as the
    /// result.
    pub fn apply(&mut self, params: &EffectParams, operand: Option<&PixelBuffer>) -> Result<&PixelBuffer> {
        let source = self.source.as_ref().ok_or(EffectError::NoSourceImage)?;
        let output = render(source, params, operand, &self.plugins).map_err(|err| {
            warn!("{} failed: {}", params.kind(), err);
            err
        })?;
        Ok(self.result.insert(output))
    }

    /// Make a copy of the last result the new source.
    pub fn promote_result(&mut self) -> Result<&PixelBuffer> {
        let result = self.result.clone().ok_or(EffectError::NoResultImage)?;
        info!("promoted result ({}x{}) to source", result.width(), result.height());
        Ok(self.source.insert(result))
    }

    /// Write the last result over the file the source was loaded from.
    pub fn save_result(&self, io: &impl ImageIo) -> Result<()> {
        let path = self.source_path.as_deref().ok_or(EffectError::NoSavePath)?;
        self.save_result_to(io, path)
    }

    pub fn save_result_to(&self, io: &impl ImageIo, path: impl AsRef<Path>) -> Result<()> {
        let result = self.result.as_ref().ok_or(EffectError::NoResultImage)?;
        let path = path.as_ref();
        io.save(path, result)?;
        info!("saved result to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Rgb;

    struct Invert;

    impl PluggableEffect for Invert {
        fn kind(&self) -> EffectKind {
            EffectKind::LensFlare
        }

        fn apply(&self, source: &PixelBuffer, _params: &EffectParams) -> Result<PixelBuffer> {
            Ok(filters::apply_pointwise(source, |s| s.color.map(|v| 255 - v)))
        }
    }

    fn gradient() -> PixelBuffer {
        PixelBuffer::from_fn(6, 6, |x, y| Rgb::new((x * 40) as u8, (y * 40) as u8, 90)).unwrap()
    }

    #[test]
    fn test_render_dispatches_every_builtin() {
        let img = gradient();
        let plugins = EffectRegistry::new();
        for kind in EffectKind::ALL {
            if !is_builtin(kind) {
                continue;
            }
            let params = EffectParams::from_text(kind, "1");
            let out = render(&img, &params, Some(&img), &plugins);
            assert!(out.is_ok(), "{} failed: {:?}", kind, out.err());
        }
    }

    #[test]
    fn test_render_subtraction_needs_operand() {
        let img = gradient();
        let err = render(&img, &EffectParams::Subtraction, None, &EffectRegistry::new()).unwrap_err();
        assert!(matches!(err, EffectError::MissingOperand));
    }

    #[test]
    fn test_lens_flare_unsupported_until_plugged() {
        let img = gradient();
        let params = EffectParams::LensFlare { x: 1.0, y: 2.0 };
        let mut plugins = EffectRegistry::new();
        assert!(matches!(
            render(&img, &params, None, &plugins),
            Err(EffectError::UnsupportedEffect(EffectKind::LensFlare))
        ));

        plugins.register(Box::new(Invert));
        let out = render(&img, &params, None, &plugins).unwrap();
        assert_eq!(out.get(0, 0), Rgb::new(255, 255, 165));
    }

    #[test]
    fn test_engine_requires_source() {
        let mut engine = Engine::new();
        assert!(matches!(
            engine.apply(&EffectParams::Greyscale, None),
            Err(EffectError::NoSourceImage)
        ));
        assert!(matches!(engine.promote_result(), Err(EffectError::NoResultImage)));
    }

    #[test]
    fn test_engine_failure_keeps_state() {
        let mut engine = Engine::new();
        engine.set_source(gradient());
        engine.apply(&EffectParams::Greyscale, None).unwrap();
        let before = engine.result().cloned();

        let err = engine
            .apply(&EffectParams::MedianFilter { radius: 11 }, None)
            .unwrap_err();
        assert!(matches!(err, EffectError::ParameterOutOfRange { .. }));
        assert_eq!(engine.result().cloned(), before);
        assert_eq!(engine.source(), Some(&gradient()));
    }

    #[test]
    fn test_engine_supports() {
        let mut engine = Engine::new();
        assert!(engine.supports(EffectKind::Thinning));
        assert!(!engine.supports(EffectKind::LensFlare));
        engine.register_effect(Box::new(Invert));
        assert!(engine.supports(EffectKind::LensFlare));
    }
}
