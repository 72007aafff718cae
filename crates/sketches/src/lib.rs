#![deny(unsafe_code)]
//! Sketch registry: maps sketch names to implementations and provides
//! CPU-side scene rasterization.
//!
//! This crate sits between `pixel-swarm-core` (which defines the `Sketch`
//! trait) and the individual sketch crates (`pixel-swarm-field`,
//! `pixel-swarm-road`). The CLI depends on this crate to avoid duplicating
//! dispatch logic.

pub mod raster;

#[cfg(feature = "png")]
pub mod snapshot;

use pixel_swarm_core::error::SketchError;
use pixel_swarm_core::image::PixelImage;
use pixel_swarm_core::input::FrameInput;
use pixel_swarm_core::scene::Scene;
use pixel_swarm_core::Sketch;
use serde_json::Value;

/// All available sketch names.
const SKETCH_NAMES: &[&str] = &["field", "road"];

/// Enumeration of all available canvas sketches.
///
/// Wraps each sketch implementation and delegates `Sketch` trait methods.
/// Use [`SketchKind::from_name`] for string-based construction (CLI).
pub enum SketchKind {
    /// Mouse-reactive particle field seeded from a source image.
    Field(pixel_swarm_field::ParticleField),
    /// Static car-on-a-road scene. Ignores the source image and seed.
    Road(pixel_swarm_road::RoadScene),
}

impl SketchKind {
    /// Constructs a sketch by name.
    ///
    /// Returns `SketchError::UnknownSketch` if the name is not recognized.
    pub fn from_name(
        name: &str,
        image: &PixelImage,
        width: usize,
        height: usize,
        seed: u64,
        params: &Value,
    ) -> Result<Self, SketchError> {
        match name {
            "field" => Ok(SketchKind::Field(
                pixel_swarm_field::ParticleField::from_json(image, width, height, seed, params)?,
            )),
            "road" => Ok(SketchKind::Road(pixel_swarm_road::RoadScene::from_json(
                width, height, params,
            )?)),
            _ => Err(SketchError::UnknownSketch(name.to_string())),
        }
    }

    /// Returns a slice of all recognized sketch names.
    pub fn list_sketches() -> &'static [&'static str] {
        SKETCH_NAMES
    }
}

impl Sketch for SketchKind {
    fn step(&mut self, input: &FrameInput) -> Result<(), SketchError> {
        match self {
            SketchKind::Field(s) => s.step(input),
            SketchKind::Road(s) => s.step(input),
        }
    }

    fn scene(&self) -> Scene {
        match self {
            SketchKind::Field(s) => s.scene(),
            SketchKind::Road(s) => s.scene(),
        }
    }

    fn params(&self) -> Value {
        match self {
            SketchKind::Field(s) => s.params(),
            SketchKind::Road(s) => s.params(),
        }
    }

    fn param_schema(&self) -> Value {
        match self {
            SketchKind::Field(s) => s.param_schema(),
            SketchKind::Road(s) => s.param_schema(),
        }
    }
}
