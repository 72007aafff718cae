//! The core `Sketch` trait that every canvas animation must implement.
//!
//! The trait is object-safe so sketches can be used as `dyn Sketch` for
//! runtime switching between animations.

use crate::error::SketchError;
use crate::input::FrameInput;
use crate::scene::Scene;
use serde_json::Value;

/// Core trait for frame-driven canvas sketches.
///
/// Each sketch is a `step`-based simulation: the render-loop driver samples
/// one [`FrameInput`] per display refresh, advances the sketch, and draws
/// the [`Scene`] projection. All mutation happens inside `step`; `scene` is
/// a read-only projection of current state.
///
/// This trait is **object-safe**: you can use `Box<dyn Sketch>` or
/// `&dyn Sketch` for runtime polymorphism.
pub trait Sketch {
    /// Advance the animation by one frame.
    fn step(&mut self, input: &FrameInput) -> Result<(), SketchError>;

    /// The draw commands for the current state.
    fn scene(&self) -> Scene;

    /// Current parameter values as a JSON object.
    fn params(&self) -> Value;

    /// Schema describing all available parameters, their types, ranges, and defaults.
    fn param_schema(&self) -> Value;
}
