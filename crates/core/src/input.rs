//! Per-frame input sampled by the render-loop driver.
//!
//! Instead of sketches reading ambient mouse/keyboard globals, the driver
//! collects one [`FrameInput`] per frame and passes it to `Sketch::step`.
//! This keeps the physics core deterministic and testable: feed fixed
//! inputs, assert on the resulting state.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Input for one frame step.
///
/// `explode` and `toggle_overlay` are edge-triggered: they represent a key
/// press that occurred since the previous frame, not a held key.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FrameInput {
    /// Pointer position in canvas coordinates. Positions outside the canvas
    /// are valid; distances are computed the same way.
    pub pointer: DVec2,
    /// One-shot radial impulse request (spacebar in the original interaction).
    pub explode: bool,
    /// Flip the hover-radius debug overlay.
    pub toggle_overlay: bool,
}

impl FrameInput {
    /// Input with the pointer at `(x, y)` and no key events.
    pub fn at_pointer(x: f64, y: f64) -> Self {
        Self {
            pointer: DVec2::new(x, y),
            ..Self::default()
        }
    }

    /// Returns a copy with the explode flag set.
    pub fn with_explode(mut self) -> Self {
        self.explode = true;
        self
    }

    /// Returns a copy with the overlay-toggle flag set.
    pub fn with_toggle_overlay(mut self) -> Self {
        self.toggle_overlay = true;
        self
    }
}
