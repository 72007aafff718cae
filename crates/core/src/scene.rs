//! Scene and shape draw-command model.
//!
//! A [`Scene`] is the pure render projection of a sketch: canvas dimensions,
//! a background color, and an ordered list of [`Shape`] draw commands. The
//! physics core never touches a display surface; drivers (the CPU rasterizer,
//! a future GPU or web front end) consume scenes instead.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::color::Rgba;

/// A single draw command, rendered in list order (later shapes on top).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Shape {
    /// A filled circle.
    Circle {
        center: DVec2,
        radius: f64,
        color: Rgba,
    },
    /// A stroked circle outline (the hover-radius debug overlay).
    Ring {
        center: DVec2,
        radius: f64,
        color: Rgba,
    },
    /// A filled axis-aligned rectangle, optionally with rounded corners.
    /// `position` is the top-left corner; `size` is (width, height).
    Rect {
        position: DVec2,
        size: DVec2,
        corner_radius: f64,
        color: Rgba,
    },
    /// A filled axis-aligned ellipse. `radii` is (rx, ry).
    Ellipse {
        center: DVec2,
        radii: DVec2,
        color: Rgba,
    },
    /// A text label anchored at its left baseline. Rasterization is left to
    /// text-capable front ends; the CPU rasterizer skips labels.
    Label {
        text: String,
        position: DVec2,
        color: Rgba,
    },
}

/// Canvas dimensions, background color, and an ordered shape list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    width: usize,
    height: usize,
    background: Rgba,
    shapes: Vec<Shape>,
}

impl Scene {
    /// Creates an empty scene. Dimension validation belongs to sketch
    /// construction; a zero-sized scene simply rasterizes to nothing.
    pub fn new(width: usize, height: usize, background: Rgba) -> Self {
        Self {
            width,
            height,
            background,
            shapes: Vec::new(),
        }
    }

    /// Canvas width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Canvas height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Background color, painted before any shape.
    pub fn background(&self) -> Rgba {
        self.background
    }

    /// Appends a shape on top of the current list.
    pub fn push(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    /// Shapes in draw order (index 0 drawn first).
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }
}
