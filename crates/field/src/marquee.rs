//! Scrolling credit labels.
//!
//! An independent per-frame animation layered over the particle field: each
//! label drifts left at a constant speed, wraps back to the right edge once
//! it is fully off-screen, and cycles its color through a sinusoidal RGB
//! function of the frame count and label index.

use glam::DVec2;
use pixel_swarm_core::{Rgba, Shape};

/// Horizontal scroll speed in pixels per frame.
const SCROLL_SPEED: f64 = 2.0;
/// Approximate glyph advance used to estimate label width. Real text metrics
/// belong to the front-end renderer.
const CHAR_WIDTH: f64 = 14.0;
/// Vertical distance between label rows.
const LINE_HEIGHT: f64 = 28.0;
/// Baseline of the first row.
const TOP_MARGIN: f64 = 40.0;
/// Extra horizontal stagger between labels at startup.
const LABEL_GAP: f64 = 60.0;
/// Frame-to-phase factor for the color cycle.
const COLOR_FREQ: f64 = 0.02;
/// Phase offset between the R, G, and B channels.
const CHANNEL_PHASE: f64 = 2.0;

#[derive(Debug, Clone)]
struct Label {
    text: String,
    x: f64,
    y: f64,
}

/// A set of left-scrolling, color-cycling text labels.
#[derive(Debug, Clone)]
pub struct Marquee {
    canvas_width: f64,
    labels: Vec<Label>,
}

impl Marquee {
    /// Creates a marquee starting just past the right edge, one row per label.
    pub fn new(texts: &[String], canvas_width: f64) -> Self {
        let labels = texts
            .iter()
            .enumerate()
            .map(|(i, text)| Label {
                text: text.clone(),
                x: canvas_width + i as f64 * LABEL_GAP,
                y: TOP_MARGIN + i as f64 * LINE_HEIGHT,
            })
            .collect();
        Self {
            canvas_width,
            labels,
        }
    }

    /// Number of labels.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether there are no labels to animate.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Advances every label by one frame.
    ///
    /// A label wraps to the right edge only once its estimated extent has
    /// passed fully off the left side.
    pub fn step(&mut self) {
        for label in &mut self.labels {
            label.x -= SCROLL_SPEED;
            if label.x + estimated_width(&label.text) < 0.0 {
                label.x = self.canvas_width;
            }
        }
    }

    /// Updates the wrap edge after a canvas resize.
    pub fn resize(&mut self, canvas_width: f64) {
        self.canvas_width = canvas_width;
    }

    /// Draw commands for the current frame, colored by the cycle function.
    pub fn shapes(&self, frame: u64) -> Vec<Shape> {
        self.labels
            .iter()
            .enumerate()
            .map(|(i, label)| Shape::Label {
                text: label.text.clone(),
                position: DVec2::new(label.x, label.y),
                color: cycle_color(frame, i),
            })
            .collect()
    }
}

/// Estimated pixel width of a label's text.
fn estimated_width(text: &str) -> f64 {
    text.chars().count() as f64 * CHAR_WIDTH
}

/// Sinusoidal RGB cycle over frame count and label index.
///
/// Each channel is `sin` of the same phase shifted by [`CHANNEL_PHASE`],
/// remapped from [-1, 1] to [0, 255].
fn cycle_color(frame: u64, index: usize) -> Rgba {
    let t = frame as f64 * COLOR_FREQ + index as f64;
    let channel = |phase: f64| (((t + phase).sin() * 0.5 + 0.5) * 255.0).round() as u8;
    Rgba::opaque(
        channel(0.0),
        channel(CHANNEL_PHASE),
        channel(2.0 * CHANNEL_PHASE),
    )
}
