#![deny(unsafe_code)]
//! Core types and traits for the pixel-swarm canvas sketches.
//!
//! Provides the `Sketch` trait, the `Scene`/`Shape` draw-command model,
//! the `PixelImage` source-image type, the `Rgba` color type, per-frame
//! `FrameInput`, the `AudioSink`/`SoundToggle` playback seam, `Xorshift64`
//! PRNG, and parameter helpers.

pub mod audio;
pub mod color;
pub mod error;
pub mod image;
pub mod input;
pub mod params;
pub mod prng;
pub mod scene;
pub mod sketch;

pub use audio::{AudioSink, SoundToggle};
pub use color::Rgba;
pub use error::SketchError;
pub use image::PixelImage;
pub use input::FrameInput;
pub use prng::Xorshift64;
pub use scene::{Scene, Shape};
pub use sketch::Sketch;
