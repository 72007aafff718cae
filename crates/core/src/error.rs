//! Error types for the pixel-swarm core.

use thiserror::Error;

/// Errors produced by sketch operations.
#[derive(Debug, Error)]
pub enum SketchError {
    /// Width or height was zero when creating a sketch or image.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// A requested sketch name was not recognized by the registry.
    #[error("unknown sketch: {0}")]
    UnknownSketch(String),

    /// An RGBA byte buffer did not match the declared image dimensions.
    #[error("image buffer mismatch: {width}x{height} needs {expected} bytes, got {got}")]
    ImageBufferMismatch {
        width: usize,
        height: usize,
        expected: usize,
        got: usize,
    },

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// An I/O failure while reading a source image or writing a snapshot.
    #[error("i/o error: {0}")]
    Io(String),
}
