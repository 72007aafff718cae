//! Structured CLI errors with meaningful exit codes.
//!
//! Exit code scheme:
//! - 0:  success
//! - 2:  clap arg parse error (automatic, before our code runs)
//! - 10: sketch error (unknown sketch, step failure, bad dimensions)
//! - 11: I/O error (image decode, snapshot write)
//! - 12: bad `--params` value
//! - 13: output serialization error

use pixel_swarm_core::SketchError;
use thiserror::Error;

/// Errors produced by CLI operations, each mapped to a distinct exit code.
#[derive(Debug, Error)]
pub enum CliError {
    /// A sketch-level error (unknown sketch, step failure, bad dimensions).
    #[error(transparent)]
    Sketch(SketchError),
    /// An I/O error (source image decode, snapshot write).
    #[error("{0}")]
    Io(String),
    /// The `--params` value failed to parse or was not a JSON object.
    #[error("invalid --params: {0}")]
    Params(String),
    /// JSON output serialization failed.
    #[error("output serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CliError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Sketch(_) => 10,
            CliError::Io(_) => 11,
            CliError::Params(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }
}

impl From<SketchError> for CliError {
    fn from(e: SketchError) -> Self {
        match e {
            SketchError::Io(msg) => CliError::Io(msg),
            other => CliError::Sketch(other),
        }
    }
}
