//! Decoded RGBA source image used to seed particle fields.
//!
//! A `PixelImage` stores `width * height` pixels as a row-major RGBA8 byte
//! buffer, the format produced by the image-decoding collaborator. It is
//! read-only after construction: sketches sample it once during setup.

use crate::color::Rgba;
use crate::error::SketchError;

/// A decoded image: dimensions plus a row-major RGBA8 byte buffer.
#[derive(Debug, Clone)]
pub struct PixelImage {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl PixelImage {
    /// Creates an image from a pre-decoded RGBA byte buffer.
    ///
    /// Returns `SketchError::InvalidDimensions` if either dimension is zero
    /// or `width * height * 4` overflows, and `SketchError::ImageBufferMismatch`
    /// if the buffer length does not match the dimensions.
    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> Result<Self, SketchError> {
        if width == 0 || height == 0 {
            return Err(SketchError::InvalidDimensions);
        }
        let expected = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(4))
            .ok_or(SketchError::InvalidDimensions)?;
        if data.len() != expected {
            return Err(SketchError::ImageBufferMismatch {
                width,
                height,
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Creates an image filled with a single color. Mostly useful in tests.
    pub fn solid(width: usize, height: usize, color: Rgba) -> Result<Self, SketchError> {
        if width == 0 || height == 0 {
            return Err(SketchError::InvalidDimensions);
        }
        let len = width
            .checked_mul(height)
            .ok_or(SketchError::InvalidDimensions)?;
        let mut data = Vec::with_capacity(len * 4);
        for _ in 0..len {
            data.extend_from_slice(&[color.r, color.g, color.b, color.a]);
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Read-only access to the underlying row-major RGBA8 bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Samples the pixel at `(x, y)`, or `None` if out of bounds.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y * self.width + x) * 4;
        Some(Rgba::new(
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ))
    }
}
