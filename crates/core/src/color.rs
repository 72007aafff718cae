//! RGBA color type for sampled pixels and draw commands.
//!
//! Colors are 8-bit per channel, matching the decoded source-image buffers
//! they are sampled from. Serializes as a hex string (`"#rrggbbaa"`) for
//! human-readable formats.

use crate::error::SketchError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Opaque black, the default scene background.
    pub const BLACK: Rgba = Rgba::opaque(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Rgba = Rgba::opaque(255, 255, 255);

    /// Creates a color from four channel values.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Rgba {
        Rgba { r, g, b, a }
    }

    /// Creates a fully opaque color.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Rgba {
        Rgba { r, g, b, a: 255 }
    }

    /// Whether the color has zero alpha.
    ///
    /// Image sampling uses this to skip pixels that would be invisible.
    pub fn is_transparent(self) -> bool {
        self.a == 0
    }

    /// Parses a hex color string like `"#ff00aa"` or `"#ff00aa80"`
    /// (case insensitive, `#` optional). A 6-digit string gets alpha 255.
    ///
    /// Returns `SketchError::InvalidColor` for any other input.
    pub fn from_hex(hex: &str) -> Result<Rgba, SketchError> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 && hex.len() != 8 {
            return Err(SketchError::InvalidColor(format!(
                "expected 6 or 8 hex digits, got {}",
                hex.len()
            )));
        }
        let channel = |range: std::ops::Range<usize>, name: &str| {
            u8::from_str_radix(&hex[range], 16)
                .map_err(|e| SketchError::InvalidColor(format!("invalid {name} component: {e}")))
        };
        let r = channel(0..2, "red")?;
        let g = channel(2..4, "green")?;
        let b = channel(4..6, "blue")?;
        let a = if hex.len() == 8 {
            channel(6..8, "alpha")?
        } else {
            255
        };
        Ok(Rgba { r, g, b, a })
    }

    /// Formats the color as a hex string like `"#rrggbbaa"`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }
}

impl Serialize for Rgba {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgba {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Rgba::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
