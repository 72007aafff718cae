//! PNG snapshot of a [`Scene`] and source-image decoding.
//!
//! Feature-gated behind `png` (default on) so front ends with their own
//! image pipeline can depend on this crate without pulling in the `image`
//! crate. The pixel buffer conversion itself lives in [`crate::raster`]
//! (always available).

use pixel_swarm_core::error::SketchError;
use pixel_swarm_core::image::PixelImage;
use pixel_swarm_core::scene::Scene;
use std::path::Path;

use crate::raster::scene_to_rgba;

/// Writes a rasterized scene as a PNG image.
///
/// Returns `SketchError::InvalidDimensions` if the scene dimensions overflow
/// `u32`, or `SketchError::Io` on write failure.
pub fn write_png(scene: &Scene, path: &Path) -> Result<(), SketchError> {
    let rgba = scene_to_rgba(scene);
    let w = u32::try_from(scene.width()).map_err(|_| SketchError::InvalidDimensions)?;
    let h = u32::try_from(scene.height()).map_err(|_| SketchError::InvalidDimensions)?;
    let img = image::RgbaImage::from_raw(w, h, rgba)
        .ok_or_else(|| SketchError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| SketchError::Io(e.to_string()))
}

/// Decodes an image file into the RGBA8 buffer sketches sample from.
///
/// Returns `SketchError::Io` if the file cannot be read or decoded.
pub fn load_image(path: &Path) -> Result<PixelImage, SketchError> {
    let img = image::open(path)
        .map_err(|e| SketchError::Io(e.to_string()))?
        .to_rgba8();
    PixelImage::from_raw(img.width() as usize, img.height() as usize, img.into_raw())
}
