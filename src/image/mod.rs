//! Symbol rendering.
//!
//! # Modules
//!
//! - [`raster`]: PNG output through the `image` crate
//! - [`svg`]: SVG output and optimization (quick-xml + usvg)

pub mod raster;
pub mod svg;

/// Pixels per module when the requested width is smaller than the symbol.
pub const FALLBACK_SCALE: u32 = 4;

/// Edge length in pixels and module scale for a requested width.
///
/// A width at least as large as `dimension` (modules, quiet zone included)
/// is honored exactly; anything smaller renders at [`FALLBACK_SCALE`].
pub fn pixel_size(width: u32, dimension: usize) -> u32 {
    let dimension = dimension as u32;
    if width >= dimension {
        width
    } else {
        dimension * FALLBACK_SCALE
    }
}
