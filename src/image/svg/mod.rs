//! SVG output.
//!
//! # Modules
//!
//! - [`write`]: symbol to raw SVG document (quick-xml)
//! - [`optimize`]: fixpoint minification (usvg + quick-xml)
//!
//! ```text
//! QrMatrix ──► write_svg ──► raw SVG ──► optimize ──► served bytes
//! ```

mod optimize;
mod write;

pub use optimize::{OptimizationError, OptimizeOptions, optimize};
pub use write::write_svg;
