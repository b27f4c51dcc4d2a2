use thiserror::Error;

use crate::image::svg::OptimizationError;
use crate::qr::QrError;

/// The request can't be turned into a symbol image.
#[derive(Debug, Error)]
pub enum EncodingError {
    #[error("width must be a positive number of pixels, got {0}")]
    NonPositiveWidth(i32),
    #[error(transparent)]
    Capacity(#[from] QrError),
    #[error("failed to render PNG: {0}")]
    Raster(#[from] ::image::ImageError),
    #[error("failed to write SVG: {0}")]
    Vector(String),
}

/// Everything that can go wrong between a request and its bytes.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error(transparent)]
    Encoding(#[from] EncodingError),
    #[error("SVG optimization error: {0}")]
    Optimization(#[from] OptimizationError),
}
