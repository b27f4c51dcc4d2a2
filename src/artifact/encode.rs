//! Request to artifact bytes.

use crate::config::AppConfig;
use crate::core::{EncodingRequest, Format};
use crate::image::{raster, svg};
use crate::qr::{self, EcLevel};

use super::{ArtifactError, EncodingError};

/// Encoder settings that come from configuration, not from the request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EncoderOptions {
    pub ec_level: EcLevel,
    /// Quiet zone, in modules.
    pub margin: usize,
    pub max_passes: usize,
}

impl Default for EncoderOptions {
    fn default() -> Self {
        Self {
            ec_level: EcLevel::M,
            margin: 4,
            max_passes: 10,
        }
    }
}

impl EncoderOptions {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            ec_level: config.qr.ec_level,
            margin: config.qr.margin,
            max_passes: config.svg.max_passes,
        }
    }
}

/// Encoded image, ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub format: Format,
    pub body: Vec<u8>,
}

/// Encode `request` into PNG bytes or an optimized SVG document.
///
/// Fails without producing any bytes when the width is not positive, the
/// payload exceeds version 40 capacity, or the optimizer rejects the
/// document. An optimizer failure is never replaced by the raw SVG.
pub fn encode(
    request: &EncodingRequest,
    options: &EncoderOptions,
) -> Result<Artifact, ArtifactError> {
    let width = u32::try_from(request.width())
        .ok()
        .filter(|&w| w > 0)
        .ok_or(EncodingError::NonPositiveWidth(request.width()))?;

    let matrix = qr::encode(request.payload(), options.ec_level).map_err(EncodingError::from)?;

    let body = match request.format() {
        Format::Raster => {
            raster::render_png(&matrix, width, options.margin).map_err(EncodingError::from)?
        }
        Format::Vector => {
            let raw =
                svg::write_svg(&matrix, width, options.margin).map_err(EncodingError::Vector)?;
            let optimize = svg::OptimizeOptions {
                max_passes: options.max_passes,
            };
            svg::optimize(&raw, &optimize)?.into_bytes()
        }
    };

    Ok(Artifact {
        format: request.format(),
        body,
    })
}
