//! Encoder outcome to HTTP-shaped response.

use crate::core::EncodingRequest;
use crate::utils::mime;

use super::{Artifact, ArtifactError, EncoderOptions};

/// Cache policy for successful artifacts. Equal URLs always yield equal
/// bytes, so these may be cached freely.
pub const CACHE_IMMUTABLE: &str = "public, max-age=86400";

/// Cache policy for failures.
pub const CACHE_NONE: &str = "no-store";

/// Status, content type and body of an artifact response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactResponse {
    pub status: u16,
    pub content_type: &'static str,
    pub cache_control: &'static str,
    pub body: Vec<u8>,
}

impl ArtifactResponse {
    #[inline]
    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}

/// Map an encoding outcome onto a response.
///
/// Success carries the format's content type and the raw bytes; any
/// failure becomes a 500 with the error's message as plain text.
pub fn respond(result: Result<Artifact, ArtifactError>) -> ArtifactResponse {
    match result {
        Ok(artifact) => ArtifactResponse {
            status: 200,
            content_type: artifact.format.content_type(),
            cache_control: CACHE_IMMUTABLE,
            body: artifact.body,
        },
        Err(err) => ArtifactResponse {
            status: 500,
            content_type: mime::types::PLAIN,
            cache_control: CACHE_NONE,
            body: err.to_string().into_bytes(),
        },
    }
}

/// Strong validator for an artifact: blake3 over the canonical request and
/// the encoder options, quoted as HTTP requires.
pub fn etag(request: &EncodingRequest, options: &EncoderOptions) -> String {
    let width = request.width().to_string();
    let ec_level = format!("{:?}", options.ec_level);
    let margin = options.margin.to_string();
    let passes = options.max_passes.to_string();

    let mut hasher = blake3::Hasher::new();
    for part in [
        request.payload(),
        width.as_str(),
        request.format().as_str(),
        ec_level.as_str(),
        margin.as_str(),
        passes.as_str(),
    ] {
        hasher.update(&(part.len() as u64).to_le_bytes());
        hasher.update(part.as_bytes());
    }
    format!("\"{}\"", &hasher.finalize().to_hex()[..16])
}
