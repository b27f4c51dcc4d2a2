//! Artifacts: the PNG or SVG bytes behind an artifact URL.
//!
//! ```text
//! EncodingRequest ──► encode ──► Result<Artifact, ArtifactError> ──► respond ──► ArtifactResponse
//! ```

mod encode;
mod error;
mod respond;

pub use encode::{Artifact, EncoderOptions, encode};
pub use error::{ArtifactError, EncodingError};
pub use respond::{CACHE_IMMUTABLE, CACHE_NONE, etag, respond};
