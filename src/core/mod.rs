//! Core types - request normalization, context and URLs shared across the
//! server, the CLI and the views.

mod context;
mod request;
mod state;
mod url;

pub use context::{Origin, PathPrefix, RenderContext, fallback_payload};
pub use request::{EncodingRequest, Format, normalize};
pub use state::{is_shutdown, register_server, setup_shutdown_handler};
pub use url::{ARTIFACT_PATH, ArtifactUrl, request_path};
