//! Command-line interface module.
//!
//! - [`serve`]: the HTTP server
//! - [`render`]: one artifact to a file or stdout
//! - [`url`]: the artifact URL for a request

mod args;
pub mod render;
pub mod serve;
pub mod url;

pub use args::{Cli, Commands, RequestArgs};

use anyhow::{Result, anyhow};

use crate::config::AppConfig;
use crate::core::{EncodingRequest, Origin, PathPrefix, fallback_payload, normalize};

/// Origin and prefix for an offline command: `--origin` when given, the
/// configured listener otherwise.
fn resolve_origin(args: &RequestArgs, config: &AppConfig) -> Result<(Origin, PathPrefix)> {
    match args.origin.as_deref() {
        Some(base) => Origin::parse(base, &config.path_prefix())
            .ok_or_else(|| anyhow!("invalid origin `{base}`: expected an absolute http(s) URL")),
        None => Ok((config.local_origin(), config.path_prefix())),
    }
}

/// Normalize command-line parameters the way the endpoint normalizes a
/// query string. Without `--data` the payload is the service root.
fn offline_request(args: &RequestArgs, config: &AppConfig) -> Result<(Origin, EncodingRequest)> {
    let (origin, prefix) = resolve_origin(args, config)?;
    let root = format!("{origin}/");
    let fallback = fallback_payload(&origin, &prefix, &root);
    let request = normalize(
        args.data.as_deref(),
        args.size.as_deref(),
        args.format.as_deref(),
        &fallback,
    );
    Ok((origin, request))
}
