//! `url` command: print the canonical artifact URL.

use anyhow::Result;

use super::{RequestArgs, offline_request};
use crate::config::AppConfig;
use crate::core::ArtifactUrl;

/// Print the URL the page would embed for these parameters.
pub fn print_url(args: &RequestArgs, config: &AppConfig) -> Result<()> {
    println!("{}", artifact_url(args, config)?);
    Ok(())
}

fn artifact_url(args: &RequestArgs, config: &AppConfig) -> Result<ArtifactUrl> {
    let (origin, request) = offline_request(args, config)?;
    Ok(ArtifactUrl::build(&origin, &request))
}
