//! `render` command: run the artifact pipeline without a server.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use super::{RequestArgs, offline_request};
use crate::artifact::{self, Artifact, EncoderOptions};
use crate::config::AppConfig;
use crate::log;

/// Encode one artifact and write it to `output`, or to stdout.
pub fn render_artifact(
    args: &RequestArgs,
    output: Option<&Path>,
    config: &AppConfig,
) -> Result<()> {
    let artifact = encode(args, config)?;

    match output {
        Some(path) => {
            std::fs::write(path, &artifact.body)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            log!(
                "render";
                "{} ({} bytes, {})",
                path.display(),
                artifact.body.len(),
                artifact.format.content_type()
            );
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&artifact.body)?;
            stdout.flush()?;
        }
    }
    Ok(())
}

fn encode(args: &RequestArgs, config: &AppConfig) -> Result<Artifact> {
    let (_, request) = offline_request(args, config)?;
    let artifact = artifact::encode(&request, &EncoderOptions::from_config(config))?;
    Ok(artifact)
}
