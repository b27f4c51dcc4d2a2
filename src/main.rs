//! qr-placeholder - QR code placeholder images over HTTP.

#![allow(dead_code)]

mod artifact;
mod cli;
mod config;
mod core;
mod embed;
mod image;
mod logger;
mod qr;
mod utils;
mod view;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::{AppConfig, cfg, init_config};

fn main() -> Result<()> {
    // Setup global Ctrl+C handler (before any blocking operations)
    core::setup_shutdown_handler()?;

    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = init_config(AppConfig::load(&cli)?);

    match &cli.command {
        Commands::Serve { .. } => cli::serve::bind_server(&config)?.run(cfg),
        Commands::Render { request, output } => {
            cli::render::render_artifact(request, output.as_deref(), &config)
        }
        Commands::Url { request } => cli::url::print_url(request, &config),
    }
}
