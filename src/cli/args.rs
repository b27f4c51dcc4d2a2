//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// QR code placeholder image service
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: qr-placeholder.toml)
    #[arg(short = 'C', long, default_value = "qr-placeholder.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run the HTTP server
    #[command(visible_alias = "s")]
    Serve {
        /// Network interface to bind (e.g., 127.0.0.1, 0.0.0.0)
        #[arg(short, long)]
        interface: Option<std::net::IpAddr>,

        /// Port number to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Path prefix when mounted behind a reverse proxy (e.g., /qr)
        #[arg(long)]
        prefix: Option<String>,

        /// Log every request
        #[arg(short = 'V', long)]
        verbose: bool,
    },

    /// Encode one artifact and write it to a file or stdout
    #[command(visible_alias = "r")]
    Render {
        #[command(flatten)]
        request: RequestArgs,

        /// Output file (default: stdout)
        #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
        output: Option<PathBuf>,
    },

    /// Print the artifact URL for a request
    #[command(visible_alias = "u")]
    Url {
        #[command(flatten)]
        request: RequestArgs,
    },
}

/// Raw request parameters, accepted exactly as the HTTP endpoint does.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct RequestArgs {
    /// Text to encode (default: the service root URL)
    #[arg(short, long)]
    pub data: Option<String>,

    /// Width in pixels (default: 300, at most 9999)
    #[arg(short, long, allow_hyphen_values = true)]
    pub size: Option<String>,

    /// Image format: png or svg (default: png)
    #[arg(short, long)]
    pub format: Option<String>,

    /// Public base URL of the service (default: the configured listener)
    #[arg(long, value_hint = clap::ValueHint::Url)]
    pub origin: Option<String>,
}

#[allow(unused)]
impl Cli {
    pub const fn is_serve(&self) -> bool {
        matches!(self.command, Commands::Serve { .. })
    }
}
