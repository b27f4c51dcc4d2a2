//! Service configuration management for `qr-placeholder.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── serve      # [serve]
//! │   ├── qr         # [qr]
//! │   └── svg        # [svg]
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError, ConfigDiagnostics
//! │   └── handle     # Global config handle
//! └── mod.rs         # AppConfig (this file)
//! ```
//!
//! # Precedence
//!
//! CLI flag > environment (`url_prefix`) > config file > default.
//! A missing config file is not an error; every section has defaults.

pub mod section;
pub mod types;
mod util;

use util::{find_config_file, resolve_path};

pub use section::{QrConfig, ServeConfig, SvgConfig};
pub use types::{ConfigDiagnostics, ConfigError, cfg, init_config};

use crate::{
    cli::{Cli, Commands},
    core::{Origin, PathPrefix},
    debug, log,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    net::SocketAddr,
    path::{Path, PathBuf},
};

/// Environment variable naming the reverse-proxy subpath.
pub const PREFIX_ENV: &str = "url_prefix";

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing qr-placeholder.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Absolute path to the config file, existing or not (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Directory relative paths resolve against (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// HTTP server settings
    #[serde(default)]
    pub serve: ServeConfig,

    /// Symbol settings
    #[serde(default)]
    pub qr: QrConfig,

    /// Vector optimizer settings
    #[serde(default)]
    pub svg: SvgConfig,
}

impl AppConfig {
    /// Load configuration for `cli`.
    ///
    /// Searches upward from cwd for the config file. Without one, defaults
    /// apply and the current directory becomes the root.
    pub fn load(cli: &Cli) -> Result<Self> {
        let (config_path, exists) = Self::resolve_config_path(cli)?;

        let mut config = if exists {
            Self::from_path(&config_path)?
        } else {
            debug!("config"; "{} not found, using defaults", cli.config.display());
            Self::default()
        };

        config.config_path = config_path;
        config.finalize(cli, std::env::var(PREFIX_ENV).ok());
        config.validate()?;

        Ok(config)
    }

    /// Resolve config file path, falling back to `cwd/<name>` when absent.
    fn resolve_config_path(cli: &Cli) -> Result<(PathBuf, bool)> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;

        match find_config_file(&cli.config) {
            Some(path) => Ok((path, true)),
            None => Ok((cwd.join(&cli.config), false)),
        }
    }

    /// Merge environment and CLI over the file values, then normalize.
    fn finalize(&mut self, cli: &Cli, env_prefix: Option<String>) {
        self.root = self
            .config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        if let Some(prefix) = env_prefix.filter(|p| !p.trim().is_empty()) {
            self.serve.path_prefix = prefix;
        }
        self.apply_command_options(cli);

        self.serve.path_prefix = PathPrefix::new(&self.serve.path_prefix).to_string();
        self.serve.static_dir = resolve_path(&self.serve.static_dir, &self.root);
    }

    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::from)?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::from)?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {field}");
        }
    }

    /// Mount path for routes and artifact URLs.
    pub fn path_prefix(&self) -> PathPrefix {
        PathPrefix::new(&self.serve.path_prefix)
    }

    pub fn static_dir(&self) -> &Path {
        &self.serve.static_dir
    }

    /// Address the server binds first.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.serve.interface, self.serve.port)
    }

    /// Origin of the configured listener, e.g. `http://127.0.0.1:8000/qr`.
    ///
    /// Offline commands use this when no `--origin` is given.
    pub fn local_origin(&self) -> Origin {
        Origin::new("http", &self.socket_addr().to_string(), &self.path_prefix())
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Apply command-specific configuration options.
    fn apply_command_options(&mut self, cli: &Cli) {
        match &cli.command {
            Commands::Serve {
                interface,
                port,
                prefix,
                verbose,
            } => {
                crate::logger::set_verbose(*verbose);
                Self::update_option(&mut self.serve.interface, interface.as_ref());
                Self::update_option(&mut self.serve.port, port.as_ref());
                Self::update_option(&mut self.serve.path_prefix, prefix.as_ref());
            }
            // Offline commands take their origin from flags, not the config
            Commands::Render { .. } | Commands::Url { .. } => {}
        }
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate the merged configuration.
    ///
    /// Collects all validation errors and returns them at once.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut diag = ConfigDiagnostics::new();

        if self.serve.port == 0 {
            diag.error("serve.port", "port must be between 1 and 65535");
        }
        if self.serve.threads == 0 {
            diag.error_with_hint(
                "serve.threads",
                "at least one worker thread is required",
                "the default is 4",
            );
        }
        if self.serve.path_prefix.contains(['?', '#']) {
            diag.error(
                "serve.path_prefix",
                format!("`{}` must be a plain path", self.serve.path_prefix),
            );
        }
        if self.qr.margin > section::MAX_MARGIN {
            diag.error_with_hint(
                "qr.margin",
                format!("quiet zone of {} modules is too large", self.qr.margin),
                format!("use at most {} modules", section::MAX_MARGIN),
            );
        }
        if !section::PASS_RANGE.contains(&self.svg.max_passes) {
            diag.error(
                "svg.max_passes",
                format!(
                    "must be between {} and {}",
                    section::PASS_RANGE.start(),
                    section::PASS_RANGE.end()
                ),
            );
        }

        diag.into_result()
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config text. Panics on unknown fields to catch typos in tests.
#[cfg(test)]
pub fn test_parse_config(content: &str) -> AppConfig {
    let (parsed, ignored) = AppConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================
